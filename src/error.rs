//! Error types for the pipeline and the mesh kernel

use failure::Fail;

#[derive(Debug, Fail)]
pub enum RenderError {
    #[fail(display = "framebuffer dimensions must be non-zero, got {}x{}", _0, _1)]
    InvalidDimensions(u32, u32),
    #[fail(display = "{} is not a supported sample count (expected 1, 2, 4, 8 or 16)", _0)]
    InvalidSampleCount(u32),
    #[fail(display = "{} bytes is invalid for a {}x{} RGBA8 image", _0, _1, _2)]
    InvalidImageSize(usize, u32, u32),
    #[fail(display = "a texture requires at least one mip level")]
    EmptyTexture,
    #[fail(display = "vertex range {}..{} is out of bounds for a buffer of {}", _0, _1, _2)]
    VertexRangeOutOfBounds(usize, usize, usize),
    #[fail(display = "index range {}..{} is out of bounds for a buffer of {}", _0, _1, _2)]
    IndexRangeOutOfBounds(usize, usize, usize),
}

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Fail)]
pub enum MeshError {
    #[fail(display = "a face requires at least 3 vertices, got {}", _0)]
    FaceTooSmall(usize),
    #[fail(display = "vertex id {} does not name a live vertex", _0)]
    DeadVertex(usize),
    #[fail(display = "vertices {} and {} are not connected by an edge", _0, _1)]
    NotAdjacent(usize, usize),
    #[fail(display = "face {} is not a triangle", _0)]
    NotTriangular(usize),
}

pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Debug, Fail)]
pub enum SplineError {
    #[fail(display = "knot vector of {} entries cannot carry {} control points", _0, _1)]
    InvalidKnotVector(usize, usize),
    #[fail(display = "knot value {} lies outside the existing knot range", _0)]
    KnotOutOfRange(f32),
}
