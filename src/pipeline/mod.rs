//! Rendering pipeline: primitive assembly, rasterization and framebuffer
//! ownership.
//!
//! A [`Pipeline`] owns its color and depth planes and all bound state
//! (vertex/index buffers, topology, shader, cull configuration). A draw
//! call walks the bound buffer in index order, assembles primitives for
//! the bound topology and hands them to the rasterizers in
//! [`raster`]. Nothing here suspends or blocks; a draw call is a bounded,
//! single-threaded computation.

pub mod framebuffer;
pub mod raster;
pub mod sample;

pub use self::framebuffer::Framebuffer;
pub use self::sample::sample_offsets;

use log::debug;

use crate::error::{RenderError, RenderResult};
use crate::math::{Vec3, Vec4, Vertex};
use crate::shader::GouraudShader;

/// How a draw call groups vertices into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

/// Face winding in screen space, as seen on the final image.
///
/// Consistently wound meshes show the opposite winding on their back
/// faces, which is what makes back-face culling possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceWinding {
    Clockwise,
    CounterClockwise,
}

/// The rasterization pipeline.
///
/// The shader borrows its texture, so a pipeline carries the texture
/// lifetime: textures must outlive the pipeline they are bound to.
pub struct Pipeline<'t> {
    framebuffer: Framebuffer,
    vertex_buffer: Vec<Vertex>,
    index_buffer: Vec<u32>,
    topology: Topology,
    shader: GouraudShader<'t>,
    cull_faces: Option<FaceWinding>,
}

impl<'t> Pipeline<'t> {
    /// Create a pipeline with cleared color and depth planes.
    pub fn new(width: u32, height: u32, sample_count: u32) -> RenderResult<Pipeline<'t>> {
        Ok(Pipeline {
            framebuffer: Framebuffer::new(width, height, sample_count)?,
            vertex_buffer: Vec::new(),
            index_buffer: Vec::new(),
            topology: Topology::TriangleList,
            shader: GouraudShader::default(),
            cull_faces: None,
        })
    }

    pub fn set_vertex_buffer(&mut self, vertices: &[Vertex]) {
        self.vertex_buffer = vertices.to_vec();
    }

    pub fn set_index_buffer(&mut self, indices: &[u32]) {
        self.index_buffer = indices.to_vec();
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Bind a shader. This resets the cull configuration to the default
    /// for that shader: textured shaders cull clockwise faces, untextured
    /// vertex-color shaders draw both sides.
    pub fn set_shader(&mut self, shader: GouraudShader<'t>) {
        self.cull_faces = if shader.is_textured() {
            Some(FaceWinding::Clockwise)
        } else {
            None
        };
        self.shader = shader;
    }

    /// Override the cull configuration; `None` disables culling.
    pub fn set_cull_faces(&mut self, cull_faces: Option<FaceWinding>) {
        self.cull_faces = cull_faces;
    }

    pub fn clear(&mut self, color: Vec4, depth: f32) {
        self.framebuffer.clear(color, depth);
    }

    /// Resolve one pixel, averaging RGB across its sample slots.
    pub fn read_framebuffer(&self, x: u32, y: u32) -> Vec3 {
        self.framebuffer.read(x, y)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Draw `count` vertices starting at `base_vertex`, un-indexed.
    pub fn draw(&mut self, base_vertex: usize, count: usize) -> RenderResult<()> {
        let end = base_vertex + count;
        if end > self.vertex_buffer.len() {
            return Err(RenderError::VertexRangeOutOfBounds(
                base_vertex,
                end,
                self.vertex_buffer.len(),
            ));
        }

        let vertices: Vec<Vertex> = self.vertex_buffer[base_vertex..end].to_vec();
        self.draw_data(&vertices)
    }

    /// Draw `count` indices starting at `index_offset`, each offset by
    /// `base_vertex` into the vertex buffer.
    pub fn draw_indexed(&mut self, index_offset: usize, base_vertex: usize, count: usize) -> RenderResult<()> {
        let end = index_offset + count;
        if end > self.index_buffer.len() {
            return Err(RenderError::IndexRangeOutOfBounds(
                index_offset,
                end,
                self.index_buffer.len(),
            ));
        }

        let mut vertices = Vec::with_capacity(count);
        for &index in &self.index_buffer[index_offset..end] {
            let at = base_vertex + index as usize;
            let vertex = self.vertex_buffer.get(at).ok_or(RenderError::VertexRangeOutOfBounds(
                at,
                at + 1,
                self.vertex_buffer.len(),
            ))?;
            vertices.push(*vertex);
        }
        self.draw_data(&vertices)
    }

    fn draw_data(&mut self, vertices: &[Vertex]) -> RenderResult<()> {
        debug!(
            "draw: {} vertices as {:?}, {} samples",
            vertices.len(),
            self.topology,
            self.framebuffer.samples()
        );

        let Pipeline {
            ref mut framebuffer,
            ref shader,
            cull_faces,
            topology,
            ..
        } = *self;

        match topology {
            Topology::PointList => {
                for vertex in vertices {
                    raster::point::rasterize_point(framebuffer, shader, vertex);
                }
            }
            Topology::LineList => {
                for pair in vertices.chunks_exact(2) {
                    raster::line::rasterize_line(framebuffer, shader, [&pair[0], &pair[1]]);
                }
            }
            Topology::LineStrip => {
                for pair in vertices.windows(2) {
                    raster::line::rasterize_line(framebuffer, shader, [&pair[0], &pair[1]]);
                }
            }
            Topology::TriangleList => {
                for triangle in vertices.chunks_exact(3) {
                    raster::triangle::rasterize_triangle(
                        framebuffer,
                        shader,
                        cull_faces,
                        [&triangle[0], &triangle[1], &triangle[2]],
                    );
                }
            }
            Topology::TriangleStrip => {
                for (i, window) in vertices.windows(3).enumerate() {
                    // Odd strip triangles swap two vertices so every
                    // triangle presents the same winding.
                    let triangle = if i % 2 == 0 {
                        [&window[0], &window[1], &window[2]]
                    } else {
                        [&window[1], &window[0], &window[2]]
                    };
                    raster::triangle::rasterize_triangle(framebuffer, shader, cull_faces, triangle);
                }
            }
        }

        Ok(())
    }
}
