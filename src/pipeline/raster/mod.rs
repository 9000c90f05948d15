//! Primitive rasterization routines.
//!
//! Each submodule handles one primitive kind. They all share the same
//! front half: run the vertex stage, divide by `w` (keeping the
//! pre-division depth for perspective correction), and map the result
//! through the screen-space matrix.

pub mod line;
pub mod point;
pub mod triangle;

use crate::math::{Mat4, Vec4, Vertex};
use crate::shader::{FragmentInput, GouraudShader};

/// A vertex after homogeneous division and viewport mapping.
///
/// `position` holds screen-space x/y and the post-division depth;
/// `view_z` is the clip-space depth captured before the divide, which
/// perspective-correct interpolation needs.
pub struct ScreenVertex {
    pub position: Vec4,
    pub view_z: f32,
    pub input: FragmentInput,
}

/// Maps `x ∈ [-1,1] → [0,W]` and `y ∈ [-1,1] → [H,0]` (the y axis flips),
/// leaving depth untouched.
pub fn screen_space_matrix(width: u32, height: u32) -> Mat4 {
    let w = width as f32;
    let h = height as f32;
    Mat4::from_rows(
        Vec4::new(w / 2.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -h / 2.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(w / 2.0, h / 2.0, 0.0, 1.0),
    )
}

/// Run the vertex stage for one vertex and bring it to screen space.
pub fn to_screen(shader: &GouraudShader, vertex: &Vertex, screen: &Mat4) -> ScreenVertex {
    let (clip, input) = shader.vertex_shader(shader.input_assembler(vertex));
    let view_z = clip.z;
    let ndc = Vec4::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w, 1.0);
    ScreenVertex {
        position: screen.mul_vec4(ndc),
        view_z,
        input,
    }
}

/// Round a screen coordinate to its integer pixel anchor.
#[inline]
pub fn pixel_anchor(coord: f32) -> i64 {
    (coord + 0.5).floor() as i64
}
