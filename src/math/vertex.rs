//! Vertex attribute record

use super::interpolate::Interpolate;
use super::vector::{Vec2, Vec3, Vec4};

/// A single vertex with the full attribute set the pipeline understands.
///
/// `position` is homogeneous model space on input to a draw call; after the
/// vertex stage it is in clip space, with the pre-division depth captured
/// separately for perspective-correct interpolation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub color: Vec4,
    pub texcoord: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec4, color: Vec4, texcoord: Vec2, normal: Vec3) -> Vertex {
        Vertex { position, color, texcoord, normal }
    }

    /// A vertex carrying only a position; every other attribute is zero.
    pub fn from_position(x: f32, y: f32, z: f32) -> Vertex {
        Vertex {
            position: Vec4::new(x, y, z, 1.0),
            ..Vertex::default()
        }
    }
}

impl Interpolate for Vertex {
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        Vertex {
            position: Interpolate::barycentric_interpolate(u, &x1.position, v, &x2.position, w, &x3.position),
            color: Interpolate::barycentric_interpolate(u, &x1.color, v, &x2.color, w, &x3.color),
            texcoord: Interpolate::barycentric_interpolate(u, &x1.texcoord, v, &x2.texcoord, w, &x3.texcoord),
            normal: Interpolate::barycentric_interpolate(u, &x1.normal, v, &x2.normal, w, &x3.normal),
        }
    }

    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        Vertex {
            position: Interpolate::linear_interpolate(t, &x1.position, &x2.position),
            color: Interpolate::linear_interpolate(t, &x1.color, &x2.color),
            texcoord: Interpolate::linear_interpolate(t, &x1.texcoord, &x2.texcoord),
            normal: Interpolate::linear_interpolate(t, &x1.normal, &x2.normal),
        }
    }
}

/// Linear interpolation of every attribute channel at once.
#[inline]
pub fn vertex_lerp(a: &Vertex, b: &Vertex, t: f32) -> Vertex {
    Interpolate::linear_interpolate(t, a, b)
}
