//! Interpolation utilities

use super::vector::{Vec2, Vec3, Vec4};

/// Describes a type that can be interpolated with barycentric coordinates.
///
/// This is required for any rasterization to occur: the fragment stage
/// blends per-vertex data across a primitive through this trait.
pub trait Interpolate {
    /// Interpolate three values with their corresponding barycentric weight.
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self;

    /// Simple linear interpolation.
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
        x1 * u + x2 * v + x3 * w
    }

    #[inline]
    fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
        (1.0 - t) * x1 + t * x2
    }
}

macro_rules! vector_interpolate {
    ($($name:ident),+) => {$(
        impl Interpolate for $name {
            #[inline]
            fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self {
                *x1 * u + *x2 * v + *x3 * w
            }

            #[inline]
            fn linear_interpolate(t: f32, x1: &Self, x2: &Self) -> Self {
                *x1 * (1.0 - t) + *x2 * t
            }
        }
    )+};
}

vector_interpolate!(Vec2, Vec3, Vec4);

/// Barycentric coordinates of point `p` with respect to the screen-space
/// triangle `(x0,y0) (x1,y1) (x2,y2)`, via the cross-product formulation.
///
/// Returns `(1-u-v, u, v)`. When the parallelogram area drops below one
/// pixel unit the triangle cannot cover a sample and the sentinel
/// `(-1, 1, 1)` ("not inside") is returned instead.
pub fn barycentric(x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32, p: Vec2) -> Vec3 {
    let ux = x1 - x0;
    let uy = y1 - y0;
    let vx = x2 - x0;
    let vy = y2 - y0;
    let pox = x0 - p.x;
    let poy = y0 - p.y;

    let k = Vec3::new(ux, vx, pox).cross(Vec3::new(uy, vy, poy));

    if k.z.abs() < 1.0 {
        return Vec3::new(-1.0, 1.0, 1.0);
    }

    let a = k.x / k.z;
    let b = k.y / k.z;

    Vec3::new(1.0 - a - b, a, b)
}

/// Perspective-correct interpolation of a per-vertex attribute.
///
/// `z` holds the pre-division view-space depths captured from the vertex
/// stage, `(u, v)` are the barycentric components 1 and 2 (component 0 is
/// `1-u-v`). Evaluates `zt · Σ (λᵢ/zᵢ)·nᵢ` with `zt = 1/Σ (λᵢ/zᵢ)` by
/// reweighting the barycentric combination.
pub fn perspective_correct<T>(z: [f32; 3], u: f32, v: f32, n1: &T, n2: &T, n3: &T) -> T
where
    T: Interpolate,
{
    let l1 = (1.0 - u - v) / z[0];
    let l2 = u / z[1];
    let l3 = v / z[2];
    let zt = 1.0 / (l1 + l2 + l3);
    Interpolate::barycentric_interpolate(l1 * zt, n1, l2 * zt, n2, l3 * zt, n3)
}
