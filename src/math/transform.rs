//! Transformation matrix builders

use super::matrix::Mat4;
use super::vector::{Vec3, Vec4};

pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_rows(
        Vec4::new(x, 0.0, 0.0, 0.0),
        Vec4::new(0.0, y, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, c, s, 0.0),
        Vec4::new(0.0, -s, c, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_rows(
        Vec4::new(c, 0.0, -s, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(s, 0.0, c, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_rows(
        Vec4::new(c, s, 0.0, 0.0),
        Vec4::new(-s, c, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

/// Rotation about an arbitrary axis. `axis` must be normalized; the result
/// is undefined otherwise.
pub fn rotate_axis(axis: Vec3, angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let Vec3 { x, y, z } = axis;

    Mat4::from_rows(
        Vec4::new(c + t * x * x, t * x * y + s * z, t * x * z - s * y, 0.0),
        Vec4::new(t * x * y - s * z, c + t * y * y, t * y * z + s * x, 0.0),
        Vec4::new(t * x * z + s * y, t * y * z - s * x, c + t * z * z, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    )
}

pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(x, y, z, 1.0),
    )
}

/// Map the view box `[l,r] x [b,t] x [n,f]` to the `[-1,1]` cube.
///
/// The z axis scales by `2/(n-f)`, so near maps to -1 and the depth test's
/// smaller-is-closer convention holds. The sign of that term must not be
/// "fixed".
pub fn orthographic(l: f32, r: f32, t: f32, b: f32, n: f32, f: f32) -> Mat4 {
    let translate = Mat4::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(-(l + r) / 2.0, -(t + b) / 2.0, -(n + f) / 2.0, 1.0),
    );
    let scale = Mat4::from_rows(
        Vec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
        Vec4::new(0.0, 0.0, 2.0 / (n - f), 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );
    translate.multiply(&scale)
}

/// Perspective projection as a frustum-to-box warp followed by
/// [`orthographic`]. Leaves the view-space depth in `w` for
/// perspective-correct interpolation.
pub fn perspective(l: f32, r: f32, t: f32, b: f32, n: f32, f: f32) -> Mat4 {
    let persp_to_ortho = Mat4::from_rows(
        Vec4::new(n, 0.0, 0.0, 0.0),
        Vec4::new(0.0, n, 0.0, 0.0),
        Vec4::new(0.0, 0.0, n + f, 1.0),
        Vec4::new(0.0, 0.0, -n * f, 0.0),
    );
    persp_to_ortho.multiply(&orthographic(l, r, t, b, n, f))
}
