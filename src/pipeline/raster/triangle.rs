//! Triangle setup, coverage and single-evaluation shading

use super::{pixel_anchor, screen_space_matrix, to_screen};
use crate::math::{barycentric, perspective_correct, Vec2, Vec3, Vertex};
use crate::pipeline::sample::sample_offsets;
use crate::pipeline::{FaceWinding, Framebuffer};
use crate::shader::GouraudShader;

/// Rasterize one triangle.
///
/// Coverage is evaluated per sample position; a sample is covered when all
/// three barycentric components are at least `-1e-5`. The fragment shader
/// runs once per covered pixel, at the first covered sample's barycentric,
/// and the color is reused for the pixel's remaining covered samples.
pub fn rasterize_triangle(
    framebuffer: &mut Framebuffer,
    shader: &GouraudShader,
    cull_faces: Option<FaceWinding>,
    vertices: [&Vertex; 3],
) {
    let screen = screen_space_matrix(framebuffer.width(), framebuffer.height());
    let a = to_screen(shader, vertices[0], &screen);
    let b = to_screen(shader, vertices[1], &screen);
    let c = to_screen(shader, vertices[2], &screen);

    let x0 = pixel_anchor(a.position.x);
    let y0 = pixel_anchor(a.position.y);
    let x1 = pixel_anchor(b.position.x);
    let y1 = pixel_anchor(b.position.y);
    let x2 = pixel_anchor(c.position.x);
    let y2 = pixel_anchor(c.position.y);

    // Back-face test on the screen-projected triangle. With y pointing
    // down, a positive cross product means counter-clockwise winding.
    if let Some(cull) = cull_faces {
        let v01 = Vec3::new((x1 - x0) as f32, (y1 - y0) as f32, 0.0);
        let v02 = Vec3::new((x2 - x0) as f32, (y2 - y0) as f32, 0.0);
        let winding = if v01.cross(v02).z > 0.0 {
            FaceWinding::CounterClockwise
        } else {
            FaceWinding::Clockwise
        };
        if winding == cull {
            return;
        }
    }

    // Bounding box, clipped to the viewport.
    let min_x = x0.min(x1).min(x2).max(0);
    let max_x = x0.max(x1).max(x2).min(i64::from(framebuffer.width()) - 1);
    let min_y = y0.min(y1).min(y2).max(0);
    let max_y = y0.max(y1).max(y2).min(i64::from(framebuffer.height()) - 1);

    let view_z = [a.view_z, b.view_z, c.view_z];
    let (fx0, fy0) = (x0 as f32, y0 as f32);
    let (fx1, fy1) = (x1 as f32, y1 as f32);
    let (fx2, fy2) = (x2 as f32, y2 as f32);

    let offsets = sample_offsets(framebuffer.samples());

    let mut y = min_y;
    while y <= max_y {
        let mut x = min_x;
        while x <= max_x {
            // Shade at most once per pixel; reuse the color for every
            // remaining covered sample.
            let mut shaded: Option<crate::math::Vec4> = None;

            for (i, offset) in offsets.iter().enumerate() {
                let p = Vec2::new(x as f32 + offset.x, y as f32 + offset.y);
                let mass = barycentric(fx0, fy0, fx1, fy1, fx2, fy2, p);
                if mass.x < -1e-5 || mass.y < -1e-5 || mass.z < -1e-5 {
                    continue;
                }

                let depth = mass.x * a.position.z + mass.y * b.position.z + mass.z * c.position.z;
                if !framebuffer.depth_test(x as u32, y as u32, i as u32, depth) {
                    continue;
                }

                let color = match shaded {
                    Some(color) => color,
                    None => {
                        let input =
                            perspective_correct(view_z, mass.y, mass.z, &a.input, &b.input, &c.input);
                        let color = shader.fragment_shader(input);
                        shaded = Some(color);
                        color
                    }
                };

                framebuffer.write(x as u32, y as u32, i as u32, color);
            }

            x += 1;
        }
        y += 1;
    }
}
