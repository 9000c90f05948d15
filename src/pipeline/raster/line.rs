//! Line rasterization with the mid-point Bresenham scheme

use std::mem::swap;

use super::{pixel_anchor, screen_space_matrix, to_screen};
use crate::math::{lerp, Interpolate, Vertex};
use crate::pipeline::Framebuffer;
use crate::shader::{FragmentInput, GouraudShader};

/// Rasterize a line segment between two vertices.
///
/// Attributes interpolate linearly along the major axis; depth is the lerp
/// of the post-division z. Lines get no multisample coverage — every pixel
/// lands in sample slot 0.
pub fn rasterize_line(framebuffer: &mut Framebuffer, shader: &GouraudShader, vertices: [&Vertex; 2]) {
    let screen = screen_space_matrix(framebuffer.width(), framebuffer.height());
    let a = to_screen(shader, vertices[0], &screen);
    let b = to_screen(shader, vertices[1], &screen);

    let mut x0 = pixel_anchor(a.position.x);
    let mut y0 = pixel_anchor(a.position.y);
    let mut x1 = pixel_anchor(b.position.x);
    let mut y1 = pixel_anchor(b.position.y);
    let mut z0 = a.position.z;
    let mut z1 = b.position.z;
    let mut input0 = a.input;
    let mut input1 = b.input;

    // Step along whichever axis covers more pixels.
    let steep = (x1 - x0).abs() < (y1 - y0).abs();

    // Make the major axis increase.
    if (x0 > x1 && !steep) || (y0 > y1 && steep) {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
        swap(&mut z0, &mut z1);
        swap(&mut input0, &mut input1);
    }

    let mut dx = x1 - x0;
    let mut dy = y1 - y0;

    let mut x = x0;
    let mut y = y0;

    let plot = |framebuffer: &mut Framebuffer, x: i64, y: i64, t: f32| {
        if x < 0 || x >= i64::from(framebuffer.width()) || y < 0 || y >= i64::from(framebuffer.height()) {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let depth = lerp(z0, z1, t);
        if !framebuffer.depth_test(x, y, 0, depth) {
            return;
        }
        let input = FragmentInput::linear_interpolate(t, &input0, &input1);
        framebuffer.write(x, y, 0, shader.fragment_shader(input));
    };

    // The endpoint itself; a degenerate segment draws exactly this pixel.
    plot(framebuffer, x, y, 0.0);

    if !steep {
        let d = if dy < 0 {
            dy = -dy;
            -1
        } else {
            1
        };

        let mut sub = 2 * dy - dx;

        while x < x1 {
            x += 1;
            if sub > 0 {
                sub += 2 * dy - 2 * dx;
                y += d;
            } else {
                sub += 2 * dy;
            }
            plot(framebuffer, x, y, (x - x0) as f32 / (x1 - x0) as f32);
        }
    } else {
        let d = if dx < 0 {
            dx = -dx;
            -1
        } else {
            1
        };

        let mut sub = 2 * dx - dy;

        while y < y1 {
            y += 1;
            if sub > 0 {
                sub += 2 * dx - 2 * dy;
                x += d;
            } else {
                sub += 2 * dx;
            }
            plot(framebuffer, x, y, (y - y0) as f32 / (y1 - y0) as f32);
        }
    }
}
