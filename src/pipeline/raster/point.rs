//! Point rasterization

use super::{pixel_anchor, screen_space_matrix, to_screen};
use crate::math::Vertex;
use crate::pipeline::Framebuffer;
use crate::shader::GouraudShader;

/// Plot a single vertex as one pixel at sample slot 0.
pub fn rasterize_point(framebuffer: &mut Framebuffer, shader: &GouraudShader, vertex: &Vertex) {
    let screen = screen_space_matrix(framebuffer.width(), framebuffer.height());
    let v = to_screen(shader, vertex, &screen);

    let x = pixel_anchor(v.position.x);
    let y = pixel_anchor(v.position.y);
    if x < 0 || x >= i64::from(framebuffer.width()) || y < 0 || y >= i64::from(framebuffer.height()) {
        return;
    }

    let (x, y) = (x as u32, y as u32);
    if !framebuffer.depth_test(x, y, 0, v.position.z) {
        return;
    }

    let color = shader.fragment_shader(v.input);
    framebuffer.write(x, y, 0, color);
}
