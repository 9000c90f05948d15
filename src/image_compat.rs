//! Optional interop with the `image` crate, behind the `image_compat`
//! feature: resolve framebuffers to 8-bit images and wrap decoded images
//! as sampleable textures.

use image::{Rgba, RgbaImage};

use crate::error::RenderResult;
use crate::math::saturate;
use crate::pipeline::Framebuffer;
use crate::texture::{Image, Texture};

/// Resolve every pixel of the framebuffer into an opaque 8-bit RGBA image.
pub fn framebuffer_to_image(framebuffer: &Framebuffer) -> RgbaImage {
    let mut out = RgbaImage::new(framebuffer.width(), framebuffer.height());
    for y in 0..framebuffer.height() {
        for x in 0..framebuffer.width() {
            let color = framebuffer.read(x, y);
            out.put_pixel(
                x,
                y,
                Rgba([
                    (saturate(color.x) * 255.0) as u8,
                    (saturate(color.y) * 255.0) as u8,
                    (saturate(color.z) * 255.0) as u8,
                    255,
                ]),
            );
        }
    }
    out
}

/// Wrap a decoded RGBA image as a single-level texture.
pub fn texture_from_image(image: &RgbaImage) -> RenderResult<Texture> {
    let plane = Image::from_rgba8(image.width(), image.height(), image.as_raw().clone())?;
    Ok(Texture::new(plane))
}
