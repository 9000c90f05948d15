//! Images, textures and samplers

use crate::error::{RenderError, RenderResult};
use crate::math::{saturate, Vec2, Vec4};

/// A single RGBA8 image plane, row-major with a top-left origin.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    bpp: u32,
    data: Vec<u8>,
}

impl Image {
    /// Wrap raw RGBA8 bytes. The byte length must be exactly
    /// `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Image> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(RenderError::InvalidImageSize(data.len(), width, height));
        }
        Ok(Image { width, height, bpp: 32, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bits_per_pixel(&self) -> u32 {
        self.bpp
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Fetch a texel as normalized floats. Coordinates clamp to the image
    /// bounds, so neighborhood fetches at the border stay in range.
    fn texel(&self, x: i32, y: i32) -> Vec4 {
        let x = x.max(0).min(self.width as i32 - 1) as usize;
        let y = y.max(0).min(self.height as i32 - 1) as usize;
        let at = (y * self.width as usize + x) * 4;
        Vec4::new(
            f32::from(self.data[at]) / 255.0,
            f32::from(self.data[at + 1]) / 255.0,
            f32::from(self.data[at + 2]) / 255.0,
            f32::from(self.data[at + 3]) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

impl Default for Filter {
    fn default() -> Filter {
        Filter::Nearest
    }
}

/// Per-axis texture addressing behavior for coordinates outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Fold into `[0, 1)` by dropping the integer part.
    Repeat,
    /// Fold into `[0, 1]`, reflecting on every odd period.
    Mirror,
    /// Saturate to `[0, 1]`.
    Clamp,
    /// Out-of-range coordinates resolve to the sampler's border color.
    Border,
}

impl Default for AddressMode {
    fn default() -> AddressMode {
        AddressMode::Repeat
    }
}

/// Sampling state: filter, per-axis addressing and the border color.
///
/// Plain value, freely copyable.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sampler {
    pub filter: Filter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub border_color: Vec4,
}

impl Sampler {
    pub fn new(filter: Filter, address_u: AddressMode, address_v: AddressMode) -> Sampler {
        Sampler {
            filter,
            address_u,
            address_v,
            border_color: Vec4::ZERO,
        }
    }

    pub fn with_border_color(mut self, color: Vec4) -> Sampler {
        self.border_color = color;
        self
    }

    /// Fold a coordinate according to an address mode. Returns the `-1.0`
    /// sentinel for out-of-range coordinates under [`AddressMode::Border`].
    fn address(mode: AddressMode, coord: f32) -> f32 {
        match mode {
            AddressMode::Repeat => {
                if coord < 0.0 || coord >= 1.0 {
                    coord - coord.floor()
                } else {
                    coord
                }
            }
            AddressMode::Mirror => {
                let period = coord.floor();
                let folded = coord - period;
                if (period as i64) % 2 != 0 {
                    1.0 - folded
                } else {
                    folded
                }
            }
            AddressMode::Clamp => saturate(coord),
            AddressMode::Border => {
                if coord > 1.0 || coord < 0.0 {
                    -1.0
                } else {
                    coord
                }
            }
        }
    }
}

/// An image pyramid that can be sampled under a [`Sampler`].
///
/// Owns one or more mip levels; level 0 is the base image. The texture is
/// read-only while borrowed by a shader.
#[derive(Debug, Clone)]
pub struct Texture {
    images: Vec<Image>,
}

impl Texture {
    pub fn new(image: Image) -> Texture {
        Texture { images: vec![image] }
    }

    /// Build a texture from a full mip chain, base level first.
    pub fn with_levels(images: Vec<Image>) -> RenderResult<Texture> {
        if images.is_empty() {
            return Err(RenderError::EmptyTexture);
        }
        Ok(Texture { images })
    }

    #[inline]
    pub fn levels(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn level(&self, level: usize) -> Option<&Image> {
        self.images.get(level)
    }

    /// Sample the base level.
    pub fn sample(&self, sampler: &Sampler, coord: Vec2) -> Vec4 {
        self.sample_level(sampler, coord, 0)
    }

    /// Sample a specific mip level. Out-of-range levels clamp to the last
    /// available one.
    pub fn sample_level(&self, sampler: &Sampler, coord: Vec2, level: usize) -> Vec4 {
        let u = Sampler::address(sampler.address_u, coord.x);
        let v = Sampler::address(sampler.address_v, coord.y);
        if u == -1.0 || v == -1.0 {
            return sampler.border_color;
        }

        let image = &self.images[level.min(self.images.len() - 1)];

        // Flip v so texture space has its origin at the bottom-left, then
        // align to texel centers.
        let x = u * image.width as f32 - 0.5;
        let y = (1.0 - v) * image.height as f32 - 0.5;

        match sampler.filter {
            Filter::Nearest => {
                let mut ix = x.floor() as i32;
                let mut iy = y.floor() as i32;
                if x - ix as f32 > 0.5 {
                    ix += 1;
                }
                if y - iy as f32 > 0.5 {
                    iy += 1;
                }
                image.texel(ix, iy)
            }
            Filter::Linear => {
                let ix = x.floor() as i32;
                let iy = y.floor() as i32;
                let fx = x - ix as f32;
                let fy = y - iy as f32;

                let c00 = image.texel(ix, iy);
                let c10 = image.texel(ix + 1, iy);
                let c01 = image.texel(ix, iy + 1);
                let c11 = image.texel(ix + 1, iy + 1);

                let top = Vec4::lerp(c00, c10, fx);
                let bottom = Vec4::lerp(c01, c11, fx);
                Vec4::lerp(top, bottom, fy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_texel_texture() -> Texture {
        // One white texel followed by one black texel.
        let data = vec![255, 255, 255, 255, 0, 0, 0, 255];
        Texture::new(Image::from_rgba8(2, 1, data).unwrap())
    }

    #[test]
    fn image_length_invariant_is_enforced() {
        assert!(Image::from_rgba8(2, 2, vec![0; 15]).is_err());
        assert!(Image::from_rgba8(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn repeat_is_periodic() {
        let texture = two_texel_texture();
        let sampler = Sampler::default();
        for u in [0.1f32, 0.4, 0.8] {
            let base = texture.sample(&sampler, Vec2::new(u, 0.5));
            for n in 1..4 {
                let shifted = texture.sample(&sampler, Vec2::new(u + n as f32, 0.5));
                assert_eq!(base, shifted, "period {} at u={}", n, u);
            }
        }
    }

    #[test]
    fn mirror_reflects_odd_periods() {
        let texture = two_texel_texture();
        let sampler = Sampler::new(Filter::Nearest, AddressMode::Mirror, AddressMode::Mirror);
        // 1.25 reflects to 0.75, which lands in the darker second texel.
        let mirrored = texture.sample(&sampler, Vec2::new(1.25, 0.5));
        assert_eq!(mirrored, texture.sample(&sampler, Vec2::new(0.75, 0.5)));
        assert_eq!(mirrored, Vec4::new(0.0, 0.0, 0.0, 1.0));
        // Under repeat the same coordinate folds to 0.25 instead.
        let repeated = texture.sample(&Sampler::default(), Vec2::new(1.25, 0.5));
        assert_eq!(repeated, Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn border_mode_returns_border_color() {
        let texture = two_texel_texture();
        let border = Vec4::new(0.25, 0.5, 0.75, 1.0);
        let sampler = Sampler::new(Filter::Nearest, AddressMode::Border, AddressMode::Border)
            .with_border_color(border);
        assert_eq!(texture.sample(&sampler, Vec2::new(1.5, 0.5)), border);
        assert_eq!(texture.sample(&sampler, Vec2::new(0.5, -0.1)), border);
        assert_ne!(texture.sample(&sampler, Vec2::new(0.1, 0.5)), border);
    }

    #[test]
    fn linear_filter_blends_neighbors() {
        let texture = two_texel_texture();
        let sampler = Sampler::new(Filter::Linear, AddressMode::Clamp, AddressMode::Clamp);
        // Halfway between the two texel centers.
        let mid = texture.sample(&sampler, Vec2::new(0.5, 0.5));
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.5).abs() < 1e-6);
        assert!((mid.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mip_levels_are_selectable() {
        let base = Image::from_rgba8(2, 1, vec![255, 0, 0, 255, 255, 0, 0, 255]).unwrap();
        let tail = Image::from_rgba8(1, 1, vec![0, 255, 0, 255]).unwrap();
        let texture = Texture::with_levels(vec![base, tail]).unwrap();
        let sampler = Sampler::default();
        let center = Vec2::new(0.5, 0.5);
        assert_eq!(texture.sample_level(&sampler, center, 1).y, 1.0);
        // Out-of-range levels clamp instead of panicking.
        assert_eq!(
            texture.sample_level(&sampler, center, 7),
            texture.sample_level(&sampler, center, 1)
        );
    }
}
