//! MSAA sample position tables.
//!
//! Offsets are in pixel units relative to the pixel's anchor coordinate,
//! one entry per sample slot. The order is part of the pipeline's observable
//! semantics: coverage is evaluated in table order and the fragment shader
//! runs at the first covered sample, so reordering a table changes output.

use crate::math::Vec2;

const SAMPLES_1: [Vec2; 1] = [Vec2::new(0.0, 0.0)];

const SAMPLES_2: [Vec2; 2] = [Vec2::new(-0.25, -0.25), Vec2::new(0.25, 0.25)];

const SAMPLES_4: [Vec2; 4] = [
    Vec2::new(-2.0 / 16.0, -6.0 / 16.0),
    Vec2::new(6.0 / 16.0, -2.0 / 16.0),
    Vec2::new(-6.0 / 16.0, 2.0 / 16.0),
    Vec2::new(2.0 / 16.0, 6.0 / 16.0),
];

const SAMPLES_8: [Vec2; 8] = [
    Vec2::new(-7.0 / 16.0, -1.0 / 16.0),
    Vec2::new(-3.0 / 16.0, -5.0 / 16.0),
    Vec2::new(1.0 / 16.0, -3.0 / 16.0),
    Vec2::new(7.0 / 16.0, -7.0 / 16.0),
    Vec2::new(-5.0 / 16.0, 5.0 / 16.0),
    Vec2::new(-1.0 / 16.0, 3.0 / 16.0),
    Vec2::new(3.0 / 16.0, 7.0 / 16.0),
    Vec2::new(5.0 / 16.0, 1.0 / 16.0),
];

const SAMPLES_16: [Vec2; 16] = [
    Vec2::new(-7.0 / 16.0, -8.0 / 16.0),
    Vec2::new(-5.0 / 16.0, -2.0 / 16.0),
    Vec2::new(-4.0 / 16.0, -6.0 / 16.0),
    Vec2::new(-1.0 / 16.0, -3.0 / 16.0),
    Vec2::new(0.0, -7.0 / 16.0),
    Vec2::new(3.0 / 16.0, -5.0 / 16.0),
    Vec2::new(4.0 / 16.0, -1.0 / 16.0),
    Vec2::new(7.0 / 16.0, -4.0 / 16.0),
    Vec2::new(-8.0 / 16.0, 0.0),
    Vec2::new(-6.0 / 16.0, 4.0 / 16.0),
    Vec2::new(-3.0 / 16.0, 2.0 / 16.0),
    Vec2::new(-2.0 / 16.0, 6.0 / 16.0),
    Vec2::new(1.0 / 16.0, 1.0 / 16.0),
    Vec2::new(2.0 / 16.0, 5.0 / 16.0),
    Vec2::new(5.0 / 16.0, 3.0 / 16.0),
    Vec2::new(6.0 / 16.0, 7.0 / 16.0),
];

/// The fixed sample offset table for a supported sample count.
///
/// Callers are expected to have validated the count through
/// [`Framebuffer::new`](super::Framebuffer::new).
pub fn sample_offsets(samples: u32) -> &'static [Vec2] {
    match samples {
        1 => &SAMPLES_1,
        2 => &SAMPLES_2,
        4 => &SAMPLES_4,
        8 => &SAMPLES_8,
        16 => &SAMPLES_16,
        _ => &SAMPLES_1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_match_their_sample_counts() {
        for &s in &[1u32, 2, 4, 8, 16] {
            assert_eq!(sample_offsets(s).len(), s as usize);
        }
    }

    #[test]
    fn offsets_stay_inside_the_pixel() {
        for &s in &[1u32, 2, 4, 8, 16] {
            for offset in sample_offsets(s) {
                assert!(offset.x.abs() <= 0.5 && offset.y.abs() <= 0.5);
            }
        }
    }
}
