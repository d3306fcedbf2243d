use super::mapper::CoordinateMapper;
use super::paint::{Color, Paint};
use crate::geometry::rescale;

const Z_EPSILON: f32 = 0.001;

/// Depth extent of the landmarks drawn in the current frame.
///
/// Starts out inverted (`min = +inf`, `max = -inf`) and is rebuilt for every
/// frame; a range never outlives the render call that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ZRange {
    fn default() -> Self {
        Self::new()
    }
}

impl ZRange {
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    pub fn include(&mut self, z: f32) {
        if z.is_nan() {
            return;
        }
        self.min = self.min.min(z);
        self.max = self.max.max(z);
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Tints paints red (in front of the z origin) or blue (behind it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthModulator {
    pub visualize_z: bool,
    pub rescale_z: bool,
}

impl DepthModulator {
    pub fn new(visualize_z: bool, rescale_z: bool) -> Self {
        Self {
            visualize_z,
            rescale_z,
        }
    }

    /// Returns `base` recolored for depth `z` (image pixels). `base` itself is
    /// left untouched.
    pub fn modulate(
        &self,
        base: &Paint,
        z: f32,
        range: &ZRange,
        mapper: &CoordinateMapper,
    ) -> Paint {
        if !self.visualize_z {
            return *base;
        }

        let (lo, hi) = if self.rescale_z {
            (
                (-Z_EPSILON).min(mapper.scale(range.min)),
                Z_EPSILON.max(mapper.scale(range.max)),
            )
        } else {
            let width = mapper.info().width as f32;
            (-width, width)
        };

        let z_screen = mapper.scale(z);
        let color = if z_screen < 0.0 {
            let v = channel_ratio(z_screen, lo);
            Color::rgba(255, 255 - v, 255 - v, 255)
        } else {
            let v = channel_ratio(z_screen, hi);
            Color::rgba(255 - v, 255 - v, 255, 255)
        };
        base.with_color(color)
    }
}

// Truncates like an integer cast; NaN and infinities land on the clamp bounds.
fn channel_ratio(value: f32, bound: f32) -> u8 {
    let v = rescale(f64::from(value), 0.0, f64::from(bound), 0.0, 255.0) as i32;
    v.clamp(0, 255) as u8
}
