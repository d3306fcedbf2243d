use crate::types::{CanvasInfo, Landmark};

/// Image-space to canvas-space transform for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    info: CanvasInfo,
}

impl CoordinateMapper {
    pub fn new(info: CanvasInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &CanvasInfo {
        &self.info
    }

    /// Scales a length (including z) from image pixels to canvas pixels.
    pub fn scale(&self, value: f32) -> f32 {
        value * self.info.scale
    }

    pub fn translate_x(&self, x: f32) -> f32 {
        let scaled = self.scale(x) - self.info.offset_x;
        if self.info.mirrored {
            self.info.width as f32 - scaled
        } else {
            scaled
        }
    }

    pub fn translate_y(&self, y: f32) -> f32 {
        self.scale(y) - self.info.offset_y
    }

    pub fn map(&self, landmark: &Landmark) -> (f32, f32) {
        (self.translate_x(landmark.x), self.translate_y(landmark.y))
    }
}
