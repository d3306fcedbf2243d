//! Real-time pose overlay: skeleton, joint angles and exercise form hints.
//!
//! The [`overlay`] module turns one frame of pose landmarks plus the
//! exercise classifier's labels into drawing primitives for a [`Canvas`].
//! [`pipeline`] holds optional host-side helpers: a rasterizing canvas and a
//! background worker.

pub mod error;
pub mod geometry;
pub mod overlay;
pub mod pipeline;
pub mod types;

pub use error::{OverlayError, Result};
pub use overlay::PoseOverlay;
pub use overlay::canvas::{Canvas, DrawList, Primitive};
pub use overlay::paint::{Color, Paint, Shadow};
pub use types::{CanvasInfo, Exercise, Landmark, LandmarkId, OverlayConfig, PoseFrame};
