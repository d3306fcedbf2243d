use super::canvas::Canvas;
use super::depth::{DepthModulator, ZRange};
use super::mapper::CoordinateMapper;
use super::paint::{DOT_RADIUS, Palette, Paint};
use crate::types::{LandmarkId, PoseFrame};

use LandmarkId::*;

/// Bones spanning both sides of the body, drawn white.
pub const TRUNK_CONNECTIONS: &[(LandmarkId, LandmarkId)] = &[
    (LeftShoulder, RightShoulder),
    (LeftHip, RightHip),
];

pub const LEFT_CONNECTIONS: &[(LandmarkId, LandmarkId)] = &[
    (LeftShoulder, LeftElbow),
    (LeftElbow, LeftWrist),
    (LeftShoulder, LeftHip),
    (LeftHip, LeftKnee),
    (LeftKnee, LeftAnkle),
    (LeftWrist, LeftThumb),
    (LeftWrist, LeftPinky),
    (LeftWrist, LeftIndex),
    (LeftIndex, LeftPinky),
    (LeftAnkle, LeftHeel),
    (LeftHeel, LeftFootIndex),
];

pub const RIGHT_CONNECTIONS: &[(LandmarkId, LandmarkId)] = &[
    (RightShoulder, RightElbow),
    (RightElbow, RightWrist),
    (RightShoulder, RightHip),
    (RightHip, RightKnee),
    (RightKnee, RightAnkle),
    (RightWrist, RightThumb),
    (RightWrist, RightPinky),
    (RightWrist, RightIndex),
    (RightIndex, RightPinky),
    (RightAnkle, RightHeel),
    (RightHeel, RightFootIndex),
];

pub const BONE_COUNT: usize =
    TRUNK_CONNECTIONS.len() + LEFT_CONNECTIONS.len() + RIGHT_CONNECTIONS.len();

/// Landmarks that get a dot: shoulders down to the feet.
pub fn body_landmarks() -> impl Iterator<Item = LandmarkId> {
    LandmarkId::ALL.into_iter().filter(|id| !id.is_face())
}

pub struct SkeletonRenderer<'a> {
    pub palette: &'a Palette,
    pub mapper: &'a CoordinateMapper,
    pub depth: DepthModulator,
}

impl SkeletonRenderer<'_> {
    /// Collects the depth range the dots and bones are tinted against. Stays
    /// empty unless rescaling is active.
    pub fn z_range(&self, frame: &PoseFrame) -> ZRange {
        let mut range = ZRange::new();
        if self.depth.visualize_z && self.depth.rescale_z {
            for id in body_landmarks() {
                range.include(frame.get(id).z);
            }
        }
        range
    }

    pub fn draw_dots(&self, frame: &PoseFrame, range: &ZRange, canvas: &mut dyn Canvas) {
        for id in body_landmarks() {
            let landmark = frame.get(id);
            let paint = self
                .depth
                .modulate(&self.palette.white, landmark.z, range, self.mapper);
            let (x, y) = self.mapper.map(&landmark);
            canvas.draw_circle(x, y, DOT_RADIUS, &paint);
        }
    }

    pub fn draw_bones(&self, frame: &PoseFrame, range: &ZRange, canvas: &mut dyn Canvas) {
        let groups = [
            (TRUNK_CONNECTIONS, &self.palette.white),
            (LEFT_CONNECTIONS, &self.palette.left),
            (RIGHT_CONNECTIONS, &self.palette.right),
        ];
        for (connections, base) in groups {
            for &(a, b) in connections {
                self.draw_bone(frame, a, b, base, range, canvas);
            }
        }
    }

    fn draw_bone(
        &self,
        frame: &PoseFrame,
        from: LandmarkId,
        to: LandmarkId,
        base: &Paint,
        range: &ZRange,
        canvas: &mut dyn Canvas,
    ) {
        let start = frame.get(from);
        let end = frame.get(to);
        let avg_z = (start.z + end.z) / 2.0;
        let paint = self.depth.modulate(base, avg_z, range, self.mapper);

        let (x1, y1) = self.mapper.map(&start);
        let (x2, y2) = self.mapper.map(&end);
        canvas.draw_line(x1, y1, x2, y2, &paint);
    }

    /// Dots first, then trunk, left and right bones. Returns the depth range
    /// used for tinting.
    pub fn render(&self, frame: &PoseFrame, canvas: &mut dyn Canvas) -> ZRange {
        // scanned up front so the first dots see the whole frame's range
        let range = self.z_range(frame);
        self.draw_dots(frame, &range, canvas);
        self.draw_bones(frame, &range, canvas);
        range
    }
}
