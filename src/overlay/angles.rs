use super::canvas::Canvas;
use super::mapper::CoordinateMapper;
use super::paint::{Color, Palette};
use crate::geometry::{planar_angle, spatial_angle};
use crate::types::{Exercise, LandmarkId, PoseFrame};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Joint {
    Elbow,
    Armpit,
    Hip,
    Neck,
    Knee,
}

impl Joint {
    pub const ALL: [Joint; 5] = [Joint::Elbow, Joint::Armpit, Joint::Hip, Joint::Neck, Joint::Knee];

    /// `(first, vertex, last)` on the left side of the body.
    fn left_triple(self) -> (LandmarkId, LandmarkId, LandmarkId) {
        use LandmarkId::*;
        match self {
            Joint::Elbow => (LeftShoulder, LeftElbow, LeftWrist),
            Joint::Armpit => (LeftElbow, LeftShoulder, LeftHip),
            Joint::Hip => (LeftShoulder, LeftHip, LeftKnee),
            Joint::Neck => (LeftHip, LeftShoulder, LeftMouth),
            Joint::Knee => (LeftHip, LeftKnee, LeftAnkle),
        }
    }

    pub fn triple(self, side: Side) -> (LandmarkId, LandmarkId, LandmarkId) {
        let (first, mid, last) = self.left_triple();
        match side {
            Side::Left => (first, mid, last),
            Side::Right => (first.mirrored(), mid.mirrored(), last.mirrored()),
        }
    }

    /// Where the angle label is drawn. The neck reading sits on the mouth.
    pub fn anchor(self, side: Side) -> LandmarkId {
        let (_, mid, last) = self.triple(side);
        match self {
            Joint::Neck => last,
            _ => mid,
        }
    }
}

/// Left/right readings of every catalogued joint, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngleCatalog {
    left: [f64; 5],
    right: [f64; 5],
}

impl AngleCatalog {
    pub fn planar(frame: &PoseFrame) -> Self {
        Self::compute(|side, joint| {
            let (f, m, l) = joint.triple(side);
            planar_angle(frame.get(f).into(), frame.get(m).into(), frame.get(l).into())
        })
    }

    pub fn spatial(frame: &PoseFrame) -> Self {
        Self::compute(|side, joint| {
            let (f, m, l) = joint.triple(side);
            spatial_angle(frame.get(f).into(), frame.get(m).into(), frame.get(l).into())
        })
    }

    fn compute(mut angle: impl FnMut(Side, Joint) -> f64) -> Self {
        let mut catalog = Self::default();
        for (i, joint) in Joint::ALL.into_iter().enumerate() {
            catalog.left[i] = angle(Side::Left, joint);
            catalog.right[i] = angle(Side::Right, joint);
        }
        catalog
    }

    pub fn get(&self, joint: Joint, side: Side) -> f64 {
        let i = joint as usize;
        match side {
            Side::Left => self.left[i],
            Side::Right => self.right[i],
        }
    }

    pub fn set(&mut self, joint: Joint, side: Side, degrees: f64) {
        let i = joint as usize;
        match side {
            Side::Left => self.left[i] = degrees,
            Side::Right => self.right[i] = degrees,
        }
    }

    pub fn with(mut self, joint: Joint, left: f64, right: f64) -> Self {
        self.set(joint, Side::Left, left);
        self.set(joint, Side::Right, right);
        self
    }

    pub fn pair(&self, joint: Joint) -> (f64, f64) {
        (self.get(joint, Side::Left), self.get(joint, Side::Right))
    }
}

pub struct AngleAnnotation {
    pub exercise: Exercise,
    pub joints: &'static [Joint],
    pub color: Color,
}

pub const ANGLE_ANNOTATIONS: &[AngleAnnotation] = &[
    AngleAnnotation {
        exercise: Exercise::BicepCurls,
        joints: &[Joint::Elbow, Joint::Armpit, Joint::Hip],
        color: Color::LIGHT_BLUE,
    },
    AngleAnnotation {
        exercise: Exercise::Pushups,
        joints: &[Joint::Elbow, Joint::Armpit, Joint::Hip, Joint::Neck],
        color: Color::LIGHT_GREEN,
    },
    AngleAnnotation {
        exercise: Exercise::Squats,
        joints: &[Joint::Neck, Joint::Armpit, Joint::Elbow, Joint::Hip, Joint::Knee],
        color: Color::RED,
    },
    AngleAnnotation {
        exercise: Exercise::SumoDeadlift,
        joints: &[Joint::Neck, Joint::Armpit, Joint::Elbow, Joint::Hip, Joint::Knee],
        color: Color::AMBER,
    },
];

/// Whole degrees, half away from zero, no unit.
pub fn format_angle(degrees: f64) -> String {
    format!("{:.0}", degrees.round())
}

pub struct AngleAnnotator<'a> {
    pub palette: &'a Palette,
    pub mapper: &'a CoordinateMapper,
}

impl AngleAnnotator<'_> {
    /// Draws the angle labels every matching table row asks for. Returns how
    /// many labels were emitted.
    pub fn render(
        &self,
        label: &str,
        frame: &PoseFrame,
        angles: &AngleCatalog,
        canvas: &mut dyn Canvas,
    ) -> usize {
        let mut emitted = 0;
        for annotation in ANGLE_ANNOTATIONS {
            if !label.contains(annotation.exercise.key()) {
                continue;
            }
            let paint = self.palette.angle_text(annotation.color);
            for &joint in annotation.joints {
                for side in [Side::Left, Side::Right] {
                    let anchor = frame.get(joint.anchor(side));
                    let (x, y) = self.mapper.map(&anchor);
                    canvas.draw_text(&format_angle(angles.get(joint, side)), x, y, &paint);
                    emitted += 1;
                }
            }
        }
        emitted
    }
}
