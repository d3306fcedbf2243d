use crate::error::{OverlayError, Result};

pub const NUM_LANDMARKS: usize = 33;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandmarkId {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    LeftMouth,
    RightMouth,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkId {
    /// All landmarks in detector output order.
    pub const ALL: [LandmarkId; NUM_LANDMARKS] = [
        LandmarkId::Nose,
        LandmarkId::LeftEyeInner,
        LandmarkId::LeftEye,
        LandmarkId::LeftEyeOuter,
        LandmarkId::RightEyeInner,
        LandmarkId::RightEye,
        LandmarkId::RightEyeOuter,
        LandmarkId::LeftEar,
        LandmarkId::RightEar,
        LandmarkId::LeftMouth,
        LandmarkId::RightMouth,
        LandmarkId::LeftShoulder,
        LandmarkId::RightShoulder,
        LandmarkId::LeftElbow,
        LandmarkId::RightElbow,
        LandmarkId::LeftWrist,
        LandmarkId::RightWrist,
        LandmarkId::LeftPinky,
        LandmarkId::RightPinky,
        LandmarkId::LeftIndex,
        LandmarkId::RightIndex,
        LandmarkId::LeftThumb,
        LandmarkId::RightThumb,
        LandmarkId::LeftHip,
        LandmarkId::RightHip,
        LandmarkId::LeftKnee,
        LandmarkId::RightKnee,
        LandmarkId::LeftAnkle,
        LandmarkId::RightAnkle,
        LandmarkId::LeftHeel,
        LandmarkId::RightHeel,
        LandmarkId::LeftFootIndex,
        LandmarkId::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Face landmarks (nose through mouth) are never drawn.
    pub fn is_face(self) -> bool {
        self.index() < LandmarkId::LeftShoulder.index()
    }

    /// Same landmark on the other side of the body.
    pub fn mirrored(self) -> Self {
        use LandmarkId::*;
        match self {
            Nose => Nose,
            LeftEyeInner => RightEyeInner,
            LeftEye => RightEye,
            LeftEyeOuter => RightEyeOuter,
            RightEyeInner => LeftEyeInner,
            RightEye => LeftEye,
            RightEyeOuter => LeftEyeOuter,
            LeftEar => RightEar,
            RightEar => LeftEar,
            LeftMouth => RightMouth,
            RightMouth => LeftMouth,
            LeftShoulder => RightShoulder,
            RightShoulder => LeftShoulder,
            LeftElbow => RightElbow,
            RightElbow => LeftElbow,
            LeftWrist => RightWrist,
            RightWrist => LeftWrist,
            LeftPinky => RightPinky,
            RightPinky => LeftPinky,
            LeftIndex => RightIndex,
            RightIndex => LeftIndex,
            LeftThumb => RightThumb,
            RightThumb => LeftThumb,
            LeftHip => RightHip,
            RightHip => LeftHip,
            LeftKnee => RightKnee,
            RightKnee => LeftKnee,
            LeftAnkle => RightAnkle,
            RightAnkle => LeftAnkle,
            LeftHeel => RightHeel,
            RightHeel => LeftHeel,
            LeftFootIndex => RightFootIndex,
            RightFootIndex => LeftFootIndex,
        }
    }
}

/// One detected keypoint in image-pixel space. `z` shares the unit of `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub in_frame_likelihood: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, in_frame_likelihood: f32) -> Self {
        Self {
            x,
            y,
            z,
            in_frame_likelihood,
        }
    }
}

/// Landmarks of a single frame: either empty (nothing detected) or all 33.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(landmarks: Vec<Landmark>) -> Result<Self> {
        if !landmarks.is_empty() && landmarks.len() != NUM_LANDMARKS {
            return Err(OverlayError::LandmarkCount {
                expected: NUM_LANDMARKS,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    pub fn from_fn(mut f: impl FnMut(LandmarkId) -> Landmark) -> Self {
        Self {
            landmarks: LandmarkId::ALL.iter().map(|&id| f(id)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Missing entries read as a zero-likelihood landmark at the origin.
    pub fn get(&self, id: LandmarkId) -> Landmark {
        self.landmarks.get(id.index()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: LandmarkId, landmark: Landmark) {
        if self.landmarks.is_empty() {
            self.landmarks = vec![Landmark::default(); NUM_LANDMARKS];
        }
        self.landmarks[id.index()] = landmark;
    }

    pub fn iter(&self) -> impl Iterator<Item = (LandmarkId, Landmark)> + '_ {
        LandmarkId::ALL
            .iter()
            .zip(self.landmarks.iter())
            .map(|(&id, &lm)| (id, lm))
    }
}

/// Drawing surface geometry and the image-to-canvas transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasInfo {
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CanvasInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mirrored: false,
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Center-crop an `image_w`x`image_h` source onto a `view_w`x`view_h` canvas.
    pub fn fit(image_w: u32, image_h: u32, view_w: u32, view_h: u32) -> Result<Self> {
        if image_w == 0 || image_h == 0 {
            return Err(OverlayError::InvalidImageSize {
                width: image_w,
                height: image_h,
            });
        }
        if view_w == 0 || view_h == 0 {
            return Err(OverlayError::InvalidImageSize {
                width: view_w,
                height: view_h,
            });
        }

        let (iw, ih) = (image_w as f32, image_h as f32);
        let (vw, vh) = (view_w as f32, view_h as f32);
        let image_aspect = iw / ih;
        let view_aspect = vw / vh;

        let mut info = Self::new(view_w, view_h);
        if view_aspect > image_aspect {
            // source is cropped vertically
            info.scale = vw / iw;
            info.offset_y = (vw / image_aspect - vh) / 2.0;
        } else {
            info.scale = vh / ih;
            info.offset_x = (vh * image_aspect - vw) / 2.0;
        }
        Ok(info)
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayConfig {
    pub show_angles: bool,
    pub visualize_z: bool,
    pub rescale_z: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_angles: true,
            visualize_z: true,
            rescale_z: true,
        }
    }
}

impl OverlayConfig {
    pub fn with_show_angles(mut self, show_angles: bool) -> Self {
        self.show_angles = show_angles;
        self
    }

    pub fn with_visualize_z(mut self, visualize_z: bool) -> Self {
        self.visualize_z = visualize_z;
        self
    }

    pub fn with_rescale_z(mut self, rescale_z: bool) -> Self {
        self.rescale_z = rescale_z;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exercise {
    BicepCurls,
    Pushups,
    Squats,
    SumoDeadlift,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::BicepCurls,
        Exercise::Pushups,
        Exercise::Squats,
        Exercise::SumoDeadlift,
    ];

    /// Substring that identifies this exercise inside a classifier label.
    pub fn key(&self) -> &'static str {
        match self {
            Exercise::BicepCurls => "bicepcurls",
            Exercise::Pushups => "pushup",
            Exercise::Squats => "squats",
            Exercise::SumoDeadlift => "sumo",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Exercise::BicepCurls => "Bicep curls",
            Exercise::Pushups => "Push-ups",
            Exercise::Squats => "Squats",
            Exercise::SumoDeadlift => "Sumo deadlift",
        }
    }

    /// Every exercise whose key occurs in `label`, in table order.
    pub fn from_label(label: &str) -> Vec<Exercise> {
        Self::ALL
            .iter()
            .copied()
            .filter(|exercise| label.contains(exercise.key()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_indices_match_detector_order() {
        assert_eq!(LandmarkId::Nose.index(), 0);
        assert_eq!(LandmarkId::LeftShoulder.index(), 11);
        assert_eq!(LandmarkId::RightFootIndex.index(), 32);
        for (i, id) in LandmarkId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(LandmarkId::from_index(i), Some(*id));
        }
        assert_eq!(LandmarkId::from_index(33), None);
    }

    #[test]
    fn test_mirrored_is_involution() {
        for id in LandmarkId::ALL {
            assert_eq!(id.mirrored().mirrored(), id);
            assert_eq!(id.mirrored().is_face(), id.is_face());
        }
    }

    #[test]
    fn test_pose_frame_rejects_partial_sets() {
        assert!(PoseFrame::new(Vec::new()).unwrap().is_empty());
        assert!(PoseFrame::new(vec![Landmark::default(); 33]).is_ok());
        assert_eq!(
            PoseFrame::new(vec![Landmark::default(); 21]),
            Err(OverlayError::LandmarkCount {
                expected: 33,
                actual: 21
            })
        );
    }

    #[test]
    fn test_pose_frame_get_and_set() {
        let mut frame = PoseFrame::empty();
        assert_eq!(frame.get(LandmarkId::LeftKnee), Landmark::default());

        frame.set(LandmarkId::LeftKnee, Landmark::new(1.0, 2.0, 3.0, 0.9));
        assert!(!frame.is_empty());
        assert_eq!(frame.iter().count(), NUM_LANDMARKS);
        assert_eq!(frame.get(LandmarkId::LeftKnee).y, 2.0);
        assert_eq!(frame.get(LandmarkId::RightKnee), Landmark::default());
    }

    #[test]
    fn test_canvas_fit_crops_vertically_for_wide_views() {
        let info = CanvasInfo::fit(640, 480, 1280, 720).unwrap();
        assert_eq!(info.scale, 2.0);
        assert_eq!(info.offset_x, 0.0);
        assert!((info.offset_y - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_canvas_fit_crops_horizontally_for_tall_views() {
        let info = CanvasInfo::fit(640, 480, 720, 1280).unwrap();
        assert!((info.scale - 1280.0 / 480.0).abs() < 1e-4);
        assert_eq!(info.offset_y, 0.0);
        assert!(info.offset_x > 0.0);
    }

    #[test]
    fn test_canvas_fit_rejects_zero_sizes() {
        assert!(CanvasInfo::fit(0, 480, 100, 100).is_err());
        assert!(CanvasInfo::fit(640, 480, 100, 0).is_err());
    }

    #[test]
    fn test_exercise_from_label() {
        assert_eq!(
            Exercise::from_label("pushups_down"),
            vec![Exercise::Pushups]
        );
        assert_eq!(
            Exercise::from_label("sumodeadlift_up"),
            vec![Exercise::SumoDeadlift]
        );
        assert_eq!(Exercise::from_label("bicepcurls_up"), vec![Exercise::BicepCurls]);
        assert!(Exercise::from_label("jumping_jacks").is_empty());
        assert_eq!(Exercise::Pushups.display_name(), "Push-ups");
    }
}
