//! Per-frame overlay engine: pose landmarks and classifier labels in, drawing
//! primitives out.
//!
//! A [`PoseOverlay`] is built once with its configuration and paints, then
//! [`PoseOverlay::render`] is called once per frame. Every call starts from
//! fresh frame-local state, so nothing observed in one frame (in particular
//! the depth range used for tinting) leaks into the next.

pub mod angles;
pub mod canvas;
pub mod depth;
pub mod hints;
pub mod mapper;
pub mod paint;
pub mod skeleton;

use crate::types::{CanvasInfo, OverlayConfig, PoseFrame};

use self::angles::{AngleAnnotator, AngleCatalog};
use self::canvas::{Canvas, DrawList};
use self::depth::DepthModulator;
use self::hints::{FormHintEngine, HINT_RULES, HintRule};
use self::mapper::CoordinateMapper;
use self::paint::{CLASSIFICATION_TEXT_SIZE, Palette};
use self::skeleton::SkeletonRenderer;

#[derive(Clone, Debug)]
pub struct PoseOverlay {
    config: OverlayConfig,
    palette: Palette,
    rules: Vec<HintRule>,
}

impl Default for PoseOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl PoseOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            palette: Palette::default(),
            rules: HINT_RULES.to_vec(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_rules(mut self, rules: Vec<HintRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn render<S: AsRef<str>>(
        &self,
        frame: &PoseFrame,
        classification: &[S],
        info: &CanvasInfo,
        canvas: &mut dyn Canvas,
    ) {
        if frame.is_empty() {
            return;
        }
        if !info.is_drawable() {
            log::trace!(
                "skipping overlay for {}x{} canvas",
                info.width,
                info.height
            );
            return;
        }

        let mapper = CoordinateMapper::new(*info);

        self.draw_classification(classification, info, canvas);

        let skeleton = SkeletonRenderer {
            palette: &self.palette,
            mapper: &mapper,
            depth: DepthModulator::new(self.config.visualize_z, self.config.rescale_z),
        };
        skeleton.render(frame, canvas);

        let angles = AngleCatalog::planar(frame);

        let Some(top) = classification.first() else {
            return;
        };
        let label: &str = top.as_ref();

        if self.config.show_angles {
            let annotator = AngleAnnotator {
                palette: &self.palette,
                mapper: &mapper,
            };
            annotator.render(label, frame, &angles, canvas);
        }

        let hints = FormHintEngine {
            palette: &self.palette,
            rules: &self.rules,
        };
        let triggered = hints.render(label, &angles, info.height as f32, canvas);
        if !triggered.is_empty() {
            log::debug!("{label}: {} form hint(s)", triggered.len());
        }
    }

    /// Renders into a fresh [`DrawList`].
    pub fn render_to_list<S: AsRef<str>>(
        &self,
        frame: &PoseFrame,
        classification: &[S],
        info: &CanvasInfo,
    ) -> DrawList {
        let mut list = DrawList::new();
        self.render(frame, classification, info, &mut list);
        list
    }

    fn draw_classification<S: AsRef<str>>(
        &self,
        classification: &[S],
        info: &CanvasInfo,
        canvas: &mut dyn Canvas,
    ) {
        let t = CLASSIFICATION_TEXT_SIZE;
        let x = info.width as f32 - t * 16.0;
        let count = classification.len();
        for (i, label) in classification.iter().enumerate() {
            let y = t * 1.5 * (count - i) as f32;
            canvas.draw_text(label.as_ref(), x, y, &self.palette.classification_text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::canvas::Primitive;
    use super::paint::Color;
    use super::*;
    use crate::types::{Landmark, LandmarkId};

    const NO_LABELS: &[&str] = &[];

    fn scenario_config() -> OverlayConfig {
        OverlayConfig::default()
            .with_show_angles(true)
            .with_visualize_z(false)
    }

    fn canvas() -> CanvasInfo {
        CanvasInfo::new(1000, 1000)
    }

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.0, 0.99)
    }

    fn texts(list: &DrawList) -> Vec<String> {
        list.texts().map(str::to_string).collect()
    }

    /// Hips straight above the knees with each ankle swung out so the knee
    /// reads the requested angle.
    fn knee_frame(left_deg: f32, right_deg: f32) -> PoseFrame {
        let mut frame = PoseFrame::empty();
        let legs = [
            (LandmarkId::LeftHip, LandmarkId::LeftKnee, LandmarkId::LeftAnkle, 400.0, left_deg),
            (LandmarkId::RightHip, LandmarkId::RightKnee, LandmarkId::RightAnkle, 600.0, right_deg),
        ];
        for (hip, knee, ankle, x, deg) in legs {
            frame.set(hip, lm(x, 400.0));
            frame.set(knee, lm(x, 600.0));
            let dir = (deg - 90.0).to_radians();
            frame.set(ankle, lm(x + 200.0 * dir.cos(), 600.0 + 200.0 * dir.sin()));
        }
        frame
    }

    #[test]
    fn test_straight_arm_bicep_curl() {
        let mut frame = PoseFrame::empty();
        frame.set(LandmarkId::LeftShoulder, lm(400.0, 300.0));
        frame.set(LandmarkId::LeftElbow, lm(400.0, 500.0));
        frame.set(LandmarkId::LeftWrist, lm(400.0, 700.0));
        frame.set(LandmarkId::LeftHip, lm(420.0, 700.0));
        frame.set(LandmarkId::LeftKnee, lm(620.0, 700.0));
        // right arm raised sideways
        frame.set(LandmarkId::RightShoulder, lm(600.0, 300.0));
        frame.set(LandmarkId::RightElbow, lm(800.0, 300.0));
        frame.set(LandmarkId::RightHip, lm(580.0, 700.0));

        let angles = AngleCatalog::planar(&frame);
        assert!((angles.get(angles::Joint::Elbow, angles::Side::Left) - 180.0).abs() < 1e-9);
        assert!((angles.get(angles::Joint::Hip, angles::Side::Left) - 90.0).abs() < 3.0);
        assert!(angles.get(angles::Joint::Armpit, angles::Side::Right) > 40.0);

        let overlay = PoseOverlay::new(scenario_config());
        let list = overlay.render_to_list(&frame, &["bicepcurls_up"], &canvas());
        let texts = texts(&list);

        assert_eq!(texts[0], "bicepcurls_up");
        assert_eq!(texts[1], "180");
        assert_eq!(texts[3], "3");
        assert_eq!(texts[5], "93");
        assert_eq!(
            &texts[7..],
            &["Keep your elbows close to your body", "Don't swing your body"]
        );

        let elbow_label = list
            .primitives()
            .iter()
            .find(|p| matches!(p, Primitive::Text { text, .. } if text == "180"));
        assert!(matches!(
            elbow_label,
            Some(Primitive::Text { x, y, paint, .. })
                if *x == 400.0 && *y == 500.0 && paint.color == Color::LIGHT_BLUE
        ));
    }

    #[test]
    fn test_perfect_pushup_hold() {
        let mut frame = PoseFrame::empty();
        for (side_x, ids) in [
            (
                0.0,
                [
                    LandmarkId::LeftShoulder,
                    LandmarkId::LeftElbow,
                    LandmarkId::LeftWrist,
                    LandmarkId::LeftHip,
                    LandmarkId::LeftKnee,
                    LandmarkId::LeftAnkle,
                    LandmarkId::LeftMouth,
                ],
            ),
            (
                10.0,
                [
                    LandmarkId::RightShoulder,
                    LandmarkId::RightElbow,
                    LandmarkId::RightWrist,
                    LandmarkId::RightHip,
                    LandmarkId::RightKnee,
                    LandmarkId::RightAnkle,
                    LandmarkId::RightMouth,
                ],
            ),
        ] {
            let [shoulder, elbow, wrist, hip, knee, ankle, mouth] = ids;
            frame.set(shoulder, lm(200.0 + side_x, 500.0));
            frame.set(elbow, lm(250.0 + side_x, 500.0));
            frame.set(wrist, lm(300.0 + side_x, 500.0));
            frame.set(hip, lm(400.0 + side_x, 500.0));
            frame.set(knee, lm(600.0 + side_x, 500.0));
            frame.set(ankle, lm(800.0 + side_x, 500.0));
            frame.set(mouth, lm(200.0 + side_x, 480.0));
        }

        let angles = AngleCatalog::planar(&frame);
        assert!((angles.pair(angles::Joint::Hip).0 - 180.0).abs() < 1e-9);
        assert!((angles.pair(angles::Joint::Neck).1 - 90.0).abs() < 1e-9);

        let overlay = PoseOverlay::new(scenario_config());
        let list = overlay.render_to_list(&frame, &["pushups_up"], &canvas());
        let texts = texts(&list);

        // label + 8 angles + one hint
        assert_eq!(texts.len(), 10);
        assert_eq!(texts.last().map(String::as_str), Some("Keep your head straight"));
        assert!(!texts.iter().any(|t| t == "Keep your body and legs align"));
    }

    #[test]
    fn test_squat_bottom_with_caved_knees() {
        let frame = knee_frame(120.0, 160.0);
        let (left, right) = AngleCatalog::planar(&frame).pair(angles::Joint::Knee);
        assert!((left - 120.0).abs() < 1e-3);
        assert!((right - 160.0).abs() < 1e-3);

        let overlay = PoseOverlay::new(scenario_config());
        let texts = texts(&overlay.render_to_list(&frame, &["squats_down"], &canvas()));
        assert!(texts.iter().any(|t| t == "Don't cave your knees in"));
        assert!(!texts.iter().any(|t| t == "Put your hands closer together"));
        assert!(texts.iter().any(|t| t == "120"));
        assert!(texts.iter().any(|t| t == "160"));
    }

    #[test]
    fn test_sumo_deadlift_lockout() {
        let frame = knee_frame(155.0, 170.0);
        let overlay = PoseOverlay::new(scenario_config());
        let texts = texts(&overlay.render_to_list(&frame, &["sumodeadlift_up"], &canvas()));

        assert!(texts.iter().any(|t| t == "Lock out your legs"));
        assert!(!texts.iter().any(|t| t.starts_with("Grip")));
    }

    #[test]
    fn test_empty_classification_draws_skeleton_only() {
        let frame = knee_frame(150.0, 150.0);
        let overlay = PoseOverlay::new(scenario_config());
        let list = overlay.render_to_list(&frame, NO_LABELS, &canvas());

        assert_eq!(list.circles().count(), 22);
        assert_eq!(list.lines().count(), 24);
        assert_eq!(list.texts().count(), 0);
        assert_eq!(list.len(), 46);
    }

    #[test]
    fn test_degenerate_landmarks() {
        let frame = PoseFrame::from_fn(|_| Landmark::default());
        for config in [scenario_config(), OverlayConfig::default()] {
            let overlay = PoseOverlay::new(config);
            let list = overlay.render_to_list(&frame, &["squats_down"], &canvas());

            assert_eq!(list.circles().count(), 22);
            assert_eq!(list.lines().count(), 24);
            for p in list.primitives() {
                assert!(p.coordinates().iter().all(|v| v.is_finite()));
            }
            for p in list.circles() {
                assert!(matches!(
                    p,
                    Primitive::Circle { x, y, .. } if *x == 0.0 && *y == 0.0
                ));
            }
            for p in list.lines() {
                assert!(matches!(
                    p,
                    Primitive::Line { x1, y1, x2, y2, .. }
                        if x1 == x2 && y1 == y2 && *x1 == 0.0 && *y1 == 0.0
                ));
            }
            // label, then ten angle readings
            let texts = texts(&list);
            assert!(texts[1..11].iter().all(|t| t == "0"));
        }
    }

    #[test]
    fn test_show_angles_off_keeps_hints() {
        let frame = knee_frame(120.0, 160.0);
        let overlay = PoseOverlay::new(scenario_config().with_show_angles(false));
        let texts = texts(&overlay.render_to_list(&frame, &["squats_down"], &canvas()));

        assert_eq!(texts[0], "squats_down");
        assert!(texts[1..].iter().all(|t| t.parse::<f64>().is_err()));
        assert!(texts.iter().any(|t| t == "Don't cave your knees in"));
    }

    #[test]
    fn test_unknown_label_draws_no_annotations() {
        let frame = knee_frame(120.0, 160.0);
        let overlay = PoseOverlay::new(scenario_config());
        let list = overlay.render_to_list(&frame, &["lunges", "squats_down"], &canvas());

        // only the two classification lines
        assert_eq!(texts(&list), vec!["lunges", "squats_down"]);
        assert_eq!(list.lines().count(), 24);
    }

    #[test]
    fn test_classification_layout() {
        let frame = knee_frame(170.0, 170.0);
        let overlay = PoseOverlay::new(scenario_config().with_show_angles(false));
        let list = overlay.render_to_list(&frame, &["a", "b", "c"], &canvas());

        let positions: Vec<(f32, f32)> = list
            .primitives()
            .iter()
            .take(3)
            .map(|p| match *p {
                Primitive::Text { x, y, .. } => (x, y),
                _ => panic!("labels come first"),
            })
            .collect();
        assert_eq!(positions, vec![(520.0, 135.0), (520.0, 90.0), (520.0, 45.0)]);
    }

    #[test]
    fn test_nothing_drawn_for_empty_inputs() {
        let overlay = PoseOverlay::default();
        let list = overlay.render_to_list(&PoseFrame::empty(), &["squats_down"], &canvas());
        assert!(list.is_empty());

        let frame = knee_frame(120.0, 160.0);
        for info in [CanvasInfo::new(0, 1000), CanvasInfo::new(1000, 0)] {
            assert!(overlay.render_to_list(&frame, &["squats_down"], &info).is_empty());
        }
    }

    #[test]
    fn test_render_is_pure_across_frames() {
        let overlay = PoseOverlay::default();
        let deep = PoseFrame::from_fn(|id| {
            Landmark::new(id.index() as f32 * 20.0, 300.0, id.index() as f32 * 50.0 - 900.0, 1.0)
        });
        let shallow = knee_frame(120.0, 160.0);

        let first = overlay.render_to_list(&shallow, &["squats_up"], &canvas());
        let _ = overlay.render_to_list(&deep, &["squats_up"], &canvas());
        let second = overlay.render_to_list(&shallow, &["squats_up"], &canvas());
        assert_eq!(first, second);
    }

    #[test]
    fn test_depth_tint_applies_to_dots_and_bones() {
        let overlay = PoseOverlay::default();
        let frame = PoseFrame::from_fn(|id| {
            let i = id.index() as f32;
            Landmark::new(i * 20.0, 300.0, i * 10.0 - 200.0, 1.0)
        });
        let list = overlay.render_to_list(&frame, NO_LABELS, &canvas());

        for p in list.circles().chain(list.lines()) {
            let c = p.paint().color;
            assert!(c.r == 255 || c.g == 255 || c.b == 255);
        }
        // left shoulder is the nearest drawn landmark
        assert_eq!(list.primitives()[0].paint().color, Color::rgba(255, 0, 0, 255));
        // right foot index is the farthest
        assert_eq!(list.primitives()[21].paint().color, Color::rgba(0, 0, 255, 255));
    }

    #[test]
    fn test_mirror_symmetry() {
        let frame = PoseFrame::from_fn(|id| {
            let i = id.index() as f32;
            Landmark::new(100.0 + i * 17.0, 50.0 + i * 23.0, 0.0, 1.0)
        });
        let swapped = PoseFrame::from_fn(|id| frame.get(id.mirrored()));

        let overlay = PoseOverlay::new(scenario_config());
        let plain = overlay.render_to_list(&frame, NO_LABELS, &canvas());
        let reflected =
            overlay.render_to_list(&swapped, NO_LABELS, &canvas().with_mirrored(true));

        let reflect = |p: &Primitive| -> Vec<f32> {
            let mut c = p.coordinates();
            match p {
                Primitive::Line { .. } => {
                    c[0] = 1000.0 - c[0];
                    c[2] = 1000.0 - c[2];
                }
                _ => c[0] = 1000.0 - c[0],
            }
            c
        };

        let dots: Vec<_> = plain.circles().collect();
        let mirrored_dots: Vec<_> = reflected.circles().collect();
        for (i, id) in skeleton::body_landmarks().enumerate() {
            let j = skeleton::body_landmarks()
                .position(|other| other == id.mirrored())
                .unwrap();
            assert_eq!(mirrored_dots[i].coordinates(), reflect(dots[j]));
        }

        let bones: Vec<_> = plain.lines().collect();
        let mirrored_bones: Vec<_> = reflected.lines().collect();
        for k in 0..11 {
            assert_eq!(mirrored_bones[2 + k].coordinates(), reflect(bones[13 + k]));
            assert_eq!(mirrored_bones[13 + k].coordinates(), reflect(bones[2 + k]));
        }
    }
}
