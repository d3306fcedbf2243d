use super::angles::{AngleCatalog, Joint};
use super::canvas::Canvas;
use super::paint::{CLASSIFICATION_TEXT_SIZE, Palette};
use crate::types::Exercise;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Condition {
    /// Either side reads above the threshold.
    Above(Joint, f64),
    /// Either side reads below the threshold.
    Below(Joint, f64),
    /// Left and right differ by more than the threshold.
    Asymmetric(Joint, f64),
}

impl Condition {
    pub fn holds(&self, angles: &AngleCatalog) -> bool {
        match *self {
            Condition::Above(joint, limit) => {
                let (left, right) = angles.pair(joint);
                left > limit || right > limit
            }
            Condition::Below(joint, limit) => {
                let (left, right) = angles.pair(joint);
                left < limit || right < limit
            }
            Condition::Asymmetric(joint, limit) => {
                let (left, right) = angles.pair(joint);
                (left - right).abs() > limit
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HintRule {
    pub exercise: Exercise,
    /// Extra label substring the rule requires, e.g. one movement phase.
    pub phase: Option<&'static str>,
    pub slot: u8,
    pub condition: Condition,
    pub message: &'static str,
}

const fn rule(
    exercise: Exercise,
    phase: Option<&'static str>,
    slot: u8,
    condition: Condition,
    message: &'static str,
) -> HintRule {
    HintRule {
        exercise,
        phase,
        slot,
        condition,
        message,
    }
}

pub const HINT_RULES: &[HintRule] = &[
    rule(
        Exercise::BicepCurls,
        None,
        3,
        Condition::Above(Joint::Armpit, 40.0),
        "Keep your elbows close to your body",
    ),
    rule(
        Exercise::BicepCurls,
        None,
        4,
        Condition::Below(Joint::Hip, 160.0),
        "Don't swing your body",
    ),
    rule(
        Exercise::Pushups,
        Some("pushups_down"),
        3,
        Condition::Above(Joint::Armpit, 70.0),
        "Don't flare out your elbows",
    ),
    rule(
        Exercise::Pushups,
        None,
        4,
        Condition::Below(Joint::Hip, 165.0),
        "Keep your body and legs align",
    ),
    rule(
        Exercise::Pushups,
        None,
        5,
        Condition::Below(Joint::Neck, 120.0),
        "Keep your head straight",
    ),
    rule(
        Exercise::Squats,
        Some("squats_up"),
        3,
        Condition::Above(Joint::Armpit, 85.0),
        "Keep your elbows close to your body",
    ),
    rule(
        Exercise::Squats,
        Some("squats_up"),
        4,
        Condition::Above(Joint::Elbow, 85.0),
        "Put your hands closer together",
    ),
    rule(
        Exercise::Squats,
        None,
        5,
        Condition::Below(Joint::Neck, 110.0),
        "Keep your head straight",
    ),
    rule(
        Exercise::Squats,
        None,
        6,
        Condition::Asymmetric(Joint::Knee, 20.0),
        "Don't cave your knees in",
    ),
    rule(
        Exercise::SumoDeadlift,
        Some("sumodeadlift_down"),
        3,
        Condition::Above(Joint::Armpit, 35.0),
        "Grip the bar closer together",
    ),
    rule(
        Exercise::SumoDeadlift,
        Some("sumodeadlift_down"),
        4,
        Condition::Below(Joint::Armpit, 5.0),
        "Grip the bar further apart",
    ),
    rule(
        Exercise::SumoDeadlift,
        Some("sumodeadlift_down"),
        5,
        Condition::Below(Joint::Elbow, 160.0),
        "Keep your arm straight and don't bend it",
    ),
    rule(
        Exercise::SumoDeadlift,
        Some("sumodeadlift_up"),
        6,
        Condition::Below(Joint::Knee, 160.0),
        "Lock out your legs",
    ),
    rule(
        Exercise::SumoDeadlift,
        None,
        7,
        Condition::Below(Joint::Neck, 110.0),
        "Keep your head straight",
    ),
];

impl HintRule {
    pub fn applies_to(&self, label: &str) -> bool {
        label.contains(self.exercise.key()) && self.phase.is_none_or(|phase| label.contains(phase))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormHint {
    pub slot: u8,
    pub message: &'static str,
}

impl FormHint {
    /// Screen position of slot `k`, counted up from the bottom edge.
    pub fn position(&self, canvas_height: f32) -> (f32, f32) {
        let t = CLASSIFICATION_TEXT_SIZE;
        (t * 0.5, canvas_height - t * 1.5 * self.slot as f32)
    }
}

/// Hints triggered for `label`, in table order.
pub fn evaluate(rules: &[HintRule], label: &str, angles: &AngleCatalog) -> Vec<FormHint> {
    rules
        .iter()
        .filter(|rule| rule.applies_to(label) && rule.condition.holds(angles))
        .map(|rule| FormHint {
            slot: rule.slot,
            message: rule.message,
        })
        .collect()
}

pub struct FormHintEngine<'a> {
    pub palette: &'a Palette,
    pub rules: &'a [HintRule],
}

impl FormHintEngine<'_> {
    pub fn render(
        &self,
        label: &str,
        angles: &AngleCatalog,
        canvas_height: f32,
        canvas: &mut dyn Canvas,
    ) -> Vec<FormHint> {
        let hints = evaluate(self.rules, label, angles);
        for hint in &hints {
            let (x, y) = hint.position(canvas_height);
            canvas.draw_text(hint.message, x, y, &self.palette.hint_text);
        }
        hints
    }
}
