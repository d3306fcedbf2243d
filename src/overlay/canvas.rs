use super::paint::Paint;

/// Sink for drawing primitives. Borrowed for one frame only.
pub trait Canvas {
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        paint: Paint,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        paint: Paint,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        paint: Paint,
    },
}

impl Primitive {
    pub fn paint(&self) -> &Paint {
        match self {
            Primitive::Circle { paint, .. }
            | Primitive::Line { paint, .. }
            | Primitive::Text { paint, .. } => paint,
        }
    }

    pub fn coordinates(&self) -> Vec<f32> {
        match *self {
            Primitive::Circle { x, y, radius, .. } => vec![x, y, radius],
            Primitive::Line { x1, y1, x2, y2, .. } => vec![x1, y1, x2, y2],
            Primitive::Text { x, y, .. } => vec![x, y],
        }
    }
}

/// Primitives in emission order; later entries paint over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replays every primitive into another sink.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Circle {
                    x,
                    y,
                    radius,
                    paint,
                } => canvas.draw_circle(*x, *y, *radius, paint),
                Primitive::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    paint,
                } => canvas.draw_line(*x1, *y1, *x2, *y2, paint),
                Primitive::Text { text, x, y, paint } => canvas.draw_text(text, *x, *y, paint),
            }
        }
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }
}

impl Canvas for DrawList {
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.primitives.push(Primitive::Circle {
            x: cx,
            y: cy,
            radius,
            paint: *paint,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        self.primitives.push(Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.primitives.push(Primitive::Text {
            text: text.to_string(),
            x,
            y,
            paint: *paint,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::paint::Color;

    #[test]
    fn test_draw_list_records_in_order() {
        let paint = Paint::new(Color::WHITE);
        let mut list = DrawList::new();
        list.draw_circle(1.0, 2.0, 8.0, &paint);
        list.draw_line(0.0, 0.0, 5.0, 5.0, &paint);
        list.draw_text("90", 3.0, 4.0, &paint);

        assert_eq!(list.len(), 3);
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.lines().count(), 1);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["90"]);
        assert!(matches!(list.primitives()[1], Primitive::Line { x2, .. } if x2 == 5.0));
    }

    #[test]
    fn test_replay_reproduces_list() {
        let paint = Paint::new(Color::GREEN).with_stroke_width(4.0);
        let mut list = DrawList::new();
        list.draw_line(1.0, 1.0, 2.0, 2.0, &paint);
        list.draw_text("Lock out your legs", 15.0, 700.0, &paint);

        let mut copy = DrawList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }
}
