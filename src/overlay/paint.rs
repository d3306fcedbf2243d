/// RGBA color, one byte per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const LIGHT_BLUE: Color = Color::rgb(102, 178, 255);
    pub const LIGHT_GREEN: Color = Color::rgb(144, 238, 144);
    pub const RED: Color = Color::rgb(222, 23, 56);
    pub const AMBER: Color = Color::rgb(255, 204, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Color,
}

/// Styling for one primitive. Copied, never shared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub stroke_width: f32,
    pub text_size: f32,
    pub shadow: Option<Shadow>,
}

pub const DOT_RADIUS: f32 = 8.0;
pub const STROKE_WIDTH: f32 = 4.0;
pub const IN_FRAME_LIKELIHOOD_TEXT_SIZE: f32 = 30.0;
pub const CLASSIFICATION_TEXT_SIZE: f32 = 30.0;
pub const ANGLE_TEXT_SIZE: f32 = 40.0;
pub const HINT_TEXT_SIZE: f32 = 45.0;

const TEXT_SHADOW: Shadow = Shadow {
    radius: 5.0,
    dx: 0.0,
    dy: 0.0,
    color: Color::BLACK,
};

impl Paint {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: 0.0,
            text_size: 0.0,
            shadow: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_text_size(mut self, text_size: f32) -> Self {
        self.text_size = text_size;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Base paints built once per engine and copied per primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub white: Paint,
    pub left: Paint,
    pub right: Paint,
    pub classification_text: Paint,
    pub hint_text: Paint,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: Paint::new(Color::WHITE)
                .with_stroke_width(STROKE_WIDTH)
                .with_text_size(IN_FRAME_LIKELIHOOD_TEXT_SIZE),
            left: Paint::new(Color::GREEN).with_stroke_width(STROKE_WIDTH),
            right: Paint::new(Color::YELLOW).with_stroke_width(STROKE_WIDTH),
            classification_text: Paint::new(Color::WHITE)
                .with_text_size(CLASSIFICATION_TEXT_SIZE)
                .with_shadow(TEXT_SHADOW),
            hint_text: Paint::new(Color::WHITE)
                .with_text_size(HINT_TEXT_SIZE)
                .with_shadow(TEXT_SHADOW),
        }
    }
}

impl Palette {
    pub fn angle_text(&self, color: Color) -> Paint {
        Paint::new(color)
            .with_text_size(ANGLE_TEXT_SIZE)
            .with_shadow(TEXT_SHADOW)
    }
}
