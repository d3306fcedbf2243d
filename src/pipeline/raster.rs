use image::{Rgba, RgbaImage};

use crate::error::{OverlayError, Result};
use crate::overlay::canvas::Canvas;
use crate::overlay::paint::Paint;

const GLYPH_ROWS: i32 = 5;
const GLYPH_COLS: i32 = 3;
const MAX_GLYPH_SCALE: i32 = 64;

/// [`Canvas`] that rasterizes primitives straight into an RGBA buffer.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn from_raw(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let actual = rgba.len();
        if actual != expected {
            return Err(OverlayError::BufferSize { expected, actual });
        }
        let image = RgbaImage::from_raw(width, height, rgba)
            .ok_or(OverlayError::BufferSize { expected, actual })?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn put_pixel_safe(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 {
            return;
        }
        let (ux, uy) = (x as u32, y as u32);
        if ux >= self.image.width() || uy >= self.image.height() {
            return;
        }
        self.image.put_pixel(ux, uy, Rgba(color));
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: [u8; 4]) {
        let (cx, cy) = center;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.put_pixel_safe(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn stroke_line(&mut self, p0: (i32, i32), p1: (i32, i32), color: [u8; 4], thickness: i32) {
        let (mut x0, mut y0) = p0;
        let (x1, y1) = p1;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let radius = (thickness.max(1) - 1) / 2;

        loop {
            self.put_pixel_safe(x0, y0, color);
            if radius > 0 {
                for ox in -radius..=radius {
                    for oy in -radius..=radius {
                        if (ox != 0 || oy != 0) && ox.abs() + oy.abs() <= radius {
                            self.put_pixel_safe(x0 + ox, y0 + oy, color);
                        }
                    }
                }
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draws `text` with its baseline at `y`. Nothing is drawn when no glyph
    /// can reach the buffer.
    fn blit_text(&mut self, text: &str, x: f32, y: f32, scale: i32, color: [u8; 4]) {
        let advance = (GLYPH_COLS + 1) * scale;
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let span = text.chars().count() as f32 * advance as f32;
        let rows = (GLYPH_ROWS * scale) as f32;
        if x + span < 0.0 || x > w || y < 0.0 || y - rows > h {
            return;
        }
        let (Some(x), Some(y)) = (pixel(x), pixel(y)) else {
            return;
        };

        let top = y - GLYPH_ROWS * scale;
        for (i, c) in text.chars().enumerate() {
            let left = x + i as i32 * advance;
            if left > self.image.width() as i32 {
                break;
            }
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if (bits >> (GLYPH_COLS - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    for py in 0..scale {
                        for px in 0..scale {
                            self.put_pixel_safe(
                                left + col * scale + px,
                                top + row as i32 * scale + py,
                                color,
                            );
                        }
                    }
                }
            }
        }
    }
}

/// Integer pixel position; `None` for NaN or infinite input.
fn pixel(v: f32) -> Option<i32> {
    v.is_finite().then(|| v.round() as i32)
}

/// Liang-Barsky clip of a segment against `[min, max]` on both axes.
fn clip_segment(from: (f64, f64), to: (f64, f64), min: f64, max: (f64, f64)) -> Option<[f64; 4]> {
    let (x0, y0) = from;
    let dx = to.0 - x0;
    let dy = to.1 - y0;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - min), (dx, max.0 - x0), (-dy, y0 - min), (dy, max.1 - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some([x0 + t0 * dx, y0 + t0 * dy, x0 + t1 * dx, y0 + t1 * dy])
}

fn text_scale(text_size: f32) -> i32 {
    ((text_size / 6.0).round() as i32).clamp(1, MAX_GLYPH_SCALE)
}

impl Canvas for RasterCanvas {
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let r = radius.round().max(1.0).min(w + h);
        if !(cx + r >= 0.0 && cx - r <= w && cy + r >= 0.0 && cy - r <= h) {
            return;
        }
        let (Some(x), Some(y)) = (pixel(cx), pixel(cy)) else {
            return;
        };
        self.fill_circle((x, y), r as i32, paint.color.to_array());
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, paint: &Paint) {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return;
        }
        let thickness = paint.stroke_width.round().max(1.0) as i32;
        let pad = f64::from(thickness);
        let max = (
            f64::from(self.image.width()) - 1.0 + pad,
            f64::from(self.image.height()) - 1.0 + pad,
        );
        let Some([cx1, cy1, cx2, cy2]) = clip_segment(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
            -pad,
            max,
        ) else {
            return;
        };
        let end = |v: f64| v.round() as i32;
        self.stroke_line(
            (end(cx1), end(cy1)),
            (end(cx2), end(cy2)),
            paint.color.to_array(),
            thickness,
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let scale = text_scale(paint.text_size);
        if let Some(shadow) = paint.shadow {
            let offset = |v: f32| if v.is_finite() { v.round() } else { 0.0 };
            let sx = x + offset(shadow.dx);
            let sy = y + offset(shadow.dy);
            let halo = if shadow.radius > 0.0 { 1 } else { 0 };
            for oy in -halo..=halo {
                for ox in -halo..=halo {
                    self.blit_text(
                        text,
                        sx + ox as f32,
                        sy + oy as f32,
                        scale,
                        shadow.color.to_array(),
                    );
                }
            }
        }
        self.blit_text(text, x, y, scale, paint.color.to_array());
    }
}

/// 3x5 bitmap glyphs, one row per entry, high bit on the left.
fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0x7, 0x5, 0x5, 0x5, 0x7],
        '1' => [0x2, 0x6, 0x2, 0x2, 0x7],
        '2' => [0x7, 0x1, 0x7, 0x4, 0x7],
        '3' => [0x7, 0x1, 0x7, 0x1, 0x7],
        '4' => [0x5, 0x5, 0x7, 0x1, 0x1],
        '5' => [0x7, 0x4, 0x7, 0x1, 0x7],
        '6' => [0x7, 0x4, 0x7, 0x5, 0x7],
        '7' => [0x7, 0x1, 0x2, 0x4, 0x4],
        '8' => [0x7, 0x5, 0x7, 0x5, 0x7],
        '9' => [0x7, 0x5, 0x7, 0x1, 0x7],
        'A' => [0x2, 0x5, 0x7, 0x5, 0x5],
        'B' => [0x6, 0x5, 0x6, 0x5, 0x6],
        'C' => [0x3, 0x4, 0x4, 0x4, 0x3],
        'D' => [0x6, 0x5, 0x5, 0x5, 0x6],
        'E' => [0x7, 0x4, 0x6, 0x4, 0x7],
        'F' => [0x7, 0x4, 0x6, 0x4, 0x4],
        'G' => [0x3, 0x4, 0x5, 0x5, 0x3],
        'H' => [0x5, 0x5, 0x7, 0x5, 0x5],
        'I' => [0x7, 0x2, 0x2, 0x2, 0x7],
        'J' => [0x1, 0x1, 0x1, 0x5, 0x2],
        'K' => [0x5, 0x5, 0x6, 0x5, 0x5],
        'L' => [0x4, 0x4, 0x4, 0x4, 0x7],
        'M' => [0x5, 0x7, 0x7, 0x5, 0x5],
        'N' => [0x6, 0x5, 0x5, 0x5, 0x5],
        'O' => [0x2, 0x5, 0x5, 0x5, 0x2],
        'P' => [0x6, 0x5, 0x6, 0x4, 0x4],
        'Q' => [0x2, 0x5, 0x5, 0x6, 0x3],
        'R' => [0x6, 0x5, 0x6, 0x5, 0x5],
        'S' => [0x3, 0x4, 0x2, 0x1, 0x6],
        'T' => [0x7, 0x2, 0x2, 0x2, 0x2],
        'U' => [0x5, 0x5, 0x5, 0x5, 0x7],
        'V' => [0x5, 0x5, 0x5, 0x5, 0x2],
        'W' => [0x5, 0x5, 0x7, 0x7, 0x5],
        'X' => [0x5, 0x5, 0x2, 0x5, 0x5],
        'Y' => [0x5, 0x5, 0x2, 0x2, 0x2],
        'Z' => [0x7, 0x1, 0x2, 0x4, 0x7],
        ' ' => [0x0, 0x0, 0x0, 0x0, 0x0],
        '\'' => [0x2, 0x2, 0x0, 0x0, 0x0],
        '_' => [0x0, 0x0, 0x0, 0x0, 0x7],
        '-' => [0x0, 0x0, 0x7, 0x0, 0x0],
        '.' => [0x0, 0x0, 0x0, 0x0, 0x2],
        ',' => [0x0, 0x0, 0x0, 0x2, 0x4],
        ':' => [0x0, 0x2, 0x0, 0x2, 0x0],
        '%' => [0x5, 0x1, 0x2, 0x4, 0x5],
        _ => [0x7, 0x5, 0x5, 0x5, 0x7],
    }
}
