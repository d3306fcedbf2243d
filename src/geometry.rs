//! Planar and spatial joint-angle math.

use crate::types::Landmark;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl From<Landmark> for Point2 {
    fn from(lm: Landmark) -> Self {
        Point2::new(lm.x as f64, lm.y as f64)
    }
}

impl From<Landmark> for Point3 {
    fn from(lm: Landmark) -> Self {
        Point3::new(lm.x as f64, lm.y as f64, lm.z as f64)
    }
}

/// Angle at `mid` between the rays towards `first` and `last`, in `[0, 180]`.
/// Only x and y take part.
pub fn planar_angle(first: Point2, mid: Point2, last: Point2) -> f64 {
    let toward_last = (last.y - mid.y).atan2(last.x - mid.x);
    let toward_first = (first.y - mid.y).atan2(first.x - mid.x);
    let angle = (toward_last - toward_first).to_degrees().abs();
    if angle > 180.0 { 360.0 - angle } else { angle }
}

/// 3D angle at `mid`, in `[0, 180]`. A zero-length arm yields 0.
pub fn spatial_angle(first: Point3, mid: Point3, last: Point3) -> f64 {
    let u = first.sub(mid);
    let v = last.sub(mid);
    let norm = u.length() * v.length();
    if norm == 0.0 || !norm.is_finite() {
        return 0.0;
    }
    // rounding can push the cosine just past +/-1
    let cos = (u.dot(v) / norm).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Linearly maps `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
/// A collapsed source range maps everything to `to_lo`.
pub fn rescale(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    let span = from_hi - from_lo;
    if span == 0.0 {
        return to_lo;
    }
    to_lo + (value - from_lo) / span * (to_hi - to_lo)
}
