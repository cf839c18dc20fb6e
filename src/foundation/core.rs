/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Background of color captures and fill of color-map margins.
pub const CLEAR_COLOR: Rgba8 = [0, 0, 0, 0];

/// Flat "facing camera" normal (+Z encoded as 0.5, 0.5, 1.0).
pub const NORMAL_MAP_COLOR: Rgba8 = [128, 128, 255, 255];

pub const WHITE: Rgba8 = [255, 255, 255, 255];

/// 2D integer coordinate in image space (x right, y down).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IntegerPoint {
    pub x: i32,
    pub y: i32,
}

impl IntegerPoint {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `self - min + margin`, componentwise.
    pub fn subtract_with_margin(self, min: IntegerPoint, margin: u32) -> Self {
        let m = margin_i32(margin);
        Self {
            x: self.x - min.x + m,
            y: self.y - min.y + m,
        }
    }

    pub fn offset(self, by: IntegerPoint) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }
}

/// Axis-aligned rectangle with inclusive integer corners.
///
/// [`IntegerRect::EMPTY`] is the union seed: its `min` is `+inf` and its `max` is `-inf`, so the
/// first [`IntegerRect::union`] returns the other operand unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IntegerRect {
    pub min: IntegerPoint,
    pub max: IntegerPoint,
}

impl Default for IntegerRect {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl IntegerRect {
    pub const EMPTY: Self = Self {
        min: IntegerPoint::new(i32::MAX, i32::MAX),
        max: IntegerPoint::new(i32::MIN, i32::MIN),
    };

    pub const fn new(min: IntegerPoint, max: IntegerPoint) -> Self {
        Self { min, max }
    }

    pub const fn from_corners(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: IntegerPoint::new(min_x, min_y),
            max: IntegerPoint::new(max_x, max_y),
        }
    }

    /// Square of side `2 * radius + 1` centered on `center`.
    pub fn around(center: IntegerPoint, radius: i32) -> Self {
        Self::from_corners(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u32
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u32
    }

    pub fn contains(&self, p: IntegerPoint) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Smallest rectangle covering both operands. The empty rect is the identity.
    pub fn union(self, other: IntegerRect) -> Self {
        Self {
            min: IntegerPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: IntegerPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Shift both corners by `-origin`, i.e. express the rect relative to `origin`.
    pub fn relative_to(self, origin: IntegerPoint) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::from_corners(
            self.min.x - origin.x,
            self.min.y - origin.y,
            self.max.x - origin.x,
            self.max.y - origin.y,
        )
    }
}

/// World-space position or extent (y up).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn sub(self, other: WorldPoint) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn add(self, other: WorldPoint) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

pub(crate) fn margin_i32(margin: u32) -> i32 {
    i32::try_from(margin).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
