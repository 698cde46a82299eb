//! Screen-space rectangles and the arena layout.

use glam::Vec2;

/// Edge length of every unit and chest sprite, in pixels.
pub const SPRITE_SIZE: Vec2 = Vec2::splat(64.0);

/// Axis-aligned rectangle expressed in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Creates a rectangle of the given size centred on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::from_origin_and_size(center - size * 0.5, size)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Bottom-right corner.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Width and height.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Reports whether the rectangles overlap. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Reports whether the point lies inside; the right and bottom edges are exclusive.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Moves the rectangle the minimum distance required to lie inside `bounds`.
    ///
    /// A rectangle wider or taller than the bounds is centred on that axis.
    #[must_use]
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let size = self.size();
        let origin = Vec2::new(
            clamp_axis(self.min.x, size.x, bounds.min.x, bounds.max.x),
            clamp_axis(self.min.y, size.y, bounds.min.y, bounds.max.y),
        );
        Rect::from_origin_and_size(origin, size)
    }

    /// Reports whether the rectangle lies entirely inside `bounds`.
    #[must_use]
    pub fn is_within(&self, bounds: &Rect) -> bool {
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && self.max.x <= bounds.max.x
            && self.max.y <= bounds.max.y
    }
}

fn clamp_axis(start: f32, length: f32, lower: f32, upper: f32) -> f32 {
    if length >= upper - lower {
        lower + (upper - lower - length) * 0.5
    } else if start < lower {
        lower
    } else if start + length > upper {
        upper - length
    } else {
        start
    }
}

/// Playable area of a room and the header band reserved for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
    header_band: f32,
}

impl Arena {
    /// Creates an arena of the given size whose top `header_band` pixels are reserved.
    #[must_use]
    pub const fn new(width: f32, height: f32, header_band: f32) -> Self {
        Self {
            width,
            height,
            header_band,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Height of the HUD band at the top of the arena.
    #[must_use]
    pub const fn header_band(&self) -> f32 {
        self.header_band
    }

    /// Full visible play area used for clamping.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_and_size(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Reports whether the point lies below the header band.
    #[must_use]
    pub fn is_below_header(&self, point: Vec2) -> bool {
        point.y >= self.header_band
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(800.0, 600.0, 75.0)
    }
}
