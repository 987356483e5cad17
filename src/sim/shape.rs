//! Shape primitives for the layered scene
//!
//! Every shape is described relative to a center point, so the same shape can
//! back several layers (both paddles share one rectangle).

use glam::IVec2;

/// Axis-aligned box with inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top_left: IVec2,
    pub bot_right: IVec2,
}

impl Region {
    pub fn new(top_left: IVec2, bot_right: IVec2) -> Self {
        debug_assert!(
            top_left.cmple(bot_right).all(),
            "region corners out of order: {top_left} > {bot_right}"
        );
        Self {
            top_left,
            bot_right,
        }
    }

    /// Box spanning `center - half ..= center + half`
    pub fn around(center: IVec2, half: IVec2) -> Self {
        Self::new(center - half, center + half)
    }

    pub fn contains(&self, point: IVec2) -> bool {
        point.cmpge(self.top_left).all() && point.cmple(self.bot_right).all()
    }

    /// True if `other` pokes out of this region along `axis` (0 = x, 1 = y)
    pub fn exceeded_by(&self, other: &Region, axis: usize) -> bool {
        other.top_left[axis] < self.top_left[axis] || other.bot_right[axis] > self.bot_right[axis]
    }

    /// Smallest region covering both
    pub fn union(&self, other: &Region) -> Region {
        Region::new(
            self.top_left.min(other.top_left),
            self.bot_right.max(other.bot_right),
        )
    }

    /// Whether the two regions share at least one pixel
    pub fn intersects(&self, other: &Region) -> bool {
        self.top_left.cmple(other.bot_right).all() && other.top_left.cmple(self.bot_right).all()
    }

    /// Pixels in row-major order, the order a display window is filled in
    pub fn pixels(&self) -> impl Iterator<Item = IVec2> + use<> {
        let Region {
            top_left,
            bot_right,
        } = *self;
        (top_left.y..=bot_right.y)
            .flat_map(move |y| (top_left.x..=bot_right.x).map(move |x| IVec2::new(x, y)))
    }
}

/// Drawable shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Filled rectangle
    Rect { half: IVec2 },
    /// One-pixel rectangle border
    RectOutline { half: IVec2 },
    /// Filled circle
    Circle { radius: i32 },
}

impl Shape {
    /// Bounding box when centered at `center`
    pub fn bounds(&self, center: IVec2) -> Region {
        match *self {
            Shape::Rect { half } | Shape::RectOutline { half } => Region::around(center, half),
            Shape::Circle { radius } => Region::around(center, IVec2::splat(radius)),
        }
    }

    /// Whether `point` is painted by this shape when centered at `center`
    pub fn contains(&self, center: IVec2, point: IVec2) -> bool {
        match *self {
            Shape::Rect { .. } => self.bounds(center).contains(point),
            Shape::RectOutline { .. } => {
                let b = self.bounds(center);
                b.contains(point)
                    && (point.x == b.top_left.x
                        || point.x == b.bot_right.x
                        || point.y == b.top_left.y
                        || point.y == b.bot_right.y)
            }
            Shape::Circle { radius } => (point - center).length_squared() <= radius * radius,
        }
    }
}
