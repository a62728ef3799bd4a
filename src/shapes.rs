use crate::{
    error::{QuadTreeError, Result},
    util::{distance, median},
    P2,
};

/// Represents an axis-aligned rectangle defined by two corners: the upper (max) and the
/// lower (min). It is used as the extent of every QuadTree node and as the window of a
/// window query, and provides the distance and projection math the queries rely on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[P2; 2]", into = "[P2; 2]")
)]
pub struct Rect {
    upper: P2,
    center: P2,
    lower: P2,
}

impl Rect {
    /// Create a new rect from its upper and lower corners
    ///
    /// Fails with [`QuadTreeError::InvalidExtent`] unless every coordinate is finite
    /// and `upper` dominates `lower` on both axes.
    pub fn new(upper: P2, lower: P2) -> Result<Self> {
        let finite = [upper.x, upper.y, lower.x, lower.y]
            .iter()
            .all(|c| c.is_finite());
        if !finite || upper.x < lower.x || upper.y < lower.y {
            return Err(QuadTreeError::InvalidExtent { upper, lower });
        }
        Ok(Self::from_corners(upper, lower))
    }

    /// Build a rect from corners already known to be ordered
    pub(crate) fn from_corners(upper: P2, lower: P2) -> Self {
        Self {
            upper,
            center: median(&upper, &lower),
            lower,
        }
    }

    /// Get the upper corner of the rect
    pub fn upper(&self) -> P2 {
        self.upper
    }

    /// Get the lower corner of the rect
    pub fn lower(&self) -> P2 {
        self.lower
    }

    /// Get the center point of the rect, the pivot used when it is split
    pub fn center(&self) -> P2 {
        self.center
    }

    /// Lower bound on the distance from `point` to anything inside the rect.
    ///
    /// Zero iff the point lies inside or on the boundary.
    pub fn min_distance(&self, point: &P2) -> f64 {
        let dx = axis_gap(point.x, self.lower.x, self.upper.x);
        let dy = axis_gap(point.y, self.lower.y, self.upper.y);
        dx.hypot(dy)
    }

    /// Check if a point exists within the rect, boundary included
    pub fn contains(&self, point: &P2) -> bool {
        self.min_distance(point) == 0.0
    }

    /// Clamp a point onto the rect. Points already inside come back unchanged.
    pub fn project(&self, point: &P2) -> P2 {
        P2::new(
            point.x.clamp(self.lower.x, self.upper.x),
            point.y.clamp(self.lower.y, self.upper.y),
        )
    }

    /// Check if the rect shares any space with another rect, touching edges included
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.upper.x < other.lower.x
            || self.lower.x > other.upper.x
            || self.upper.y < other.lower.y
            || self.lower.y > other.upper.y)
    }

    /// Re-project a window's corners onto this rect.
    ///
    /// For a window that intersects the rect this is exactly their intersection.
    pub fn clip(&self, window: &Rect) -> Rect {
        Rect::from_corners(self.project(&window.upper), self.project(&window.lower))
    }

    /// Quarter the rect around its center, clockwise from the upper-right quadrant
    pub fn quarter(&self) -> [Self; 4] {
        let &Rect {
            upper,
            center,
            lower,
        } = self;

        [
            Rect::from_corners(upper, center),
            Rect::from_corners(P2::new(center.x, upper.y), P2::new(lower.x, center.y)),
            Rect::from_corners(center, lower),
            Rect::from_corners(P2::new(upper.x, center.y), P2::new(center.x, lower.y)),
        ]
    }
}

impl TryFrom<[P2; 2]> for Rect {
    type Error = QuadTreeError;

    fn try_from([upper, lower]: [P2; 2]) -> Result<Self> {
        Rect::new(upper, lower)
    }
}

impl From<Rect> for [P2; 2] {
    fn from(rect: Rect) -> Self {
        [rect.upper, rect.lower]
    }
}

/// Gap between a coordinate and the interval `[lo, hi]`. NaN stays NaN.
fn axis_gap(value: f64, lo: f64, hi: f64) -> f64 {
    if value > hi {
        value - hi
    } else if value >= lo {
        0.0
    } else {
        lo - value
    }
}

/// Represents a circle defined by a center point and radius. It is the shape of a
/// range query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    center: P2,
    radius: f64,
}

impl Circle {
    /// Create a new circle with a center point and radius
    pub fn new(center: P2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> P2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Check if a point lies within the circle, perimeter included
    pub fn contains(&self, point: &P2) -> bool {
        distance(&self.center, point) <= self.radius
    }

    /// Check if any part of the rect could lie within the circle
    pub fn reaches(&self, rect: &Rect) -> bool {
        rect.min_distance(&self.center) <= self.radius
    }
}
