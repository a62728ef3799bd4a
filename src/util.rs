use nalgebra as na;

use crate::{shapes::Rect, P2};

/// One of the four children of an internal node.
///
/// Variants are declared in tie-break order: a point on a shared boundary belongs to
/// the first quadrant, in this order, whose extent contains it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Quadrant {
    /// Upper-right
    First,
    /// Upper-left
    Second,
    /// Lower-left
    Third,
    /// Lower-right
    Fourth,
}

impl Quadrant {
    pub(crate) const ALL: [Quadrant; 4] = [
        Quadrant::First,
        Quadrant::Second,
        Quadrant::Third,
        Quadrant::Fourth,
    ];

    /// Position of the quadrant in a node's child array
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Componentwise average of two points
///
/// Each coordinate is halved before summing so extents near `f64::MAX` stay finite.
pub fn median(p1: &P2, p2: &P2) -> P2 {
    P2::new(p1.x * 0.5 + p2.x * 0.5, p1.y * 0.5 + p2.y * 0.5)
}

/// Euclidean distance between two points
pub fn distance(p1: &P2, p2: &P2) -> f64 {
    na::distance(p1, p2)
}

/// Exact coordinate equality, no tolerance
pub fn is_same(p1: &P2, p2: &P2) -> bool {
    p1.x == p2.x && p1.y == p2.y
}

/// Pick the first of `extents` containing `point`, in [`Quadrant::ALL`] order
pub(crate) fn determine_quadrant<'a>(
    extents: impl IntoIterator<Item = &'a Rect>,
    point: &P2,
) -> Option<Quadrant> {
    extents
        .into_iter()
        .zip(Quadrant::ALL)
        .find(|(rect, _)| rect.contains(point))
        .map(|(_, q)| q)
}
