use tracing::{debug, trace};

use crate::{
    config::QuadTreeConfig,
    error::{QuadTreeError, Result},
    nearest::nearest,
    shapes::{Circle, Rect},
    util::{determine_quadrant, is_same, Quadrant},
    Point, P2,
};

/// A point-region QuadTree for spatial indexing of 2D points.
///
/// Every leaf holds at most one item. A leaf that receives a second, distinct point
/// splits around the center of its extent into four children.
#[derive(Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "RawQuadTree<T>",
        bound(deserialize = "T: Point + Clone + serde::Deserialize<'de>")
    )
)]
pub struct QuadTree<T> {
    root: Node<T>,
    config: QuadTreeConfig,
    len: usize,
}

impl<T: Point + Clone> QuadTree<T> {
    /// Create a new empty quadtree covering `boundary`
    pub fn new(boundary: Rect) -> Self {
        Self::with_config(boundary, QuadTreeConfig::default())
    }

    /// Create a new empty quadtree with explicit configuration
    pub fn with_config(boundary: Rect, config: QuadTreeConfig) -> Self {
        Self {
            root: Node::Empty { boundary },
            config,
            len: 0,
        }
    }

    /// Create a new empty quadtree from the corners of its boundary
    pub fn from_corners(upper: P2, lower: P2) -> Result<Self> {
        Ok(Self::new(Rect::new(upper, lower)?))
    }

    /// Insert an item into the quadtree
    ///
    /// **Returns** `true` if the item was stored and `false` if an item already sits at
    /// the exact same position, in which case the tree is left untouched.
    ///
    /// ## Errors
    /// - [`QuadTreeError::OutOfBounds`] if the item lies outside the boundary.
    /// - [`QuadTreeError::DepthLimitExceeded`] if separating the item from its
    ///   neighbour would need a node deeper than the configured maximum. Items
    ///   stored before the failure all remain reachable.
    pub fn insert(&mut self, item: &T) -> Result<bool> {
        let point = item.point();
        if !self.boundary().contains(&point) {
            return Err(QuadTreeError::OutOfBounds(point));
        }

        let inserted = self.root.insert(item, 0, self.config.max_depth)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Get the item stored at exactly `point`
    pub fn get(&self, point: &P2) -> Option<&T> {
        if !self.boundary().contains(point) {
            return None;
        }
        self.root.get(point)
    }

    /// Check if an item is stored at exactly `point`
    pub fn contains(&self, point: &P2) -> bool {
        self.get(point).is_some()
    }

    /// Queries the QuadTree for items within a circle, perimeter included.
    /// This method populates a passed mutable vector with all found items.
    pub fn query_circle(&self, circle: &Circle, results: &mut Vec<T>) {
        if circle.reaches(self.boundary()) {
            self.root.query_circle(circle, results);
        }
    }

    /// Queries the QuadTree for items within an axis-aligned window, edges included.
    /// This method populates a passed mutable vector with all found items.
    pub fn query_window(&self, window: &Rect, results: &mut Vec<T>) {
        let boundary = self.boundary();
        if boundary.intersects(window) {
            self.root.query_window(&boundary.clip(window), results);
        }
    }

    /// Queries the QuadTree for the `k` items closest to `point`.
    /// This method appends them to `results` nearest first; fewer than `k` are
    /// appended only when the tree holds fewer than `k` items.
    pub fn query_nearest(&self, point: &P2, k: usize, results: &mut Vec<T>) {
        results.extend(nearest(&self.root, point, k).into_iter().cloned());
    }

    /// Number of items stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Level of the deepest node, the root being level 0
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Return the point at the center of the boundary
    pub fn center(&self) -> P2 {
        self.boundary().center()
    }

    /// Get the boundary rect of the quadtree
    pub fn boundary(&self) -> &Rect {
        self.root.boundary()
    }

    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }
}

/// Unchecked shape of a serialized [`QuadTree`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawQuadTree<T> {
    root: Node<T>,
    config: QuadTreeConfig,
    len: usize,
}

#[cfg(feature = "serde")]
impl<T: Point + Clone> TryFrom<RawQuadTree<T>> for QuadTree<T> {
    type Error = QuadTreeError;

    fn try_from(raw: RawQuadTree<T>) -> Result<Self> {
        let mut points = Vec::new();
        raw.root.validate(0, raw.config.max_depth, &mut points)?;
        if points.len() != raw.len {
            return Err(QuadTreeError::MalformedTree("stored length does not match item count"));
        }
        Ok(Self {
            root: raw.root,
            config: raw.config,
            len: raw.len,
        })
    }
}

/// QuadTree node enum
///
/// ## Variants
/// - `Internal`: Split around `pivot` into four children that exactly partition its
///   boundary, listed in [`Quadrant`] order.
/// - `Leaf`: Holds exactly one item.
/// - `Empty`: Represents an empty area without any data.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Node<T> {
    Internal {
        boundary: Rect,
        pivot: P2,
        children: [Box<Self>; 4],
    },
    Leaf {
        boundary: Rect,
        item: T,
    },
    Empty {
        boundary: Rect,
    },
}

impl<T> Node<T> {
    pub(crate) fn boundary(&self) -> &Rect {
        match self {
            Self::Empty { boundary } => boundary,
            Self::Leaf { boundary, .. } => boundary,
            Self::Internal { boundary, .. } => boundary,
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Internal { children, .. } => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Child whose extent holds `point`, which must lie within this node's boundary
    fn route(children: &[Box<Self>; 4], point: &P2) -> Quadrant {
        match determine_quadrant(children.iter().map(|c| c.boundary()), point) {
            Some(q) => q,
            None => unreachable!("malformed tree: no quadrant contains {point}"),
        }
    }
}

impl<T: Point + Clone> Node<T> {
    fn insert(&mut self, item: &T, depth: usize, max_depth: usize) -> Result<bool> {
        match self {
            &mut Self::Empty { boundary } => {
                *self = Self::Leaf {
                    boundary,
                    item: item.clone(),
                };
                Ok(true)
            }
            &mut Self::Leaf {
                boundary,
                item: ref existing,
            } => {
                let point = item.point();
                if is_same(&existing.point(), &point) {
                    return Ok(false);
                }
                if depth >= max_depth {
                    debug!(%point, depth, "depth limit reached, rejecting point");
                    return Err(QuadTreeError::DepthLimitExceeded(max_depth));
                }

                let existing = existing.clone();
                trace!(?boundary, depth, "splitting leaf");
                *self = Self::subdivide(boundary);

                self.insert(&existing, depth, max_depth)?;
                self.insert(item, depth, max_depth)
            }
            Self::Internal { children, .. } => {
                let q = Self::route(children, &item.point());
                children[q.index()].insert(item, depth + 1, max_depth)
            }
        }
    }

    fn get(&self, point: &P2) -> Option<&T> {
        match self {
            Self::Leaf { item, .. } if is_same(&item.point(), point) => Some(item),
            Self::Internal { children, .. } => {
                children[Self::route(children, point).index()].get(point)
            }
            _ => None,
        }
    }

    fn query_circle(&self, circle: &Circle, results: &mut Vec<T>) {
        match self {
            Self::Leaf { item, .. } => {
                if circle.contains(&item.point()) {
                    results.push(item.clone());
                }
            }
            Self::Internal { children, .. } => {
                for c in children {
                    if circle.reaches(c.boundary()) {
                        c.query_circle(circle, results);
                    }
                }
            }
            Self::Empty { .. } => (),
        }
    }

    /// `window` must already be clipped to this node's boundary
    fn query_window(&self, window: &Rect, results: &mut Vec<T>) {
        match self {
            Self::Leaf { item, .. } => {
                if window.contains(&item.point()) {
                    results.push(item.clone());
                }
            }
            Self::Internal {
                pivot, children, ..
            } => {
                let upper = Self::route(children, &window.upper());
                let lower = Self::route(children, &window.lower());

                match (upper, lower) {
                    (u, l) if u == l => children[u.index()].query_window(window, results),
                    (Quadrant::First, Quadrant::Third) => {
                        let [first, second, third, fourth] = children;
                        first.query_window(&Rect::from_corners(window.upper(), *pivot), results);
                        second.query_window(&second.boundary().clip(window), results);
                        third.query_window(&Rect::from_corners(*pivot, window.lower()), results);
                        fourth.query_window(&fourth.boundary().clip(window), results);
                    }
                    (u, l) => {
                        for q in [u, l] {
                            let child = &children[q.index()];
                            child.query_window(&child.boundary().clip(window), results);
                        }
                    }
                }
            }
            Self::Empty { .. } => (),
        }
    }

    /// Check the structure a deserialized subtree claims to have, collecting the
    /// positions of its items into `points`
    #[cfg(feature = "serde")]
    fn validate(&self, depth: usize, max_depth: usize, points: &mut Vec<P2>) -> Result<()> {
        match self {
            Self::Leaf { boundary, item } => {
                let point = item.point();
                if !boundary.contains(&point) {
                    return Err(QuadTreeError::MalformedTree("leaf item lies outside its leaf"));
                }
                points.push(point);
            }
            Self::Internal {
                boundary,
                pivot,
                children,
            } => {
                if depth >= max_depth {
                    return Err(QuadTreeError::MalformedTree("node sits below the depth limit"));
                }
                if !is_same(pivot, &boundary.center()) {
                    return Err(QuadTreeError::MalformedTree("pivot is not the boundary center"));
                }

                let quarters = boundary.quarter();
                for ((child, quarter), q) in children.iter().zip(&quarters).zip(Quadrant::ALL) {
                    if child.boundary() != quarter {
                        return Err(QuadTreeError::MalformedTree(
                            "children do not quarter their parent",
                        ));
                    }
                    let start = points.len();
                    child.validate(depth + 1, max_depth, points)?;
                    if points[start..]
                        .iter()
                        .any(|p| determine_quadrant(&quarters, p) != Some(q))
                    {
                        return Err(QuadTreeError::MalformedTree(
                            "item stored under the wrong quadrant",
                        ));
                    }
                }
            }
            Self::Empty { .. } => (),
        }
        Ok(())
    }

    /// Turn a leaf's extent into an internal node with four empty children
    fn subdivide(boundary: Rect) -> Self {
        let children = boundary
            .quarter()
            .map(|r| Box::new(Self::Empty { boundary: r }));
        Self::Internal {
            boundary,
            pivot: boundary.center(),
            children,
        }
    }
}
