//! A point-region quadtree for spatial indexing of 2D points.
//!
//! Items are stored one per leaf. Besides exact lookups the tree answers circular
//! range queries, axis-aligned window queries and k-nearest-neighbor queries.
//!
//! ```
//! use nalgebra::point;
//! use pr_quadtree::{Circle, QuadTree, Rect};
//!
//! let mut qt = QuadTree::from_corners(point![1.0, 1.0], point![0.0, 0.0])?;
//! for p in [point![0.3, 0.3], point![0.2, 0.2], point![0.7, 0.7]] {
//!     qt.insert(&p)?;
//! }
//! assert!(qt.contains(&point![0.2, 0.2]));
//!
//! let mut in_circle = Vec::new();
//! qt.query_circle(&Circle::new(point![0.5, 0.5], 0.3), &mut in_circle);
//! assert_eq!(in_circle.len(), 2);
//!
//! let mut in_window = Vec::new();
//! qt.query_window(&Rect::new(point![0.25, 0.25], point![0.0, 0.0])?, &mut in_window);
//! assert_eq!(in_window, vec![point![0.2, 0.2]]);
//!
//! let mut nearest = Vec::new();
//! qt.query_nearest(&point![0.0, 0.0], 1, &mut nearest);
//! assert_eq!(nearest, vec![point![0.2, 0.2]]);
//! # Ok::<(), pr_quadtree::QuadTreeError>(())
//! ```

use nalgebra::Point2;

mod config;
mod error;
pub mod ingest;
mod nearest;
mod quadtree;
mod shapes;
mod util;

pub use config::{QuadTreeConfig, DEFAULT_MAX_DEPTH};
pub use error::{QuadTreeError, Result};
pub use quadtree::QuadTree;
pub use shapes::{Circle, Rect};
pub use util::{distance, is_same, median};

/// 2d point type used for positions throughout the crate
pub type P2 = Point2<f64>;

/// Trait for getting a 2d point position of data stored in the [`QuadTree`]
pub trait Point {
    /// Get 2d point position
    fn point(&self) -> P2;
}

impl Point for P2 {
    fn point(&self) -> P2 {
        *self
    }
}
