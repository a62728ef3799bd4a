/// Depth used when no explicit limit is configured
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Tuning knobs for a [`QuadTree`](crate::QuadTree)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct QuadTreeConfig {
    /// Deepest level a node may sit at. The root is level 0.
    ///
    /// Clustered points can force an unbounded chain of splits, so inserting
    /// a point that would need a node below this level fails instead.
    pub max_depth: usize,
}

impl QuadTreeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
