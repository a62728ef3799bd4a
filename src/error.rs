use thiserror::Error;

use crate::P2;

/// Errors produced while building or loading a [`QuadTree`](crate::QuadTree)
#[derive(Debug, Error)]
pub enum QuadTreeError {
    #[error("invalid extent: upper corner {upper} does not dominate lower corner {lower}")]
    InvalidExtent { upper: P2, lower: P2 },

    #[error("point {0} lies outside the tree boundary")]
    OutOfBounds(P2),

    #[error("depth limit of {0} reached while separating points")]
    DepthLimitExceeded(usize),

    #[error("malformed tree: {0}")]
    MalformedTree(&'static str),

    #[error("failed to read coordinate records")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = QuadTreeError> = std::result::Result<T, E>;
