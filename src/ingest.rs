//! Loading coordinate pairs from line-oriented text.
//!
//! Each record is one line holding an `x` and a `y` separated by a comma, whitespace,
//! or both. Blank lines and lines starting with `#` are ignored. Records that do not
//! parse, or that fall outside the tree, are skipped with a warning so they never
//! reach the tree.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::{
    error::{QuadTreeError, Result},
    QuadTree, P2,
};

/// Tally of a [`load`] run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records stored as new points
    pub inserted: usize,
    /// Records whose position was already stored
    pub duplicates: usize,
    /// Malformed or out-of-bounds records
    pub skipped: usize,
}

/// Parse a single record into a point
///
/// **Returns** `None` for anything other than exactly two finite numbers.
pub fn parse_record(line: &str) -> Option<P2> {
    let mut fields = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let x = fields.next()?.parse::<f64>().ok()?;
    let y = fields.next()?.parse::<f64>().ok()?;
    if fields.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(P2::new(x, y))
}

/// Insert every record read from `reader` into `tree`
///
/// ## Errors
/// Fails on read errors and when the tree's depth limit rejects a point. Records
/// processed before the failure stay inserted.
pub fn load<R: BufRead>(tree: &mut QuadTree<P2>, reader: R) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') {
            continue;
        }

        let line_number = index + 1;
        let Some(point) = parse_record(record) else {
            warn!(line_number, record, "skipping malformed coordinate record");
            summary.skipped += 1;
            continue;
        };

        match tree.insert(&point) {
            Ok(true) => summary.inserted += 1,
            Ok(false) => summary.duplicates += 1,
            Err(QuadTreeError::OutOfBounds(_)) => {
                warn!(line_number, %point, "skipping record outside the tree boundary");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    debug!(?summary, "finished loading coordinate records");
    Ok(summary)
}
