//! Record deduplication by natural key.
//!
//! No key is assumed unique before this step; uniqueness is the
//! postcondition.

use crate::error::Result;
use polars::prelude::*;

/// Remove all but the first-encountered row per distinct key value,
/// preserving the original relative order of retained rows. Returns the
/// deduplicated frame and the number of rows removed.
pub fn dedupe_by_key(df: DataFrame, key: &str) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let out = df.unique_stable(
        Some(&[key.to_string()]),
        UniqueKeepStrategy::First,
        None,
    )?;
    let removed = before - out.height();
    Ok((out, removed))
}
