//! Series normalizer
//!
//! Canonical form of a series: ascending by time, at most one record per
//! timestamp. Duplicates can appear when the same date is ingested twice;
//! the stable sort keeps arrival order within a timestamp, and the first
//! record of each run survives. Later duplicates are discarded by design,
//! not treated as errors.

use crate::models::Series;

/// Sort ascending by time and drop consecutive timestamp repeats.
///
/// Idempotent: normalizing an already-normalized series returns it unchanged.
pub fn normalize(mut records: Series) -> Series {
    records.sort_by_key(|r| r.time);
    records.dedup_by_key(|r| r.time);
    records
}
