use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One row of a rank-ordered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub entity: Arc<str>,
    pub value: u64,
    /// Share of the caller-supplied reference total, in percent.
    pub percent: f64,
    /// Dense, index-based rank: 1, 2, 3, … with no gaps. Ties are NOT
    /// collapsed; each row advances the counter.
    pub rank: u32,
}

/// Share of `whole` represented by `part`, in percent. A zero reference
/// yields 0.0, never an error.
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Rank entity totals against a reference total scoped the same way as the
/// totals (statewide totals against the statewide reference, one
/// municipality's against that municipality's). Sort is strictly descending
/// by value with entity name as the deterministic tie order.
pub fn rank(totals: impl IntoIterator<Item = (Arc<str>, u64)>, reference: u64) -> Vec<RankEntry> {
    let mut pairs: Vec<(Arc<str>, u64)> = totals.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    pairs
        .into_iter()
        .enumerate()
        .map(|(idx, (entity, value))| RankEntry {
            entity,
            value,
            percent: percent_of(value, reference),
            rank: idx as u32 + 1,
        })
        .collect()
}
