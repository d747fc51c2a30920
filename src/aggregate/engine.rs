use std::sync::Arc;

use ahash::AHashMap;

use crate::record::VoterRecord;
use crate::types::{Counter, Dimension, GeoLevel};

/// Running totals per category value within one entity.
pub type CategoryTotals = AHashMap<Arc<str>, u64>;

/// Fold records into per-entity, per-category totals at the given
/// granularity: one bucket per `(entity, category)` pair, incremented by the
/// chosen counter. Pure summation, so the result is identical regardless of
/// record order. Multi-dimension reports call this once per dimension
/// (independent passes, never a cross-product), which bounds the bucket
/// count to entities × categories.
pub fn aggregate(
    records: &[&VoterRecord],
    level: GeoLevel,
    dimension: Dimension,
    counter: Counter,
) -> AHashMap<Arc<str>, CategoryTotals> {
    let mut buckets: AHashMap<Arc<str>, CategoryTotals> = AHashMap::new();
    for record in records {
        let entity = Arc::clone(record.entity_at(level));
        let category = Arc::clone(dimension.value_of(record));
        *buckets.entry(entity).or_default().entry(category).or_insert(0) +=
            counter.value_of(record);
    }
    buckets
}

/// Plain per-entity totals of one counter: the input for ranking tables and
/// choropleth values.
pub fn entity_totals(
    records: &[&VoterRecord],
    level: GeoLevel,
    counter: Counter,
) -> AHashMap<Arc<str>, u64> {
    let mut totals: AHashMap<Arc<str>, u64> = AHashMap::new();
    for record in records {
        *totals.entry(Arc::clone(record.entity_at(level))).or_insert(0) +=
            counter.value_of(record);
    }
    totals
}
