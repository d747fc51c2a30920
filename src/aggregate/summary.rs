use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::rank::percent_of;
use crate::record::VoterRecord;
use crate::types::{Dimension, GeoLevel};

/// Entity label used for statewide (whole-territory) aggregates.
pub const STATEWIDE: &str = "TOTAL";

const FEMALE_LABEL: &str = "FEMININO";

/// One aggregated bucket: `(entity, dimension, category)` with its running
/// total and its share of the scope's reference total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetric {
    pub entity: Arc<str>,
    pub dimension: Dimension,
    pub category: Arc<str>,
    pub total: u64,
    pub percent_of_reference: f64,
}

/// Top-level summary persisted alongside the cached payload: statewide
/// category totals for every dimension, shares against total voters.
/// Within each dimension, categories come out largest first.
pub fn summarize(records: &[VoterRecord]) -> Vec<AggregatedMetric> {
    let reference: u64 = records.iter().map(|r| r.voters).sum();
    let mut out = Vec::new();

    for dimension in Dimension::order() {
        let mut totals: AHashMap<Arc<str>, u64> = AHashMap::new();
        for record in records {
            *totals.entry(Arc::clone(dimension.value_of(record))).or_insert(0) += record.voters;
        }

        let mut entries: Vec<(Arc<str>, u64)> = totals.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        out.extend(entries.into_iter().map(|(category, total)| AggregatedMetric {
            entity: Arc::from(STATEWIDE),
            dimension,
            category,
            total,
            percent_of_reference: percent_of(total, reference),
        }));
    }
    out
}

/// Per-entity stats the choropleth indicators read. Counters only; every
/// share is derived at evaluation time against this entity's voter total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBreakdown {
    pub voters: u64,
    pub biometric: u64,
    pub disability: u64,
    pub female: u64,
    pub elderly: u64,
    pub quilombola: u64,
}

impl EntityBreakdown {
    /// Fold the visible records into one breakdown per entity at `level`.
    pub fn collect(
        records: &[&VoterRecord],
        level: GeoLevel,
    ) -> AHashMap<Arc<str>, EntityBreakdown> {
        let mut map: AHashMap<Arc<str>, EntityBreakdown> = AHashMap::new();
        for record in records {
            map.entry(Arc::clone(record.entity_at(level)))
                .or_default()
                .add(record);
        }
        map
    }

    fn add(&mut self, record: &VoterRecord) {
        self.voters += record.voters;
        self.biometric += record.biometric;
        self.disability += record.disability;
        if &*record.gender == FEMALE_LABEL {
            self.female += record.voters;
        }
        if is_elderly_bracket(&record.age_bracket) {
            self.elderly += record.voters;
        }
        if record.quilombola {
            self.quilombola += record.voters;
        }
    }
}

/// Age brackets are labels like "60 A 69 ANOS" or "100 ANOS OU MAIS";
/// the leading number decides membership.
fn is_elderly_bracket(bracket: &str) -> bool {
    let digits: String = bracket.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().map(|age| age >= 60).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{is_elderly_bracket, summarize, EntityBreakdown};
    use crate::record::{normalize_sheet, ColumnLayout, RawSheet, VoterRecord};
    use crate::types::{Dimension, GeoLevel};

    fn fixture() -> Vec<VoterRecord> {
        let rows = [
            ["NATAL", "4", "10", "ESCOLA A", "FEMININO", "SOLTEIRO", "60 A 69 ANOS", "MÉDIO", "PARDA", "N/A", "N", "120", "100", "2"],
            ["NATAL", "4", "9", "ESCOLA A", "MASCULINO", "CASADO", "21 A 24 ANOS", "MÉDIO", "BRANCA", "N/A", "N", "80", "60", "1"],
            ["MOSSORÓ", "33", "1", "GINÁSIO C", "FEMININO", "SOLTEIRO", "18 A 20 ANOS", "FUNDAMENTAL", "PARDA", "N/A", "S", "50", "0", "3"],
        ];
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        normalize_sheet(&ColumnLayout::default(), &RawSheet::new("perfil", Vec::new(), rows))
    }

    #[test]
    fn summary_percents_sum_to_one_hundred_per_dimension() {
        let records = fixture();
        let summary = summarize(&records);

        for dimension in Dimension::order() {
            let sum: f64 = summary
                .iter()
                .filter(|m| m.dimension == dimension)
                .map(|m| m.percent_of_reference)
                .sum();
            assert!((sum - 100.0).abs() < 1e-9, "{dimension:?} sums to {sum}");
        }
    }

    #[test]
    fn summary_orders_categories_largest_first() {
        let records = fixture();
        let summary = summarize(&records);

        let genders: Vec<_> = summary
            .iter()
            .filter(|m| m.dimension == Dimension::Gender)
            .collect();
        assert_eq!(&*genders[0].category, "FEMININO");
        assert_eq!(genders[0].total, 170);
        assert_eq!(genders[1].total, 80);
    }

    #[test]
    fn breakdown_folds_shares_per_entity() {
        let records = fixture();
        let refs: Vec<_> = records.iter().collect();
        let map = EntityBreakdown::collect(&refs, GeoLevel::Municipality);

        let natal = map["NATAL"];
        assert_eq!(natal.voters, 200);
        assert_eq!(natal.female, 120);
        assert_eq!(natal.elderly, 120);
        assert_eq!(natal.quilombola, 0);
        assert_eq!(map["MOSSORÓ"].quilombola, 50);
    }

    #[test]
    fn elderly_brackets_parse_from_leading_number() {
        assert!(is_elderly_bracket("60 A 69 ANOS"));
        assert!(is_elderly_bracket("100 ANOS OU MAIS"));
        assert!(!is_elderly_bracket("18 A 20 ANOS"));
        assert!(!is_elderly_bracket("N/A"));
    }
}
