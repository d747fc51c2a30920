use std::cmp::Ordering;
use std::sync::Arc;

use ahash::AHashSet;

use super::state::FilterState;
use crate::record::VoterRecord;
use crate::types::{Dimension, GeoLevel};

/// Option list for a geographic level: the distinct values at `level` among
/// records consistent with every *coarser* selection. The level's own pin
/// and everything finer are ignored, so the offered options always contain
/// the current selection and shrink as the user drills down.
pub fn options(records: &[VoterRecord], filter: &FilterState, level: GeoLevel) -> Vec<Arc<str>> {
    let mut seen = AHashSet::new();
    let mut values = Vec::new();
    for record in records {
        if !filter.matches_coarser_than(record, level) {
            continue;
        }
        let value = record.entity_at(level);
        if seen.insert(Arc::clone(value)) {
            values.push(Arc::clone(value));
        }
    }
    sort_options(&mut values);
    values
}

/// Option list for a categorical dimension. Categorical selectors are
/// independent of the cascade and of each other, so the list is drawn from
/// the full record set and never shrinks when other filters are applied.
pub fn category_options(records: &[VoterRecord], dimension: Dimension) -> Vec<Arc<str>> {
    let mut seen = AHashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = dimension.value_of(record);
        if seen.insert(Arc::clone(value)) {
            values.push(Arc::clone(value));
        }
    }
    sort_options(&mut values);
    values
}

/// The working subset: one linear scan intersecting every active filter.
/// No indexes are maintained; recomputation is always a full pass.
pub fn visible<'a>(records: &'a [VoterRecord], filter: &FilterState) -> Vec<&'a VoterRecord> {
    records.iter().filter(|record| filter.matches(record)).collect()
}

/// Zones and sections are numeric strings; sort those numerically so "9"
/// precedes "10", and fall back to lexical order for named entities.
fn sort_options(values: &mut [Arc<str>]) {
    values.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{category_options, options, visible};
    use crate::filter::{FilterState, Selection};
    use crate::record::{normalize_sheet, ColumnLayout, RawSheet};
    use crate::record::VoterRecord;
    use crate::types::{Dimension, GeoLevel};

    fn fixture() -> Vec<VoterRecord> {
        let rows = [
            ["NATAL", "4", "10", "ESCOLA A", "FEMININO", "SOLTEIRO", "18 A 20", "MÉDIO", "PARDA", "N/A", "N", "120", "100", "2"],
            ["NATAL", "4", "9", "ESCOLA A", "MASCULINO", "CASADO", "21 A 24", "MÉDIO", "BRANCA", "N/A", "N", "80", "60", "1"],
            ["NATAL", "5", "2", "ESCOLA B", "FEMININO", "CASADO", "21 A 24", "SUPERIOR", "PRETA", "N/A", "N", "50", "50", "0"],
            ["MOSSORÓ", "33", "1", "GINÁSIO C", "FEMININO", "SOLTEIRO", "18 A 20", "FUNDAMENTAL", "PARDA", "N/A", "S", "50", "0", "3"],
            ["MOSSORÓ", "33", "2", "GINÁSIO C", "MASCULINO", "SOLTEIRO", "25 A 34", "MÉDIO", "PARDA", "N/A", "S", "50", "40", "0"],
        ];
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        normalize_sheet(&ColumnLayout::default(), &RawSheet::new("perfil", Vec::new(), rows))
    }

    #[test]
    fn zone_options_narrow_under_a_municipality() {
        let records = fixture();
        let mut filter = FilterState::new();

        let statewide = options(&records, &filter, GeoLevel::Zone);
        assert_eq!(statewide.len(), 3);

        filter.select(GeoLevel::Municipality, "NATAL");
        let narrowed = options(&records, &filter, GeoLevel::Zone);
        let expected: Vec<Arc<str>> = vec!["4".into(), "5".into()];
        assert_eq!(narrowed, expected);

        // Subset invariant: narrowed options all appear in the wider list.
        assert!(narrowed.iter().all(|z| statewide.contains(z)));
    }

    #[test]
    fn own_selection_does_not_narrow_its_own_options() {
        let records = fixture();
        let mut filter = FilterState::new();
        filter.select(GeoLevel::Municipality, "NATAL");
        filter.select(GeoLevel::Zone, "4");

        // Zone 5 stays on offer while zone 4 is pinned.
        let expected: Vec<Arc<str>> = vec!["4".into(), "5".into()];
        assert_eq!(options(&records, &filter, GeoLevel::Zone), expected);
    }

    #[test]
    fn numeric_options_sort_numerically() {
        let records = fixture();
        let mut filter = FilterState::new();
        filter.select(GeoLevel::Municipality, "NATAL");
        filter.select(GeoLevel::Zone, "4");

        let expected: Vec<Arc<str>> = vec!["9".into(), "10".into()];
        assert_eq!(options(&records, &filter, GeoLevel::Section), expected);
    }

    #[test]
    fn category_options_ignore_other_filters() {
        let records = fixture();
        let all = category_options(&records, Dimension::Gender);
        let expected: Vec<Arc<str>> = vec!["FEMININO".into(), "MASCULINO".into()];
        assert_eq!(all, expected);
    }

    #[test]
    fn visible_intersects_every_filter() {
        let records = fixture();
        let mut filter = FilterState::new();
        filter.select(GeoLevel::Municipality, "MOSSORÓ");
        filter.set_category(Dimension::Gender, Selection::Only("MASCULINO".into()));
        filter.only_biometric = true;

        let subset = visible(&records, &filter);
        assert_eq!(subset.len(), 1);
        assert_eq!(&*subset[0].section, "2");
    }

    #[test]
    fn all_filters_cleared_shows_everything() {
        let records = fixture();
        let filter = FilterState::new();
        assert_eq!(visible(&records, &filter).len(), records.len());
    }
}
