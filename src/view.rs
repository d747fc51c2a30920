use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use crate::aggregate::entity_totals;
use crate::choropleth::{Choropleth, Indicator};
use crate::dataset::Dataset;
use crate::filter::{category_options, options, visible, FilterState};
use crate::rank::{rank, RankEntry};
use crate::types::{Counter, Dimension, GeoLevel};

/// Option lists offered for every selector, recomputed per view.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub municipalities: Vec<Arc<str>>,
    pub zones: Vec<Arc<str>>,
    pub locations: Vec<Arc<str>>,
    pub sections: Vec<Arc<str>>,
    pub categories: AHashMap<Dimension, Vec<Arc<str>>>,
}

/// Headline totals of the visible subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlineTotals {
    pub voters: u64,
    pub biometric: u64,
    pub disability: u64,
    pub municipalities: usize,
    pub sections: usize,
}

/// Category totals of the visible subset along one dimension, ranked and
/// shared against the subset's voter total.
#[derive(Debug, Clone)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub categories: Vec<RankEntry>,
}

/// Everything one render needs, derived in a single pass. A view model is
/// immutable and fully replaced on every filter or granularity change; no
/// step feeds back into an earlier one and nothing reads shared mutable
/// state.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub granularity: GeoLevel,
    pub indicator: Indicator,
    pub headline: HeadlineTotals,
    pub options: FilterOptions,
    pub breakdowns: Vec<DimensionBreakdown>,
    pub ranking: Vec<RankEntry>,
    pub choropleth: Choropleth,
}

/// The pure view pipeline: `(dataset, filter, granularity, indicator)` in,
/// `ViewModel` out. One linear scan produces the visible subset; aggregates,
/// rankings, option lists and the choropleth all derive from that subset.
pub fn compute_view(
    dataset: &Dataset,
    filter: &FilterState,
    granularity: GeoLevel,
    indicator: Indicator,
) -> ViewModel {
    let subset = visible(&dataset.records, filter);

    let headline = headline_totals(&subset);

    let options = FilterOptions {
        municipalities: options(&dataset.records, filter, GeoLevel::Municipality),
        zones: options(&dataset.records, filter, GeoLevel::Zone),
        locations: options(&dataset.records, filter, GeoLevel::Location),
        sections: options(&dataset.records, filter, GeoLevel::Section),
        categories: Dimension::order()
            .into_iter()
            .map(|dim| (dim, category_options(&dataset.records, dim)))
            .collect(),
    };

    let breakdowns = Dimension::order()
        .into_iter()
        .map(|dimension| {
            let mut totals: AHashMap<Arc<str>, u64> = AHashMap::new();
            for record in &subset {
                *totals.entry(Arc::clone(dimension.value_of(record))).or_insert(0) +=
                    record.voters;
            }
            DimensionBreakdown { dimension, categories: rank(totals, headline.voters) }
        })
        .collect();

    let ranking = rank(
        entity_totals(&subset, granularity, Counter::Voters),
        headline.voters,
    );

    let choropleth = Choropleth::compute(&subset, granularity, indicator);

    ViewModel { granularity, indicator, headline, options, breakdowns, ranking, choropleth }
}

fn headline_totals(subset: &[&crate::record::VoterRecord]) -> HeadlineTotals {
    let mut totals = HeadlineTotals::default();
    let mut municipalities = AHashSet::new();
    let mut sections = AHashSet::new();
    for record in subset {
        totals.voters += record.voters;
        totals.biometric += record.biometric;
        totals.disability += record.disability;
        municipalities.insert(Arc::clone(&record.municipality));
        sections.insert((
            Arc::clone(&record.municipality),
            Arc::clone(&record.zone),
            Arc::clone(&record.section),
        ));
    }
    totals.municipalities = municipalities.len();
    totals.sections = sections.len();
    totals
}

#[cfg(test)]
mod tests {
    use super::compute_view;
    use crate::choropleth::Indicator;
    use crate::dataset::Dataset;
    use crate::filter::FilterState;
    use crate::record::{normalize_sheet, ColumnLayout, RawSheet};
    use crate::types::{Dimension, GeoLevel};

    /// Municipality A: 120 female / 200 voters; B: 50 female / 100 voters.
    fn dataset() -> Dataset {
        let rows = [
            ["A", "1", "1", "ESCOLA A", "FEMININO", "SOLTEIRO", "18 A 20", "MÉDIO", "PARDA", "N/A", "N", "120", "110", "2"],
            ["A", "1", "2", "ESCOLA A", "MASCULINO", "CASADO", "21 A 24", "MÉDIO", "BRANCA", "N/A", "N", "80", "70", "1"],
            ["B", "2", "1", "ESCOLA B", "FEMININO", "SOLTEIRO", "18 A 20", "MÉDIO", "PARDA", "N/A", "N", "50", "40", "0"],
            ["B", "2", "2", "ESCOLA B", "MASCULINO", "CASADO", "21 A 24", "MÉDIO", "PARDA", "N/A", "N", "50", "45", "0"],
        ];
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        let records =
            normalize_sheet(&ColumnLayout::default(), &RawSheet::new("perfil", Vec::new(), rows));
        Dataset::new(records, vec!["perfil".to_string()], Vec::new())
    }

    fn female_percent(view: &super::ViewModel) -> f64 {
        view.breakdowns
            .iter()
            .find(|b| b.dimension == Dimension::Gender)
            .and_then(|b| b.categories.iter().find(|c| &*c.entity == "FEMININO"))
            .map(|c| c.percent)
            .unwrap_or(0.0)
    }

    #[test]
    fn drill_down_rebases_the_female_share() {
        let dataset = dataset();
        let mut filter = FilterState::new();

        let statewide = compute_view(&dataset, &filter, GeoLevel::Municipality, Indicator::FemaleShare);
        assert_eq!(statewide.headline.voters, 300);
        assert!((female_percent(&statewide) - 170.0 / 300.0 * 100.0).abs() < 1e-9);

        // Selecting A narrows the share to A's records only.
        filter.select(GeoLevel::Municipality, "A");
        let scoped = compute_view(&dataset, &filter, GeoLevel::Municipality, Indicator::FemaleShare);
        assert_eq!(scoped.headline.voters, 200);
        assert!((female_percent(&scoped) - 60.0).abs() < 1e-9);

        // Clearing back to ALL leaves B's number untouched.
        filter.reset();
        let back = compute_view(&dataset, &filter, GeoLevel::Municipality, Indicator::FemaleShare);
        assert!((back.choropleth.value_for("B").unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn crossing_the_sixty_percent_bucket_separates_the_fills() {
        let dataset = dataset();
        let view = compute_view(
            &dataset,
            &FilterState::new(),
            GeoLevel::Municipality,
            Indicator::FemaleShare,
        );

        let a = view.choropleth.style_for("A");
        let b = view.choropleth.style_for("B");
        assert_ne!(a.fill_color, b.fill_color);
    }

    #[test]
    fn ranking_and_options_derive_from_the_same_pass() {
        let dataset = dataset();
        let view = compute_view(
            &dataset,
            &FilterState::new(),
            GeoLevel::Municipality,
            Indicator::VoterTotal,
        );

        assert_eq!(&*view.ranking[0].entity, "A");
        assert_eq!(view.ranking[0].rank, 1);
        assert_eq!(view.options.municipalities.len(), 2);
        assert_eq!(view.options.sections.len(), 2); // section labels "1", "2"
        assert_eq!(view.headline.sections, 4); // distinct (mun, zone, section)
    }

    #[test]
    fn empty_dataset_renders_the_no_data_state_not_a_crash() {
        let dataset = Dataset::default();
        assert!(!dataset.has_data());

        let view = compute_view(
            &dataset,
            &FilterState::new(),
            GeoLevel::Municipality,
            Indicator::VoterTotal,
        );
        assert_eq!(view.headline, super::HeadlineTotals::default());
        assert!(view.ranking.is_empty());
        assert!(view.options.municipalities.is_empty());
    }
}
