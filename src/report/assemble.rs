use std::sync::Arc;

use ahash::AHashSet;
use num_format::{Locale, ToFormattedString};

use super::document::{Block, ReportDocument, ReportScope, Section, Stat, Table};
use crate::aggregate::entity_totals;
use crate::dataset::Dataset;
use crate::filter::{visible, FilterState};
use crate::rank::{rank, RankEntry};
use crate::record::VoterRecord;
use crate::types::{Counter, GeoLevel};

/// Assemble the document for a scope: a cover block of headline totals, a
/// detail table per entity at `granularity`, and, when the scope is one
/// municipality, a breakdown table by polling location. Percentages and
/// ranks are recomputed within the scope's record subset, never inherited
/// from a wider scope.
pub fn assemble(dataset: &Dataset, scope: &ReportScope, granularity: GeoLevel) -> ReportDocument {
    let mut filter = FilterState::new();
    if let ReportScope::Municipality(name) = scope {
        filter.select(GeoLevel::Municipality, Arc::clone(name));
    }
    let subset = visible(&dataset.records, &filter);
    let reference: u64 = subset.iter().map(|r| r.voters).sum();

    let mut sections = vec![Section {
        heading: "Summary".to_string(),
        block: Block::Headline(headline_stats(&subset, reference)),
    }];

    let detail = rank(entity_totals(&subset, granularity, Counter::Voters), reference);
    sections.push(Section {
        heading: format!("Ranking by {}", granularity.to_str()),
        block: Block::Table(rank_table(granularity.to_str(), &detail)),
    });

    if matches!(scope, ReportScope::Municipality(_)) {
        let breakdown = rank(
            entity_totals(&subset, GeoLevel::Location, Counter::Voters),
            reference,
        );
        sections.push(Section {
            heading: "Breakdown by polling location".to_string(),
            block: Block::Table(rank_table("location", &breakdown)),
        });
    }

    ReportDocument { title: scope.title(), scope: scope.clone(), sections }
}

fn headline_stats(subset: &[&VoterRecord], reference: u64) -> Vec<Stat> {
    let biometric: u64 = subset.iter().map(|r| r.biometric).sum();
    let disability: u64 = subset.iter().map(|r| r.disability).sum();
    let municipalities: AHashSet<&str> = subset.iter().map(|r| &*r.municipality).collect();
    let sections: AHashSet<(&str, &str, &str)> = subset
        .iter()
        .map(|r| (&*r.municipality, &*r.zone, &*r.section))
        .collect();

    vec![
        Stat { label: "Registered voters".into(), value: fmt_count(reference) },
        Stat { label: "Biometric registrations".into(), value: fmt_count(biometric) },
        Stat { label: "Voters with disability".into(), value: fmt_count(disability) },
        Stat { label: "Municipalities".into(), value: fmt_count(municipalities.len() as u64) },
        Stat { label: "Polling sections".into(), value: fmt_count(sections.len() as u64) },
    ]
}

fn rank_table(entity_column: &str, entries: &[RankEntry]) -> Table {
    Table {
        columns: vec![
            "Rank".to_string(),
            entity_column.to_string(),
            "Voters".to_string(),
            "Share (%)".to_string(),
        ],
        rows: entries
            .iter()
            .map(|e| {
                vec![
                    e.rank.to_string(),
                    e.entity.to_string(),
                    fmt_count(e.value),
                    format!("{:.2}", e.percent),
                ]
            })
            .collect(),
    }
}

fn fmt_count(n: u64) -> String {
    n.to_formatted_string(&Locale::pt)
}
