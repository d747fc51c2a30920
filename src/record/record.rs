use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::normalize::{normalize_label, parse_count, parse_flag};
use super::sheet::RawSheet;
use crate::types::GeoLevel;

/// Positional column contract for the voter-profile sheet family.
/// Every sheet in the family shares one layout; header names are ignored.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub municipality: usize,
    pub zone: usize,
    pub section: usize,
    pub location: usize,
    pub gender: usize,
    pub marital_status: usize,
    pub age_bracket: usize,
    pub education: usize,
    pub race: usize,
    pub gender_identity: usize,
    pub quilombola: usize,
    pub voters: usize,
    pub biometric: usize,
    pub disability: usize,
}

impl Default for ColumnLayout {
    /// The canonical profile-sheet column order.
    fn default() -> Self {
        Self {
            municipality: 0,
            zone: 1,
            section: 2,
            location: 3,
            gender: 4,
            marital_status: 5,
            age_bracket: 6,
            education: 7,
            race: 8,
            gender_identity: 9,
            quilombola: 10,
            voters: 11,
            biometric: 12,
            disability: 13,
        }
    }
}

/// One normalized microdata record: a geographic/demographic slice with its
/// counters. Immutable after normalization; labels are shared `Arc<str>`s
/// since the same municipality/category text repeats across thousands of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    pub municipality: Arc<str>,
    pub zone: Arc<str>,
    pub section: Arc<str>,
    pub location: Arc<str>,
    pub gender: Arc<str>,
    pub marital_status: Arc<str>,
    pub age_bracket: Arc<str>,
    pub education: Arc<str>,
    pub race: Arc<str>,
    pub gender_identity: Arc<str>,
    pub quilombola: bool,
    pub voters: u64,
    pub biometric: u64,
    pub disability: u64,
}

impl VoterRecord {
    /// The record's entity label at the given granularity.
    pub fn entity_at(&self, level: GeoLevel) -> &Arc<str> {
        match level {
            GeoLevel::Municipality => &self.municipality,
            GeoLevel::Zone => &self.zone,
            GeoLevel::Location => &self.location,
            GeoLevel::Section => &self.section,
        }
    }
}

/// Turn one raw sheet into normalized records. Pure transform: a malformed
/// or short row contributes a record of sentinel/zero fields, never an error.
pub fn normalize_sheet(layout: &ColumnLayout, sheet: &RawSheet) -> Vec<VoterRecord> {
    sheet.rows.iter().map(|row| normalize_row(layout, row)).collect()
}

fn normalize_row(layout: &ColumnLayout, row: &[String]) -> VoterRecord {
    let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

    VoterRecord {
        municipality: normalize_label(cell(layout.municipality)),
        zone: normalize_label(cell(layout.zone)),
        section: normalize_label(cell(layout.section)),
        location: normalize_label(cell(layout.location)),
        gender: normalize_label(cell(layout.gender)),
        marital_status: normalize_label(cell(layout.marital_status)),
        age_bracket: normalize_label(cell(layout.age_bracket)),
        education: normalize_label(cell(layout.education)),
        race: normalize_label(cell(layout.race)),
        gender_identity: normalize_label(cell(layout.gender_identity)),
        quilombola: parse_flag(cell(layout.quilombola)),
        voters: parse_count(cell(layout.voters)),
        biometric: parse_count(cell(layout.biometric)),
        disability: parse_count(cell(layout.disability)),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_sheet, ColumnLayout};
    use crate::record::RawSheet;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn full_row_normalizes_every_field() {
        let sheet = RawSheet::new(
            "perfil",
            Vec::new(),
            vec![row(&[
                " natal ", "4", "12", "escola municipal a", "feminino", "solteiro",
                "21 a 24 anos", "ensino médio completo", "parda", "n/a", "S",
                "1.204", "980", "12",
            ])],
        );

        let records = normalize_sheet(&ColumnLayout::default(), &sheet);
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(&*r.municipality, "NATAL");
        assert_eq!(&*r.zone, "4");
        assert_eq!(&*r.section, "12");
        assert_eq!(&*r.gender, "FEMININO");
        assert_eq!(&*r.age_bracket, "21 A 24 ANOS");
        assert!(r.quilombola);
        assert_eq!(r.voters, 1204);
        assert_eq!(r.biometric, 980);
        assert_eq!(r.disability, 12);
    }

    #[test]
    fn short_row_degrades_to_sentinels_and_zeros() {
        let sheet = RawSheet::new("perfil", Vec::new(), vec![row(&["MOSSORÓ", "33"])]);

        let records = normalize_sheet(&ColumnLayout::default(), &sheet);
        let r = &records[0];
        assert_eq!(&*r.municipality, "MOSSORÓ");
        assert_eq!(&*r.zone, "33");
        assert_eq!(&*r.section, "N/A");
        assert_eq!(&*r.gender, "N/A");
        assert!(!r.quilombola);
        assert_eq!(r.voters, 0);
    }

    #[test]
    fn garbage_counts_never_abort_the_batch() {
        let mut cells = vec!["A"; 11];
        cells.extend(["muitos", "-3", ""]);
        let sheet = RawSheet::new("perfil", Vec::new(), vec![row(&cells)]);

        let r = &normalize_sheet(&ColumnLayout::default(), &sheet)[0];
        assert_eq!(r.voters, 0);
        assert_eq!(r.biometric, 0);
        assert_eq!(r.disability, 0);
    }
}
