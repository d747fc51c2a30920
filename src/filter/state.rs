use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::VoterRecord;
use crate::types::{Dimension, GeoLevel};

/// One selector: unrestricted, or pinned to a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(Arc<str>),
}

impl Selection {
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    #[inline]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(only) => &**only == value,
        }
    }
}

/// The full filter tuple: the geographic cascade, one independent selector
/// per categorical dimension, and the boolean inclusion flags.
///
/// Cascade rule: pinning a level resets every finer level to `All`.
/// Categorical selectors never reset one another. The initial all-`All`
/// state is reachable at any time via [`FilterState::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub municipality: Selection,
    pub zone: Selection,
    pub location: Selection,
    pub section: Selection,

    pub gender: Selection,
    pub marital_status: Selection,
    pub age_bracket: Selection,
    pub education: Selection,
    pub race: Selection,
    pub gender_identity: Selection,

    /// Keep only slices with at least one biometric registration.
    pub only_biometric: bool,
    /// Keep only slices from self-declared quilombola communities.
    pub only_quilombola: bool,
    /// Keep only slices with at least one registered voter with disability.
    pub only_disability: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geo(&self, level: GeoLevel) -> &Selection {
        match level {
            GeoLevel::Municipality => &self.municipality,
            GeoLevel::Zone => &self.zone,
            GeoLevel::Location => &self.location,
            GeoLevel::Section => &self.section,
        }
    }

    fn geo_mut(&mut self, level: GeoLevel) -> &mut Selection {
        match level {
            GeoLevel::Municipality => &mut self.municipality,
            GeoLevel::Zone => &mut self.zone,
            GeoLevel::Location => &mut self.location,
            GeoLevel::Section => &mut self.section,
        }
    }

    pub fn category(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::Gender => &self.gender,
            Dimension::MaritalStatus => &self.marital_status,
            Dimension::AgeBracket => &self.age_bracket,
            Dimension::Education => &self.education,
            Dimension::Race => &self.race,
            Dimension::GenderIdentity => &self.gender_identity,
        }
    }

    pub fn set_category(&mut self, dimension: Dimension, selection: Selection) {
        let slot = match dimension {
            Dimension::Gender => &mut self.gender,
            Dimension::MaritalStatus => &mut self.marital_status,
            Dimension::AgeBracket => &mut self.age_bracket,
            Dimension::Education => &mut self.education,
            Dimension::Race => &mut self.race,
            Dimension::GenderIdentity => &mut self.gender_identity,
        };
        *slot = selection;
    }

    /// Pin a geographic level to a concrete value. Every finer level is
    /// reset to `All`, since its previous selection may no longer exist
    /// under the new parent.
    pub fn select(&mut self, level: GeoLevel, value: impl Into<Arc<str>>) {
        *self.geo_mut(level) = Selection::Only(value.into());
        self.reset_finer_than(level);
    }

    /// Return a geographic level to `All`. Finer levels reset as well.
    pub fn clear(&mut self, level: GeoLevel) {
        *self.geo_mut(level) = Selection::All;
        self.reset_finer_than(level);
    }

    /// Back to the initial, unrestricted state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn reset_finer_than(&mut self, level: GeoLevel) {
        let mut next = level.finer();
        while let Some(finer) = next {
            *self.geo_mut(finer) = Selection::All;
            next = finer.finer();
        }
    }

    /// True when the record survives every active filter: the geographic
    /// cascade AND every categorical selector AND every inclusion flag.
    pub fn matches(&self, record: &VoterRecord) -> bool {
        if !self.matches_geo(record) {
            return false;
        }
        for dimension in Dimension::order() {
            if !self.category(dimension).matches(dimension.value_of(record)) {
                return false;
            }
        }
        if self.only_biometric && record.biometric == 0 {
            return false;
        }
        if self.only_quilombola && !record.quilombola {
            return false;
        }
        if self.only_disability && record.disability == 0 {
            return false;
        }
        true
    }

    fn matches_geo(&self, record: &VoterRecord) -> bool {
        GeoLevel::order()
            .iter()
            .all(|&level| self.geo(level).matches(record.entity_at(level)))
    }

    /// Geographic consistency against levels strictly coarser than `level`
    /// only. This is the subset an option list for `level` is drawn from.
    pub(crate) fn matches_coarser_than(&self, record: &VoterRecord, level: GeoLevel) -> bool {
        level
            .coarser_levels()
            .iter()
            .all(|&coarser| self.geo(coarser).matches(record.entity_at(coarser)))
    }
}
