use crate::record::VoterRecord;

/// The in-memory dataset: every normalized record from the sheets that
/// loaded, plus per-sheet provenance. Owned by the load/filter pipeline and
/// always fully replaced on reload, never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<VoterRecord>,
    /// Sheet names that loaded and contributed records.
    pub loaded: Vec<String>,
    /// Sheet names that failed to load (the batch proceeds without them).
    pub missing: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<VoterRecord>, loaded: Vec<String>, missing: Vec<String>) -> Self {
        Self { records, loaded, missing }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinguishes a populated dataset from the explicit "no data" state
    /// (zero sheets succeeded, or every sheet was empty).
    pub fn has_data(&self) -> bool {
        !self.records.is_empty()
    }
}
