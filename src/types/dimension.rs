use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::VoterRecord;

/// Fixed categorical axes of the microdata. Each aggregation pass folds
/// records along exactly one of these; there is no cross-product axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Gender,
    MaritalStatus,
    AgeBracket,
    Education,
    Race,
    GenderIdentity,
}

impl Dimension {
    pub fn to_str(&self) -> &'static str {
        match self {
            Dimension::Gender => "gender",
            Dimension::MaritalStatus => "marital_status",
            Dimension::AgeBracket => "age_bracket",
            Dimension::Education => "education",
            Dimension::Race => "race",
            Dimension::GenderIdentity => "gender_identity",
        }
    }

    pub fn order() -> [Dimension; 6] {
        [
            Dimension::Gender,
            Dimension::MaritalStatus,
            Dimension::AgeBracket,
            Dimension::Education,
            Dimension::Race,
            Dimension::GenderIdentity,
        ]
    }

    /// The record's category value along this axis.
    pub fn value_of<'a>(&self, record: &'a VoterRecord) -> &'a Arc<str> {
        match self {
            Dimension::Gender => &record.gender,
            Dimension::MaritalStatus => &record.marital_status,
            Dimension::AgeBracket => &record.age_bracket,
            Dimension::Education => &record.education,
            Dimension::Race => &record.race,
            Dimension::GenderIdentity => &record.gender_identity,
        }
    }
}

/// Which numeric counter an aggregation folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Counter {
    Voters,
    Biometric,
    Disability,
}

impl Counter {
    pub fn to_str(&self) -> &'static str {
        match self {
            Counter::Voters => "voters",
            Counter::Biometric => "biometric",
            Counter::Disability => "disability",
        }
    }

    pub fn value_of(&self, record: &VoterRecord) -> u64 {
        match self {
            Counter::Voters => record.voters,
            Counter::Biometric => record.biometric,
            Counter::Disability => record.disability,
        }
    }
}
