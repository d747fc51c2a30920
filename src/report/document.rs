use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

/// Scope of a report: the whole territory, or one municipality with its
/// own breakdown and its own percentage base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportScope {
    Statewide,
    Municipality(Arc<str>),
}

impl ReportScope {
    pub fn title(&self) -> String {
        match self {
            ReportScope::Statewide => "Electorate profile: statewide".to_string(),
            ReportScope::Municipality(name) => format!("Electorate profile: {name}"),
        }
    }
}

/// Ordered document model handed to a rendering collaborator. Pure data:
/// the assembler decides values and order, the renderer decides looks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub scope: ReportScope,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report document")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub heading: String,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Block {
    /// Cover block of headline totals.
    Headline(Vec<Stat>),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
