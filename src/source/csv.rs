use std::path::PathBuf;

use anyhow::{Context, Result};

use super::SheetSource;
use crate::record::RawSheet;

/// Sheet source backed by a directory of `<name>.csv` files.
#[derive(Debug, Clone)]
pub struct CsvSheetSource {
    dir: PathBuf,
}

impl CsvSheetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SheetSource for CsvSheetSource {
    fn fetch(&self, name: &str) -> Result<RawSheet> {
        let path = self.dir.join(format!("{name}.csv"));
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open sheet {}", path.display()))?;

        let header: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            // A row the reader cannot decode is a gap in the sheet, not a
            // failure of the whole source.
            let Ok(record) = record else { continue };
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawSheet::new(name, header, rows))
    }
}
