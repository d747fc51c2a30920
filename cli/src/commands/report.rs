use std::fs;

use anyhow::{Context, Result};
use eleitorado::{
    assemble, load_sheets, CancelToken, ColumnLayout, CsvSheetSource, GeoLevel, LoadOutcome,
    ReportScope,
};

use super::split_sheets;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::ReportArgs) -> Result<()> {
    let sheets = split_sheets(&args.sheets);
    let out_path = args.output.clone().unwrap_or("./report.json".into());

    let source = CsvSheetSource::new(&args.data);
    let outcome = load_sheets(
        &source,
        &sheets,
        &ColumnLayout::default(),
        &CancelToken::new(),
        cli.verbose,
    )?;

    let LoadOutcome::Loaded(dataset) = outcome else {
        return Ok(());
    };
    if !dataset.has_data() {
        println!("No data available: every sheet failed to load. Check the data directory and reload.");
        return Ok(());
    }

    let scope = match &args.municipality {
        Some(name) => ReportScope::Municipality(name.trim().to_uppercase().into()),
        None => ReportScope::Statewide,
    };
    // Municipality reports break down by location; statewide by municipality.
    let granularity = match scope {
        ReportScope::Municipality(_) => GeoLevel::Zone,
        ReportScope::Statewide => GeoLevel::Municipality,
    };

    if cli.verbose > 0 {
        eprintln!("[report] scope={:?} -> {}", scope, out_path.display());
    }

    let document = assemble(&dataset, &scope, granularity);
    fs::write(&out_path, document.to_json()?)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("Report written to {}", out_path.display());
    Ok(())
}
