use anyhow::Result;
use eleitorado::{
    compute_view, load_sheets, CancelToken, ColumnLayout, CsvSheetSource, FilterState, GeoLevel,
    Indicator, LoadOutcome,
};

use super::{parse_granularity, split_sheets};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::SummaryArgs) -> Result<()> {
    let granularity = parse_granularity(&args.granularity)?;
    let sheets = split_sheets(&args.sheets);

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
    if !dataset.missing.is_empty() {
        println!("Warning: proceeding without {} sheet(s): {}", dataset.missing.len(), dataset.missing.join(", "));
    }

    let mut filter = FilterState::new();
    if let Some(municipality) = &args.municipality {
        filter.select(GeoLevel::Municipality, municipality.trim().to_uppercase().as_str());
    }

    let view = compute_view(&dataset, &filter, granularity, Indicator::VoterTotal);

    println!("Loaded {} records from {} sheet(s)", dataset.len(), dataset.loaded.len());
    println!("Registered voters:      {}", view.headline.voters);
    println!("Biometric registrations: {}", view.headline.biometric);
    println!("Voters with disability:  {}", view.headline.disability);
    println!("Municipalities:          {}", view.headline.municipalities);
    println!("Polling sections:        {}", view.headline.sections);
    println!();

    println!("Top {} by voters:", granularity.to_str());
    for entry in view.ranking.iter().take(10) {
        println!(
            "  {:>3}. {:<40} {:>10}  {:>6.2}%",
            entry.rank, entry.entity, entry.value, entry.percent
        );
    }

    Ok(())
}
