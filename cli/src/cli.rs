use std::path::PathBuf;

/// Electorate analytics CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "eleitorado", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Load profile sheets and print headline totals plus a ranking preview
    Summary(SummaryArgs),

    /// Assemble a scoped report and write the document model as JSON
    Report(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// Directory containing one <sheet>.csv file per profile sheet
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub data: PathBuf,

    /// Comma-separated sheet names to load
    #[arg(short, long, default_value = "perfil")]
    pub sheets: String,

    /// Granularity of the ranking table: municipality, zone, location, section
    #[arg(short, long, default_value = "municipality")]
    pub granularity: String,

    /// Restrict the view to one municipality
    #[arg(short, long)]
    pub municipality: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Directory containing one <sheet>.csv file per profile sheet
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub data: PathBuf,

    /// Comma-separated sheet names to load
    #[arg(short, long, default_value = "perfil")]
    pub sheets: String,

    /// Restrict the report to one municipality
    #[arg(short, long)]
    pub municipality: Option<String>,

    /// Output document file, defaults to "./report.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
