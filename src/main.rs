// Entry point for the report binary.
//
// Reads a simulated time series (one row per day) and produces the tables
// the chart front end shows: a per-day table, the tooltip for one day, the
// legend metadata and a short JSON summary. Each table is written to the
// output directory and previewed on stdout as Markdown.
use chrono::NaiveDate;
use clap::Parser;
use epi_display::types::{Category, ModelKind};
use epi_display::util::parse_date_safe;
use epi_display::{date_label, format_integer, loader, output, reports, states, DisplayError};
use std::path::PathBuf;
use tracing::info;

fn parse_start_date(s: &str) -> Result<NaiveDate, String> {
    parse_date_safe(Some(s)).ok_or_else(|| DisplayError::InvalidDate(s.to_string()).to_string())
}

fn parse_model(s: &str) -> Result<ModelKind, String> {
    s.parse::<ModelKind>().map_err(|e| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "epi_display", version, about = "Format epidemic-model output for charts")]
struct Args {
    /// Snapshot CSV: day,susceptible,infected,hospitalized,icu,recovered,fatalities
    input: PathBuf,

    /// Date of the first chart bar (day 0), YYYY-MM-DD or DD.MM.YYYY
    #[arg(short = 's', long, value_parser = parse_start_date)]
    start_date: NaiveDate,

    /// Directory the CSV/JSON outputs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows shown in each Markdown preview
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,

    /// Day to build the tooltip for (defaults to the last day)
    #[arg(short, long, allow_hyphen_values = true)]
    day: Option<i64>,

    /// Scenario that produced the data: goh or customScenario
    #[arg(short, long, default_value = "goh", value_parser = parse_model)]
    model: ModelKind,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> epi_display::Result<()> {
    let (data, load_report) = loader::load_snapshots(&args.input)?;
    println!(
        "Processing time series... ({} rows read, {} loaded)",
        format_integer(load_report.total_rows),
        format_integer(load_report.loaded_rows)
    );
    if load_report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            format_integer(load_report.parse_errors)
        );
    }
    if load_report.missing_values > 0 {
        println!(
            "Note: {} missing values shown as blanks.",
            format_integer(load_report.missing_values)
        );
    }
    println!();

    std::fs::create_dir_all(&args.out_dir)?;

    let daily = reports::generate_daily_table(args.start_date, &data);
    let daily_file = args.out_dir.join("daily_table.csv");
    output::write_csv(&daily_file, &daily)?;
    println!("Daily Population by Category\n");
    output::preview_table_rows(&daily, args.preview_rows);
    println!("(Full table exported to {})\n", daily_file.display());

    if let Some(day) = args.day.or_else(|| data.last().map(|r| r.day)) {
        let tooltip = reports::generate_tooltip(&data, day);
        let tooltip_file = args.out_dir.join(format!("tooltip_day_{}.csv", day));
        output::write_csv(&tooltip_file, &tooltip)?;
        println!("Tooltip for {}\n", date_label(args.start_date, day));
        output::preview_table_rows(&tooltip, Category::ALL.len());
        println!("(Full table exported to {})\n", tooltip_file.display());
    }

    let meta_file = args.out_dir.join("category_meta.json");
    output::write_json(&meta_file, states::category_metadata())?;
    println!("Legend\n");
    output::preview_table_rows(&reports::generate_legend(), Category::ALL.len());
    println!("(Metadata exported to {})\n", meta_file.display());

    let summary = reports::generate_summary(args.model, args.start_date, &data);
    output::write_json(args.out_dir.join("summary.json"), &summary)?;
    println!("Summary Stats (summary.json):");
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    info!(?args, "starting");
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
