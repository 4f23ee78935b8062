use anyhow::Result;
use clap::{Parser, Subcommand};
use parkstat::config::get_config;
use parkstat::display::{RunSummary, SummaryDisplay};
use parkstat::loader::{discover_log_files, load_facility};
use parkstat::logging::{init_logging, run_id};
use parkstat::query::ReportQuery;
use parkstat::report::build_report;
use parkstat::writer::ReportWriter;
use std::path::PathBuf;
use std::process;
use tracing::info;

#[derive(Parser)]
#[command(name = "parkstat")]
#[command(about = "Parking facility occupancy statistics from entry/exit logs")]
#[command(version = "1.0.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full report table set for one facility
    Report {
        /// Facility name; log files whose name contains it are loaded
        facility: String,
        /// Query start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Query end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Extra time-of-day window, e.g. 08:00-17:00; 24:00 as the end rolls
        /// into the next day. Repeatable.
        #[arg(long = "period")]
        periods: Vec<String>,
        /// Directory holding the log CSV files (default from config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory the report is written under (default from config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let log_guard = init_logging();

    let outcome = match cli.command {
        Commands::Report {
            facility,
            start,
            end,
            periods,
            data_dir,
            out_dir,
            json,
        } => ReportQuery::parse(&start, &end, &periods)
            .and_then(|query| run_report(&facility, query, data_dir, out_dir, json))
            .map_err(|err| (err, json)),
    };

    if let Err((err, json)) = outcome {
        print_error(&err, json);
        // process::exit skips destructors; drop the guard first so the file
        // appender flushes the run's final log lines.
        drop(log_guard);
        process::exit(1);
    }
}

fn run_report(
    facility: &str,
    query: ReportQuery,
    data_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = get_config();
    if config.processing.worker_threads > 0 {
        // A failure here means a pool already exists, which is fine.
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(config.processing.worker_threads)
            .build_global();
    }

    let span = tracing::info_span!("report", facility, run_id = %run_id());
    let _entered = span.enter();

    let data_dir = data_dir.unwrap_or_else(|| config.paths.data_directory.clone());
    let out_dir = out_dir.unwrap_or_else(|| config.paths.output_directory.clone());

    let files = discover_log_files(&data_dir, facility)?;
    let (records, categories) = load_facility(&data_dir, facility)?;
    info!(
        files = files.len(),
        records = records.len(),
        categories = categories.len(),
        "input loaded"
    );

    let report = build_report(&records, &categories, &query.range, &query.periods);
    let run_dir = ReportWriter::new(out_dir).write_report(facility, &query.range, &report)?;

    let summary = RunSummary {
        facility: facility.to_string(),
        range: query.range,
        files_loaded: files.len(),
        records_loaded: records.len(),
        records_in_range: report.records.len(),
        categories: categories.labels().to_vec(),
        tables: RunSummary::table_summaries(&report),
        output_dir: run_dir,
    };
    SummaryDisplay::new().print(&summary, json);
    Ok(())
}

fn print_error(e: &anyhow::Error, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("Error: {e}");
    }
}
