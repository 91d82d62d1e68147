use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

use numerology_engine::{
    get_chart, get_detection_flags, load_rows, run_batch, save_chart, set_detection_flags, setup_database,
    summarize, BirthDate, ChartCalculator, DetectionFlags, DetectionReport, EngineConfig,
};

/// Numerology chart calculator
#[derive(Parser)]
#[command(name = "numerology")]
#[command(version)]
#[command(about = "Compute numerology charts from a name and birth date")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (JSON)
    #[arg(long, global = true, env = "NUMEROLOGY_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a chart and print it as JSON
    Chart {
        #[arg(long)]
        name: String,
        /// YYYY-MM-DD or DD/MM/YYYY
        #[arg(long)]
        birth_date: String,
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Include interpretation texts
        #[arg(long)]
        interpret: bool,
    },
    /// Run the birth date pre-check
    Validate {
        birth_date: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Evaluate the detection rules for a person
    Detect {
        #[arg(long)]
        name: String,
        #[arg(long)]
        birth_date: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Override the stored serious-life-event flag
        #[arg(long)]
        serious_life_event: bool,
        /// Read stored flags for this customer
        #[arg(long)]
        email: Option<String>,
    },
    /// Compute charts for every row of a CSV (full_name,birth_date[,customer_email])
    Batch {
        csv: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Persist charts for rows that carry a customer email
        #[arg(long)]
        save: bool,
    },
    /// Record the serious-life-event flag for a customer
    Flag {
        #[arg(long)]
        email: String,
        #[arg(long, action = clap::ArgAction::Set)]
        serious_life_event: bool,
        #[arg(long, default_value = "cli")]
        recorded_by: String,
    },
    /// Print a stored chart
    Show {
        #[arg(long)]
        email: String,
        #[arg(long)]
        birth_date: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EngineConfig::load(cli.config.as_deref())?;
    let calculator = ChartCalculator::new(config.chart_options());
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Chart { name, birth_date, as_of, interpret } => {
            let as_of = as_of.unwrap_or(today);
            let date = BirthDate::validate(&birth_date, as_of)?;
            let chart = calculator.calculate_for(&name, date, as_of);

            if !chart.has_full_name_signal() {
                tracing::warn!(missing = ?chart.missing_name_signals(), "name yields no signal for some fields");
            }

            let output = if interpret {
                let table = config.interpretation_table()?;
                serde_json::json!({
                    "chart": chart,
                    "methodology": table.methodology(),
                    "readings": table.describe_chart(&chart),
                })
            } else {
                serde_json::to_value(&chart)?
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Validate { birth_date, as_of } => {
            let date = BirthDate::validate(&birth_date, as_of.unwrap_or(today))?;
            println!("✓ {} is a valid birth date", date);
        }

        Commands::Detect { name, birth_date, as_of, serious_life_event, email } => {
            let as_of = as_of.unwrap_or(today);
            let date = BirthDate::validate(&birth_date, as_of)?;
            let chart = calculator.calculate_for(&name, date, as_of);

            let mut flags = match email {
                Some(email) => get_detection_flags(&open_database(&config)?, &email)?,
                None => DetectionFlags::default(),
            };
            flags.has_serious_life_event |= serious_life_event;

            let report = DetectionReport::evaluate(&chart, &flags);
            tracing::info!(triggered = ?report.triggered(), "detection rules evaluated");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Batch { csv, as_of, save } => {
            let as_of = as_of.unwrap_or(today);
            let entries = load_rows(&csv)?;
            let outcomes = run_batch(&entries, &calculator, as_of);

            if save {
                let conn = open_database(&config)?;
                let mut saved = 0;
                for outcome in &outcomes {
                    if let (Some(chart), Some(email)) = (&outcome.chart, &outcome.customer_email) {
                        save_chart(&conn, email, chart)?;
                        saved += 1;
                    }
                }
                tracing::info!(saved, "batch charts persisted");
            }

            let summary = summarize(&outcomes);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "summary": summary,
                    "outcomes": outcomes,
                }))?
            );
        }

        Commands::Flag { email, serious_life_event, recorded_by } => {
            let conn = open_database(&config)?;
            let flags = DetectionFlags { has_serious_life_event: serious_life_event };
            set_detection_flags(&conn, &email, &flags, &recorded_by)?;
            println!("✓ Flags recorded for {}", email);
        }

        Commands::Show { email, birth_date } => {
            let conn = open_database(&config)?;
            let date = BirthDate::parse(&birth_date)?;
            match get_chart(&conn, &email, &date)? {
                Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
                None => {
                    eprintln!("❌ No chart stored for {} / {}", email, date);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn open_database(config: &EngineConfig) -> Result<Connection> {
    let conn = Connection::open(&config.database_path)
        .with_context(|| format!("Failed to open database: {:?}", config.database_path))?;
    setup_database(&conn)?;
    Ok(conn)
}
