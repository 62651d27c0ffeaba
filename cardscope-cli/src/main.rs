use anyhow::{Context, Result};
use cardscope_core::{
    by_year_month, cashback_by_category, normalize_reference, now_in_timezone, parse_timestamp,
    spending_by_category_at, spending_by_weekday_at, to_json, Transaction, TIMESTAMP_FORMAT,
};
use cardscope_ingest::read_statement;
use cardscope_market::MarketClient;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;
mod home;
mod logging;
mod output;
mod state;

use config::Config;
use home::HomeReport;

#[derive(Parser, Debug)]
#[command(name = "cardscope", version, about = "Bank card statement analyzer")]
struct Cli {
    /// Log filter for stderr (error, warn, info, debug, trace). CARDSCOPE_LOG wins.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Report(ReportCommand),

    /// Write a default ~/.cardscope/config.toml
    InitConfig,
}

/// Commands that read a statement and print a JSON report.
#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Month-to-date overview with card totals, top payments and market data
    Home {
        /// Statement export (.xlsx or .csv)
        #[arg(long)]
        file: PathBuf,

        /// Reference moment, "DD.MM.YYYY HH:MM:SS" or "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        date: String,

        /// Also write the report here (overrides report.output)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Cashback earned per category in a calendar month
    Cashback {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        year: i32,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Signed spend in one category over the last three months
    Category {
        #[arg(long)]
        file: PathBuf,

        #[arg(long)]
        category: String,

        /// Window end; defaults to now in report.timezone
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Average spend per weekday over the last three months
    Weekday {
        #[arg(long)]
        file: PathBuf,

        /// Window end; defaults to now in report.timezone
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level);

    match cli.command {
        Command::InitConfig => config::init_config(),
        Command::Report(command) => run(command, config::load_config()?).await,
    }
}

async fn run(command: ReportCommand, cfg: Config) -> Result<()> {
    match command {
        ReportCommand::Home { file, date, output } => {
            let records = load(&file)?;
            let reference = normalize_reference(&date)?;
            let mut report = HomeReport::from_statement(&records, &reference)?;
            report.enrich(&MarketClient::new(cfg.market.clone())).await;
            emit(&cfg, &to_json(&report)?, output)
        }

        ReportCommand::Cashback {
            file,
            year,
            month,
            output,
        } => {
            let records = load(&file)?;
            let in_month = by_year_month(year, month, &records)?;
            let report = cashback_by_category(in_month.iter().copied());
            emit(&cfg, &to_json(&report)?, output)
        }

        ReportCommand::Category {
            file,
            category,
            date,
            output,
        } => {
            let records = load(&file)?;
            let reference = resolve_reference(date.as_deref(), &cfg)?;
            let report = spending_by_category_at(&records, &category, reference)?;
            emit(&cfg, &to_json(&report)?, output)
        }

        ReportCommand::Weekday { file, date, output } => {
            let records = load(&file)?;
            let reference = resolve_reference(date.as_deref(), &cfg)?;
            let report = spending_by_weekday_at(&records, reference)?;
            emit(&cfg, &to_json(&report)?, output)
        }
    }
}

fn load(file: &Path) -> Result<Vec<Transaction>> {
    read_statement(file).with_context(|| format!("reading {}", file.display()))
}

/// Explicit `--date` in either accepted form, else now in the configured zone.
fn resolve_reference(date: Option<&str>, cfg: &Config) -> Result<NaiveDateTime> {
    match date {
        Some(date) => {
            let canonical = normalize_reference(date)?;
            Ok(parse_timestamp(&canonical, TIMESTAMP_FORMAT)?)
        }
        None => Ok(now_in_timezone(&cfg.report.timezone)?),
    }
}

fn emit(cfg: &Config, text: &str, flag: Option<PathBuf>) -> Result<()> {
    let target = flag.or_else(|| cfg.report.output.clone());
    output::emit(text, target.as_deref())
}
