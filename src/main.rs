mod browser;
mod config;
mod dates;
mod models;
mod pipeline;
mod report;
mod scraper;
mod storage;
mod utils;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::browser::{FixtureSession, HttpSession};
use crate::config::AppConfig;
use crate::dates::TargetDay;
use crate::pipeline::Pipeline;
use crate::storage::ReportWriter;

#[derive(Parser)]
#[command(name = "daily-recap", about = "Yesterday's finished results as a Markdown recap", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape every configured competition and write the recap file
    Run {
        /// Collect this day instead of yesterday (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Replay saved pages from this directory instead of fetching
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Override the configured output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the target day and the date tokens matched against the page
    Tokens {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List the configured competition pages
    Competitions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "daily_recap=info,warn",
        1 => "daily_recap=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load().context("Invalid configuration")?;
    let tz = config.timezone()?;
    let target_day = |date: Option<NaiveDate>| date.map(TargetDay::new).unwrap_or_else(|| TargetDay::yesterday(tz));

    match cli.command {
        Command::Run {
            date,
            fixtures,
            output_dir,
        } => {
            let day = target_day(date);
            let _t = utils::Timer::start(format!("Recap for {}", day));

            let mut pipeline = Pipeline::new(&config, day)?;
            if let Some(dir) = output_dir {
                pipeline = pipeline.with_writer(ReportWriter::new(&config.output).with_dir(dir));
            }

            let stats = match fixtures {
                Some(dir) => pipeline.run(FixtureSession::from_dir(dir)).await?,
                None => {
                    let session = HttpSession::open(&config.session)
                        .context("Failed to open rendering session")?;
                    pipeline.run(session).await?
                }
            };

            println!("✅ Recap saved: {}", stats.output.display());
        }

        Command::Tokens { date } => {
            let day = target_day(date);
            println!("Target day : {} ({})", day, config.timezone);
            println!("Tokens     : {}", day.tokens().tokens().join("  "));
        }

        Command::Competitions => {
            println!("{} competitions:", config.competitions.len());
            for url in &config.competitions {
                println!("  {}", url);
            }
        }
    }

    Ok(())
}
