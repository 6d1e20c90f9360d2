use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "watersaver",
    version,
    about = "Water usage analysis, irrigation scheduling and conservation advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pin "today" (YYYY-MM-DD) for reproducible output
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise a usage history into trend, spread and anomalies
    Analyze {
        /// JSON array of {date, usage_liters} records
        #[arg(long)]
        history: PathBuf,
    },
    /// Predict tomorrow's usage, or the next seven days with --week
    Predict {
        #[arg(long)]
        history: PathBuf,
        /// Weather snapshot JSON; with --week, optionally an array of daily snapshots
        #[arg(long)]
        weather: Option<PathBuf>,
        #[arg(long)]
        week: bool,
    },
    /// Build watering schedules for configured zones
    Schedule {
        #[arg(long)]
        weather: PathBuf,
        /// Only schedule this zone
        #[arg(long)]
        zone: Option<String>,
        /// Measured soil moisture in percent
        #[arg(long)]
        moisture: Option<f64>,
    },
    /// Generate ranked conservation recommendations
    Advise {
        #[arg(long)]
        history: PathBuf,
        #[arg(long)]
        weather: Option<PathBuf>,
        /// Include this zone's schedule in the advice
        #[arg(long)]
        zone: Option<String>,
    },
    /// Run interactive setup
    Init,
    /// Validate config and list zones
    Check,
}
