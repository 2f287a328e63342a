use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the backtest over the full price horizon
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for the dispatch and profit CSV outputs
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        battery: BatteryArgs,

        /// Volume at the very start of the horizon (MWh); defaults to half capacity
        #[arg(long)]
        initial_volume: Option<f64>,

        /// What to do when a single day fails to solve
        #[arg(long, value_enum, default_value_t = OnError::Halt)]
        on_error: OnError,

        /// Per-day solve time budget in seconds
        #[arg(long, default_value_t = 300.0)]
        max_time: f64,
    },
    /// Load and validate price data without solving anything
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Price data source: either two CSV files or one XLSX workbook.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Half-hourly CSV with market1/market2 columns
    #[arg(long, requires = "daily", conflicts_with = "xlsx")]
    pub half_hourly: Option<PathBuf>,

    /// Daily CSV with a market3 column
    #[arg(long, requires = "half_hourly", conflicts_with = "xlsx")]
    pub daily: Option<PathBuf>,

    /// XLSX workbook holding both price sheets
    #[arg(long)]
    pub xlsx: Option<PathBuf>,

    /// Sheet with half-hourly Market 1/2 prices (XLSX only)
    #[arg(long, default_value = "Half-hourly data")]
    pub half_hourly_sheet: String,

    /// Sheet with daily Market 3 prices (XLSX only)
    #[arg(long, default_value = "Daily data")]
    pub daily_sheet: String,

    /// Calendar date of the first day in the data
    #[arg(long, default_value = "2018-01-01")]
    pub start_date: chrono::NaiveDate,
}

/// Storage asset parameters.
#[derive(Args, Debug)]
pub struct BatteryArgs {
    /// Maximum storage volume (MWh)
    #[arg(long, default_value_t = 4.0)]
    pub cap_max: f64,

    /// Maximum energy charged per half-hour (MWh)
    #[arg(long, default_value_t = 1.0)]
    pub charge_rate: f64,

    /// Maximum energy discharged per half-hour (MWh)
    #[arg(long, default_value_t = 1.0)]
    pub discharge_rate: f64,

    /// Efficiency loss fraction applied in both directions
    #[arg(long, default_value_t = 0.0)]
    pub loss: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Abort the run on the first failed day
    Halt,
    /// Skip the day and carry the current volume forward
    CarryVolume,
}
