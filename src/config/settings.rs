use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::export::MismatchPolicy;
use crate::forecast::{ForecastRequest, ModelOptions, OutputWindow};

#[derive(Debug, Parser)]
#[command(name = "spendcast", version, about = "Expense tracker with a short-term spending forecast")]
pub struct Cli {
    /// error, warn, info, debug or trace
    #[arg(long, global = true, env = "SPENDCAST_LOG", default_value = "info", value_parser = parse_log_level)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),
    /// Forecast a dataset file once and write the CSV to stdout
    Forecast(DatasetArgs)
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "SPENDCAST_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Historical dataset used by the standalone forecast
    #[arg(long, env = "SPENDCAST_DATASET", default_value = "dataset/expense_data_1.csv")]
    pub dataset: PathBuf,

    /// Most sessions holding a cached forecast at once
    #[arg(long, env = "SPENDCAST_SESSION_CAPACITY", default_value_t = 10_000)]
    pub session_capacity: u64,

    /// Seconds of inactivity before a session's cached forecast is dropped
    #[arg(long, env = "SPENDCAST_SESSION_IDLE_SECS", default_value_t = 1_209_600)]
    pub session_idle_secs: u64,

    #[command(flatten)]
    pub forecast: ForecastSettings
}

impl ServeArgs {
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// Dataset CSV with Date, Amount and Income/Expense columns
    pub path: PathBuf,

    #[command(flatten)]
    pub forecast: ForecastSettings
}

/// Horizons and model options of the two forecast flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
pub struct ForecastSettings {
    #[arg(long, env = "SPENDCAST_DASHBOARD_HORIZON", default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    pub dashboard_horizon: u32,

    #[arg(long, env = "SPENDCAST_DASHBOARD_DAILY_SEASONALITY", default_value_t = true, action = ArgAction::Set)]
    pub dashboard_daily_seasonality: bool,

    #[arg(long, env = "SPENDCAST_REPORT_HORIZON", default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..))]
    pub report_horizon: u32,

    #[arg(long, env = "SPENDCAST_REPORT_DAILY_SEASONALITY", default_value_t = false, action = ArgAction::Set)]
    pub report_daily_seasonality: bool,

    #[arg(long, env = "SPENDCAST_EXPORT_MISMATCH", value_enum, default_value_t = MismatchPolicy::Reject)]
    pub export_mismatch: MismatchPolicy
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            dashboard_horizon: 7,
            dashboard_daily_seasonality: true,
            report_horizon: 30,
            report_daily_seasonality: false,
            export_mismatch: MismatchPolicy::Reject
        }
    }
}

impl ForecastSettings {
    /// History plus the next few days, shown inline on the dashboard.
    pub fn dashboard_request(&self) -> ForecastRequest {
        ForecastRequest {
            horizon: self.dashboard_horizon,
            options: ModelOptions { daily_seasonality: self.dashboard_daily_seasonality },
            window: OutputWindow::Full
        }
    }

    /// Future days only, for the standalone report and its CSV export.
    pub fn report_request(&self) -> ForecastRequest {
        ForecastRequest {
            horizon: self.report_horizon,
            options: ModelOptions { daily_seasonality: self.report_daily_seasonality },
            window: OutputWindow::FutureOnly
        }
    }
}

/// Parses a log level, falling back to `error` for anything unrecognised.
pub fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    };

    Ok(filter)
}
