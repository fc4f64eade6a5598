mod config;
mod engine;
mod export;
mod forecast;
mod http;
mod ingestion;
mod models;
mod series;
mod session;
mod storage;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tokio::task::spawn_blocking;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{Cli, Command, DatasetArgs, ServeArgs};
use crate::engine::{forecast_outcome, ForecastEngine};
use crate::export::write_forecast_csv;
use crate::forecast::TrendForecaster;
use crate::http::{run_server, AppState};
use crate::ingestion::read_expense_dataset;
use crate::session::SessionCache;
use crate::storage::MemoryStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Forecast(args) => forecast_dataset(args).await
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The forecast command writes CSV to stdout, so logging has to go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn serve(args: ServeArgs) -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let sessions = Arc::new(SessionCache::new(args.session_capacity, args.session_idle()));
    let engine = ForecastEngine::new(
        storage.clone(),
        Arc::new(TrendForecaster::new()),
        sessions,
        args.forecast,
        args.dataset.clone()
    );

    info!("Standalone forecasts read [{}]", args.dataset.display());

    run_server(AppState::new(storage, Arc::new(engine)), args.bind).await
}

async fn forecast_dataset(args: DatasetArgs) -> Result<()> {
    let timer = Instant::now();
    let request = args.forecast.report_request();
    let path = args.path.clone();

    let outcome = spawn_blocking(move || -> Result<_> {
        let records = read_expense_dataset(&path)?;
        Ok(forecast_outcome(&TrendForecaster::new(), &records, &request))
    }).await??;

    info!("Forecast finished in: {:?}", timer.elapsed());

    if let Some(message) = outcome.message() {
        eprintln!("{message}");
    }

    let result = outcome.result().cloned().unwrap_or_default();
    let mut output = BufWriter::new(stdout().lock());

    write_forecast_csv(&mut output, &result.labels(), &result.values(), args.forecast.export_mismatch)?;
    output.flush()?;

    Ok(())
}
