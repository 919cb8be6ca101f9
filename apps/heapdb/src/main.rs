//! # heapdb
//!
//! Loads a heap file and scans it back, exercising the storage engine end to end.
//!
//! The engine itself lives in the library crates under `/crates/storage`:
//!
//! - `page`: slotted data pages.
//! - `file`: file catalog and page-granular file managers.
//! - `buffer`: the buffer pool and page pins.
//! - `heap`: heap files, scans and inserts.
//! - `storage-api`: the facade this binary talks to.
//!
//! Usage: `heapdb [config.toml]`.

use crate::config::EngineConfig;
use crate::engine_environment::EngineEnvironment;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

mod config;
mod engine_environment;
mod workload;

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = match EngineConfig::load_from_file(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let _logging_guard = match init_logging(&config.storage.logs_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cannot initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(config = %config_path, "starting heapdb");

    let env = EngineEnvironment::new(config);
    match workload::run(&env.storage, &env.engine_config.workload) {
        Ok(report) => {
            info!(?report, "workload complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "workload failed");
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging for the process
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard, Box<dyn Error + Send + Sync>> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "heapdb.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .json()
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
