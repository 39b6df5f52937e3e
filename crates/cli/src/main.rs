use crate::error::CliError;
use clap::Parser;
use engine_config::{env::EnvManager, settings::BackwashConfig};
use engine_core::executor;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Parser, Debug)]
#[command(
    name = "backwash",
    version,
    about = "Copy a MySQL table into a backwash table, one page at a time"
)]
struct Cli {
    /// .env file to read; defaults to ./.env when present
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Write one log file per offset into this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Ping both databases and exit without copying
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;

    if cli.check {
        executor::check_connections(&config).await?;
        info!("Both databases are reachable");
        return Ok(());
    }

    let summary = executor::run(&config).await?;
    info!(
        pages = summary.pages_fetched,
        rows_inserted = summary.rows_inserted,
        final_offset = summary.final_offset,
        "Stopped: {}",
        summary.stop_reason
    );

    Ok(())
}

fn load_config(cli: &Cli) -> Result<BackwashConfig, CliError> {
    let mut env = EnvManager::new();
    match &cli.env_file {
        Some(path) => env.load_from_file(path)?,
        None => {
            if !env.load_optional_file(DEFAULT_ENV_FILE)? {
                info!("No {} file found, using process environment", DEFAULT_ENV_FILE);
            }
        }
    }

    let config = BackwashConfig::from_env(&env)?.with_log_dir(cli.log_dir.clone());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["backwash"]);
        assert!(cli.env_file.is_none());
        assert!(cli.log_dir.is_none());
        assert!(!cli.check);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "backwash",
            "--env-file",
            "prod.env",
            "--log-dir",
            "logs",
            "--check",
        ]);
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
        assert!(cli.check);
    }

    #[test]
    fn test_explicit_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "backwash".into(),
            "--env-file".into(),
            dir.path().join("missing.env").into_os_string(),
        ]);
        assert!(matches!(
            load_config(&cli),
            Err(CliError::Config(engine_config::error::ConfigError::EnvFileRead { .. }))
        ));
    }
}
