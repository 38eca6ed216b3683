use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use gym_booker::cli;
use gym_booker::config::{AppConfig, BookingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let app_config = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to read config file {}: {}", path, err);
                return ExitCode::from(2);
            }
        },
        Err(_) => AppConfig::default(),
    };

    let config = match BookingConfig::load(&app_config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    ExitCode::from(cli::cli(config).await)
}
