use cartwright::app;
use cartwright::cli::{Cli, Command};
use cartwright::config::Config;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Command::CheckConfig { config } => match Config::load(&config) {
            Ok(_) => println!("{} is valid", config.display()),
            Err(e) => {
                eprintln!("Invalid config: {e}");
                std::process::exit(1);
            }
        },
        Command::Serve { config } => {
            let config = match Config::load(&config) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Failed to load config: {e}");
                    std::process::exit(1);
                }
            };

            config.init_logging();
            info!("cartwright starting");

            tokio::select! {
                result = app::run(config) => {
                    if let Err(e) = result {
                        error!(error = %e, "Fatal error");
                        std::process::exit(1);
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
            }

            info!("cartwright stopped");
        }
    }
}
