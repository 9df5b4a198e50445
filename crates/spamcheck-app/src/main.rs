use clap::Parser;
use spamcheck_app::cli::{Cli, Commands};
use spamcheck_app::config::AppConfig;
use spamcheck_app::interaction::run_predict;
use spamcheck_app::server::run_server;
use spamcheck_app::state::AppState;
use spamcheck_app::telemetry;
use std::net::SocketAddr;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_logging(cli.verbose);

    let mut config = AppConfig::load(&cli.config, &cli)?;

    match cli.command {
        Commands::Serve { port, address } => {
            let metrics = telemetry::init_metrics()?;

            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(address) = address {
                config.server.address = address;
            }

            let addr: SocketAddr =
                format!("{}:{}", config.server.address, config.server.port).parse()?;

            let state = AppState::load(config).with_metrics(metrics);
            match state.availability.failure() {
                Some(failure) => {
                    for message in failure.messages() {
                        error!("{}", message);
                    }
                }
                None => info!("Model ready"),
            }

            println!();
            println!("  📧 Email Spam Detector");
            println!();
            println!("  Open http://{} in your browser", addr);
            println!();

            run_server(state, addr).await?;
        }

        Commands::Predict { text, format } => {
            let code = run_predict(&config, text, format).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
