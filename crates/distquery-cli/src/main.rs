use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use distquery_cli::{exit_code, render_text};
use distquery_lib::{
    parse_coordinate, Coordinate, CredentialResolver, DistanceQueryHandler, DistanceRequest,
    HttpDistanceMatrix,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Driving distance queries via the Distance Matrix API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query driving distance and duration between two coordinates.
    Distance {
        /// Origin as LAT,LNG in decimal degrees.
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        origin: Coordinate,
        /// Destination as LAT,LNG in decimal degrees.
        #[arg(long, allow_hyphen_values = true, value_parser = parse_coordinate)]
        destination: Coordinate,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
        /// Alternate Distance Matrix endpoint.
        #[arg(long, hide = true)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Distance {
            origin,
            destination,
            json,
            endpoint,
        } => handle_distance(origin, destination, json, endpoint).await,
    }
}

async fn handle_distance(
    origin: Coordinate,
    destination: Coordinate,
    json: bool,
    endpoint: Option<String>,
) -> Result<ExitCode> {
    let api = match endpoint {
        Some(endpoint) => HttpDistanceMatrix::with_endpoint(endpoint),
        None => HttpDistanceMatrix::new(),
    }
    .context("failed to build HTTP client")?;

    let handler = DistanceQueryHandler::new(api, CredentialResolver::from_platform());
    let request = DistanceRequest::between(origin, destination);

    match handler.handle_request(&request).await {
        Ok(result) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).context("failed to encode result")?
                );
            } else {
                println!("{}", render_text(&result));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(ExitCode::from(exit_code(&err)))
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
