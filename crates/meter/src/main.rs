use anyhow::Result;
use clap::{Parser, Subcommand};
use meter::cli::client::{ClientConfig, MeterClient, DEFAULT_SERVER_URL};
use meter::cli::commands;

#[derive(Parser)]
#[command(name = "meter")]
#[command(about = "Meter - usage records, comparisons and predictions\nClient for a running meter server")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), ", courtesy of Kernelle Software"))]
struct Cli {
  /// Base URL of the meter server
  #[arg(long, env = "METER_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
  server: String,

  /// Request timeout in seconds
  #[arg(long, env = "METER_TIMEOUT_SECS", default_value = "30", global = true)]
  timeout: u64,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Upload a JSON record (inline or @file)
  Upload {
    /// JSON object, or @path to a file containing one
    record: String,
  },
  /// Send a JSON payload to the prediction function
  Predict {
    /// JSON object, or @path to a file containing one
    payload: String,
  },
  /// List every stored record
  Data {
    /// Print raw JSON
    #[arg(long)]
    json: bool,
  },
  /// Compare metrics against every stored record
  Compare {
    /// JSON object of metric to number, or @path to a file containing one
    metrics: String,
    /// Print raw JSON
    #[arg(long)]
    json: bool,
  },
  /// Show server health and configuration
  Status,
}

async fn handle(client: &MeterClient, command: Command) -> Result<()> {
  match command {
    Command::Upload { record } => commands::upload(client, &record).await,
    Command::Predict { payload } => commands::predict(client, &payload).await,
    Command::Data { json } => commands::local_data(client, json).await,
    Command::Compare { metrics, json } => commands::compare(client, &metrics, json).await,
    Command::Status => commands::status(client).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let client =
    MeterClient::with_config(ClientConfig { base_url: cli.server.clone(), timeout_secs: cli.timeout })?;

  handle(&client, cli.command).await?;
  Ok(())
}
