//! Meter REST Server
//!
//! HTTP front for the record store and the prediction function.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use meter::config::ServerArgs;
use meter::server::startup::start_server;

#[tokio::main]
async fn main() -> Result<()> {
  let args = ServerArgs::parse();

  // Keep the AWS SDK quiet unless something is wrong
  let filter = if args.verbose {
    EnvFilter::new("info,meter=debug,aws_config=warn,aws_smithy_runtime=warn")
  } else {
    EnvFilter::new("meter=info,meter_server=info,tower_http=warn,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!("Starting Meter REST Server v{}", env!("CARGO_PKG_VERSION"));

  let settings = args.settings()?;
  tracing::info!("Binding to address: {}", settings.bind);

  start_server(settings).await?;

  Ok(())
}
