//! REST server startup

use anyhow::{anyhow, Result};
use axum::serve;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::server::routing::create_router;
use crate::server::state::AppState;

/// Build the clients from the settings and serve until the process is stopped
pub async fn start_server(settings: Settings) -> Result<()> {
  tracing::info!(
    backend = settings.backend.as_str(),
    table = %settings.table_name,
    function = %settings.function_name,
    region = %settings.region,
    "Configuring meter REST server"
  );

  let state = AppState::from_settings(&settings).await;
  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(settings.bind).await?;
  tracing::info!("Server listening on {}", settings.bind);

  match serve(listener, app).with_graceful_shutdown(shutdown_signal()).await {
    Ok(_) => {
      tracing::info!("Server shutdown gracefully");
      Ok(())
    }
    Err(e) => {
      tracing::error!("Server error: {e}");
      Err(anyhow!("Server error: {}", e))
    }
  }
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!("Failed to listen for shutdown signal: {e}");
    std::future::pending::<()>().await;
  }
}
