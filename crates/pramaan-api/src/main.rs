//! # pramaan-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Configuration comes from the environment:
//! `PORT` (default 8080) and `PROOF_MODE` (`transparent`, the default).

use pramaan_api::state::{AppConfig, AppState};
use pramaan_zkp::ProofMode;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let proof_mode = match std::env::var("PROOF_MODE").as_deref() {
        Ok("transparent") | Err(_) => ProofMode::Transparent,
        Ok(other) => {
            tracing::error!("unknown PROOF_MODE {other:?}");
            return Err(format!("unknown PROOF_MODE {other:?}").into());
        }
    };

    let config = AppConfig { port, proof_mode };
    let state = AppState::new(&config);
    let app = pramaan_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Pramaan attendance API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
