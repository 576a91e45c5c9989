mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use state::AppState;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => fmt().json().with_env_filter(filter).init(),
        _ => fmt().with_env_filter(filter).init(),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    info!("initializing card comparison SDK");
    let sdk = cardcompare::AsyncCardCompareSdk::builder()
        .build()
        .await
        .expect("Failed to initialize card comparison SDK");

    let state = Arc::new(AppState { sdk: sdk.clone() });

    let app = Router::new()
        .route("/api/search", get(routes::search::search))
        .route("/api/tcgplayer/search", get(routes::tcgplayer::search))
        .route("/api/tcgplayer/categories", get(routes::tcgplayer::categories))
        .route("/api/liga/search", get(routes::liga::search))
        .route("/api/currency/convert", get(routes::currency::convert))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    info!("listening on http://{addr}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await;
    if let Err(e) = served {
        error!(error = %e, "server failed");
    }

    info!("shutting down; closing storefront session");
    if let Err(e) = sdk.close().await {
        error!(error = %e, "failed to close SDK");
    }
}
