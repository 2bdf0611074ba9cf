use tracing::info;

use agrilink_core::config::Config;
use agrilink_core::tracing::init_tracing;
use agrilink_marketplace::config::MarketConfig;
use agrilink_marketplace::router::build_router;
use agrilink_marketplace::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("agrilink_marketplace=info,tower_http=info");

    let config = MarketConfig::from_env();
    let state = AppState::new(&config);
    info!(
        session_ttl_secs = config.session_ttl_secs,
        cookie_secure = config.cookie_secure,
        "in-memory storage initialized"
    );

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("marketplace service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .expect("server error");
}
