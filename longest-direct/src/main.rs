use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use longest_direct::config::AppConfig;
use longest_direct::transit::{MockTransitClient, TransitClient, TransitProvider};
use longest_direct::web::{AppState, create_app};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().expect("Failed to read configuration");

    match &config.mock_dir {
        Some(dir) => {
            let mock = MockTransitClient::from_dir(dir).expect("Failed to load mock fixtures");
            tracing::warn!(dir = %dir.display(), "Serving from fixture directory, not the live API");
            serve(mock, &config).await;
        }
        None => {
            let client =
                TransitClient::new(config.transit.clone()).expect("Failed to create transit client");
            tracing::info!(
                base_url = %config.transit.base_url,
                max_concurrent = config.transit.max_concurrent,
                "Using transit API"
            );
            serve(client, &config).await;
        }
    }
}

async fn serve<P: TransitProvider + 'static>(transit: P, config: &AppConfig) {
    tracing::info!(origins = ?config.cors_origins, "CORS configured");
    let app = create_app(AppState::new(transit), &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!("Longest direct listening on http://{}", config.bind_addr);
    tracing::info!("  GET /                - Search form");
    tracing::info!("  GET /health          - Health check");
    tracing::info!("  GET /longest-direct  - Longest direct connections");

    axum::serve(listener, app).await.expect("Server error");
}
