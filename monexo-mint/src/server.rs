use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::MintConfig;
use crate::mint::Mint;
use crate::routes::default::{get_health, get_keys, post_mint, post_split};

pub async fn run_server(mint: Mint, config: &MintConfig) -> anyhow::Result<()> {
    info!("listening on: {}", config.server.host_port);

    let listener = tokio::net::TcpListener::bind(&config.server.host_port).await?;

    axum::serve(
        listener,
        app(mint)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_headers(Any)
                    .allow_methods(Any),
            )
            .into_make_service(),
    )
    .await?;

    Ok(())
}

pub fn app(mint: Mint) -> Router {
    Router::new()
        .route("/keys", get(get_keys))
        .route("/mint", post(post_mint))
        .route("/split", post(post_split))
        .route("/health", get(get_health))
        .with_state(mint)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn health_check_returns_ok() {
        let mint = Mint::new("test-master-secret").unwrap();
        let app = app(mint);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
