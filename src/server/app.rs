use axum::extract::FromRef;
use axum::http::{header, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes::{category_router, questions_router, quizzes_router};

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
}

pub fn app(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(index))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state))
        .fallback(|| async { ApiError::NotFound })
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(pool: SqlitePool, addr: &str) -> anyhow::Result<()> {
    let app = app(pool);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}
