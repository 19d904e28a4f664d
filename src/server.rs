use std::time::Duration;

use axum::{middleware, routing::get, routing::post, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{auth, habits, identities, logs, profile};
use crate::middleware::{current_user_middleware, jwt_auth_middleware};

/// Shared per-process context: one pooled store handle, created at startup
/// and cloned into every request. No globals, no reinitialization.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Authenticated API
        .nest("/api", api_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config::config().server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Owner-scoped resource routes. Token verification runs first, then the
/// canonical user record is resolved from storage; handlers only ever see
/// a storage-backed caller.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::profile))
        .route("/logs/create", post(logs::create))
        .route("/logs", post(logs::list))
        .route("/logs/:id", get(logs::get).put(logs::update).delete(logs::delete))
        .route("/habits/create", post(habits::create))
        .route("/habits", post(habits::list))
        .route(
            "/habits/:id",
            get(habits::get).put(habits::update).delete(habits::delete),
        )
        .route("/identities/create", post(identities::create))
        .route("/identities", post(identities::list))
        .route(
            "/identities/:id",
            get(identities::get).put(identities::update).delete(identities::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, current_user_middleware))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

pub async fn serve(state: AppState) {
    let config = config::config();
    let bind_addr = format!("0.0.0.0:{}", config.server.port);

    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Listening on: http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "habitlog-api",
        "version": version,
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public)",
            "profile": "GET /api/profile",
            "logs": "POST /api/logs/create, POST /api/logs, GET|PUT|DELETE /api/logs/:id",
            "habits": "POST /api/habits/create, POST /api/habits, GET|PUT|DELETE /api/habits/:id",
            "identities": "POST /api/identities/create, POST /api/identities, GET|PUT|DELETE /api/identities/:id",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.db).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable",
                "database_error": e.to_string()
            })),
        ),
    }
}
