use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::require_auth;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use handlers::{auth, profile, users};

    Router::new()
        .route("/api/users", post(users::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/profile", get(profile::list))
        .route("/api/profile/user/:user_id", get(profile::by_user))
}

fn protected_routes() -> Router {
    use handlers::{auth, posts, profile};

    Router::new()
        .route("/api/auth", get(auth::current_user))
        .route("/api/profile/me", get(profile::me))
        .route("/api/profile", post(profile::upsert).delete(profile::delete_account))
        .route("/api/profile/experience", put(profile::add_experience))
        .route("/api/profile/experience/:exp_id", delete(profile::remove_experience))
        .route("/api/profile/education", put(profile::add_education))
        .route("/api/profile/education/:edu_id", delete(profile::remove_education))
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/posts/:id", get(posts::get).delete(posts::delete))
        .route("/api/posts/:id/like", put(posts::toggle_like))
        .route("/api/posts/:id/comments", post(posts::add_comment))
        .route("/api/posts/:id/comments/:comment_id", delete(posts::remove_comment))
        .route_layer(middleware::from_fn(require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Devnet API",
            "version": version,
            "description": "Developer network backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "register": "POST /api/users (public)",
                "login": "POST /api/auth/login (public)",
                "auth": "GET /api/auth (protected)",
                "profile": "/api/profile[/me|/user/:user_id|/experience|/education]",
                "posts": "/api/posts[/:id[/like|/comments]]",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            // Full fault detail stays server-side
            tracing::error!("health check failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
