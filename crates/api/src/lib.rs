//! BurgerFy REST API
//!
//! Serves the ingredient catalog, saves burgers built in the composer and
//! manages email/password accounts.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/ingredients` - Full catalog
//! - `GET /api/ingredients/category/{category}` - One category
//! - `GET /api/ingredients/{id}` - One ingredient
//! - `POST /api/burgers` - Save a burger
//! - `GET /api/burgers` - All saved burgers
//! - `GET /api/burgers/{id}` - One saved burger
//! - `GET /api/burgers/{id}/receipt` - Summary of a saved burger
//! - `POST /api/register`, `POST /api/login`, `POST /api/logout` - Accounts
//! - `GET /api/user` - The logged-in user
//! - `GET /api/my/burgers` - Burgers saved by the logged-in user

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::time::Duration, Expiry, MemoryStore, SessionManagerLayer};

pub use handlers::{ApiError, AppState};
pub use storage::Storage;

/// Sessions end after a week without requests
const SESSION_IDLE_DAYS: i64 = 7;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_IDLE_DAYS)));

    let state = Arc::new(state);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_handler))
        // Catalog
        .route("/api/ingredients", get(handlers::list_ingredients_handler))
        .route(
            "/api/ingredients/category/{category}",
            get(handlers::ingredients_by_category_handler),
        )
        .route("/api/ingredients/{id}", get(handlers::get_ingredient_handler))
        // Saved burgers
        .route(
            "/api/burgers",
            get(handlers::list_burgers_handler).post(handlers::create_burger_handler),
        )
        .route("/api/burgers/{id}", get(handlers::get_burger_handler))
        .route(
            "/api/burgers/{id}/receipt",
            get(handlers::burger_receipt_handler),
        )
        // Accounts
        .route("/api/register", post(auth::register_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route("/api/user", get(auth::current_user_handler))
        .route("/api/my/burgers", get(auth::my_burgers_handler))
        // Middleware
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
