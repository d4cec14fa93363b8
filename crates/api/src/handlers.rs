//! API handlers for the catalog and saved burgers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use burgerfy_common::{BurgerIngredientRef, Category, Ingredient, NewBurger, PersistedBurger};
use burgerfy_composer::{
    compose, count_ingredients, finalize_name, format_price, group_by_category, price_of,
    RenderOptions,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::{
    auth::session_user_id,
    models::{CategoryGroup, ReceiptResponse},
    storage::Storage,
};

/// Shared application state
pub struct AppState {
    pub storage: Mutex<Storage>,

    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(storage: Storage, secure_cookies: bool) -> Self {
        Self {
            storage: Mutex::new(storage),
            secure_cookies,
        }
    }
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Health check
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "burgerfy-api"
    }))
}

/// Full catalog in id order
pub async fn list_ingredients_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let mut storage = state.storage.lock().await;
    let ingredients = storage.list_ingredients().await?;

    Ok(Json(ingredients))
}

/// Catalog entries of one category
pub async fn ingredients_by_category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let category: Category = category
        .parse()
        .map_err(|e: burgerfy_common::Error| ApiError::bad_request(e.to_string()))?;

    let mut storage = state.storage.lock().await;
    let ingredients = storage.ingredients_by_category(category).await?;

    Ok(Json(ingredients))
}

pub async fn get_ingredient_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Ingredient>, ApiError> {
    let mut storage = state.storage.lock().await;

    let ingredient = storage
        .get_ingredient(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Ingredient not found"))?;

    Ok(Json(ingredient))
}

/// Save a burger
///
/// Every referenced ingredient must exist; the stored reference is rebuilt
/// from the catalog entry. The burger belongs to the session user, if any.
pub async fn create_burger_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<NewBurger>,
) -> Result<(StatusCode, Json<PersistedBurger>), ApiError> {
    let user_id = session_user_id(&session).await?;
    let mut storage = state.storage.lock().await;

    let mut ingredients = Vec::with_capacity(payload.ingredients.len());
    for reference in &payload.ingredients {
        let ingredient = storage
            .get_ingredient(reference.id)
            .await?
            .ok_or_else(|| {
                ApiError::bad_request(format!("Unknown ingredient: {}", reference.id))
            })?;
        ingredients.push(BurgerIngredientRef::from(&ingredient));
    }

    let burger = NewBurger {
        name: finalize_name(&payload.name),
        ingredients,
    };

    let saved = storage.create_burger(burger, user_id).await?;
    info!(
        "Saved burger {} ({} ingredients) for {:?}",
        saved.id,
        saved.ingredients.len(),
        user_id
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_burgers_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PersistedBurger>>, ApiError> {
    let mut storage = state.storage.lock().await;
    let burgers = storage.list_burgers().await?;

    Ok(Json(burgers))
}

pub async fn get_burger_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<PersistedBurger>, ApiError> {
    let mut storage = state.storage.lock().await;

    let burger = storage
        .get_burger(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Burger not found"))?;

    Ok(Json(burger))
}

/// Summary of a saved burger: compact stack, counts, groups and price
pub async fn burger_receipt_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let mut storage = state.storage.lock().await;

    let burger = storage
        .get_burger(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Burger not found"))?;

    let mut ingredients = Vec::with_capacity(burger.ingredients.len());
    for reference in &burger.ingredients {
        match storage.get_ingredient(reference.id).await? {
            Some(ingredient) => ingredients.push(ingredient),
            None => warn!(
                "Burger {} references missing ingredient {} ({})",
                burger.id, reference.id, reference.name
            ),
        }
    }
    drop(storage);

    let plan = compose(&ingredients, RenderOptions::receipt());
    let counts = count_ingredients(&ingredients).into_values().collect();
    let groups = group_by_category(&ingredients)
        .into_iter()
        .map(|(category, ingredients)| CategoryGroup {
            category,
            heading: category.display_name(),
            ingredients,
        })
        .collect();
    let price = price_of(&ingredients);

    Ok(Json(ReceiptResponse {
        burger,
        plan,
        counts,
        groups,
        price,
        formatted_price: format_price(price),
    }))
}
