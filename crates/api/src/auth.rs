//! Email/password accounts and the session that remembers them
//!
//! A successful register or login stores the user's id under
//! [`USER_ID_KEY`] in the `tower-sessions` session and rotates the session
//! id. Logout flushes the session.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, Json};
use burgerfy_common::{NewUser, PersistedBurger, PublicUser, UserId};
use std::sync::Arc;
use thiserror::Error;
use tower_sessions::Session;
use tracing::{debug, info};

use crate::{
    handlers::{ApiError, AppState},
    models::{LoginRequest, RegisterRequest},
};

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "user_id";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already in use")]
    EmailInUse,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Common(#[from] burgerfy_common::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidInput(_) | AuthError::EmailInUse => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::NotAuthenticated
            | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Session(_) | AuthError::Task(_) | AuthError::Common(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        ApiError::new(status, err.to_string())
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AuthError::from(err).into()
    }
}

/// Argon2id hash with a fresh random salt, as a PHC string
pub fn hash_password(password: &str) -> burgerfy_common::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| burgerfy_common::Error::PasswordHash(e.to_string()))
}

/// `false` for a wrong password or an unreadable hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            debug!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// [`hash_password`] on the blocking pool, off the request's worker thread
pub async fn spawn_hash(password: String) -> Result<String, AuthError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;
    Ok(hash)
}

/// [`verify_password`] on the blocking pool
pub async fn spawn_verify(password: String, hash: String) -> Result<bool, AuthError> {
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
    Ok(valid)
}

/// Id of the logged-in user, if any
pub async fn session_user_id(session: &Session) -> Result<Option<UserId>, ApiError> {
    Ok(session.get::<UserId>(USER_ID_KEY).await?)
}

async fn log_in(session: &Session, user_id: UserId) -> Result<(), AuthError> {
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Create an account and log it in
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.validate().map_err(AuthError::InvalidInput)?;

    let email = payload
        .login_email()
        .ok_or_else(|| AuthError::InvalidInput("A valid email is required".to_string()))?
        .to_string();

    let password_hash = spawn_hash(payload.password.clone()).await?;

    let user = {
        let mut storage = state.storage.lock().await;
        storage
            .create_user(NewUser {
                full_name: payload.full_name.trim().to_string(),
                email,
                password_hash,
                age: payload.age,
            })
            .await?
            .ok_or(AuthError::EmailInUse)?
    };

    log_in(&session, user.id).await?;
    info!("Registered and logged in user {}", user.id);

    Ok((StatusCode::CREATED, Json(user.to_public())))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let email = payload.login_email().ok_or(AuthError::InvalidCredentials)?;

    let user = {
        let mut storage = state.storage.lock().await;
        storage.get_user_by_email(email).await?
    };

    let user = user.ok_or(AuthError::InvalidCredentials)?;
    if !spawn_verify(payload.password.clone(), user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    log_in(&session, user.id).await?;
    info!("User {} logged in", user.id);

    Ok(Json(user.to_public()))
}

pub async fn logout_handler(session: Session) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(user_id) = session_user_id(&session).await? {
        info!("User {} logged out", user_id);
    }

    session.flush().await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// The logged-in user
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<PublicUser>, ApiError> {
    let user_id = session_user_id(&session)
        .await?
        .ok_or(AuthError::NotAuthenticated)?;

    let mut storage = state.storage.lock().await;
    let user = storage
        .get_user(user_id)
        .await?
        .ok_or(AuthError::NotAuthenticated)?;

    Ok(Json(user.to_public()))
}

/// Burgers saved by the logged-in user
pub async fn my_burgers_handler(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<Vec<PersistedBurger>>, ApiError> {
    let user_id = session_user_id(&session)
        .await?
        .ok_or(AuthError::Unauthorized)?;

    let mut storage = state.storage.lock().await;
    let burgers = storage.burgers_by_user(user_id).await?;

    Ok(Json(burgers))
}
