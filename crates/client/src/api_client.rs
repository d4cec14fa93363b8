//! Client for the BurgerFy API

use anyhow::{Context, Result};
use burgerfy_common::{Ingredient, NewBurger, PersistedBurger, PublicUser};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The server answered with an error status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} ({status})")]
pub struct RequestError {
    pub status: StatusCode,

    /// The server's `error` field, or the status text
    pub message: String,
}

impl RequestError {
    /// Server-side failures may go away on their own; client errors will not
    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Account details sent to `/api/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the BurgerFy API
///
/// Keeps cookies between requests, so a login carries over to later calls
/// made through the same client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the ingredient catalog
    pub async fn load_catalog(&self) -> Result<Vec<Ingredient>> {
        let url = self.url("/api/ingredients");
        debug!("Fetching catalog from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check(response).await?;

        response
            .json()
            .await
            .context("Failed to parse catalog response")
    }

    /// Save a burger. Sent once; never retried here.
    pub async fn save_burger(&self, burger: &NewBurger) -> Result<PersistedBurger> {
        let url = self.url("/api/burgers");
        debug!("Saving burger '{}' to {}", burger.name, url);

        let response = self.client.post(&url).json(burger).send().await?;
        let response = check(response).await?;

        response
            .json()
            .await
            .context("Failed to parse saved burger")
    }

    /// The logged-in user. A 401 means nobody is logged in.
    pub async fn load_user(&self) -> Result<Option<PublicUser>> {
        let response = self.client.get(self.url("/api/user")).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let response = check(response).await?;
        let user = response.json().await.context("Failed to parse user")?;

        Ok(Some(user))
    }

    /// Create an account; the client is logged in afterwards
    pub async fn register(&self, registration: &Registration) -> Result<PublicUser> {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(registration)
            .send()
            .await?;
        let response = check(response).await?;

        response.json().await.context("Failed to parse user")
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<PublicUser> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        let response = check(response).await?;

        response.json().await.context("Failed to parse user")
    }

    pub async fn logout(&self) -> Result<()> {
        let response = self.client.post(self.url("/api/logout")).send().await?;
        check(response).await?;
        Ok(())
    }

    /// Burgers saved by the logged-in user
    pub async fn my_burgers(&self) -> Result<Vec<PersistedBurger>> {
        let response = self.client.get(self.url("/api/my/burgers")).send().await?;
        let response = check(response).await?;

        response
            .json()
            .await
            .context("Failed to parse saved burgers")
    }

    /// Check if the API is healthy
    pub async fn health_check(&self) -> Result<bool> {
        let response = self.client.get(self.url("/health")).send().await?;
        Ok(response.status().is_success())
    }
}

/// Pass successful responses through; turn the rest into a [`RequestError`]
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    Err(RequestError { status, message }.into())
}
