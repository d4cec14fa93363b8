//! Messages shown to the user when a request fails

use serde::Serialize;

use crate::api_client::RequestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The catalog could not be loaded; the builder shows no ingredients
    CatalogUnavailable,

    /// The burger was not saved; it is still on the builder
    SaveFailed,

    /// Login or registration was refused
    AuthFailed,
}

/// A failure reported to the user instead of propagated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,

    /// Offer a retry
    pub retryable: bool,
}

impl Notice {
    pub fn from_error(kind: NoticeKind, err: &anyhow::Error) -> Self {
        let (message, status_retryable) = match err.downcast_ref::<RequestError>() {
            Some(request) => (request.message.clone(), request.is_retryable()),
            // No response at all: connection refused, timeout, bad body
            None => (err.to_string(), true),
        };

        let retryable = match kind {
            NoticeKind::CatalogUnavailable => true,
            NoticeKind::SaveFailed => status_retryable,
            NoticeKind::AuthFailed => false,
        };

        Self {
            kind,
            message,
            retryable,
        }
    }
}
