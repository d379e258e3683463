//! REST API client for the spell catalog endpoints.
//!
//! Wraps the five `/sorts` operations (list, get, create, update, delete)
//! using [`reqwest`]. Non-2xx responses become [`ApiError::Api`] carrying
//! the server's JSON `message` field when the body provides one, else a
//! fixed per-operation fallback. Failures are never retried here; retry
//! policy, if any, belongs to the caller.

use serde::{Deserialize, Serialize};

use grimoire_core::spell::{Spell, SpellFilters, SpellInput};

/// HTTP client for the spell catalog API.
pub struct SpellApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the spell API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the operation's fallback text.
        message: String,
    },
}

/// Fallback texts used when a failing response has no `message` field.
/// French, like the backend's own `message` strings, so a fallback reads
/// no differently from a server-provided error.
const LIST_FALLBACK: &str = "Erreur lors de la récupération des sorts.";
const GET_FALLBACK: &str = "Erreur lors de la récupération des détails du sort.";
const CREATE_FALLBACK: &str = "Erreur lors de l'ajout du sort.";
const UPDATE_FALLBACK: &str = "Erreur lors de la mise à jour du sort.";
const DELETE_FALLBACK: &str = "Erreur lors de la suppression du sort.";

/// `GET /sorts` response envelope.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    sorts: Vec<Spell>,
}

/// Envelope for single-spell responses (`get`, `create`, `update`).
#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    sort: Spell,
}

/// Request body wrapper for create and update.
#[derive(Debug, Serialize)]
struct InputEnvelope<'a> {
    sort: &'a SpellInput,
}

/// Shape of a server error body, when it is JSON at all.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl SpellApi {
    /// Create a client for the given API base path, e.g.
    /// `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling with the identity gateway).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// List spells, optionally filtered by category and forbidden flag.
    ///
    /// An absent filter omits its query parameter entirely; with no
    /// filters the request carries no query string at all.
    pub async fn list(&self, filters: &SpellFilters) -> Result<Vec<Spell>, ApiError> {
        let mut request = self.client.get(format!("{}/sorts", self.base_url));
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let response = request.send().await?;
        let envelope: ListEnvelope = Self::parse_response(response, LIST_FALLBACK).await?;
        tracing::debug!(count = envelope.sorts.len(), "fetched spell list");
        Ok(envelope.sorts)
    }

    /// Fetch one spell by its server-assigned identifier.
    pub async fn get(&self, id: &str) -> Result<Spell, ApiError> {
        let response = self
            .client
            .get(format!("{}/sorts/{id}", self.base_url))
            .send()
            .await?;

        let envelope: ItemEnvelope = Self::parse_response(response, GET_FALLBACK).await?;
        Ok(envelope.sort)
    }

    /// Create a spell. Returns the created record with its new identifier.
    pub async fn create(&self, input: &SpellInput) -> Result<Spell, ApiError> {
        let response = self
            .client
            .post(format!("{}/sorts", self.base_url))
            .json(&InputEnvelope { sort: input })
            .send()
            .await?;

        let envelope: ItemEnvelope = Self::parse_response(response, CREATE_FALLBACK).await?;
        tracing::info!(id = %envelope.sort.id, "created spell");
        Ok(envelope.sort)
    }

    /// Replace an existing spell's fields.
    pub async fn update(&self, id: &str, input: &SpellInput) -> Result<Spell, ApiError> {
        let response = self
            .client
            .put(format!("{}/sorts/{id}", self.base_url))
            .json(&InputEnvelope { sort: input })
            .send()
            .await?;

        let envelope: ItemEnvelope = Self::parse_response(response, UPDATE_FALLBACK).await?;
        tracing::info!(id = %envelope.sort.id, "updated spell");
        Ok(envelope.sort)
    }

    /// Delete a spell. The server's acknowledgement body is discarded.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/sorts/{id}", self.base_url))
            .send()
            .await?;

        Self::check_status(response, DELETE_FALLBACK).await?;
        tracing::info!(%id, "deleted spell");
        Ok(())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure, extract
    /// the server's `message` field when the body is JSON and carries one,
    /// otherwise fall back to `fallback`.
    async fn ensure_success(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());

        tracing::warn!(status = status.as_u16(), %message, "spell API request failed");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response, fallback).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response, fallback: &str) -> Result<(), ApiError> {
        Self::ensure_success(response, fallback).await?;
        Ok(())
    }
}
