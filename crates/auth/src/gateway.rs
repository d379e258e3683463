//! Gateway to the external email/password identity provider.
//!
//! Sign-in goes to the provider's REST endpoint, following the Identity
//! Toolkit `/accounts:signInWithPassword` contract. Provider errors are
//! returned to the caller as a [`Result`] so the view decides how to
//! present them. The signed-in user is published on a
//! [`tokio::sync::watch`] channel; views subscribe on mount and drop the
//! receiver on unmount.

use serde::Deserialize;
use tokio::sync::watch;

/// The signed-in user, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
}

/// Errors from the identity gateway.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the sign-in attempt.
    #[error("{message}")]
    Provider {
        /// Provider-supplied error message, or the fixed fallback.
        message: String,
    },
}

/// Fallback when a rejection body carries no usable error message.
const SIGN_IN_FALLBACK: &str = "Authentication failed.";

/// Successful sign-in body; only the email is kept.
#[derive(Debug, Deserialize)]
struct SignInResponse {
    email: String,
}

/// Provider rejection body: `{ "error": { "message": "..." } }`.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Boundary wrapping the external identity provider.
pub struct IdentityGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    session: watch::Sender<Option<SessionUser>>,
}

impl IdentityGateway {
    /// Create a gateway for the provider at `base_url`, authenticating
    /// requests with the project's web API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            session,
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the session observable switches to the signed-in user.
    /// On rejection the provider's message is returned in the error; the
    /// session is left unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(format!(
                "{}/accounts:signInWithPassword?key={}",
                self.base_url, self.api_key
            ))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| SIGN_IN_FALLBACK.to_string());
            tracing::warn!(status = status.as_u16(), %message, "sign-in rejected");
            return Err(AuthError::Provider { message });
        }

        let signed_in: SignInResponse = response.json().await?;
        tracing::info!(email = %signed_in.email, "signed in");
        self.session.send_replace(Some(SessionUser {
            email: signed_in.email,
        }));
        Ok(())
    }

    /// Clear the current session.
    pub fn sign_out(&self) {
        if self.session.send_replace(None).is_some() {
            tracing::info!("signed out");
        }
    }

    /// The current user, if a session is present.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.borrow().clone()
    }

    /// Subscribe to session changes. The receiver yields the current
    /// value immediately and every change thereafter until dropped.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.session.subscribe()
    }
}
