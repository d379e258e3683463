//! Login view-model: local credential checks, then the identity gateway.

use grimoire_auth::{validate_credentials, CredentialErrors, IdentityGateway};

use crate::routes::Route;

/// Result of a sign-in attempt.
#[derive(Debug, PartialEq)]
pub enum LoginOutcome {
    /// Field errors; the provider was never contacted.
    Invalid(CredentialErrors),
    /// The provider rejected the attempt; show its message inline.
    Failed(String),
    /// Signed in; navigate back to where the user came from.
    SignedIn(Route),
}

/// Validate and sign in, returning where to go on success.
pub async fn sign_in(
    gateway: &IdentityGateway,
    email: &str,
    password: &str,
    return_to: Route,
) -> LoginOutcome {
    let errors = validate_credentials(email, password);
    if !errors.is_empty() {
        return LoginOutcome::Invalid(errors);
    }

    match gateway.sign_in(email, password).await {
        Ok(()) => LoginOutcome::SignedIn(return_to),
        Err(err) => LoginOutcome::Failed(err.to_string()),
    }
}
