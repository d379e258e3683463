//! Identity gateway for the external email/password provider.
//!
//! [`credentials`] holds the local syntactic checks that run before the
//! provider is ever contacted; [`gateway`] wraps the provider's REST
//! sign-in endpoint and publishes the current session on a watch channel.

pub mod credentials;
pub mod gateway;

pub use credentials::{validate_credentials, CredentialErrors, CredentialField};
pub use gateway::{AuthError, IdentityGateway, SessionUser};
