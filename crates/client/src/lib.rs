//! REST client for the spell catalog backend.

pub mod api;

pub use api::{ApiError, SpellApi};
