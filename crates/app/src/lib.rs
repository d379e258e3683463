//! Terminal front-end for the spell catalog.
//!
//! Screen behavior (routing, filter-driven listing, auth-gated deletion,
//! the shared create/edit submission flow, bilingual text) lives in the
//! pure view-model types under [`views`]; [`shell`] and the binary are
//! thin wiring around them.

pub mod config;
pub mod routes;
pub mod shell;
pub mod views;
