//! Pure view-model types for each screen. The shell renders them; tests
//! drive them directly.

pub mod detail;
pub mod form;
pub mod list;
pub mod login;
