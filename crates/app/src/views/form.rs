//! The shared create/edit submission flow.
//!
//! Both screens feed the same raw [`SpellForm`] through the core
//! validation contract; the only difference between them is whether the
//! creation timestamp is stamped now or carried over from the loaded
//! spell, and which client operation receives the payload.

use grimoire_client::SpellApi;
use grimoire_core::validation::{build_input, SpellForm, SubmitMode, ValidationErrors};

use crate::routes::Route;

/// Create a new spell, or edit an existing one by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit {
        id: String,
        /// The loaded spell's creation timestamp, preserved verbatim.
        created_at: String,
    },
}

/// Result of a submit attempt.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; navigate to the given route (always the spell list).
    Saved(Route),
    /// Field errors; the form stays visible with per-field codes. No
    /// network call was made.
    Invalid(ValidationErrors),
    /// The network call failed; the form stays visible with the message.
    Failed(String),
}

/// Validate the form and, when clean, submit it.
pub async fn submit(api: &SpellApi, form: &SpellForm, mode: FormMode) -> SubmitOutcome {
    let core_mode = match &mode {
        FormMode::Create => SubmitMode::Create,
        FormMode::Edit { created_at, .. } => SubmitMode::Edit {
            created_at: created_at.clone(),
        },
    };

    let input = match build_input(form, core_mode) {
        Ok(input) => input,
        Err(errors) => return SubmitOutcome::Invalid(errors),
    };

    let result = match &mode {
        FormMode::Create => api.create(&input).await,
        FormMode::Edit { id, .. } => api.update(id, &input).await,
    };

    match result {
        Ok(_) => SubmitOutcome::Saved(Route::Spells),
        Err(err) => SubmitOutcome::Failed(err.to_string()),
    }
}
