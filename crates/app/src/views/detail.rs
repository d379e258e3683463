//! Spell detail view-model: one fetch per identifier, plus the
//! authentication-gated delete flow.

use async_trait::async_trait;

use grimoire_auth::IdentityGateway;
use grimoire_client::SpellApi;
use grimoire_core::spell::Spell;

/// Loading lifecycle for the detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Spell),
    Error(String),
}

/// Awaitable yes/no confirmation gate placed before destructive actions.
/// The shell prompts on stdin; tests substitute a canned answer.
#[async_trait]
pub trait Confirm {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Outcome of a delete attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// No session: redirect to the login screen. Delete was not called.
    RedirectToLogin,
    /// The user declined the confirmation. Delete was not called.
    Cancelled,
    /// Deleted; navigate back to the list.
    Deleted,
    /// The delete call failed; show the message in place.
    Failed(String),
}

/// The spell details screen, bound to one identifier.
#[derive(Debug)]
pub struct DetailView {
    id: String,
    state: DetailState,
}

impl DetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn spell(&self) -> Option<&Spell> {
        match &self.state {
            DetailState::Loaded(spell) => Some(spell),
            _ => None,
        }
    }

    /// Fetch the spell once. Called on entering the view.
    pub async fn load(&mut self, api: &SpellApi) {
        self.state = match api.get(&self.id).await {
            Ok(spell) => DetailState::Loaded(spell),
            Err(err) => DetailState::Error(err.to_string()),
        };
    }

    /// Attempt to delete the spell.
    ///
    /// Without a session this redirects to login before anything else;
    /// with one, an awaited confirmation must pass before the delete call
    /// is issued. A failed call leaves the loaded spell visible and
    /// reports the message.
    pub async fn delete(
        &self,
        api: &SpellApi,
        gateway: &IdentityGateway,
        confirm: &dyn Confirm,
        prompt: &str,
    ) -> DeleteOutcome {
        if gateway.current_user().is_none() {
            tracing::debug!(id = %self.id, "delete refused: no session");
            return DeleteOutcome::RedirectToLogin;
        }

        if !confirm.confirm(prompt).await {
            return DeleteOutcome::Cancelled;
        }

        match api.delete(&self.id).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(err) => DeleteOutcome::Failed(err.to_string()),
        }
    }
}
