//! Spell list view-model: filter selection, refresh, and empty-state
//! selection.
//!
//! Filter changes are the only refresh trigger. Each refresh carries a
//! generation number; a response is applied only while its generation is
//! still current, so a stale response can never overwrite the result of a
//! newer request.

use grimoire_client::{ApiError, SpellApi};
use grimoire_core::spell::{Spell, SpellFilters};

/// Loading lifecycle for the list view.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// No request issued yet.
    Idle,
    Loading,
    Loaded(Vec<Spell>),
    Error(String),
}

/// Which message to show for a loaded, empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// No filters active: the database holds no spells at all.
    NoSpells,
    /// Filters active: nothing matches the current selection.
    NoMatch,
}

impl EmptyState {
    pub fn message_key(self) -> &'static str {
        match self {
            EmptyState::NoSpells => "sorts.list.empty",
            EmptyState::NoMatch => "sorts.list.noFilters",
        }
    }
}

/// The spell list screen.
#[derive(Debug)]
pub struct ListView {
    filters: SpellFilters,
    state: ListState,
    generation: u64,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            filters: SpellFilters::default(),
            state: ListState::Idle,
            generation: 0,
        }
    }

    pub fn filters(&self) -> &SpellFilters {
        &self.filters
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Change the filter selection and enter `Loading`. Returns the
    /// generation token the caller must pass back to [`apply`].
    ///
    /// [`apply`]: Self::apply
    pub fn set_filters(&mut self, filters: SpellFilters) -> u64 {
        self.filters = filters;
        self.begin()
    }

    /// Enter `Loading`, invalidating any in-flight request.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ListState::Loading;
        self.generation
    }

    /// Apply a fetch result if its generation is still current. Returns
    /// whether the result was applied; stale responses are discarded.
    pub fn apply(&mut self, generation: u64, result: Result<Vec<Spell>, ApiError>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale list response");
            return false;
        }
        self.state = match result {
            Ok(spells) => ListState::Loaded(spells),
            Err(err) => ListState::Error(err.to_string()),
        };
        true
    }

    /// Change the filter selection and fetch: enters `Loading`, issues
    /// the request, and applies the outcome.
    pub async fn refresh(&mut self, api: &SpellApi, filters: SpellFilters) {
        let generation = self.set_filters(filters);
        let result = api.list(&self.filters).await;
        self.apply(generation, result);
    }

    /// For a loaded, empty list: which empty-state message applies.
    pub fn empty_state(&self) -> Option<EmptyState> {
        match &self.state {
            ListState::Loaded(spells) if spells.is_empty() => Some(if self.filters.is_empty() {
                EmptyState::NoSpells
            } else {
                EmptyState::NoMatch
            }),
            _ => None,
        }
    }
}
