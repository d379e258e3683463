//! URL-style route table.
//!
//! The shell accepts path commands: `/`, `/login`, `/sorts`,
//! `/add-sort`, `/sorts/{id}/edit`, `/sorts/{id}`, and a catch-all for
//! everything else. Literal segments are matched before the
//! identifier-capturing shapes, so `/add-sort` never reads as a details
//! path.

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Spells,
    AddSpell,
    SpellDetails { id: String },
    EditSpell { id: String },
    NotFound,
}

impl Route {
    /// Parse a path into a route. Trailing slashes are tolerated; any
    /// unknown shape maps to [`Route::NotFound`].
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["sorts"] => Route::Spells,
            ["add-sort"] => Route::AddSpell,
            ["sorts", id] => Route::SpellDetails {
                id: (*id).to_string(),
            },
            ["sorts", id, "edit"] => Route::EditSpell {
                id: (*id).to_string(),
            },
            _ => Route::NotFound,
        }
    }

    /// The canonical path for this route, used when announcing
    /// navigation. [`Route::NotFound`] has no path of its own.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Login => "/login".into(),
            Route::Spells => "/sorts".into(),
            Route::AddSpell => "/add-sort".into(),
            Route::SpellDetails { id } => format!("/sorts/{id}"),
            Route::EditSpell { id } => format!("/sorts/{id}/edit"),
            Route::NotFound => "/404".into(),
        }
    }
}
