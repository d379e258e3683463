//! Spell records and list filters.
//!
//! The backend API speaks French on the wire (`nom`, `categorie`,
//! `estInterdit`, ...). Serde rename attributes keep the Rust field names
//! idiomatic while preserving the wire contract exactly.

use serde::{Deserialize, Serialize};

/// The four spell categories accepted by the backend.
///
/// Wire literals are the French strings stored by the API; anything else
/// is rejected client-side before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Curatif")]
    Curative,
    #[serde(rename = "Offensif")]
    Offensive,
    #[serde(rename = "Défensif")]
    Defensive,
    #[serde(rename = "Utilitaire")]
    Utility,
}

impl Category {
    /// All categories, in the order forms present them.
    pub const ALL: [Category; 4] = [
        Category::Curative,
        Category::Offensive,
        Category::Defensive,
        Category::Utility,
    ];

    /// The wire literal for this category.
    pub fn as_wire(self) -> &'static str {
        match self {
            Category::Curative => "Curatif",
            Category::Offensive => "Offensif",
            Category::Defensive => "Défensif",
            Category::Utility => "Utilitaire",
        }
    }

    /// Parse a wire literal. Unknown strings yield `None`.
    pub fn parse(value: &str) -> Option<Category> {
        match value {
            "Curatif" => Some(Category::Curative),
            "Offensif" => Some(Category::Offensive),
            "Défensif" => Some(Category::Defensive),
            "Utilitaire" => Some(Category::Utility),
            _ => None,
        }
    }

    /// Localization key for the category's display name.
    pub fn message_key(self) -> &'static str {
        match self {
            Category::Curative => "category.curatif",
            Category::Offensive => "category.offensif",
            Category::Defensive => "category.defensif",
            Category::Utility => "category.utilitaire",
        }
    }
}

/// A spell record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    /// Server-assigned identifier. Opaque; never validated client-side.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "categorie")]
    pub category: Category,
    pub description: String,
    /// Difficulty level in `[1, 10]`.
    #[serde(rename = "niveauDifficulte")]
    pub difficulty: i32,
    /// Power in `[1, 10]`.
    #[serde(rename = "puissance")]
    pub power: i32,
    /// Ordered tag list; older records may omit the field entirely.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "estInterdit")]
    pub forbidden: bool,
    /// ISO-8601 creation timestamp, stamped once at creation and carried
    /// through every edit unchanged.
    #[serde(rename = "dateCreation")]
    pub created_at: String,
}

/// A spell payload for create and update requests. Identical to [`Spell`]
/// minus the server-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellInput {
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "categorie")]
    pub category: Category,
    pub description: String,
    #[serde(rename = "niveauDifficulte")]
    pub difficulty: i32,
    #[serde(rename = "puissance")]
    pub power: i32,
    pub tags: Vec<String>,
    #[serde(rename = "estInterdit")]
    pub forbidden: bool,
    #[serde(rename = "dateCreation")]
    pub created_at: String,
}

/// Transient list filters. Not persisted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpellFilters {
    /// Restrict to one category, or `None` for all categories.
    pub category: Option<Category>,
    /// Tri-state forbidden filter: `Some(true)` / `Some(false)` / both.
    pub forbidden: Option<bool>,
}

impl SpellFilters {
    /// Whether no filtering is active.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.forbidden.is_none()
    }

    /// Query parameters to send with a list request. An absent filter is
    /// omitted entirely, never sent as an empty parameter.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("categorie", category.as_wire().to_string()));
        }
        if let Some(forbidden) = self.forbidden {
            pairs.push(("estInterdit", forbidden.to_string()));
        }
        pairs
    }
}
