//! Form validation and payload normalization shared by the create and
//! edit flows.
//!
//! Every rule is evaluated independently and all violations are collected
//! into a field-keyed error set; nothing short-circuits. Error codes
//! double as localization keys, so callers can hand them straight to the
//! message catalog.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};

use crate::spell::{Category, Spell, SpellInput};

/// Raw, loosely-typed form fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellForm {
    pub name: String,
    /// Category as typed/selected; validated against the wire literals.
    pub category: String,
    pub description: String,
    pub difficulty: i32,
    pub power: i32,
    /// Comma-separated tag list, split and trimmed on submit.
    pub tags: String,
    pub forbidden: bool,
}

impl SpellForm {
    /// Pre-fill a form from an existing spell for the edit flow. Tags are
    /// joined with `", "` so they read back the way they were entered.
    pub fn from_spell(spell: &Spell) -> Self {
        Self {
            name: spell.name.clone(),
            category: spell.category.as_wire().to_string(),
            description: spell.description.clone(),
            difficulty: spell.difficulty,
            power: spell.power,
            tags: spell.tags.join(", "),
            forbidden: spell.forbidden,
        }
    }
}

/// The form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Category,
    Description,
    Difficulty,
    Power,
    Tags,
}

impl Field {
    /// The form input identifier, matching the backend's field names.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "nom",
            Field::Category => "categorie",
            Field::Description => "description",
            Field::Difficulty => "niveauDifficulte",
            Field::Power => "puissance",
            Field::Tags => "tags",
        }
    }
}

/// Field-keyed validation error codes. At most one code per field; codes
/// double as localization keys (`form.errors.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The error code for a field, if that field failed validation.
    pub fn code(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, code)| (*field, *code))
    }

    fn insert(&mut self, field: Field, code: &'static str) {
        self.0.insert(field, code);
    }
}

/// Whether a submission creates a new spell or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    /// Stamp the creation time at submission.
    Create,
    /// Carry the original creation timestamp through unchanged.
    Edit {
        created_at: String,
    },
}

/// Validate raw form fields, collecting every violation.
///
/// A category that is empty *or* outside the four wire literals ends up
/// with `form.errors.invalidCategory`; the empty-category code only
/// survives when the membership check passes, which it never does for an
/// empty string. Callers rely on this last-write-wins behavior.
pub fn validate(form: &SpellForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.chars().count() < 3 {
        errors.insert(Field::Name, "form.errors.name");
    }
    if form.category.is_empty() {
        errors.insert(Field::Category, "form.errors.category");
    }
    if Category::parse(&form.category).is_none() {
        errors.insert(Field::Category, "form.errors.invalidCategory");
    }
    if form.description.chars().count() < 3 {
        errors.insert(Field::Description, "form.errors.description");
    }
    if !(1..=10).contains(&form.difficulty) {
        errors.insert(Field::Difficulty, "form.errors.difficulty");
    }
    if !(1..=10).contains(&form.power) {
        errors.insert(Field::Power, "form.errors.power");
    }
    if !form.tags.split(',').all(|tag| !tag.trim().is_empty()) {
        errors.insert(Field::Tags, "form.errors.tags");
    }

    errors
}

/// Split a comma-separated tag string, trimming each piece.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Current time in the exact ISO-8601 shape JavaScript's `toISOString()`
/// produces (millisecond precision, `Z` suffix), which is what the
/// backend stores.
pub fn creation_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate the form and, when clean, build the normalized payload.
///
/// On [`SubmitMode::Create`] the creation timestamp is stamped now; on
/// [`SubmitMode::Edit`] the original timestamp is carried through
/// unchanged regardless of any other field change.
pub fn build_input(form: &SpellForm, mode: SubmitMode) -> Result<SpellInput, ValidationErrors> {
    let errors = validate(form);
    let category = match Category::parse(&form.category) {
        Some(category) if errors.is_empty() => category,
        _ => return Err(errors),
    };

    let created_at = match mode {
        SubmitMode::Create => creation_timestamp(),
        SubmitMode::Edit { created_at } => created_at,
    };

    Ok(SpellInput {
        name: form.name.clone(),
        category,
        description: form.description.clone(),
        difficulty: form.difficulty,
        power: form.power,
        tags: parse_tags(&form.tags),
        forbidden: form.forbidden,
        created_at,
    })
}
