//! Domain model, form validation, and localization for the grimoire
//! spell catalog.
//!
//! This crate is deliberately free of I/O: it holds the [`spell`] record
//! types shared by the REST client and the front-end views, the
//! [`validation`] contract used by both the create and edit flows, and the
//! bilingual [`i18n`] message catalog.

pub mod i18n;
pub mod spell;
pub mod validation;

pub use i18n::Locale;
pub use spell::{Category, Spell, SpellFilters, SpellInput};
pub use validation::{validate, SpellForm, SubmitMode, ValidationErrors};
