//! Persona system — the ten result categories a quiz can resolve to.
//!
//! # Architecture
//!
//! ```text
//! PersonaSlug (10 enum variants, URL identifiers)
//!   ↓  keyed by
//! PersonaProfile { axis_values, primary_tag, synergy, tension }
//!   ↓  ordered in
//! PersonaRegistry (immutable, validated once at startup)
//! ```
//!
//! Display content (names, titles, descriptions, emoji) is owned by the
//! rendering layer and never parsed here.

pub mod profile;
pub mod slug;

pub use profile::{PersonaProfile, PersonaRegistry};
pub use slug::PersonaSlug;
