//! Final pick from a candidate pool.
//!
//! Shared by the direct table path and the nearest-persona fallback.

use crate::engine::tags::TagCounts;
use crate::persona::{PersonaRegistry, PersonaSlug};

/// Tag score of a persona: the count of its primary tag, or 0 when the
/// persona has no primary tag, an unrecognised one, or is not registered.
pub fn primary_tag_score(slug: PersonaSlug, personas: &PersonaRegistry, tags: &TagCounts) -> u8 {
    personas
        .get(slug)
        .and_then(|p| p.primary_tag.as_deref())
        .map_or(0, |label| tags.score_label(label))
}

/// Resolve a candidate pool to one persona.
///
/// A single candidate is returned as-is without looking at tags. Otherwise
/// the candidate with the strictly highest primary-tag score wins, and a tie
/// goes to whichever tied candidate comes first in `candidates`. Returns
/// `None` only for an empty pool.
pub fn select_character(
    candidates: &[PersonaSlug],
    personas: &PersonaRegistry,
    tags: &TagCounts,
) -> Option<PersonaSlug> {
    let (&first, rest) = candidates.split_first()?;
    if rest.is_empty() {
        return Some(first);
    }

    let mut best = first;
    let mut best_score = primary_tag_score(first, personas, tags);
    for &slug in rest {
        let score = primary_tag_score(slug, personas, tags);
        if score > best_score {
            best = slug;
            best_score = score;
        }
    }

    log::debug!(
        "Selected {} from {:?} with primary-tag score {}",
        best,
        candidates,
        best_score
    );
    Some(best)
}
