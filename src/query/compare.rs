//! Locale-aware string comparison and case-insensitive matching.

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use std::cmp::Ordering;
use tracing::warn;

thread_local! {
    static COLLATOR: Option<Collator> = japanese_collator();
}

fn japanese_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&locale!("ja").into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "collator unavailable, falling back to code point order");
            None
        }
    }
}

/// Compare strings with the Japanese collation order.
///
/// Base letters decide first (so `ア` and `あ` sort together, before `い`),
/// then accents, then case and kana type. Lowercase sorts before uppercase on
/// an otherwise equal string.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Case-insensitive substring test. `needle` must already be lowercased.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
