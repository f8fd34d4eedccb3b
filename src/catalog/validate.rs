//! Referential integrity checks for an assembled catalog.
//!
//! Nothing else in the crate requires validation to have run; a catalog that
//! passes simply guarantees that every filter can resolve its references.

use super::Catalog;
use crate::derivation::story_count_for;
use crate::domain::{Idol, ProduceCard, ProduceCardStory, SupportCard, SupportCardStory};

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub fn validate_produce_card(
    card: &ProduceCard,
    idols: &[Idol],
    stories: &[ProduceCardStory],
) -> ValidationResult {
    let mut errors = Vec::new();

    if !idol_exists(idols, &card.idol_id) {
        errors.push(format!(
            "ProduceCard \"{}\" references unknown idolId \"{}\"",
            card.id, card.idol_id
        ));
    }

    let indices: Vec<u32> = stories
        .iter()
        .filter(|story| story.produce_card_id == card.id)
        .map(|story| story.story_index)
        .collect();
    check_stories("ProduceCard", &card.id, story_count_for(card), indices, &mut errors);

    ValidationResult::from_errors(errors)
}

pub fn validate_support_card(
    card: &SupportCard,
    idols: &[Idol],
    stories: &[SupportCardStory],
) -> ValidationResult {
    let mut errors = Vec::new();

    if !idol_exists(idols, &card.main_idol_id) {
        errors.push(format!(
            "SupportCard \"{}\" references unknown mainIdolId \"{}\"",
            card.id, card.main_idol_id
        ));
    }

    for idol_id in &card.appearing_idol_ids {
        if !idol_exists(idols, idol_id) {
            errors.push(format!(
                "SupportCard \"{}\" lists unknown idol \"{}\" in appearingIdolIds",
                card.id, idol_id
            ));
        }
    }

    let indices: Vec<u32> = stories
        .iter()
        .filter(|story| story.support_card_id == card.id)
        .map(|story| story.story_index)
        .collect();
    check_stories("SupportCard", &card.id, story_count_for(card), indices, &mut errors);

    ValidationResult::from_errors(errors)
}

/// Validate every card in the catalog, collecting all errors.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    for card in &catalog.produce_cards {
        let result = validate_produce_card(card, &catalog.idols, &catalog.produce_card_stories);
        errors.extend(result.errors);
    }

    for card in &catalog.support_cards {
        let result = validate_support_card(card, &catalog.idols, &catalog.support_card_stories);
        errors.extend(result.errors);
    }

    ValidationResult::from_errors(errors)
}

fn idol_exists(idols: &[Idol], idol_id: &str) -> bool {
    idols.iter().any(|idol| idol.id == idol_id)
}

fn check_stories(
    tag: &str,
    card_id: &str,
    expected: u32,
    mut indices: Vec<u32>,
    errors: &mut Vec<String>,
) {
    if indices.len() != expected as usize {
        errors.push(format!(
            "{} \"{}\" has {} stories, expected {}",
            tag,
            card_id,
            indices.len(),
            expected
        ));
    }

    // Index contiguity is only meaningful for cards that carry stories.
    if expected == 0 {
        return;
    }

    indices.sort_unstable();
    let expected_indices: Vec<u32> = (1..=expected).collect();
    if indices != expected_indices {
        errors.push(format!(
            "{} \"{}\" has story indices [{}], expected [{}]",
            tag,
            card_id,
            join(&indices),
            join(&expected_indices)
        ));
    }
}

fn join(indices: &[u32]) -> String {
    indices
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
