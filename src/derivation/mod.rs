//! Derivation - Story counts and deterministic story generation.
//!
//! | card type | SSR | SR | R |
//! |-----------|-----|----|---|
//! | produce   | 3   | 0  | 0 |
//! | support   | 3   | 2  | 2 |
//!
//! Story ids have the form `<TypeTag>-<cardId>-story-<index>` and are used as
//! storage keys, so the format must not change.

use crate::domain::{
    CardType, IdolCard, ProduceCard, ProduceCardStory, Rarity, SupportCard, SupportCardStory,
};

/// Number of stories a card of the given type and rarity carries.
pub fn story_count(card_type: CardType, rarity: Rarity) -> u32 {
    match (card_type, rarity) {
        (_, Rarity::SSR) => 3,
        (CardType::Produce, _) => 0,
        (CardType::Support, _) => 2,
    }
}

/// Story count for any card, dispatching on its variant.
pub fn story_count_for<C: IdolCard + ?Sized>(card: &C) -> u32 {
    story_count(card.card_type(), card.rarity())
}

pub fn story_id(card_type: CardType, card_id: &str, story_index: u32) -> String {
    format!("{}-{}-story-{}", card_type.tag(), card_id, story_index)
}

pub fn produce_card_story(card_id: &str, story_index: u32) -> ProduceCardStory {
    ProduceCardStory {
        id: story_id(CardType::Produce, card_id, story_index),
        produce_card_id: card_id.to_string(),
        story_index,
    }
}

pub fn support_card_story(card_id: &str, story_index: u32) -> SupportCardStory {
    SupportCardStory {
        id: story_id(CardType::Support, card_id, story_index),
        support_card_id: card_id.to_string(),
        story_index,
    }
}

/// Stories of a single produce card, ascending by index.
pub fn stories_for_produce_card(card: &ProduceCard) -> Vec<ProduceCardStory> {
    (1..=story_count_for(card))
        .map(|index| produce_card_story(&card.id, index))
        .collect()
}

/// Stories of a single support card, ascending by index.
pub fn stories_for_support_card(card: &SupportCard) -> Vec<SupportCardStory> {
    (1..=story_count_for(card))
        .map(|index| support_card_story(&card.id, index))
        .collect()
}

/// Stories for a card list, card by card in list order.
pub fn derive_produce_card_stories(cards: &[ProduceCard]) -> Vec<ProduceCardStory> {
    cards.iter().flat_map(stories_for_produce_card).collect()
}

pub fn derive_support_card_stories(cards: &[SupportCard]) -> Vec<SupportCardStory> {
    cards.iter().flat_map(stories_for_support_card).collect()
}
