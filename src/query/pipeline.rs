//! The filter/sort pipeline as a pure function of catalog, filter, and user state.

use std::cmp::Ordering;

use super::compare::{contains_folded, locale_compare};
use super::filter::{SortKey, SortOrder, StoryFilter};
use crate::catalog::{CatalogRepository, StoryRepository};
use crate::domain::{CardRef, Story};
use crate::state::FlagSet;

/// Apply `filter` to every story in the catalog.
///
/// Stages run in order: card type, rarity, unread, owned, idols, search, sort.
/// A story whose parent card is missing from the catalog fails every stage
/// that needs the card (rarity, owned, idols, search, and sorting by name,
/// rarity or idol id) instead of causing an error. Without a sort key the
/// catalog order is kept.
pub fn compute_filtered_stories(
    repository: &CatalogRepository,
    filter: &StoryFilter,
    ownership: &FlagSet,
    read_status: &FlagSet,
) -> Vec<Story> {
    let mut stories = repository.all_stories();

    if let Some(card_type) = filter.card_type {
        stories.retain(|story| story.kind() == card_type);
    }

    if let Some(rarities) = &filter.rarity {
        stories.retain(|story| {
            repository
                .parent_card(story)
                .map_or(false, |card| rarities.contains(card.rarity()))
        });
    }

    if filter.unread_only == Some(true) {
        stories.retain(|story| !read_status.contains(story.id()));
    }

    if filter.owned_only == Some(true) {
        stories.retain(|story| {
            repository
                .parent_card(story)
                .map_or(false, |card| ownership.contains(card.id()))
        });
    }

    if let Some(idol_ids) = filter.idol_ids.as_ref().filter(|ids| !ids.is_empty()) {
        stories.retain(|story| {
            repository
                .parent_card(story)
                .map_or(false, |card| card.features_any_idol(idol_ids))
        });
    }

    if let Some(query) = filter.normalized_search() {
        let query = query.to_lowercase();
        stories.retain(|story| matches_search(repository, story, &query));
    }

    if let Some(key) = filter.sort_by {
        stories = sort_stories(repository, stories, key, filter.sort_order.unwrap_or_default());
    }

    stories
}

/// Card name or primary idol name contains the (lowercased) query.
fn matches_search(repository: &CatalogRepository, story: &Story, query: &str) -> bool {
    let Some(card) = repository.parent_card(story) else {
        return false;
    };

    contains_folded(card.name(), query)
        || repository
            .primary_idol(&card)
            .map_or(false, |idol| contains_folded(&idol.name, query))
}

fn sort_stories(
    repository: &CatalogRepository,
    mut stories: Vec<Story>,
    key: SortKey,
    order: SortOrder,
) -> Vec<Story> {
    match key {
        // Card ids come straight from the story, so dangling stories still sort.
        SortKey::CardId => {
            stories.sort_by(|a, b| order.apply(locale_compare(a.card_id(), b.card_id())));
            stories
        }
        SortKey::Name => sort_by_card(
            repository,
            stories,
            |card| card.name(),
            |a: &&str, b: &&str| locale_compare(a, b),
            order,
        ),
        SortKey::IdolId => sort_by_card(
            repository,
            stories,
            |card| card.primary_idol_id(),
            |a: &&str, b: &&str| locale_compare(a, b),
            order,
        ),
        SortKey::Rarity => sort_by_card(
            repository,
            stories,
            |card| card.rarity().rank(),
            u8::cmp,
            order,
        ),
    }
}

/// Stable sort on a key taken from the parent card. Stories without one drop out.
fn sort_by_card<'a, K>(
    repository: &'a CatalogRepository,
    stories: Vec<Story>,
    key_of: impl Fn(CardRef<'a>) -> K,
    compare: impl Fn(&K, &K) -> Ordering,
    order: SortOrder,
) -> Vec<Story> {
    let mut keyed: Vec<(K, Story)> = stories
        .into_iter()
        .filter_map(|story| {
            let key = key_of(repository.parent_card(&story)?);
            Some((key, story))
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| order.apply(compare(a, b)));
    keyed.into_iter().map(|(_, story)| story).collect()
}
