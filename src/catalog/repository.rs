//! CatalogRepository - Read-only indexed access to a catalog.

use std::collections::HashMap;
use std::sync::Arc;

use super::Catalog;
use crate::domain::{
    CardRef, Idol, ProduceCard, ProduceCardStory, Story, SupportCard, SupportCardStory,
};

/// Structural story queries over a catalog.
///
/// Every method returns owned copies, so callers can never reach into the
/// catalog's own collections. Missing ids yield `None` or an empty `Vec`.
pub trait StoryRepository {
    /// All produce card stories, in catalog order.
    fn all_produce_card_stories(&self) -> Vec<ProduceCardStory>;

    /// All support card stories, in catalog order.
    fn all_support_card_stories(&self) -> Vec<SupportCardStory>;

    /// Produce card stories followed by support card stories.
    fn all_stories(&self) -> Vec<Story>;

    /// Find a story of either kind by id.
    fn find_by_id(&self, story_id: &str) -> Option<Story>;

    /// Stories of one produce card, ascending by story index.
    fn find_by_produce_card_id(&self, produce_card_id: &str) -> Vec<ProduceCardStory>;

    /// Stories of one support card, ascending by story index.
    fn find_by_support_card_id(&self, support_card_id: &str) -> Vec<SupportCardStory>;
}

struct Indexed {
    catalog: Catalog,
    idols: HashMap<String, usize>,
    produce_cards: HashMap<String, usize>,
    support_cards: HashMap<String, usize>,
    stories: HashMap<String, Story>,
}

/// Indexed, immutable view over a [`Catalog`].
///
/// Clone-friendly via Arc; clones share the same catalog.
#[derive(Clone)]
pub struct CatalogRepository {
    inner: Arc<Indexed>,
}

impl CatalogRepository {
    pub fn new(catalog: Catalog) -> Self {
        let idols = index_by_id(catalog.idols.iter().map(|idol| idol.id.as_str()));
        let produce_cards = index_by_id(catalog.produce_cards.iter().map(|card| card.id.as_str()));
        let support_cards = index_by_id(catalog.support_cards.iter().map(|card| card.id.as_str()));

        // First occurrence wins, produce stories before support stories.
        let mut stories = HashMap::new();
        let all = catalog
            .produce_card_stories
            .iter()
            .cloned()
            .map(Story::Produce)
            .chain(catalog.support_card_stories.iter().cloned().map(Story::Support));
        for story in all {
            stories.entry(story.id().to_string()).or_insert(story);
        }

        Self {
            inner: Arc::new(Indexed {
                catalog,
                idols,
                produce_cards,
                support_cards,
                stories,
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn idol(&self, idol_id: &str) -> Option<&Idol> {
        let index = *self.inner.idols.get(idol_id)?;
        self.inner.catalog.idols.get(index)
    }

    pub fn produce_card(&self, card_id: &str) -> Option<&ProduceCard> {
        let index = *self.inner.produce_cards.get(card_id)?;
        self.inner.catalog.produce_cards.get(index)
    }

    pub fn support_card(&self, card_id: &str) -> Option<&SupportCard> {
        let index = *self.inner.support_cards.get(card_id)?;
        self.inner.catalog.support_cards.get(index)
    }

    /// Resolve a story's parent card through its discriminant. `None` for a
    /// dangling reference.
    pub fn parent_card(&self, story: &Story) -> Option<CardRef<'_>> {
        match story {
            Story::Produce(story) => self.produce_card(&story.produce_card_id).map(CardRef::Produce),
            Story::Support(story) => self.support_card(&story.support_card_id).map(CardRef::Support),
        }
    }

    /// The idol a card is primarily about.
    pub fn primary_idol(&self, card: &CardRef<'_>) -> Option<&Idol> {
        self.idol(card.primary_idol_id())
    }
}

impl StoryRepository for CatalogRepository {
    fn all_produce_card_stories(&self) -> Vec<ProduceCardStory> {
        self.inner.catalog.produce_card_stories.clone()
    }

    fn all_support_card_stories(&self) -> Vec<SupportCardStory> {
        self.inner.catalog.support_card_stories.clone()
    }

    fn all_stories(&self) -> Vec<Story> {
        let catalog = &self.inner.catalog;
        let mut stories = Vec::with_capacity(catalog.story_total());
        stories.extend(catalog.produce_card_stories.iter().cloned().map(Story::Produce));
        stories.extend(catalog.support_card_stories.iter().cloned().map(Story::Support));
        stories
    }

    fn find_by_id(&self, story_id: &str) -> Option<Story> {
        self.inner.stories.get(story_id).cloned()
    }

    fn find_by_produce_card_id(&self, produce_card_id: &str) -> Vec<ProduceCardStory> {
        let mut stories: Vec<ProduceCardStory> = self
            .inner
            .catalog
            .produce_card_stories
            .iter()
            .filter(|story| story.produce_card_id == produce_card_id)
            .cloned()
            .collect();
        stories.sort_by_key(|story| story.story_index);
        stories
    }

    fn find_by_support_card_id(&self, support_card_id: &str) -> Vec<SupportCardStory> {
        let mut stories: Vec<SupportCardStory> = self
            .inner
            .catalog
            .support_card_stories
            .iter()
            .filter(|story| story.support_card_id == support_card_id)
            .cloned()
            .collect();
        stories.sort_by_key(|story| story.story_index);
        stories
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        index.entry(id.to_string()).or_insert(position);
    }
    index
}
