use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::{CardType, Rarity};

/// One rarity or a list of rarities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RaritySelection {
    One(Rarity),
    Many(Vec<Rarity>),
}

impl RaritySelection {
    pub fn contains(&self, rarity: Rarity) -> bool {
        match self {
            RaritySelection::One(one) => *one == rarity,
            RaritySelection::Many(many) => many.contains(&rarity),
        }
    }
}

impl From<Rarity> for RaritySelection {
    fn from(rarity: Rarity) -> Self {
        RaritySelection::One(rarity)
    }
}

impl From<Vec<Rarity>> for RaritySelection {
    fn from(rarities: Vec<Rarity>) -> Self {
        RaritySelection::Many(rarities)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Parent card name.
    Name,
    /// Parent card rarity, `R < SR < SSR`.
    Rarity,
    /// Primary idol id of the parent card.
    IdolId,
    /// Parent card id.
    CardId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Filter and sort settings for the story list.
///
/// Every field is optional; `None` means "no constraint". Updates are merged
/// field by field with [`StoryFilter::overlay`], so constraints accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<RaritySelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idol_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl StoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    pub fn rarity(mut self, rarity: impl Into<RaritySelection>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn unread_only(mut self, unread_only: bool) -> Self {
        self.unread_only = Some(unread_only);
        self
    }

    pub fn owned_only(mut self, owned_only: bool) -> Self {
        self.owned_only = Some(owned_only);
        self
    }

    pub fn idol_ids<I, S>(mut self, idol_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.idol_ids = Some(idol_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = Some(key);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    /// Merge `update` into this filter. Fields set in `update` replace the
    /// current value; unset fields keep it.
    pub fn overlay(&mut self, update: StoryFilter) {
        overlay_field(&mut self.card_type, update.card_type);
        overlay_field(&mut self.rarity, update.rarity);
        overlay_field(&mut self.unread_only, update.unread_only);
        overlay_field(&mut self.owned_only, update.owned_only);
        overlay_field(&mut self.idol_ids, update.idol_ids);
        overlay_field(&mut self.search_query, update.search_query);
        overlay_field(&mut self.sort_by, update.sort_by);
        overlay_field(&mut self.sort_order, update.sort_order);
    }

    pub fn is_empty(&self) -> bool {
        *self == StoryFilter::default()
    }

    /// The search query trimmed, or `None` if it is blank.
    pub fn normalized_search(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}

fn overlay_field<T>(current: &mut Option<T>, update: Option<T>) {
    if update.is_some() {
        *current = update;
    }
}
