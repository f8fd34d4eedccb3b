use serde::{Deserialize, Serialize};

use super::{CardType, Rarity};

/// Attributes shared by both card variants.
pub trait IdolCard {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn rarity(&self) -> Rarity;
    fn card_type(&self) -> CardType;
}

/// A card depicting exactly one idol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceCard {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub idol_id: String,
}

impl ProduceCard {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        idol_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            idol_id: idol_id.into(),
        }
    }
}

impl IdolCard for ProduceCard {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn card_type(&self) -> CardType {
        CardType::Produce
    }
}

/// A card with a main idol and zero or more appearing idols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCard {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub main_idol_id: String,
    #[serde(default)]
    pub appearing_idol_ids: Vec<String>,
}

impl SupportCard {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        main_idol_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rarity,
            main_idol_id: main_idol_id.into(),
            appearing_idol_ids: Vec::new(),
        }
    }

    pub fn with_appearing<I, S>(mut self, idol_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.appearing_idol_ids = idol_ids.into_iter().map(Into::into).collect();
        self
    }
}

impl IdolCard for SupportCard {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn card_type(&self) -> CardType {
        CardType::Support
    }
}

/// A resolved parent card of either variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRef<'a> {
    Produce(&'a ProduceCard),
    Support(&'a SupportCard),
}

impl<'a> CardRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            CardRef::Produce(card) => &card.id,
            CardRef::Support(card) => &card.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            CardRef::Produce(card) => &card.name,
            CardRef::Support(card) => &card.name,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            CardRef::Produce(card) => card.rarity,
            CardRef::Support(card) => card.rarity,
        }
    }

    /// The produce card's idol, or the support card's main idol.
    pub fn primary_idol_id(&self) -> &'a str {
        match self {
            CardRef::Produce(card) => &card.idol_id,
            CardRef::Support(card) => &card.main_idol_id,
        }
    }

    /// Whether any of `idol_ids` takes part in this card. For support cards the
    /// main idol and every appearing idol count.
    pub fn features_any_idol(&self, idol_ids: &[String]) -> bool {
        match self {
            CardRef::Produce(card) => idol_ids.contains(&card.idol_id),
            CardRef::Support(card) => {
                idol_ids.contains(&card.main_idol_id)
                    || card
                        .appearing_idol_ids
                        .iter()
                        .any(|id| idol_ids.contains(id))
            }
        }
    }
}
