//! Domain - Idols, cards, and the stories derived from them.
//!
//! Cards come in two disjoint variants. A produce card belongs to exactly one
//! idol, a support card has a main idol plus any number of appearing idols.
//! Stories reference their parent card by id and are never authored directly;
//! see [`crate::derivation`].

mod card;
mod story;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use card::{CardRef, IdolCard, ProduceCard, SupportCard};
pub use story::{InvalidStory, ProduceCardStory, Story, SupportCardStory};

/// A named character referenced by cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idol {
    pub id: String,
    pub name: String,
}

impl Idol {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Card rarity. Ordered `R < SR < SSR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    R,
    SR,
    SSR,
}

impl Rarity {
    /// Numeric rank used for sorting: R = 1, SR = 2, SSR = 3.
    pub fn rank(self) -> u8 {
        match self {
            Rarity::R => 1,
            Rarity::SR => 2,
            Rarity::SSR => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::R => "R",
            Rarity::SR => "SR",
            Rarity::SSR => "SSR",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SSR" => Ok(Rarity::SSR),
            "SR" => Ok(Rarity::SR),
            "R" => Ok(Rarity::R),
            other => Err(format!("unknown rarity: {}", other)),
        }
    }
}

/// The two card variants. Also the discriminant of [`Story`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Produce,
    Support,
}

impl CardType {
    /// Prefix used in derived story ids.
    pub fn tag(self) -> &'static str {
        match self {
            CardType::Produce => "ProduceCard",
            CardType::Support => "SupportCard",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Produce => f.write_str("produce"),
            CardType::Support => f.write_str("support"),
        }
    }
}
