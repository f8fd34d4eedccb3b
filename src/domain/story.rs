use serde::{Deserialize, Serialize};
use std::fmt;

use super::CardType;

/// A story belonging to a produce card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceCardStory {
    pub id: String,
    pub produce_card_id: String,
    pub story_index: u32,
}

/// A story belonging to a support card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCardStory {
    pub id: String,
    pub support_card_id: String,
    pub story_index: u32,
}

/// A story of either variant.
///
/// On the wire a story is untagged: the variant is decided by which parent id
/// field is present. A story carrying neither is rejected while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStory", into = "RawStory")]
pub enum Story {
    Produce(ProduceCardStory),
    Support(SupportCardStory),
}

impl Story {
    pub fn id(&self) -> &str {
        match self {
            Story::Produce(story) => &story.id,
            Story::Support(story) => &story.id,
        }
    }

    /// Id of the parent card, whichever variant it is.
    pub fn card_id(&self) -> &str {
        match self {
            Story::Produce(story) => &story.produce_card_id,
            Story::Support(story) => &story.support_card_id,
        }
    }

    pub fn story_index(&self) -> u32 {
        match self {
            Story::Produce(story) => story.story_index,
            Story::Support(story) => story.story_index,
        }
    }

    pub fn kind(&self) -> CardType {
        match self {
            Story::Produce(_) => CardType::Produce,
            Story::Support(_) => CardType::Support,
        }
    }

    pub fn as_produce(&self) -> Option<&ProduceCardStory> {
        match self {
            Story::Produce(story) => Some(story),
            Story::Support(_) => None,
        }
    }

    pub fn as_support(&self) -> Option<&SupportCardStory> {
        match self {
            Story::Support(story) => Some(story),
            Story::Produce(_) => None,
        }
    }
}

impl From<ProduceCardStory> for Story {
    fn from(story: ProduceCardStory) -> Self {
        Story::Produce(story)
    }
}

impl From<SupportCardStory> for Story {
    fn from(story: SupportCardStory) -> Self {
        Story::Support(story)
    }
}

/// A decoded story that matched neither variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStory {
    pub id: String,
}

impl fmt::Display for InvalidStory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid story type: story.id={}", self.id)
    }
}

impl std::error::Error for InvalidStory {}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStory {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    produce_card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    support_card_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    story_index: Option<u32>,
}

impl TryFrom<RawStory> for Story {
    type Error = InvalidStory;

    fn try_from(raw: RawStory) -> Result<Self, Self::Error> {
        match (raw.produce_card_id, raw.support_card_id, raw.story_index) {
            (Some(produce_card_id), None, Some(story_index)) => {
                Ok(Story::Produce(ProduceCardStory {
                    id: raw.id,
                    produce_card_id,
                    story_index,
                }))
            }
            (None, Some(support_card_id), Some(story_index)) => {
                Ok(Story::Support(SupportCardStory {
                    id: raw.id,
                    support_card_id,
                    story_index,
                }))
            }
            _ => Err(InvalidStory { id: raw.id }),
        }
    }
}

impl From<Story> for RawStory {
    fn from(story: Story) -> Self {
        match story {
            Story::Produce(story) => RawStory {
                id: story.id,
                produce_card_id: Some(story.produce_card_id),
                support_card_id: None,
                story_index: Some(story.story_index),
            },
            Story::Support(story) => RawStory {
                id: story.id,
                produce_card_id: None,
                support_card_id: Some(story.support_card_id),
                story_index: Some(story.story_index),
            },
        }
    }
}
