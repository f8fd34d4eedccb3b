//! Catalog - The immutable aggregate of idols, cards, and derived stories.
//!
//! A catalog is assembled once per session from three independently versioned
//! documents (idols, produce cards, support cards). Stories are not part of the
//! documents; they are derived from card rarity during assembly.
//!
//! ## Example
//!
//! ```ignore
//! use story_tracker::{CatalogRepository, DataSourceConfig, ManualDataSource, StoryRepository};
//!
//! let catalog = ManualDataSource::new(DataSourceConfig::default()).fetch_catalog()?;
//! let repository = CatalogRepository::new(catalog);
//! let stories = repository.find_by_support_card_id("support-ssr-1");
//! ```

mod repository;
mod source;
mod validate;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::derivation::{derive_produce_card_stories, derive_support_card_stories};
use crate::domain::{
    Idol, InvalidStory, ProduceCard, ProduceCardStory, Story, SupportCard, SupportCardStory,
};

/// The `idols.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdolsDocument {
    pub version: String,
    pub last_updated: String,
    pub idols: Vec<Idol>,
}

/// The `produceCards.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduceCardsDocument {
    pub version: String,
    pub last_updated: String,
    pub produce_cards: Vec<ProduceCard>,
}

/// The `supportCards.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCardsDocument {
    pub version: String,
    pub last_updated: String,
    pub support_cards: Vec<SupportCard>,
}

/// Idols, cards, and their stories for one session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub version: String,
    pub last_updated: String,
    pub idols: Vec<Idol>,
    pub produce_cards: Vec<ProduceCard>,
    pub support_cards: Vec<SupportCard>,
    pub produce_card_stories: Vec<ProduceCardStory>,
    pub support_card_stories: Vec<SupportCardStory>,
}

impl Catalog {
    /// Build a catalog from entity lists, deriving every card's stories.
    pub fn from_parts(
        version: impl Into<String>,
        last_updated: impl Into<String>,
        idols: Vec<Idol>,
        produce_cards: Vec<ProduceCard>,
        support_cards: Vec<SupportCard>,
    ) -> Self {
        let produce_card_stories = derive_produce_card_stories(&produce_cards);
        let support_card_stories = derive_support_card_stories(&support_cards);

        debug!(
            idols = idols.len(),
            produce_cards = produce_cards.len(),
            support_cards = support_cards.len(),
            produce_card_stories = produce_card_stories.len(),
            support_card_stories = support_card_stories.len(),
            "assembled catalog"
        );

        Self {
            version: version.into(),
            last_updated: last_updated.into(),
            idols,
            produce_cards,
            support_cards,
            produce_card_stories,
            support_card_stories,
        }
    }

    /// Assemble from the three source documents. Provenance comes from the
    /// idols document.
    pub fn assemble(
        idols: IdolsDocument,
        produce_cards: ProduceCardsDocument,
        support_cards: SupportCardsDocument,
    ) -> Self {
        Self::from_parts(
            idols.version,
            idols.last_updated,
            idols.idols,
            produce_cards.produce_cards,
            support_cards.support_cards,
        )
    }

    pub fn story_total(&self) -> usize {
        self.produce_card_stories.len() + self.support_card_stories.len()
    }
}

/// Error type for catalog loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A source document could not be read.
    Io { path: String, message: String },
    /// A source document was not valid JSON for its schema.
    Parse { document: String, message: String },
    /// A story carried neither a produce nor a support card id.
    InvalidStory { id: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, message } => {
                write!(f, "failed to read {}: {}", path, message)
            }
            CatalogError::Parse { document, message } => {
                write!(f, "failed to parse {}: {}", document, message)
            }
            CatalogError::InvalidStory { id } => {
                write!(f, "invalid story type: story.id={}", id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<InvalidStory> for CatalogError {
    fn from(err: InvalidStory) -> Self {
        CatalogError::InvalidStory { id: err.id }
    }
}

/// Decode a mixed list of stories, classifying each by its parent id field.
///
/// Fails on the first entry that is neither a produce nor a support story.
pub fn decode_stories(json: &str) -> Result<Vec<Story>, CatalogError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            document: "stories".into(),
            message: e.to_string(),
        })?;

    entries
        .into_iter()
        .map(|entry| {
            let id = entry
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            serde_json::from_value::<Story>(entry).map_err(|_| CatalogError::InvalidStory { id })
        })
        .collect()
}

pub use repository::{CatalogRepository, StoryRepository};
pub use source::{DataSourceConfig, DatasetKind, ManualDataSource};
pub use validate::{validate_catalog, validate_produce_card, validate_support_card, ValidationResult};
