pub mod catalog;
pub mod derivation;
pub mod domain;
pub mod query;
pub mod state;
pub mod storage;

pub use catalog::{
    decode_stories, validate_catalog, validate_produce_card, validate_support_card, Catalog,
    CatalogError, CatalogRepository, DataSourceConfig, DatasetKind, IdolsDocument,
    ManualDataSource, ProduceCardsDocument, StoryRepository, SupportCardsDocument,
    ValidationResult,
};
pub use derivation::{story_count, story_id};
pub use domain::{
    CardRef, CardType, Idol, IdolCard, InvalidStory, ProduceCard, ProduceCardStory, Rarity, Story,
    SupportCard, SupportCardStory,
};
pub use query::{
    compute_filtered_stories, RaritySelection, SortKey, SortOrder, StoryFilter, StoryQueryEngine,
};
#[cfg(feature = "emitter")]
pub use state::FlagChange;
pub use state::{
    FlagSet, FlagStore, OwnershipStore, ReadStatusStore, OWNERSHIP_KEY, READ_STATUS_KEY,
};
pub use storage::{FileStorage, InMemoryStorage, JsonStorage, Storage, StorageError};
