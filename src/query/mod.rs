//! Query - Filtering and sorting the story list.
//!
//! [`compute_filtered_stories`] is the whole pipeline as a pure function;
//! [`StoryQueryEngine`] keeps a filter between calls and feeds it the live
//! ownership and read-status state.
//!
//! ## Example
//!
//! ```ignore
//! use story_tracker::{CardType, Rarity, SortKey, StoryFilter};
//!
//! engine.set_filter(StoryFilter::new().card_type(CardType::Support));
//! engine.set_filter(StoryFilter::new().rarity(Rarity::SSR).sort_by(SortKey::Name));
//! let stories = engine.filtered_stories();
//! ```

mod compare;
mod engine;
mod filter;
mod pipeline;

pub use compare::{contains_folded, locale_compare};
pub use engine::StoryQueryEngine;
pub use filter::{RaritySelection, SortKey, SortOrder, StoryFilter};
pub use pipeline::compute_filtered_stories;
