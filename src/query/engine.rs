//! StoryQueryEngine - The filterable, sortable story view.

use tracing::debug;

use super::filter::StoryFilter;
use super::pipeline::compute_filtered_stories;
use crate::catalog::{CatalogRepository, StoryRepository};
use crate::domain::{ProduceCardStory, Story, SupportCardStory};
use crate::state::{OwnershipStore, ReadStatusStore};
use crate::storage::Storage;

/// Holds the current [`StoryFilter`] and derives the filtered story list from
/// the catalog and the user's ownership and read status.
///
/// Nothing is cached: every call to [`filtered_stories`](Self::filtered_stories)
/// reads the stores afresh, so writes made through any clone of the stores are
/// visible immediately.
pub struct StoryQueryEngine<S> {
    repository: CatalogRepository,
    ownership: OwnershipStore<S>,
    read_status: ReadStatusStore<S>,
    filter: StoryFilter,
}

impl<S: Storage> StoryQueryEngine<S> {
    pub fn new(
        repository: CatalogRepository,
        ownership: OwnershipStore<S>,
        read_status: ReadStatusStore<S>,
    ) -> Self {
        Self {
            repository,
            ownership,
            read_status,
            filter: StoryFilter::default(),
        }
    }

    pub fn filter(&self) -> &StoryFilter {
        &self.filter
    }

    /// Merge `update` into the current filter; see [`StoryFilter::overlay`].
    pub fn set_filter(&mut self, update: StoryFilter) {
        self.filter.overlay(update);
        debug!(filter = ?self.filter, "story filter updated");
    }

    /// Drop every constraint and sort key.
    pub fn clear_filter(&mut self) {
        self.filter = StoryFilter::default();
        debug!("story filter cleared");
    }

    pub fn all_stories(&self) -> Vec<Story> {
        self.repository.all_stories()
    }

    pub fn produce_card_stories(&self) -> Vec<ProduceCardStory> {
        self.repository.all_produce_card_stories()
    }

    pub fn support_card_stories(&self) -> Vec<SupportCardStory> {
        self.repository.all_support_card_stories()
    }

    /// Stories passing the current filter, sorted if a sort key is set.
    pub fn filtered_stories(&self) -> Vec<Story> {
        compute_filtered_stories(
            &self.repository,
            &self.filter,
            &self.ownership.snapshot(),
            &self.read_status.snapshot(),
        )
    }

    pub fn repository(&self) -> &CatalogRepository {
        &self.repository
    }

    pub fn ownership(&self) -> &OwnershipStore<S> {
        &self.ownership
    }

    pub fn read_status(&self) -> &ReadStatusStore<S> {
        &self.read_status
    }
}
