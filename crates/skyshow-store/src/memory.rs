//! In-memory show repository.
//!
//! Stores [`ShowRecord`] documents keyed by show ID, filed under an owner
//! ID, with created/updated bookkeeping timestamps -- the same document
//! shape a remote document store would hold. The timeline core is agnostic
//! to where shows live; this implementation keeps them in process memory,
//! which is also what tests and single-session hosts want.

use std::collections::BTreeMap;

use chrono::Utc;
use skyshow_timeline::ShowTimeline;
use skyshow_types::{OwnerId, ShowId, ShowRecord};

use crate::error::StoreError;

/// An in-memory collection of saved shows.
#[derive(Debug, Clone, Default)]
pub struct MemoryShowStore {
    /// All saved shows indexed by their identifier.
    shows: BTreeMap<ShowId, ShowRecord>,
}

impl MemoryShowStore {
    /// Create an empty repository.
    pub const fn new() -> Self {
        Self {
            shows: BTreeMap::new(),
        }
    }

    /// Return the number of saved shows.
    pub fn len(&self) -> usize {
        self.shows.len()
    }

    /// Return whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// Save a timeline as a new show document and return its ID.
    ///
    /// The document gets fresh created/updated timestamps and the
    /// timeline's current records.
    pub fn save_show(
        &mut self,
        name: &str,
        owner: OwnerId,
        show: &ShowTimeline,
    ) -> ShowId {
        let id = ShowId::new();
        let now = Utc::now();
        let record = ShowRecord {
            id,
            name: name.to_string(),
            owner,
            fireworks: show.to_records(),
            created_at: now,
            updated_at: now,
        };
        self.shows.insert(id, record);
        tracing::debug!(%id, %owner, "Saved show");
        id
    }

    /// Replace a saved show's fireworks (and optionally its name),
    /// refreshing the updated timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShowNotFound`] for an unknown show ID.
    pub fn update_show(
        &mut self,
        id: ShowId,
        name: Option<&str>,
        show: &ShowTimeline,
    ) -> Result<(), StoreError> {
        let record = self
            .shows
            .get_mut(&id)
            .ok_or(StoreError::ShowNotFound(id))?;
        if let Some(name) = name {
            record.name = name.to_string();
        }
        record.fireworks = show.to_records();
        record.updated_at = Utc::now();
        tracing::debug!(%id, "Updated show");
        Ok(())
    }

    /// Load a saved show document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShowNotFound`] for an unknown show ID.
    pub fn load_show(&self, id: ShowId) -> Result<&ShowRecord, StoreError> {
        self.shows.get(&id).ok_or(StoreError::ShowNotFound(id))
    }

    /// Rebuild a live timeline from a saved show.
    ///
    /// Goes through the timeline's validating record path, so a document
    /// tampered with in storage is rejected rather than trusted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShowNotFound`] or [`StoreError::Timeline`].
    pub fn load_timeline(&self, id: ShowId) -> Result<ShowTimeline, StoreError> {
        let record = self.load_show(id)?;
        let show = ShowTimeline::from_records(record.fireworks.clone())?;
        Ok(show)
    }

    /// All shows filed under an owner, most recently updated first.
    pub fn shows_for_owner(&self, owner: OwnerId) -> Vec<&ShowRecord> {
        let mut records: Vec<&ShowRecord> = self
            .shows
            .values()
            .filter(|record| record.owner == owner)
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records
    }
}
