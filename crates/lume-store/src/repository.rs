//! The saved-edit collection, most recent first.
//!
//! All edits live under one key as a JSON array. New edits are prepended;
//! deletes remove a single entry and keep the rest in order.

use chrono::{SubsecRound, Utc};
use lume_core::{NewSavedEdit, SavedEdit};

use crate::error::StoreError;
use crate::id::IdGenerator;
use crate::kv::KeyValueStore;

/// Key under which all saved edits are stored.
pub const SAVED_EDITS_KEY: &str = "lume_saved_edits";

/// Load, commit and delete saved edits over any [`KeyValueStore`].
#[derive(Debug)]
pub struct SavedEditRepository<S> {
    store: S,
    key: String,
    ids: IdGenerator,
}

impl<S: KeyValueStore> SavedEditRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, SAVED_EDITS_KEY)
    }

    /// Use a non-default key, e.g. for isolated test collections.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            ids: IdGenerator::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all edits, treating unreadable or malformed data as empty.
    ///
    /// Use [`Self::try_load`] to surface the failure instead.
    pub fn load(&self) -> Vec<SavedEdit> {
        match self.try_load() {
            Ok(edits) => edits,
            Err(e) => {
                tracing::warn!("failed to load saved edits, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Load all edits. A missing key is an empty list.
    pub fn try_load(&self) -> Result<Vec<SavedEdit>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let edits: Vec<SavedEdit> = serde_json::from_str(&raw)?;
        for edit in &edits {
            self.ids.observe(&edit.id);
        }
        Ok(edits)
    }

    /// Replace the whole collection.
    pub fn save_all(&self, edits: &[SavedEdit]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(edits)?;
        self.store.set(&self.key, &raw)
    }

    /// Assign an id and timestamp, prepend, and persist.
    ///
    /// Existing data that cannot be parsed fails the commit rather than being
    /// overwritten.
    pub fn commit(&self, edit: NewSavedEdit) -> Result<SavedEdit, StoreError> {
        let mut edits = self.try_load()?;
        // Stored timestamps carry millisecond precision only.
        let now = Utc::now().trunc_subsecs(3);
        let id = self.ids.next(now).ok_or(StoreError::IdsExhausted)?;
        let saved = edit.into_saved(id, now);
        edits.insert(0, saved.clone());
        self.save_all(&edits)?;
        tracing::info!(
            id = %saved.id,
            preset = %saved.preset_id,
            kind = %saved.media_kind,
            "saved edit committed"
        );
        Ok(saved)
    }

    /// Remove the edit with `id`. Returns `None` (and writes nothing) if it
    /// does not exist.
    pub fn delete(&self, id: &str) -> Result<Option<SavedEdit>, StoreError> {
        let mut edits = self.try_load()?;
        let Some(index) = edits.iter().position(|e| e.id == id) else {
            tracing::debug!("delete: no saved edit with id {id}");
            return Ok(None);
        };
        let removed = edits.remove(index);
        self.save_all(&edits)?;
        tracing::info!(id = %removed.id, "saved edit deleted");
        Ok(Some(removed))
    }

    /// Look up a single edit.
    pub fn get(&self, id: &str) -> Result<Option<SavedEdit>, StoreError> {
        Ok(self.try_load()?.into_iter().find(|e| e.id == id))
    }
}
