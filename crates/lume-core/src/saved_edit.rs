//! Persisted edit records.
//!
//! A saved edit stores the parameter set, never a baked image. The source
//! media is referenced by an opaque handle and is never modified.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adjustments::AdjustmentVector;

/// Kind of media being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Photo,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => write!(f, "photo"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// Opaque handle to the original media (a URI or path).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// A committed parameter set that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedEdit {
    pub source: MediaRef,
    pub preset_id: String,
    pub intensity: f32,
    pub manual: AdjustmentVector,
    pub media_kind: MediaKind,
}

impl NewSavedEdit {
    /// Stamp with an id and creation time.
    pub fn into_saved(self, id: String, created_at: DateTime<Utc>) -> SavedEdit {
        SavedEdit {
            id,
            source_media_reference: self.source,
            preset_id: self.preset_id,
            intensity: self.intensity,
            manual: self.manual,
            media_kind: self.media_kind,
            created_at,
        }
    }
}

/// An immutable persisted edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEdit {
    /// Unique, time-ordered id.
    pub id: String,
    pub source_media_reference: MediaRef,
    pub preset_id: String,
    /// Preset intensity, 0–100.
    pub intensity: f32,
    /// Manual slider values, -100–100.
    pub manual: AdjustmentVector,
    pub media_kind: MediaKind,
    /// Creation time, stored as Unix milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
