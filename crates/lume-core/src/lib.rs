//! Lume Core: domain layer for live color adjustment.
//!
//! This crate contains the preset catalog, the adjustment model, and the
//! composer that folds them into a single 4×5 color matrix. No I/O, GPU or
//! framework dependencies.

pub mod adjustments;
pub mod compose;
pub mod edit_mode;
pub mod edit_state;
pub mod matrix;
pub mod preset;
pub mod saved_edit;

// Re-exports for convenience.
pub use adjustments::AdjustmentVector;
pub use compose::{ToneTerms, compose_matrix, preset_preview_matrix};
pub use edit_mode::{EditMode, SliderRange};
pub use edit_state::EditState;
pub use matrix::ColorMatrix;
pub use preset::{Preset, find_preset, identity_preset, list_presets, scale_preset};
pub use saved_edit::{MediaKind, MediaRef, NewSavedEdit, SavedEdit};
