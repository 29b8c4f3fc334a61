//! The mutable parameter set for one editing session.
//!
//! `EditState` is the single source of truth while editing. Every slider or
//! preset change writes here and the color matrix is recomputed from the
//! full state on demand.

use crate::adjustments::AdjustmentVector;
use crate::compose::compose_matrix;
use crate::edit_mode::EditMode;
use crate::matrix::ColorMatrix;
use crate::preset::{Preset, find_preset, identity_preset};
use crate::saved_edit::{MediaKind, MediaRef, NewSavedEdit, SavedEdit};

/// Current preset, intensity and manual adjustments.
///
/// The preset pair and the manual vector are independent: clearing one never
/// resets the other. All writes are clamped to the tool's slider range.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    preset: &'static Preset,
    intensity: f32,
    manual: AdjustmentVector,
}

impl Default for EditState {
    /// The "Original" preset at full intensity with no manual adjustments.
    fn default() -> Self {
        Self {
            preset: identity_preset(),
            intensity: EditMode::Filters.range().default,
            manual: AdjustmentVector::ZERO,
        }
    }
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the parameter set of a saved edit.
    ///
    /// An unknown preset id falls back to the identity preset; values are
    /// clamped like any other write.
    pub fn from_saved(edit: &SavedEdit) -> Self {
        let preset = find_preset(&edit.preset_id).unwrap_or_else(|| {
            tracing::warn!(
                id = %edit.id,
                "saved edit references unknown preset {}, using original",
                edit.preset_id
            );
            identity_preset()
        });
        let mut state = Self {
            preset,
            ..Self::default()
        };
        state.set_intensity(edit.intensity);
        state.set_manual(edit.manual);
        state
    }

    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    /// Preset intensity, 0–100.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Manual slider values, -100–100.
    pub fn manual(&self) -> &AdjustmentVector {
        &self.manual
    }

    /// Select a preset. Intensity and manual values are kept.
    pub fn select_preset(&mut self, preset: &'static Preset) {
        self.preset = preset;
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = EditMode::Filters.range().clamp(intensity);
    }

    /// Replace all manual values at once, clamped to slider range.
    pub fn set_manual(&mut self, manual: AdjustmentVector) {
        self.manual = manual.clamped_manual();
    }

    /// Current slider value for a tool.
    pub fn value(&self, mode: EditMode) -> f32 {
        match mode {
            EditMode::Filters => self.intensity,
            EditMode::Brightness => self.manual.brightness,
            EditMode::Contrast => self.manual.contrast,
            EditMode::Saturation => self.manual.saturation,
            EditMode::Warmth => self.manual.warmth,
            EditMode::Highlights => self.manual.highlights,
            EditMode::Shadows => self.manual.shadows,
        }
    }

    /// Write one tool's slider value, clamped to its range.
    pub fn set_value(&mut self, mode: EditMode, value: f32) {
        let value = mode.range().clamp(value);
        let slot = match mode {
            EditMode::Filters => &mut self.intensity,
            EditMode::Brightness => &mut self.manual.brightness,
            EditMode::Contrast => &mut self.manual.contrast,
            EditMode::Saturation => &mut self.manual.saturation,
            EditMode::Warmth => &mut self.manual.warmth,
            EditMode::Highlights => &mut self.manual.highlights,
            EditMode::Shadows => &mut self.manual.shadows,
        };
        *slot = value;
    }

    /// Zero the manual sliders. The preset and intensity are kept.
    pub fn reset_manual(&mut self) {
        self.manual = AdjustmentVector::ZERO;
    }

    /// Go back to the identity preset. Manual sliders are kept.
    pub fn clear_preset(&mut self) {
        self.preset = identity_preset();
    }

    /// Restore every parameter to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if the state produces no visual change.
    pub fn is_unedited(&self) -> bool {
        self.manual.is_identity() && (self.preset.is_identity() || self.intensity == 0.0)
    }

    /// The selected preset scaled to the current intensity.
    pub fn preset_at_intensity(&self) -> AdjustmentVector {
        self.preset.at_intensity(self.intensity)
    }

    /// Recompute the full color matrix from the current parameters.
    pub fn color_matrix(&self) -> ColorMatrix {
        let matrix = compose_matrix(&self.manual, &self.preset_at_intensity());
        tracing::trace!(
            preset = self.preset.id,
            intensity = self.intensity,
            "color matrix recomputed"
        );
        matrix
    }

    /// Capture the parameter set for persistence.
    pub fn snapshot(&self, source: MediaRef, media_kind: MediaKind) -> NewSavedEdit {
        NewSavedEdit {
            source,
            preset_id: self.preset.id.to_string(),
            intensity: self.intensity,
            manual: self.manual,
            media_kind,
        }
    }
}
