//! The fixed preset ("filter") catalog.
//!
//! Preset bases are authored data on a preset-local scale: brightness and
//! contrast/saturation deltas around `0.0`, roughly `-1..=1`. Intensity blends
//! a base linearly toward the identity via [`scale_preset`].

use serde::Serialize;

use crate::adjustments::AdjustmentVector;

/// Id of the identity preset. It is also the default selection.
pub const IDENTITY_PRESET_ID: &str = "none";

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    /// Stable key, used in persisted edits.
    pub id: &'static str,
    /// Display name for the preset strip.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Full-strength adjustments.
    pub base: AdjustmentVector,
}

impl Preset {
    /// True for the single preset whose base is all zeros.
    pub fn is_identity(&self) -> bool {
        self.id == IDENTITY_PRESET_ID
    }

    /// Base adjustments at `intensity` (0–100).
    pub fn at_intensity(&self, intensity: f32) -> AdjustmentVector {
        scale_preset(&self.base, intensity)
    }
}

static PRESETS: [Preset; 7] = [
    Preset {
        id: IDENTITY_PRESET_ID,
        name: "Original",
        description: "No filter",
        base: AdjustmentVector::ZERO,
    },
    Preset {
        id: "warm-glow",
        name: "Warm Glow",
        description: "Soft, golden warmth",
        base: AdjustmentVector::tone(0.15, -0.1, 0.4).with_hue(15.0),
    },
    Preset {
        id: "dreamy",
        name: "Dreamy",
        description: "Ethereal and soft",
        base: AdjustmentVector::tone(0.2, -0.25, -0.35),
    },
    Preset {
        id: "natural",
        name: "Natural",
        description: "Clean and balanced",
        base: AdjustmentVector::tone(0.05, 0.15, 0.2),
    },
    Preset {
        id: "retro",
        name: "Retro",
        description: "Vintage analog feel",
        base: AdjustmentVector::tone(-0.05, 0.3, -0.3).with_sepia(0.3),
    },
    Preset {
        id: "cinematic",
        name: "Cinematic",
        description: "Film-like depth",
        base: AdjustmentVector::tone(-0.15, 0.4, 0.25),
    },
    Preset {
        id: "monochrome",
        name: "Mono",
        description: "Black & white",
        base: AdjustmentVector::tone(0.05, 0.35, -1.0).with_grayscale(1.0),
    },
];

/// The catalog in display order.
pub fn list_presets() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by id.
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// The default "Original" preset.
pub fn identity_preset() -> &'static Preset {
    &PRESETS[0]
}

/// Scale a preset base by `intensity / 100`.
///
/// ```text
/// out.field = base.field × intensity / 100
/// ```
///
/// `intensity = 0` returns the zero vector, `intensity = 100` returns `base`.
pub fn scale_preset(base: &AdjustmentVector, intensity: f32) -> AdjustmentVector {
    base.scaled(intensity)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_exactly_one_identity_preset() {
        let identities: Vec<_> = list_presets()
            .iter()
            .filter(|p| p.base.is_identity())
            .collect();
        assert_eq!(identities.len(), 1);
        assert_eq!(identities[0].id, IDENTITY_PRESET_ID);
        assert!(identity_preset().is_identity());
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = list_presets().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), list_presets().len());
    }

    #[test]
    fn test_catalog_is_restartable() {
        let first: Vec<_> = list_presets().iter().map(|p| p.id).collect();
        let second: Vec<_> = list_presets().iter().map(|p| p.id).collect();
        assert_eq!(first, second);
        assert_eq!(first[0], "none");
        assert_eq!(first[1], "warm-glow");
    }

    #[test]
    fn test_find_preset() {
        let mono = find_preset("monochrome").expect("mono preset");
        assert_eq!(mono.name, "Mono");
        assert_eq!(mono.base.saturation, -1.0);
        assert_eq!(mono.base.grayscale, Some(1.0));
        assert!(find_preset("sepia-dream").is_none());
    }

    #[test]
    fn test_presets_do_not_drive_warmth_or_tone_offsets() {
        for preset in list_presets() {
            assert_eq!(preset.base.warmth, 0.0, "{}", preset.id);
            assert_eq!(preset.base.highlights, 0.0, "{}", preset.id);
            assert_eq!(preset.base.shadows, 0.0, "{}", preset.id);
        }
    }

    #[test]
    fn test_scale_preset_endpoints() {
        let warm = find_preset("warm-glow").unwrap();
        assert_eq!(scale_preset(&warm.base, 100.0), warm.base);
        assert!(scale_preset(&warm.base, 0.0).is_identity());
        let half = warm.at_intensity(50.0);
        assert!((half.brightness - 0.075).abs() < 1e-6);
        assert!((half.hue.unwrap() - 7.5).abs() < 1e-6);
    }
}
