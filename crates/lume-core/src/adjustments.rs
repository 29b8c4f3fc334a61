//! The six-scalar adjustment vector shared by presets and manual sliders.
//!
//! Manual values live on the slider scale (`-100..=100`). Preset bases use a
//! preset-local normalized scale (typically `-1..=1`) and may carry the
//! optional `hue`, `sepia` and `grayscale` components.

use serde::{Deserialize, Serialize};

/// Lower bound of every manual slider.
pub const MANUAL_MIN: f32 = -100.0;
/// Upper bound of every manual slider.
pub const MANUAL_MAX: f32 = 100.0;

/// A set of color adjustments. All zeros is the identity (no visual change).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentVector {
    /// Global brightness offset.
    pub brightness: f32,
    /// Contrast around mid-gray.
    pub contrast: f32,
    /// Saturation relative to Rec. 709 luminance.
    pub saturation: f32,
    /// Red/blue balance. Positive warms, negative cools.
    pub warmth: f32,
    /// Highlight lift. Currently a flat offset.
    pub highlights: f32,
    /// Shadow lift. Currently a flat offset.
    pub shadows: f32,

    /// Hue rotation in degrees (preset bases only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<f32>,
    /// Sepia amount (preset bases only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepia: Option<f32>,
    /// Grayscale amount (preset bases only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f32>,
}

impl AdjustmentVector {
    /// The identity vector.
    pub const ZERO: Self = Self::tone(0.0, 0.0, 0.0);

    /// Build a vector with only brightness, contrast and saturation set.
    ///
    /// This is the shape every catalog preset is authored in.
    pub const fn tone(brightness: f32, contrast: f32, saturation: f32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
            warmth: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            hue: None,
            sepia: None,
            grayscale: None,
        }
    }

    /// Attach a hue rotation component.
    pub const fn with_hue(mut self, hue: f32) -> Self {
        self.hue = Some(hue);
        self
    }

    /// Attach a sepia component.
    pub const fn with_sepia(mut self, sepia: f32) -> Self {
        self.sepia = Some(sepia);
        self
    }

    /// Attach a grayscale component.
    pub const fn with_grayscale(mut self, grayscale: f32) -> Self {
        self.grayscale = Some(grayscale);
        self
    }

    /// True when every field is zero or absent.
    pub fn is_identity(&self) -> bool {
        let optional_zero = |v: Option<f32>| v.is_none_or(|v| v == 0.0);
        self.brightness == 0.0
            && self.contrast == 0.0
            && self.saturation == 0.0
            && self.warmth == 0.0
            && self.highlights == 0.0
            && self.shadows == 0.0
            && optional_zero(self.hue)
            && optional_zero(self.sepia)
            && optional_zero(self.grayscale)
    }

    /// Scale every field linearly by `intensity / 100`.
    ///
    /// `intensity = 0` fades to [`AdjustmentVector::ZERO`], `intensity = 100`
    /// returns `self` unchanged. Optional components that are absent or zero
    /// stay absent.
    pub fn scaled(&self, intensity: f32) -> Self {
        let k = intensity / 100.0;
        let scale_optional = |v: Option<f32>| v.filter(|v| *v != 0.0).map(|v| v * k);
        Self {
            brightness: self.brightness * k,
            contrast: self.contrast * k,
            saturation: self.saturation * k,
            warmth: self.warmth * k,
            highlights: self.highlights * k,
            shadows: self.shadows * k,
            hue: scale_optional(self.hue),
            sepia: scale_optional(self.sepia),
            grayscale: scale_optional(self.grayscale),
        }
    }

    /// Clamp the six slider fields into `[MANUAL_MIN, MANUAL_MAX]`.
    ///
    /// NaN collapses to 0 so a bad input never poisons the matrix.
    pub fn clamped_manual(&self) -> Self {
        Self {
            brightness: clamp_manual(self.brightness),
            contrast: clamp_manual(self.contrast),
            saturation: clamp_manual(self.saturation),
            warmth: clamp_manual(self.warmth),
            highlights: clamp_manual(self.highlights),
            shadows: clamp_manual(self.shadows),
            ..*self
        }
    }
}

pub(crate) fn clamp_manual(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(MANUAL_MIN, MANUAL_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn sample() -> AdjustmentVector {
        AdjustmentVector {
            warmth: 0.4,
            highlights: -0.2,
            shadows: 0.1,
            ..AdjustmentVector::tone(0.2, -0.25, -0.35).with_hue(15.0)
        }
    }

    #[test]
    fn test_zero_is_identity() {
        assert!(AdjustmentVector::ZERO.is_identity());
        assert!(AdjustmentVector::default().is_identity());
        assert!(!AdjustmentVector::tone(0.0, 0.1, 0.0).is_identity());
    }

    #[test]
    fn test_scaled_zero_intensity_fades_to_identity() {
        let faded = sample().scaled(0.0);
        assert!(faded.is_identity());
        assert_eq!(faded, AdjustmentVector::ZERO.with_hue(0.0));
    }

    #[test]
    fn test_scaled_full_intensity_is_exact() {
        assert_eq!(sample().scaled(100.0), sample());
    }

    #[test]
    fn test_scaled_is_linear() {
        let base = sample();
        for i in [0.0, 12.5, 33.0, 50.0, 75.0, 99.0] {
            let s = base.scaled(i);
            let k = i / 100.0;
            assert!((s.brightness - base.brightness * k).abs() < EPSILON);
            assert!((s.contrast - base.contrast * k).abs() < EPSILON);
            assert!((s.saturation - base.saturation * k).abs() < EPSILON);
            assert!((s.hue.unwrap_or_default() - 15.0 * k).abs() < EPSILON);
        }
    }

    #[test]
    fn test_scaled_drops_zero_optional_components() {
        let base = AdjustmentVector::tone(0.1, 0.0, 0.0).with_sepia(0.0);
        assert_eq!(base.scaled(50.0).sepia, None);
    }

    #[test]
    fn test_clamped_manual() {
        let v = AdjustmentVector {
            brightness: 250.0,
            contrast: -180.0,
            saturation: f32::NAN,
            ..AdjustmentVector::ZERO
        }
        .clamped_manual();
        assert_eq!(v.brightness, MANUAL_MAX);
        assert_eq!(v.contrast, MANUAL_MIN);
        assert_eq!(v.saturation, 0.0);
    }

    #[test]
    fn test_json_omits_absent_components() {
        let json = serde_json::to_string(&AdjustmentVector::tone(0.5, 0.0, 0.0)).unwrap();
        assert!(!json.contains("hue"));
        assert!(json.contains("\"brightness\":0.5"));

        let parsed: AdjustmentVector =
            serde_json::from_str(r#"{"brightness":0.05,"contrast":0.35,"saturation":-1.0,"warmth":0.0,"highlights":0.0,"shadows":0.0,"grayscale":1.0}"#)
                .unwrap();
        assert_eq!(parsed.grayscale, Some(1.0));
        assert_eq!(parsed.hue, None);
    }
}
