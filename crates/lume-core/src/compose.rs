//! Folds preset and manual adjustments into a single [`ColorMatrix`].
//!
//! Composition is stateless: every call rebuilds the full matrix from the
//! complete parameter set, so it is safe to call on every slider tick.
//!
//! Presets contribute brightness, contrast and saturation only. Warmth,
//! highlights and shadows come from the manual sliders alone.

use crate::adjustments::AdjustmentVector;
use crate::matrix::ColorMatrix;
use crate::preset::Preset;

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Contrast pivots on mid-gray.
pub const CONTRAST_PIVOT: f32 = 0.5;

/// Red/blue gain per unit of warmth (±10% at the slider extremes).
pub const WARMTH_SCALE: f32 = 0.1;

/// Flat offset per unit of highlights or shadows.
pub const TONE_OFFSET_SCALE: f32 = 0.15;

/// Slider units per normalized unit.
const SLIDER_SCALE: f32 = 100.0;

/// Combined per-term totals, before matrix assembly.
///
/// Neutral values: brightness `0`, contrast `1`, saturation `1`, the rest `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneTerms {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub warmth: f32,
    pub highlights: f32,
    pub shadows: f32,
}

impl ToneTerms {
    /// Combine manual slider values (`-100..=100`) with a preset vector that
    /// is already scaled to its intensity.
    ///
    /// ```text
    /// brightness = manual.brightness / 100 + preset.brightness
    /// contrast   = 1 + manual.contrast / 100 + preset.contrast
    /// saturation = 1 + manual.saturation / 100 + preset.saturation
    /// warmth     = manual.warmth / 100
    /// highlights = manual.highlights / 100
    /// shadows    = manual.shadows / 100
    /// ```
    pub fn combine(manual: &AdjustmentVector, preset: &AdjustmentVector) -> Self {
        Self {
            brightness: manual.brightness / SLIDER_SCALE + preset.brightness,
            contrast: 1.0 + manual.contrast / SLIDER_SCALE + preset.contrast,
            saturation: 1.0 + manual.saturation / SLIDER_SCALE + preset.saturation,
            warmth: manual.warmth / SLIDER_SCALE,
            highlights: manual.highlights / SLIDER_SCALE,
            shadows: manual.shadows / SLIDER_SCALE,
        }
    }

    /// Translation that keeps [`CONTRAST_PIVOT`] fixed under contrast scaling.
    pub fn contrast_translate(&self) -> f32 {
        CONTRAST_PIVOT * (1.0 - self.contrast)
    }

    /// Red and blue gains from warmth.
    pub fn warmth_gains(&self) -> (f32, f32) {
        let adjust = self.warmth * WARMTH_SCALE;
        (1.0 + adjust, 1.0 - adjust)
    }

    /// The single offset added to the R, G and B rows.
    ///
    /// Highlights and shadows are flat offsets here, not luminance-masked.
    pub fn offset(&self) -> f32 {
        let highlight_adjust = self.highlights * TONE_OFFSET_SCALE;
        let shadow_adjust = self.shadows * TONE_OFFSET_SCALE;
        self.brightness + highlight_adjust + shadow_adjust + self.contrast_translate()
    }

    /// Assemble the 4×5 matrix.
    ///
    /// ```text
    /// s_c = (1 − saturation) × luma_c        for c in R, G, B
    ///
    /// R' = [(s_r + sat)·k·w_r, s_r·k,         s_r·k,           0, off]
    /// G' = [s_g·k,             (s_g + sat)·k, s_g·k,           0, off]
    /// B' = [s_b·k,             s_b·k,         (s_b + sat)·k·w_b, 0, off]
    /// A' = [0,                 0,             0,               1, 0  ]
    /// ```
    ///
    /// where `k` is contrast, `w_r`/`w_b` the warmth gains and `off` the
    /// combined offset. Each output row's cross-terms use that row's own
    /// luminance weight.
    pub fn to_matrix(&self) -> ColorMatrix {
        let sat = self.saturation;
        let k = self.contrast;
        let [sr, sg, sb] = LUMA_REC709.map(|luma| (1.0 - sat) * luma);
        let (r_warmth, b_warmth) = self.warmth_gains();
        let off = self.offset();

        ColorMatrix::from_rows([
            [(sr + sat) * k * r_warmth, sr * k, sr * k, 0.0, off],
            [sg * k, (sg + sat) * k, sg * k, 0.0, off],
            [sb * k, sb * k, (sb + sat) * k * b_warmth, 0.0, off],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ])
    }
}

/// Compose manual adjustments and an intensity-scaled preset into one matrix.
///
/// Total over all finite inputs; no clamping is applied here.
pub fn compose_matrix(manual: &AdjustmentVector, preset: &AdjustmentVector) -> ColorMatrix {
    ToneTerms::combine(manual, preset).to_matrix()
}

/// The matrix for a preset thumbnail: full intensity, no manual adjustments.
pub fn preset_preview_matrix(preset: &Preset) -> ColorMatrix {
    compose_matrix(&AdjustmentVector::ZERO, &preset.at_intensity(100.0))
}
