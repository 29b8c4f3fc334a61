//! The 4×5 affine color matrix handed to the rendering surface.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Row-major 4×5 color matrix.
///
/// Rows produce R', G', B', A'. Columns weight R, G, B, A and a constant 1
/// (the offset). Channel values are normalized to `[0, 1]`; clamping the
/// result is the rendering surface's job.
///
/// The layout matches SVG `feColorMatrix type="matrix"` and is `Pod`, so it
/// can be uploaded to a uniform buffer as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    pub const ROWS: usize = 4;
    pub const COLS: usize = 5;

    /// Leaves every input unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Assemble from four rows.
    pub fn from_rows(rows: [[f32; 5]; 4]) -> Self {
        let mut out = [0.0; 20];
        for (i, row) in rows.iter().enumerate() {
            out[i * Self::COLS..(i + 1) * Self::COLS].copy_from_slice(row);
        }
        Self(out)
    }

    /// One output row. Panics if `index >= 4`.
    pub fn row(&self, index: usize) -> [f32; 5] {
        let start = index * Self::COLS;
        let mut out = [0.0; 5];
        out.copy_from_slice(&self.0[start..start + Self::COLS]);
        out
    }

    pub fn rows(&self) -> [[f32; 5]; 4] {
        [self.row(0), self.row(1), self.row(2), self.row(3)]
    }

    /// The 20 coefficients, row-major.
    pub fn coefficients(&self) -> &[f32; 20] {
        &self.0
    }

    /// Raw bytes for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Evaluate the affine map on a single RGBA value.
    ///
    /// ```text
    /// out[i] = m[i][0]·r + m[i][1]·g + m[i][2]·b + m[i][3]·a + m[i][4]
    /// ```
    ///
    /// No clamping is applied.
    pub fn apply(&self, rgba: Vec4) -> Vec4 {
        let eval = |i: usize| {
            let [r, g, b, a, offset] = self.row(i);
            Vec4::new(r, g, b, a).dot(rgba) + offset
        };
        Vec4::new(eval(0), eval(1), eval(2), eval(3))
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Space-separated coefficients, the `values` attribute of an SVG
/// `feColorMatrix`.
impl fmt::Display for ColorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
