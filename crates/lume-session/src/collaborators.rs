//! Boundary traits for the platform pieces a session talks to.
//!
//! Media picking and rendering are platform glue. The session only needs a
//! handle to the picked media and somewhere to send the current matrix.

use lume_core::{ColorMatrix, MediaKind, MediaRef};

// ── Media source ─────────────────────────────────────────────────

/// Outcome of asking the user for media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPick {
    /// The user picked something.
    Selected(MediaRef),
    /// The user cancelled the picker.
    Declined,
}

/// Errors from a media source.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media library permission denied")]
    PermissionDenied,

    #[error("media source unavailable: {0}")]
    Unavailable(String),
}

/// Picks the source media for a new session.
pub trait MediaSource {
    /// Ask for one photo or video. May block on user interaction.
    fn pick(&mut self, kind: MediaKind) -> Result<MediaPick, MediaError>;
}

// ── Rendering surface ────────────────────────────────────────────

/// Errors from a rendering surface.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render backend error: {0}")]
    Backend(String),
}

/// Displays a source with a color matrix applied.
///
/// Given [`ColorMatrix::IDENTITY`] the output must match the unfiltered
/// source. Clamping to the displayable range is the surface's job.
pub trait RenderSurface {
    fn present(&mut self, source: &MediaRef, matrix: &ColorMatrix) -> Result<(), RenderError>;
}

/// Replays a fixed pick result. Handy for tests and scripted sessions.
#[derive(Debug, Clone)]
pub struct FixedMediaSource(pub Option<MediaRef>);

impl MediaSource for FixedMediaSource {
    fn pick(&mut self, _kind: MediaKind) -> Result<MediaPick, MediaError> {
        Ok(match &self.0 {
            Some(media) => MediaPick::Selected(media.clone()),
            None => MediaPick::Declined,
        })
    }
}

/// Keeps the last presented frame in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub frames: Vec<(MediaRef, ColorMatrix)>,
}

impl RecordingSurface {
    pub fn last(&self) -> Option<&(MediaRef, ColorMatrix)> {
        self.frames.last()
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&mut self, source: &MediaRef, matrix: &ColorMatrix) -> Result<(), RenderError> {
        self.frames.push((source.clone(), *matrix));
        Ok(())
    }
}
