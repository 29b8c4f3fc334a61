//! Editing session lifecycle for Lume.
//!
//! Ties an [`EditState`](lume_core::EditState) to a picked source and the
//! saved-edit repository, and defines the platform seams a frontend fills in.

pub mod collaborators;
pub mod session;

pub use collaborators::{
    FixedMediaSource, MediaError, MediaPick, MediaSource, RecordingSurface, RenderError,
    RenderSurface,
};
pub use session::{EditCommand, EditSession, SessionError};
