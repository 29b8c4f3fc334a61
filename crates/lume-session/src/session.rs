//! One editing session: media in, parameter changes, commit or discard.
//!
//! The session owns its [`EditState`] exclusively. Frontends send
//! [`EditCommand`]s; the session mutates state, and every render recomputes
//! the matrix from the full parameter set.

use serde::{Deserialize, Serialize};

use lume_core::{
    ColorMatrix, EditMode, EditState, MediaKind, MediaRef, SavedEdit, find_preset,
};
use lume_store::{KeyValueStore, SavedEditRepository, StoreError};

use crate::collaborators::{MediaError, MediaPick, MediaSource, RenderError, RenderSurface};

/// Errors that end or block a session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no media selected")]
    Declined,

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("failed to render preview: {0}")]
    Render(#[from] RenderError),

    #[error("failed to save edit: {0}")]
    Store(#[from] StoreError),
}

/// Parameter changes a frontend can request.
///
/// Tagged like the other JSON messages so a UI can send them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EditCommand {
    /// Switch the active tool.
    SetActiveMode { mode: EditMode },

    /// Select a preset by id. Intensity and manual values are kept.
    SelectPreset { id: String },

    /// Move one tool's slider.
    SetValue { mode: EditMode, value: f32 },

    /// Move the active tool's slider.
    SetActiveValue { value: f32 },

    /// Zero the manual sliders.
    ResetManual,

    /// Back to the "Original" preset.
    ClearPreset,

    /// Everything back to defaults.
    Reset,
}

/// A live editing session over one piece of source media.
#[derive(Debug)]
pub struct EditSession {
    source: MediaRef,
    media_kind: MediaKind,
    state: EditState,
    active_mode: EditMode,
    dirty: bool,
}

impl EditSession {
    /// Ask `media` for a source and start a session with default parameters.
    ///
    /// A declined pick or an unavailable source aborts: no state is created.
    pub fn begin(media: &mut impl MediaSource, kind: MediaKind) -> Result<Self, SessionError> {
        match media.pick(kind) {
            Ok(MediaPick::Selected(source)) => {
                tracing::info!("editing {kind} {source}");
                Ok(Self::with_source(source, kind))
            }
            Ok(MediaPick::Declined) => {
                tracing::info!("{kind} pick declined, closing editor");
                Err(SessionError::Declined)
            }
            Err(e) => {
                tracing::warn!("{kind} source unavailable: {e}");
                Err(e.into())
            }
        }
    }

    /// Start a session on an already-known source.
    pub fn with_source(source: MediaRef, media_kind: MediaKind) -> Self {
        Self {
            source,
            media_kind,
            state: EditState::default(),
            active_mode: EditMode::default(),
            dirty: true,
        }
    }

    pub fn source(&self) -> &MediaRef {
        &self.source
    }

    pub fn media_kind(&self) -> MediaKind {
        self.media_kind
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Direct access to the parameters. Marks the session dirty.
    pub fn state_mut(&mut self) -> &mut EditState {
        self.dirty = true;
        &mut self.state
    }

    pub fn active_mode(&self) -> EditMode {
        self.active_mode
    }

    /// Whether parameters changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The active tool's slider value formatted for display.
    pub fn active_value_label(&self) -> String {
        self.active_mode
            .format_value(self.state.value(self.active_mode))
    }

    /// Apply one command. Returns whether the parameters changed.
    pub fn apply(&mut self, command: EditCommand) -> Result<bool, SessionError> {
        let before = self.state.clone();
        match command {
            EditCommand::SetActiveMode { mode } => {
                self.active_mode = mode;
            }
            EditCommand::SelectPreset { id } => {
                let preset =
                    find_preset(&id).ok_or_else(|| SessionError::UnknownPreset(id.clone()))?;
                self.state.select_preset(preset);
            }
            EditCommand::SetValue { mode, value } => {
                self.state.set_value(mode, value);
            }
            EditCommand::SetActiveValue { value } => {
                self.state.set_value(self.active_mode, value);
            }
            EditCommand::ResetManual => self.state.reset_manual(),
            EditCommand::ClearPreset => self.state.clear_preset(),
            EditCommand::Reset => self.state.reset(),
        }

        let changed = self.state != before;
        if changed {
            self.dirty = true;
            tracing::debug!("edit state changed, dirty={}", self.dirty);
        }
        Ok(changed)
    }

    /// Select a preset by id.
    pub fn select_preset(&mut self, id: &str) -> Result<(), SessionError> {
        self.apply(EditCommand::SelectPreset { id: id.to_string() })
            .map(|_| ())
    }

    /// Move one tool's slider. Values are clamped to the tool's range.
    pub fn adjust(&mut self, mode: EditMode, value: f32) {
        if self.state.value(mode) != mode.range().clamp(value) {
            self.state.set_value(mode, value);
            self.dirty = true;
        }
    }

    pub fn set_active_mode(&mut self, mode: EditMode) {
        self.active_mode = mode;
    }

    /// The matrix for the current parameters.
    pub fn color_matrix(&self) -> ColorMatrix {
        self.state.color_matrix()
    }

    /// Recompute the matrix and hand it to `surface`.
    pub fn render(&mut self, surface: &mut impl RenderSurface) -> Result<ColorMatrix, SessionError> {
        let matrix = self.state.color_matrix();
        surface.present(&self.source, &matrix)?;
        self.dirty = false;
        Ok(matrix)
    }

    /// Persist the current parameter set.
    ///
    /// On failure the session is left untouched so the user can retry.
    pub fn commit<S: KeyValueStore>(
        &self,
        repo: &SavedEditRepository<S>,
    ) -> Result<SavedEdit, SessionError> {
        let edit = self.state.snapshot(self.source.clone(), self.media_kind);
        repo.commit(edit).map_err(|e| {
            tracing::error!("commit failed: {e}");
            SessionError::Store(e)
        })
    }

    /// Close the session without saving.
    pub fn discard(self) {
        tracing::debug!("discarding session for {}", self.source);
    }
}

#[cfg(test)]
mod tests {
    use lume_store::MemoryStore;

    use super::*;
    use crate::collaborators::{FixedMediaSource, RecordingSurface};

    struct DeniedSource;

    impl MediaSource for DeniedSource {
        fn pick(&mut self, _kind: MediaKind) -> Result<MediaPick, MediaError> {
            Err(MediaError::PermissionDenied)
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }
    }

    fn session() -> EditSession {
        EditSession::with_source(MediaRef::new("file:///photo.jpg"), MediaKind::Photo)
    }

    #[test]
    fn test_begin_with_selected_media() {
        let mut media = FixedMediaSource(Some(MediaRef::new("file:///clip.mov")));
        let session = EditSession::begin(&mut media, MediaKind::Video).unwrap();
        assert_eq!(session.source().as_str(), "file:///clip.mov");
        assert_eq!(session.media_kind(), MediaKind::Video);
        assert_eq!(session.state(), &EditState::default());
        assert_eq!(session.active_mode(), EditMode::Filters);
    }

    #[test]
    fn test_declined_pick_aborts() {
        let mut media = FixedMediaSource(None);
        assert!(matches!(
            EditSession::begin(&mut media, MediaKind::Photo),
            Err(SessionError::Declined)
        ));
    }

    #[test]
    fn test_denied_permission_aborts() {
        assert!(matches!(
            EditSession::begin(&mut DeniedSource, MediaKind::Photo),
            Err(SessionError::Media(MediaError::PermissionDenied))
        ));
    }

    #[test]
    fn test_apply_reports_changes() {
        let mut s = session();
        assert!(s.apply(EditCommand::SelectPreset { id: "retro".into() }).unwrap());
        assert!(!s.apply(EditCommand::SelectPreset { id: "retro".into() }).unwrap());
        assert!(!s.apply(EditCommand::SetActiveMode { mode: EditMode::Warmth }).unwrap());
        assert!(s.apply(EditCommand::SetActiveValue { value: 40.0 }).unwrap());
        assert_eq!(s.state().manual().warmth, 40.0);
        assert_eq!(s.active_value_label(), "+40");
    }

    #[test]
    fn test_unknown_preset_leaves_state() {
        let mut s = session();
        s.select_preset("dreamy").unwrap();
        assert!(matches!(
            s.select_preset("vaporwave"),
            Err(SessionError::UnknownPreset(_))
        ));
        assert_eq!(s.state().preset().id, "dreamy");
    }

    #[test]
    fn test_render_presents_current_matrix() {
        let mut s = session();
        let mut surface = RecordingSurface::default();
        assert_eq!(s.render(&mut surface).unwrap(), ColorMatrix::IDENTITY);
        assert!(!s.is_dirty());

        s.adjust(EditMode::Brightness, 20.0);
        assert!(s.is_dirty());
        let m = s.render(&mut surface).unwrap();
        let (source, presented) = surface.last().unwrap();
        assert_eq!(source, s.source());
        assert_eq!(*presented, m);
        assert!((m.row(0)[4] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_state_mut_changes_reach_next_render() {
        let mut s = session();
        let mut surface = RecordingSurface::default();
        s.render(&mut surface).unwrap();
        assert!(!s.is_dirty());

        s.state_mut().set_value(EditMode::Brightness, 30.0);
        assert!(s.is_dirty());
        let m = s.render(&mut surface).unwrap();
        assert!((surface.last().unwrap().1.row(2)[4] - 0.3).abs() < 1e-6);
        assert_eq!(m, s.color_matrix());
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_adjust_to_same_value_stays_clean() {
        let mut s = session();
        s.render(&mut RecordingSurface::default()).unwrap();
        s.adjust(EditMode::Contrast, 0.0);
        s.adjust(EditMode::Contrast, -250.0);
        assert!(s.is_dirty());
        s.render(&mut RecordingSurface::default()).unwrap();
        s.adjust(EditMode::Contrast, -100.0);
        assert!(!s.is_dirty());
    }

    #[test]
    fn test_commit_persists_parameters() {
        let repo = SavedEditRepository::new(MemoryStore::new());
        let mut s = session();
        s.select_preset("natural").unwrap();
        s.adjust(EditMode::Filters, 60.0);
        s.adjust(EditMode::Shadows, -25.0);

        let saved = s.commit(&repo).unwrap();
        assert_eq!(saved.preset_id, "natural");
        assert_eq!(saved.intensity, 60.0);
        assert_eq!(saved.manual.shadows, -25.0);
        assert_eq!(saved.source_media_reference.as_str(), "file:///photo.jpg");
        assert_eq!(repo.load(), vec![saved]);
    }

    #[test]
    fn test_failed_commit_keeps_state() {
        let repo = SavedEditRepository::new(BrokenStore);
        let mut s = session();
        s.adjust(EditMode::Saturation, 35.0);
        let before = s.state().clone();

        assert!(matches!(s.commit(&repo), Err(SessionError::Store(_))));
        assert_eq!(s.state(), &before);

        // Retry against a working store succeeds with the same parameters.
        let retry = SavedEditRepository::new(MemoryStore::new());
        assert_eq!(s.commit(&retry).unwrap().manual.saturation, 35.0);
    }

    #[test]
    fn test_command_json_shape() {
        let cmd: EditCommand =
            serde_json::from_str(r#"{"type":"SetValue","data":{"mode":"warmth","value":-30}}"#)
                .unwrap();
        assert_eq!(
            cmd,
            EditCommand::SetValue {
                mode: EditMode::Warmth,
                value: -30.0
            }
        );
        let reset = serde_json::to_string(&EditCommand::Reset).unwrap();
        assert_eq!(reset, r#"{"type":"Reset"}"#);
    }
}
