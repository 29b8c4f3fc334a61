//! Media sources for the command line: an explicit path or a native picker.

use std::path::{Path, PathBuf};

use lume_core::{MediaKind, MediaRef};
use lume_session::{MediaError, MediaPick, MediaSource};

const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "heic", "webp", "gif", "bmp", "tif", "tiff"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "mkv"];

/// Guess the media kind from a file extension. Unknown extensions are photos.
pub fn kind_for_path(path: &Path) -> MediaKind {
    let is_video = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|v| v.eq_ignore_ascii_case(ext))
        });
    if is_video {
        MediaKind::Video
    } else {
        MediaKind::Photo
    }
}

/// `file://` reference for an existing local path.
pub fn media_ref_for_path(path: &Path) -> Result<MediaRef, MediaError> {
    let absolute = path
        .canonicalize()
        .map_err(|e| MediaError::Unavailable(format!("{}: {e}", path.display())))?;
    if !absolute.is_file() {
        return Err(MediaError::Unavailable(format!(
            "{} is not a file",
            absolute.display()
        )));
    }
    Ok(MediaRef::new(format!("file://{}", absolute.display())))
}

/// Picks a path given on the command line.
#[derive(Debug, Clone)]
pub struct PathMediaSource {
    path: PathBuf,
}

impl PathMediaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MediaSource for PathMediaSource {
    fn pick(&mut self, _kind: MediaKind) -> Result<MediaPick, MediaError> {
        media_ref_for_path(&self.path).map(MediaPick::Selected)
    }
}

/// Opens the platform file dialog, filtered to the requested media kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogMediaSource;

impl MediaSource for DialogMediaSource {
    fn pick(&mut self, kind: MediaKind) -> Result<MediaPick, MediaError> {
        let (label, extensions) = match kind {
            MediaKind::Photo => ("Photos", PHOTO_EXTENSIONS),
            MediaKind::Video => ("Videos", VIDEO_EXTENSIONS),
        };
        match rfd::FileDialog::new()
            .set_title(format!("Choose a {kind} to edit"))
            .add_filter(label, extensions)
            .pick_file()
        {
            Some(path) => media_ref_for_path(&path).map(MediaPick::Selected),
            None => Ok(MediaPick::Declined),
        }
    }
}
