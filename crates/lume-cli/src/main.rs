//! `lume`: live color adjustment for photos and videos from the terminal.
//!
//! Pick a source, apply a preset and manual sliders, preview the result as an
//! SVG color-matrix filter, and keep the parameter set in the saved-edit
//! gallery. Source media is never modified.
//!
//! Logging is controlled by the `LUME_LOG` environment variable
//! (`tracing_subscriber::EnvFilter` syntax, default `info`). Saved edits live
//! in `LUME_STORE_DIR`, or the platform data directory.

mod config;
mod media;
mod preview;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use lume_core::{
    ColorMatrix, EditMode, EditState, MediaKind, SavedEdit, find_preset, list_presets,
    preset_preview_matrix,
};
use lume_session::{EditSession, MediaError, SessionError};
use lume_store::{FileStore, SavedEditRepository, StoreError};

use crate::config::AppConfig;
use crate::media::{DialogMediaSource, PathMediaSource, kind_for_path};
use crate::preview::{MatrixPrinter, SvgSurface, render_svg, write_rows};

#[derive(Parser)]
#[command(name = "lume")]
#[command(version, about = "Live color adjustment for photos and videos", long_about = None)]
struct Cli {
    /// Saved-edit directory (overrides LUME_STORE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the preset catalog
    Presets {
        /// Print as JSON, including each preset's thumbnail matrix
        #[arg(long)]
        json: bool,
    },

    /// Print the color matrix for a parameter set
    Matrix {
        #[command(flatten)]
        adjust: AdjustArgs,

        /// Print the feColorMatrix `values` string instead of rows
        #[arg(long)]
        svg_values: bool,
    },

    /// Edit a photo or video and optionally save the result
    Edit {
        /// Source file; opens a file dialog when omitted
        #[arg(value_name = "MEDIA")]
        media: Option<PathBuf>,

        /// Pick a video instead of a photo in the file dialog
        #[arg(long)]
        video: bool,

        #[command(flatten)]
        adjust: AdjustArgs,

        /// Write an SVG preview to this path
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,

        /// Save the edit to the gallery
        #[arg(long)]
        save: bool,
    },

    /// List saved edits, most recent first
    Gallery {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Write one SVG preview per saved edit into this directory
        #[arg(long, value_name = "DIR")]
        svg_dir: Option<PathBuf>,
    },

    /// Delete a saved edit by id
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// Preset and slider flags shared by `matrix` and `edit`.
#[derive(Args, Debug, Default)]
struct AdjustArgs {
    /// Preset id (see `lume presets`)
    #[arg(short, long, value_name = "ID")]
    preset: Option<String>,

    /// Preset intensity, 0 to 100
    #[arg(short, long, value_name = "N")]
    intensity: Option<f32>,

    /// Brightness, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    brightness: Option<f32>,

    /// Contrast, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    contrast: Option<f32>,

    /// Saturation, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    saturation: Option<f32>,

    /// Warmth, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    warmth: Option<f32>,

    /// Highlights, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    highlights: Option<f32>,

    /// Shadows, -100 to 100
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    shadows: Option<f32>,
}

impl AdjustArgs {
    /// Slider values given on the command line, by tool.
    fn values(&self) -> impl Iterator<Item = (EditMode, f32)> {
        [
            (EditMode::Filters, self.intensity),
            (EditMode::Brightness, self.brightness),
            (EditMode::Contrast, self.contrast),
            (EditMode::Saturation, self.saturation),
            (EditMode::Warmth, self.warmth),
            (EditMode::Highlights, self.highlights),
            (EditMode::Shadows, self.shadows),
        ]
        .into_iter()
        .filter_map(|(mode, value)| value.map(|v| (mode, v)))
    }

    /// Build a standalone edit state.
    fn to_state(&self) -> Result<EditState, CliError> {
        let mut state = EditState::new();
        if let Some(id) = &self.preset {
            let preset = find_preset(id).ok_or_else(|| CliError::UnknownPreset(id.clone()))?;
            state.select_preset(preset);
        }
        for (mode, value) in self.values() {
            state.set_value(mode, value);
        }
        Ok(state)
    }

    /// Apply to a live session.
    fn apply_to(&self, session: &mut EditSession) -> Result<(), CliError> {
        if let Some(id) = &self.preset {
            session.select_preset(id)?;
        }
        for (mode, value) in self.values() {
            session.adjust(mode, value);
        }
        Ok(())
    }
}

/// Errors surfaced to the user.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown preset: {0} (see `lume presets`)")]
    UnknownPreset(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn install_tracing(filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = AppConfig::default();
    if let Some(dir) = cli.store_dir.clone() {
        config.store_dir = dir;
    }
    install_tracing(&config.log_filter);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<(), CliError> {
    let repo = SavedEditRepository::new(FileStore::new(&config.store_dir));
    let mut out = io::stdout().lock();

    match command {
        Commands::Presets { json } => list_catalog(&mut out, json),
        Commands::Matrix { adjust, svg_values } => {
            let matrix = adjust.to_state()?.color_matrix();
            if svg_values {
                writeln!(out, "{matrix}")?;
            } else {
                write_rows(&mut out, &matrix)?;
            }
            Ok(())
        }
        Commands::Edit {
            media,
            video,
            adjust,
            svg,
            save,
        } => edit(&mut out, &repo, media.as_deref(), video, &adjust, svg, save),
        Commands::Gallery { json, svg_dir } => gallery(&mut out, &repo, json, svg_dir.as_deref()),
        Commands::Delete { id } => match repo.delete(&id)? {
            Some(removed) => {
                writeln!(out, "deleted {} ({})", removed.id, removed.source_media_reference)?;
                Ok(())
            }
            None => {
                writeln!(out, "no saved edit with id {id}")?;
                Ok(())
            }
        },
    }
}

fn list_catalog(out: &mut impl Write, json: bool) -> Result<(), CliError> {
    if json {
        let entries: Vec<_> = list_presets()
            .iter()
            .map(|p| {
                serde_json::json!({
                    "preset": p,
                    "previewMatrix": preset_preview_matrix(p),
                })
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }
    for preset in list_presets() {
        writeln!(
            out,
            "{:<12} {:<10} {}",
            preset.id, preset.name, preset.description
        )?;
    }
    Ok(())
}

fn edit(
    out: &mut impl Write,
    repo: &SavedEditRepository<FileStore>,
    media: Option<&Path>,
    video: bool,
    adjust: &AdjustArgs,
    svg: Option<PathBuf>,
    save: bool,
) -> Result<(), CliError> {
    let begun = match media {
        Some(path) => EditSession::begin(&mut PathMediaSource::new(path), kind_for_path(path)),
        None => {
            let kind = if video { MediaKind::Video } else { MediaKind::Photo };
            EditSession::begin(&mut DialogMediaSource, kind)
        }
    };
    let mut session = match begun {
        Ok(session) => session,
        Err(SessionError::Declined) => {
            writeln!(out, "no media selected")?;
            return Ok(());
        }
        Err(SessionError::Media(MediaError::PermissionDenied)) => {
            writeln!(out, "media access denied")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    adjust.apply_to(&mut session)?;
    match svg {
        Some(path) => session.render(&mut SvgSurface::new(path))?,
        None => session.render(&mut MatrixPrinter::new(&mut *out))?,
    };

    if save {
        let saved = session.commit(repo)?;
        writeln!(out, "saved edit {}", saved.id)?;
    } else {
        session.discard();
    }
    Ok(())
}

fn gallery(
    out: &mut impl Write,
    repo: &SavedEditRepository<FileStore>,
    json: bool,
    svg_dir: Option<&Path>,
) -> Result<(), CliError> {
    let edits = repo.load();

    if let Some(dir) = svg_dir {
        std::fs::create_dir_all(dir)?;
        let mut written = 0;
        for edit in &edits {
            let Some(path) = preview_path(dir, &edit.id) else {
                tracing::warn!("skipping preview for saved edit with unusable id {:?}", edit.id);
                continue;
            };
            std::fs::write(path, render_svg(&edit.source_media_reference, &saved_matrix(edit)))?;
            written += 1;
        }
        tracing::info!("wrote {written} previews to {}", dir.display());
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&edits)?)?;
        return Ok(());
    }
    if edits.is_empty() {
        writeln!(out, "no saved edits")?;
        return Ok(());
    }
    for edit in &edits {
        writeln!(
            out,
            "{}  {}  {:<5}  {:<10} {:>4}  {}",
            edit.id,
            edit.created_at.format("%Y-%m-%d %H:%M"),
            edit.media_kind,
            edit.preset_id,
            EditMode::Filters.format_value(edit.intensity),
            edit.source_media_reference,
        )?;
    }
    Ok(())
}

/// `<dir>/<id>.svg`, or `None` if the id could escape `dir`.
fn preview_path(dir: &Path, id: &str) -> Option<PathBuf> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    valid.then(|| dir.join(format!("{id}.svg")))
}

fn saved_matrix(edit: &SavedEdit) -> ColorMatrix {
    EditState::from_saved(edit).color_matrix()
}
