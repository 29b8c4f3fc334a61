//! Rendering surfaces for the command line.
//!
//! The SVG surface wraps the source in an `feColorMatrix` filter, which takes
//! the 20 coefficients in the same row-major order as [`ColorMatrix`].

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use lume_core::{ColorMatrix, MediaRef};
use lume_session::{RenderError, RenderSurface};

/// Preview canvas size in user units.
const CANVAS_SIZE: u32 = 1024;

/// Writes an SVG file that displays the source through the matrix.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    path: PathBuf,
}

impl SvgSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RenderSurface for SvgSurface {
    fn present(&mut self, source: &MediaRef, matrix: &ColorMatrix) -> Result<(), RenderError> {
        fs::write(&self.path, render_svg(source, matrix))?;
        tracing::info!("wrote preview to {}", self.path.display());
        Ok(())
    }
}

/// Prints the matrix rows to a writer instead of rendering pixels.
#[derive(Debug)]
pub struct MatrixPrinter<W> {
    out: W,
}

impl<W: Write> MatrixPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSurface for MatrixPrinter<W> {
    fn present(&mut self, source: &MediaRef, matrix: &ColorMatrix) -> Result<(), RenderError> {
        writeln!(self.out, "{source}")?;
        write_rows(&mut self.out, matrix)?;
        Ok(())
    }
}

/// One matrix row per line, fixed precision.
pub fn write_rows(out: &mut impl Write, matrix: &ColorMatrix) -> std::io::Result<()> {
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>9.5}")).collect();
        writeln!(out, "[{}]", cells.join(" "))?;
    }
    Ok(())
}

/// SVG document showing `source` through `matrix`.
pub fn render_svg(source: &MediaRef, matrix: &ColorMatrix) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">
  <filter id="lume" color-interpolation-filters="sRGB">
    <feColorMatrix type="matrix" values="{matrix}"/>
  </filter>
  <image href="{href}" width="{size}" height="{size}" preserveAspectRatio="xMidYMid meet" filter="url(#lume)"/>
</svg>
"#,
        size = CANVAS_SIZE,
        href = escape_attr(source.as_str()),
    )
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use lume_core::{EditState, find_preset};

    use super::*;

    #[test]
    fn test_svg_embeds_matrix_values() {
        let mut state = EditState::new();
        state.select_preset(find_preset("cinematic").unwrap());
        let matrix = state.color_matrix();
        let svg = render_svg(&MediaRef::new("file:///a.jpg"), &matrix);
        assert!(svg.contains(&format!(r#"values="{matrix}""#)));
        assert!(svg.contains(r#"href="file:///a.jpg""#));
        assert!(svg.contains(r#"filter="url(#lume)""#));
    }

    #[test]
    fn test_href_is_escaped() {
        let svg = render_svg(
            &MediaRef::new(r#"file:///tom & "jerry".png"#),
            &ColorMatrix::IDENTITY,
        );
        assert!(svg.contains("file:///tom &amp; &quot;jerry&quot;.png"));
    }

    #[test]
    fn test_printer_writes_four_rows() {
        let mut printer = MatrixPrinter::new(Vec::new());
        printer
            .present(&MediaRef::new("file:///a.jpg"), &ColorMatrix::IDENTITY)
            .unwrap();
        let text = String::from_utf8(printer.into_inner()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "file:///a.jpg");
        assert!(lines[4].starts_with('['));
    }

    #[test]
    fn test_svg_surface_writes_file() {
        let path = std::env::temp_dir().join(format!("lume-preview-{}.svg", std::process::id()));
        let mut surface = SvgSurface::new(&path);
        surface
            .present(&MediaRef::new("file:///a.jpg"), &ColorMatrix::IDENTITY)
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
        fs::remove_file(&path).unwrap();
    }
}
