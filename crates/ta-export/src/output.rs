use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ta_core::frame::CharGrid;

/// Destination d'une grille rendue.
pub trait GridOutput {
    /// Emit one complete grid.
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn emit(&mut self, grid: &CharGrid) -> Result<()>;
}

/// Sortie texte : une ligne par rangée, chaque caractère suivi d'une espace.
///
/// # Example
/// ```
/// use ta_core::frame::CharGrid;
/// use ta_export::output::{ConsoleOutput, GridOutput};
///
/// let grid = CharGrid::from_cells(2, 1, vec!['#', '.']).unwrap();
/// let mut buf = Vec::new();
/// ConsoleOutput::new(&mut buf).emit(&grid).unwrap();
/// assert_eq!(String::from_utf8(buf).unwrap(), "# . \n");
/// ```
pub struct ConsoleOutput<W: Write> {
    out: W,
}

impl<W: Write> ConsoleOutput<W> {
    /// Écrit les grilles dans `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> GridOutput for ConsoleOutput<W> {
    fn emit(&mut self, grid: &CharGrid) -> Result<()> {
        let mut line = String::with_capacity(grid.width() as usize * 2 + 1);
        for row in grid.rows() {
            line.clear();
            for &ch in row {
                line.push(ch);
                line.push(' ');
            }
            line.push('\n');
            self.out.write_all(line.as_bytes())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Page HTML autonome : un bloc `<pre>` dans la police donnée.
pub struct HtmlOutput {
    path: PathBuf,
    font: String,
}

impl HtmlOutput {
    /// Écrit vers `path`, bloc `<pre>` en police `font`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, font: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            font: font.into(),
        }
    }

    /// Fichier de destination.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GridOutput for HtmlOutput {
    fn emit(&mut self, grid: &CharGrid) -> Result<()> {
        std::fs::write(&self.path, render_html(grid, &self.font))
            .with_context(|| format!("Impossible d'écrire {}", self.path.display()))?;
        log::info!(
            "Grille {}×{} écrite dans {}",
            grid.width(),
            grid.height(),
            self.path.display()
        );
        Ok(())
    }
}

/// Build the HTML document for `grid`.
///
/// # Example
/// ```
/// use ta_core::frame::CharGrid;
/// use ta_export::output::render_html;
///
/// let grid = CharGrid::from_cells(2, 1, vec!['<', '&']).unwrap();
/// let html = render_html(&grid, "Courier New");
/// assert!(html.contains("&lt;&amp;"));
/// ```
#[must_use]
pub fn render_html(grid: &CharGrid, font: &str) -> String {
    let mut html = String::with_capacity(grid.cells().len() * 2 + 512);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>ASCII Art</title>\n</head>\n");
    html.push_str("<body style=\"margin: 0; background: #ffffff;\">\n");
    let _ = writeln!(
        html,
        "<pre style=\"font-family: '{}', monospace; font-size: 4px; line-height: 1; \
         letter-spacing: 0.4em; color: #000000;\">",
        escape_html(font)
    );
    for row in grid.rows() {
        for &ch in row {
            push_escaped(&mut html, ch);
        }
        html.push('\n');
    }
    html.push_str("</pre>\n</body>\n</html>\n");
    html
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(ch),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}
