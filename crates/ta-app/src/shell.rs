//! Shell interactif : commandes `add`, `remove`, `res`, `image`, `output`, `asciiArt`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use thiserror::Error;

use ta_ascii::algorithm::AsciiArtAlgorithm;
use ta_ascii::cache::BrightnessCache;
use ta_ascii::palette::CharacterPalette;
use ta_core::charset::CharSelection;
use ta_core::config::{OutputMode, ShellConfig};
use ta_core::error::CoreError;
use ta_core::frame::{CharGrid, RasterImage};
use ta_core::traits::GlyphRasterizer;
use ta_export::output::{ConsoleOutput, GridOutput, HtmlOutput};

/// Invite affichée avant chaque ligne lue.
pub const PROMPT: &str = ">>> ";

/// Échec d'une commande. Le message est celui montré à l'utilisateur.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellError {
    /// `add` sans sélection valide.
    #[error("Did not add due to incorrect format.")]
    AddFormat,
    /// `remove` sans sélection valide.
    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,
    /// `res up`/`res down` hors des bornes de l'image courante.
    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBoundary,
    /// `res` suivi d'autre chose que `up`/`down`.
    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,
    /// Image absente, illisible ou inutilisable.
    #[error("Did not execute due to problem with image file.")]
    ImageFile,
    /// `asciiArt` avec une résolution plus grande qu'un côté paddé de l'image.
    #[error("Did not execute. Resolution exceeds image size.")]
    ResolutionExceedsImage,
    /// `output` suivi d'autre chose que `console`/`html`.
    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,
    /// `asciiArt` avec une palette vide.
    #[error("Did not execute. Charset is empty.")]
    EmptyCharset,
    /// Mot-clé inconnu.
    #[error("Did not execute due to incorrect command.")]
    InvalidCommand,
}

impl From<CoreError> for ShellError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyPalette => Self::EmptyCharset,
            CoreError::InvalidResolution { .. } => Self::ResolutionExceedsImage,
            CoreError::DegenerateImage { .. } | CoreError::InvalidDimensions { .. } => {
                Self::ImageFile
            }
            // Émis seulement au chargement de la config, jamais par un rendu.
            CoreError::Config(_) => Self::ImageFile,
        }
    }
}

/// Direction of a `res` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionStep {
    /// Double la résolution.
    Up,
    /// Divise la résolution par deux.
    Down,
}

/// Commande utilisateur analysée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Ligne vide : ignorée.
    Empty,
    /// `exit` : quitte la boucle.
    Exit,
    /// `chars` : liste la palette.
    Chars,
    /// `add <sel>`.
    Add(CharSelection),
    /// `remove <sel>`.
    Remove(CharSelection),
    /// `res up` / `res down`.
    Resolution(ResolutionStep),
    /// `image <path>`.
    Image(PathBuf),
    /// `output console` / `output html`.
    Output(OutputMode),
    /// `asciiArt` : rend l'image courante.
    AsciiArt,
}

impl Command {
    /// Parse one input line (without its line terminator).
    ///
    /// The keyword is the first word, matched case-insensitively. The argument
    /// is everything after the single separator that follows the keyword, so
    /// `"add  "` adds a space.
    ///
    /// # Errors
    /// The [`ShellError`] of the command whose argument is malformed, or
    /// [`ShellError::InvalidCommand`] for an unknown keyword.
    ///
    /// # Example
    /// ```
    /// use ta_app::shell::{Command, ResolutionStep, ShellError};
    /// use ta_core::charset::CharSelection;
    ///
    /// assert_eq!(Command::parse("ADD a-c"), Ok(Command::Add(CharSelection::Range('a', 'c'))));
    /// assert_eq!(Command::parse("res up"), Ok(Command::Resolution(ResolutionStep::Up)));
    /// assert_eq!(Command::parse("add"), Err(ShellError::AddFormat));
    /// assert_eq!(Command::parse("draw"), Err(ShellError::InvalidCommand));
    /// ```
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        if line.is_empty() {
            return Ok(Self::Empty);
        }
        let (keyword, arg) = split_keyword(line);

        match keyword.to_ascii_lowercase().as_str() {
            "exit" if arg.is_none() => Ok(Self::Exit),
            "chars" if arg.is_none() => Ok(Self::Chars),
            "asciiart" if arg.is_none() => Ok(Self::AsciiArt),
            "add" => arg
                .and_then(CharSelection::parse)
                .map(Self::Add)
                .ok_or(ShellError::AddFormat),
            "remove" => arg
                .and_then(CharSelection::parse)
                .map(Self::Remove)
                .ok_or(ShellError::RemoveFormat),
            "res" => match arg {
                Some(a) if a.eq_ignore_ascii_case("up") => Ok(Self::Resolution(ResolutionStep::Up)),
                Some(a) if a.eq_ignore_ascii_case("down") => {
                    Ok(Self::Resolution(ResolutionStep::Down))
                }
                _ => Err(ShellError::ResolutionFormat),
            },
            "image" => match arg {
                Some(path) if !path.is_empty() => Ok(Self::Image(PathBuf::from(path))),
                _ => Err(ShellError::ImageFile),
            },
            "output" => match arg {
                Some(a) if a.eq_ignore_ascii_case("console") => Ok(Self::Output(OutputMode::Console)),
                Some(a) if a.eq_ignore_ascii_case("html") => Ok(Self::Output(OutputMode::Html)),
                _ => Err(ShellError::OutputFormat),
            },
            _ => Err(ShellError::InvalidCommand),
        }
    }
}

/// `("add", Some("a-c"))` pour `"add a-c"`. `None` si rien ne suit le mot-clé.
fn split_keyword(line: &str) -> (&str, Option<&str>) {
    match line.find(char::is_whitespace) {
        Some(idx) => {
            let sep_len = line[idx..].chars().next().map_or(1, char::len_utf8);
            (&line[..idx], Some(&line[idx + sep_len..]))
        }
        None => (line, None),
    }
}

/// Suite de la boucle après une commande.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Lire la commande suivante.
    Continue,
    /// Quitter le shell.
    Exit,
}

/// Interactive session state.
///
/// Owns the palette, the current image and resolution, the output mode and a
/// single [`BrightnessCache`] reused by every `asciiArt` run of the session.
pub struct Shell {
    palette: CharacterPalette,
    cache: BrightnessCache,
    algorithm: AsciiArtAlgorithm,
    rasterizer: Box<dyn GlyphRasterizer>,
    resolution: u32,
    image: Option<RasterImage>,
    output: OutputMode,
    html_path: PathBuf,
    html_font: String,
}

impl Shell {
    /// Build a session from `config`, rendering the initial charset with
    /// `rasterizer`. `image` is the initially loaded picture, if any.
    pub fn new(
        config: &ShellConfig,
        rasterizer: Box<dyn GlyphRasterizer>,
        image: Option<RasterImage>,
    ) -> Self {
        let mut cache = BrightnessCache::new();
        let palette = CharacterPalette::from_chars(config.charset.chars(), &mut cache, &*rasterizer);
        log::info!(
            "Shell prêt : {} caractères, résolution {}",
            palette.size(),
            config.resolution
        );
        Self {
            palette,
            cache,
            algorithm: AsciiArtAlgorithm::new(),
            rasterizer,
            resolution: config.resolution,
            image,
            output: config.output,
            html_path: config.html_path.clone(),
            html_font: config.html_font.clone(),
        }
    }

    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[must_use]
    pub fn palette(&self) -> &CharacterPalette {
        &self.palette
    }

    #[must_use]
    pub fn output(&self) -> OutputMode {
        self.output
    }

    #[must_use]
    pub fn image(&self) -> Option<&RasterImage> {
        self.image.as_ref()
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// Command failures are reported on `out` and never stop the loop.
    ///
    /// # Errors
    /// Returns an error only if reading `input` or writing `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        let mut line = String::new();
        loop {
            out.write_all(PROMPT.as_bytes())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                log::debug!("Fin de l'entrée, sortie du shell");
                break;
            }
            let command = line.trim_end_matches(['\n', '\r']);

            match Command::parse(command).and_then(|cmd| self.execute(cmd, out)) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        Ok(())
    }

    /// Apply one parsed command. Informational output goes to `out`.
    ///
    /// # Errors
    /// The [`ShellError`] describing why the command had no effect.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, ShellError> {
        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Chars => self.print_chars(out),
            Command::Add(sel) => {
                self.palette
                    .add_all(sel.chars(), &mut self.cache, &*self.rasterizer);
            }
            Command::Remove(sel) => self.palette.remove_all(sel.chars()),
            Command::Resolution(step) => {
                self.resolution = self.step_resolution(step)?;
                report(out, format_args!("Resolution set to {}", self.resolution));
            }
            Command::Image(path) => {
                let image = ta_source::image::load_image(&path).map_err(|e| {
                    log::warn!("{e:#}");
                    ShellError::ImageFile
                })?;
                self.image = Some(image);
            }
            Command::Output(mode) => self.output = mode,
            Command::AsciiArt => {
                let grid = self.render()?;
                self.emit(&grid, out);
            }
        }
        Ok(Flow::Continue)
    }

    fn print_chars<W: Write>(&self, out: &mut W) {
        let mut line = String::with_capacity(self.palette.size() * 2);
        for ch in self.palette.characters() {
            line.push(ch);
            line.push(' ');
        }
        report(out, format_args!("{line}"));
    }

    fn step_resolution(&self, step: ResolutionStep) -> Result<u32, ShellError> {
        let image = self.image.as_ref().ok_or(ShellError::ImageFile)?;
        let (width, height) = (image.width(), image.height());
        match step {
            ResolutionStep::Up => {
                let doubled = self.resolution.checked_mul(2).ok_or(ShellError::ResolutionBoundary)?;
                // Le rendu exige aussi resolution <= hauteur paddée.
                let padded_height = height.checked_next_power_of_two().unwrap_or(u32::MAX);
                if doubled > width || doubled > padded_height {
                    return Err(ShellError::ResolutionBoundary);
                }
                Ok(doubled)
            }
            ResolutionStep::Down => {
                let min = width.checked_div(height).unwrap_or(0).max(1);
                let halved = self.resolution / 2;
                if halved < min {
                    return Err(ShellError::ResolutionBoundary);
                }
                Ok(halved)
            }
        }
    }

    fn render(&mut self) -> Result<CharGrid, ShellError> {
        let image = self.image.as_ref().ok_or(ShellError::ImageFile)?;
        if self.palette.is_empty() {
            return Err(ShellError::EmptyCharset);
        }
        let grid = self
            .algorithm
            .run(image, self.resolution, &self.palette, &mut self.cache)?;
        Ok(grid)
    }

    fn emit<W: Write>(&self, grid: &CharGrid, out: &mut W) {
        let result = match self.output {
            OutputMode::Console => ConsoleOutput::new(&mut *out).emit(grid),
            OutputMode::Html => HtmlOutput::new(&self.html_path, &self.html_font).emit(grid),
        };
        if let Err(e) = result {
            log::error!("Sortie impossible : {e:#}");
        }
    }
}

fn report<W: Write>(out: &mut W, msg: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{msg}") {
        log::error!("Écriture impossible : {e}");
    }
}
