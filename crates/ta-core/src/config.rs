use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CHARSET_DEFAULT;
use crate::error::CoreError;

/// Résolution maximale acceptée (tuiles par côté).
pub const MAX_RESOLUTION: u32 = 1024;

/// Configuration du shell interactif.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ta_core::config::ShellConfig;
/// let config = ShellConfig::default();
/// assert_eq!(config.resolution, 128);
/// assert_eq!(config.charset, "0123456789");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShellConfig {
    /// Charset initial de la palette.
    pub charset: String,
    /// Tuiles par côté.
    pub resolution: u32,
    /// Image chargée au démarrage.
    pub image: PathBuf,
    /// Sortie de `asciiArt`.
    pub output: OutputMode,
    /// Fichier HTML écrit en mode `Html`.
    pub html_path: PathBuf,
    /// Police CSS du bloc `<pre>` HTML.
    pub html_font: String,
    /// Police TrueType pour la rasterisation des glyphes.
    /// `None` = motifs intégrés.
    pub font: Option<PathBuf>,
}

/// Output method for rendered grids.
///
/// # Example
/// ```
/// use ta_core::config::OutputMode;
/// assert_eq!(OutputMode::default(), OutputMode::Console);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputMode {
    /// Une ligne par rangée sur la sortie standard.
    #[default]
    #[serde(alias = "console")]
    Console,
    /// Page HTML autonome.
    #[serde(alias = "html")]
    Html,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            charset: CHARSET_DEFAULT.to_string(),
            resolution: 128,
            image: PathBuf::from("images/cat.jpeg"),
            output: OutputMode::Console,
            html_path: PathBuf::from("out.html"),
            html_font: "Courier New".to_string(),
            font: None,
        }
    }
}

impl ShellConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.resolution = self.resolution.clamp(1, MAX_RESOLUTION);
    }

    /// Reject values that clamping cannot repair.
    ///
    /// # Errors
    /// [`CoreError::Config`] if the charset holds a control character.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(c) = self.charset.chars().find(|c| c.is_control()) {
            return Err(CoreError::Config(format!(
                "caractère de contrôle {c:?} dans le charset"
            )));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    shell: Option<ShellSection>,
    html: Option<HtmlSection>,
    glyph: Option<GlyphSection>,
}

/// Shell section, all fields optional for partial override.
#[derive(Deserialize)]
struct ShellSection {
    charset: Option<String>,
    resolution: Option<u32>,
    image: Option<PathBuf>,
    output: Option<OutputMode>,
}

#[derive(Deserialize)]
struct HtmlSection {
    path: Option<PathBuf>,
    font: Option<String>,
}

#[derive(Deserialize)]
struct GlyphSection {
    font: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ta_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over [`ShellConfig::default`].
///
/// # Errors
/// Returns an error if the text is not valid TOML for this layout.
///
/// # Example
/// ```
/// use ta_core::config::{parse_config, OutputMode};
/// let config = parse_config("[shell]\nresolution = 64\noutput = \"Html\"\n").unwrap();
/// assert_eq!(config.resolution, 64);
/// assert_eq!(config.output, OutputMode::Html);
/// ```
pub fn parse_config(content: &str) -> Result<ShellConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = ShellConfig::default();

    if let Some(s) = file.shell {
        if let Some(v) = s.charset {
            config.charset = v;
        }
        if let Some(v) = s.resolution {
            config.resolution = v;
        }
        if let Some(v) = s.image {
            config.image = v;
        }
        if let Some(v) = s.output {
            config.output = v;
        }
    }
    if let Some(h) = file.html {
        if let Some(v) = h.path {
            config.html_path = v;
        }
        if let Some(v) = h.font {
            config.html_font = v;
        }
    }
    if let Some(g) = file.glyph {
        config.font = g.font;
    }

    config.clamp_all();
    config.validate()?;
    log::debug!("Config chargée : {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config("[html]\nfont = \"Menlo\"\n").unwrap();
        assert_eq!(config.html_font, "Menlo");
        assert_eq!(config.html_path, PathBuf::from("out.html"));
        assert_eq!(config.resolution, 128);
    }

    #[test]
    fn resolution_is_clamped() {
        assert_eq!(parse_config("[shell]\nresolution = 0\n").unwrap().resolution, 1);
        let huge = parse_config("[shell]\nresolution = 99999\n").unwrap();
        assert_eq!(huge.resolution, MAX_RESOLUTION);
    }

    #[test]
    fn lowercase_output_alias() {
        let config = parse_config("[shell]\noutput = \"html\"\n").unwrap();
        assert_eq!(config.output, OutputMode::Html);
    }

    #[test]
    fn glyph_font_is_read() {
        let config = parse_config("[glyph]\nfont = \"fonts/cour.ttf\"\n").unwrap();
        assert_eq!(config.font, Some(PathBuf::from("fonts/cour.ttf")));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[shell]\ncharset = \"@#. \"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.charset, "@#. ");
    }

    #[test]
    fn shipped_default_config_matches_defaults() {
        let shipped = parse_config(include_str!("../../../config/default.toml")).unwrap();
        assert_eq!(shipped, ShellConfig::default());
    }

    #[test]
    fn control_characters_in_charset_are_rejected() {
        let err = parse_config("[shell]\ncharset = \"ab\\tc\"\n").unwrap_err();
        assert!(err.to_string().contains("Configuration invalide"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[shell\nresolution = ").is_err());
        assert!(load_config(Path::new("/nonexistent/tonascii.toml")).is_err());
    }
}
