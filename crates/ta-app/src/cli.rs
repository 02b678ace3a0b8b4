use std::path::PathBuf;

use clap::Parser;
use ta_core::config::{OutputMode, ShellConfig};

/// tonascii — images en art ASCII par correspondance de luminosité.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Image chargée au démarrage (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Police TrueType/OpenType pour la rasterisation des glyphes.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Charset initial, ex. "0123456789".
    #[arg(long)]
    pub charset: Option<String>,

    /// Résolution initiale (caractères par rangée).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Sortie initiale : console, html.
    #[arg(long)]
    pub output: Option<String>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Overwrite `config` fields with the flags given on the command line.
    pub fn apply_overrides(&self, config: &mut ShellConfig) {
        if let Some(ref image) = self.image {
            config.image.clone_from(image);
        }
        if let Some(ref font) = self.font {
            config.font = Some(font.clone());
        }
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(ref output) = self.output {
            config.output = match output.to_ascii_lowercase().as_str() {
                "console" => OutputMode::Console,
                "html" => OutputMode::Html,
                _ => {
                    log::warn!("Sortie inconnue '{output}', utilisation du défaut.");
                    config.output
                }
            };
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_config_untouched() {
        let cli = Cli::parse_from(["tonascii"]);
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.log_level, "warn");

        let mut config = ShellConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "tonascii",
            "--image",
            "photo.png",
            "--font",
            "mono.ttf",
            "--charset",
            "#. ",
            "--resolution",
            "64",
            "--output",
            "HTML",
        ]);
        let mut config = ShellConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.image, PathBuf::from("photo.png"));
        assert_eq!(config.font, Some(PathBuf::from("mono.ttf")));
        assert_eq!(config.charset, "#. ");
        assert_eq!(config.resolution, 64);
        assert_eq!(config.output, OutputMode::Html);
    }

    #[test]
    fn unknown_output_keeps_config_value() {
        let cli = Cli::parse_from(["tonascii", "--output", "pdf", "--resolution", "0"]);
        let mut config = ShellConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.output, OutputMode::Console);
        assert_eq!(config.resolution, 1);
    }
}
