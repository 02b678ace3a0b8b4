use std::io;

use anyhow::Result;
use clap::Parser;

use ta_app::cli::Cli;
use ta_app::shell::Shell;
use ta_core::config::ShellConfig;
use ta_core::traits::GlyphRasterizer;
use ta_export::pattern::PatternRasterizer;
use ta_export::rasterizer::FontRasterizer;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // 4. Rasteriseur de glyphes
    let rasterizer = build_rasterizer(&config);

    // 5. Image initiale (le shell démarre même sans)
    let image = match ta_source::image::load_image(&config.image) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Image initiale indisponible : {e:#}");
            None
        }
    };

    // 6. Boucle interactive
    let mut shell = Shell::new(&config, rasterizer, image);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    shell.run(stdin.lock(), &mut stdout)
}

fn resolve_config(cli: &Cli) -> Result<ShellConfig> {
    if cli.config.exists() {
        ta_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ShellConfig::default())
    }
}

/// Police configurée si elle se charge, motifs intégrés sinon.
fn build_rasterizer(config: &ShellConfig) -> Box<dyn GlyphRasterizer> {
    if let Some(ref path) = config.font {
        match FontRasterizer::from_file(path) {
            Ok(font) => return Box::new(font),
            Err(e) => log::warn!("{e:#}. Repli sur les motifs intégrés."),
        }
    } else {
        log::info!("Aucune police configurée, motifs intégrés.");
    }
    Box::new(PatternRasterizer::new())
}
