use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use nuru_core::config::ViewerConfig;
use nuru_core::image::Image;

pub mod cli;
pub mod palettes;
pub mod term;

fn main() -> Result<()> {
    // 1. Parser CLI (--help / --version court-circuitent ici)
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la configuration utilisateur (facultative)
    let config = resolve_config()?;

    // 4. Charger l'image
    let img = nuru_codec::load_image(&cli.image)
        .with_context(|| format!("Impossible de charger l'image {}", cli.image.display()))?;

    // 5. Mode info : en-tête seul, pas de rendu
    if cli.info {
        print_info(&img);
        return Ok(());
    }

    // 6. Acquérir les palettes (drapeau > nom d'image > repli config)
    let pals = palettes::load_for(&img, &cli, &config)?;

    // 7. Taille du terminal
    let viewport = term::viewport()?;

    // 8. Rendu sous garde terminal (restauration TOUJOURS, même en cas
    //    d'erreur)
    let _guard = term::TermGuard::enter(cli.clear || config.clear)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    nuru_render::render(
        &mut out,
        &img,
        pals.glyphs.as_ref(),
        pals.colors.as_ref(),
        viewport,
    )?;
    out.flush().context("Échec de l'écriture vers le terminal")?;

    Ok(())
}

/// Config utilisateur : `<base>/nuru/config.toml`. Fichier absent ou
/// base irrésoluble : défauts ; fichier malformé : erreur dure.
///
/// # Errors
/// Fichier présent mais illisible ou TOML invalide.
fn resolve_config() -> Result<ViewerConfig> {
    match nuru_core::config::config_file_path() {
        Ok(path) if path.exists() => nuru_core::config::load_config(&path),
        Ok(_) => Ok(ViewerConfig::default()),
        Err(e) => {
            log::debug!("Base de configuration non résolue : {e}");
            Ok(ViewerConfig::default())
        }
    }
}

/// Affiche les champs d'en-tête de l'image (mode -i).
fn print_info(img: &Image) {
    println!("signature:  {}", String::from_utf8_lossy(&img.signature));
    println!("version:    {}", img.version);
    println!("color_mode: {}", img.color_mode);
    println!("glyph_mode: {}", img.glyph_mode);
    println!("mdata_mode: {}", img.mdata_mode);
    println!("cols:       {}", img.cols);
    println!("rows:       {}", img.rows);
    println!("ch_key:     {}", img.ch_key);
    println!("fg_key:     {}", img.fg_key);
    println!("bg_key:     {}", img.bg_key);
    println!("glyph_pal:  {}", img.glyph_pal.as_deref().unwrap_or("-"));
    println!("color_pal:  {}", img.color_pal.as_deref().unwrap_or("-"));
}
