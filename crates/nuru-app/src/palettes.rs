//! Acquisition des palettes d'un rendu.
//!
//! Préséance par canal : chemin explicite de la ligne de commande,
//! puis nom porté par l'image, puis repli de configuration. Un canal
//! en mode palette resté sans palette n'est pas une erreur ici — le
//! renderer la signalera avant d'émettre le moindre octet.

use std::path::Path;

use anyhow::{Context, Result};
use nuru_core::config::ViewerConfig;
use nuru_core::image::{ColorMode, GlyphMode, Image};
use nuru_core::palette::Palette;
use nuru_core::paths::{self, PalCategory};

use crate::cli::Cli;

/// Palettes chargées pour un rendu.
pub struct LoadedPalettes {
    /// Palette de glyphes, si une source en a fourni une.
    pub glyphs: Option<Palette>,
    /// Palette de couleurs.
    pub colors: Option<Palette>,
}

/// Charge les palettes des deux canaux selon la préséance.
///
/// # Errors
/// Échec de résolution de la base de configuration ou de chargement
/// d'un fichier palette.
pub fn load_for(img: &Image, cli: &Cli, config: &ViewerConfig) -> Result<LoadedPalettes> {
    let glyphs = load_channel(
        cli.glyphs.as_deref(),
        img.glyph_mode == GlyphMode::Palette,
        img.glyph_pal.as_deref(),
        config.glyphs.as_deref(),
        PalCategory::Glyphs,
    )?;
    let colors = load_channel(
        cli.colors.as_deref(),
        img.color_mode == ColorMode::Palette,
        img.color_pal.as_deref(),
        config.colors.as_deref(),
        PalCategory::Colors,
    )?;
    Ok(LoadedPalettes { glyphs, colors })
}

fn load_channel(
    explicit: Option<&Path>,
    needed: bool,
    named: Option<&str>,
    fallback: Option<&str>,
    category: PalCategory,
) -> Result<Option<Palette>> {
    if let Some(path) = explicit {
        let pal = nuru_codec::load_palette(path)
            .with_context(|| format!("Impossible de charger la palette {}", path.display()))?;
        return Ok(Some(pal));
    }
    if !needed {
        return Ok(None);
    }
    let Some(name) = named.or(fallback) else {
        return Ok(None);
    };
    let path = paths::pal_path(category, name)?;
    let pal = nuru_codec::load_palette(&path).with_context(|| {
        format!("Impossible de charger la palette « {name} » ({})", path.display())
    })?;
    Ok(Some(pal))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn pal_8bit_file(entries: &[u8]) -> tempfile::NamedTempFile {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"NURUPAL");
        bytes.push(1); // version
        bytes.push(2); // type : couleurs 8 bits
        bytes.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        bytes.extend_from_slice(entries);
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f
    }

    #[test]
    fn explicit_path_wins_over_names() {
        let f = pal_8bit_file(&[16, 196]);
        let pal = load_channel(
            Some(f.path()),
            true,
            Some("ignorée"),
            Some("ignorée-aussi"),
            PalCategory::Colors,
        )
        .unwrap();
        assert!(matches!(pal, Some(Palette::Color8(c)) if c == vec![16, 196]));
    }

    #[test]
    fn unneeded_channel_loads_nothing() {
        let pal = load_channel(None, false, Some("vga"), None, PalCategory::Colors).unwrap();
        assert!(pal.is_none());
    }

    #[test]
    fn needed_channel_without_any_name_stays_unbound() {
        let pal = load_channel(None, true, None, None, PalCategory::Glyphs).unwrap();
        assert!(pal.is_none());
    }

    #[test]
    fn explicit_path_errors_carry_context() {
        let err = load_channel(
            Some(Path::new("/nonexistent/pal.nup")),
            false,
            None,
            None,
            PalCategory::Colors,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pal.nup"));
    }
}
