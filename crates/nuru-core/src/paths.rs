use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Nom du répertoire projet sous la base de configuration.
pub const PROJECT_DIR: &str = "nuru";

/// Extension des fichiers palette.
pub const PAL_FILE_EXT: &str = "nup";

/// Catégorie de palette sur le disque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PalCategory {
    /// Palettes de glyphes.
    Glyphs,
    /// Palettes de couleurs.
    Colors,
}

impl PalCategory {
    /// Nom du sous-répertoire correspondant.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Glyphs => "glyphs",
            Self::Colors => "colors",
        }
    }
}

/// Chemin d'une palette nommée sous une base explicite. Pur.
///
/// Le nom est replié en minuscules ASCII (pas de casse locale). Aucune
/// vérification d'existence : c'est l'affaire du loader.
///
/// # Example
/// ```
/// use std::path::Path;
/// use nuru_core::paths::{pal_path_in, PalCategory};
/// let p = pal_path_in(Path::new("/x"), PalCategory::Colors, "MyPal");
/// assert_eq!(p, Path::new("/x/nuru/colors/mypal.nup"));
/// ```
#[must_use]
pub fn pal_path_in(base: &Path, category: PalCategory, name: &str) -> PathBuf {
    let file = format!("{}.{PAL_FILE_EXT}", name.to_ascii_lowercase());
    base.join(PROJECT_DIR).join(category.dir_name()).join(file)
}

/// Base de configuration : `$XDG_CONFIG_HOME` si définie et non vide,
/// sinon `$HOME/.config`.
///
/// # Errors
/// `UnresolvableConfigBase` si aucune des deux variables n'est
/// exploitable — jamais de chemin silencieusement malformé.
pub fn config_base() -> Result<PathBuf, Error> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg));
    }
    if let Some(home) = env::var_os("HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home).join(".config"));
    }
    Err(Error::UnresolvableConfigBase)
}

/// Chemin candidat d'une palette nommée, d'après l'environnement.
///
/// Déterministe : mêmes entrées et même environnement, même chemin.
///
/// # Errors
/// `UnresolvableConfigBase` si la base de configuration est
/// irrésoluble.
pub fn pal_path(category: PalCategory, name: &str) -> Result<PathBuf, Error> {
    let base = config_base()?;
    let path = pal_path_in(&base, category, name);
    log::debug!("Palette « {name} » résolue vers {}", path.display());
    Ok(path)
}
