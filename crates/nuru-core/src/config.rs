use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::paths;

/// Configuration du visualiseur. Chaque champ a un défaut sain ; le
/// fichier TOML ne renseigne que ce qu'il veut, les drapeaux CLI
/// l'emportent sur le fichier.
///
/// # Example
/// ```
/// use nuru_core::config::ViewerConfig;
/// let config = ViewerConfig::default();
/// assert!(!config.clear);
/// assert!(config.glyphs.is_none());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ViewerConfig {
    /// Effacer le terminal avant l'affichage (défaut du drapeau -C).
    pub clear: bool,
    /// Palette de glyphes de repli quand l'image n'en nomme aucune.
    pub glyphs: Option<String>,
    /// Palette de couleurs de repli quand l'image n'en nomme aucune.
    pub colors: Option<String>,
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    viewer: Option<ViewerSection>,
}

/// Section `[viewer]`, tous champs optionnels pour override partiel.
#[derive(Deserialize)]
struct ViewerSection {
    clear: Option<bool>,
    glyphs: Option<String>,
    colors: Option<String>,
}

/// Fusionne un fichier parsé avec les valeurs par défaut.
fn merge(file: ConfigFile) -> ViewerConfig {
    let mut config = ViewerConfig::default();
    if let Some(v) = file.viewer {
        if let Some(clear) = v.clear {
            config.clear = clear;
        }
        if let Some(glyphs) = v.glyphs {
            config.glyphs = Some(glyphs);
        }
        if let Some(colors) = v.colors {
            config.colors = Some(colors);
        }
    }
    config
}

/// Emplacement du fichier de configuration : `<base>/nuru/config.toml`.
///
/// # Errors
/// `UnresolvableConfigBase` si ni `XDG_CONFIG_HOME` ni `HOME` ne sont
/// définis.
pub fn config_file_path() -> Result<PathBuf, Error> {
    Ok(paths::config_base()?.join(paths::PROJECT_DIR).join("config.toml"))
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    Ok(merge(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = merge(file);
        assert!(!config.clear);
        assert!(config.glyphs.is_none());
        assert!(config.colors.is_none());
    }

    #[test]
    fn partial_section_overrides_only_named_fields() {
        let file: ConfigFile = toml::from_str("[viewer]\nclear = true\ncolors = \"vga\"\n").unwrap();
        let config = merge(file);
        assert!(config.clear);
        assert_eq!(config.colors.as_deref(), Some("vga"));
        assert!(config.glyphs.is_none());
    }

    #[test]
    fn wrong_typed_field_is_a_parse_error() {
        assert!(toml::from_str::<ConfigFile>("[viewer]\nclear = \"oui\"\n").is_err());
    }
}
