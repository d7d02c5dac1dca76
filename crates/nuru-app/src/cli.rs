use std::path::PathBuf;

use clap::Parser;

/// nuru — affiche une image nuru dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier image nuru (.nui) à afficher.
    pub image: PathBuf,

    /// Chemin explicite d'une palette de glyphes (.nup), court-circuite
    /// la résolution par nom.
    #[arg(short = 'g', long)]
    pub glyphs: Option<PathBuf>,

    /// Chemin explicite d'une palette de couleurs (.nup).
    #[arg(short = 'c', long)]
    pub colors: Option<PathBuf>,

    /// Effacer le terminal avant l'affichage.
    #[arg(short = 'C', long, default_value_t = false)]
    pub clear: bool,

    /// Afficher les informations d'en-tête et quitter sans rendu.
    #[arg(short = 'i', long, default_value_t = false)]
    pub info: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
