//! Couche terminal : taille du viewport et état global scopé.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use nuru_render::Viewport;
use nuru_render::ansi::SGR_RESET;

/// Taille du terminal en cellules. Refuse les dimensions nulles avant
/// que le renderer ne soit invoqué.
///
/// # Errors
/// Échec de la requête de taille, ou terminal de taille nulle.
pub fn viewport() -> Result<Viewport> {
    let (cols, rows) =
        terminal::size().context("Impossible de déterminer la taille du terminal")?;
    anyhow::ensure!(
        cols > 0 && rows > 0,
        "Taille de terminal inappropriée : {cols}×{rows}"
    );
    Ok(Viewport { cols, rows })
}

/// État du terminal tenu comme ressource scopée : le curseur est caché
/// (et l'écran effacé sur demande) à l'entrée, et TOUJOURS restauré à
/// la sortie, y compris sur les chemins d'erreur.
pub struct TermGuard;

impl TermGuard {
    /// Prépare le terminal pour l'affichage.
    ///
    /// # Errors
    /// Échec d'émission des commandes terminal.
    pub fn enter(clear: bool) -> Result<Self> {
        let mut out = io::stdout();
        execute!(out, cursor::Hide).context("Impossible de cacher le curseur")?;
        if clear {
            execute!(
                out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )
            .context("Impossible d'effacer le terminal")?;
        }
        Ok(Self)
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        // restauration au mieux : un Drop ne doit jamais paniquer
        let mut out = io::stdout();
        let _ = write!(out, "{SGR_RESET}");
        let _ = execute!(out, cursor::Show);
        let _ = out.flush();
    }
}
