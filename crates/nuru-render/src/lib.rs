/// Rendu ANSI d'images nuru : la grille de cellules décodée devient un
/// flux d'octets terminal (séquences SGR + glyphes + fins de rangée).

pub mod ansi;
pub mod renderer;

pub use renderer::{Viewport, render};
