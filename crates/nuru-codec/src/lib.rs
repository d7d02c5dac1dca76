/// Décodage des fichiers binaires nuru : images `.nui`, palettes `.nup`.
///
/// Le renderer ne voit jamais d'octets bruts : ce crate produit des
/// valeurs `nuru-core` entièrement validées (modes reconnus, dimensions
/// non nulles, codepoints représentables).

pub mod img;
pub mod pal;
mod reader;

pub use img::{decode_image, load_image};
pub use pal::{decode_palette, load_palette};
