use std::fmt;

/// Signature attendue en tête d'un fichier image nuru.
pub const SIGNATURE: [u8; 7] = *b"NURUIMG";

/// Mode d'interprétation des champs `fg`/`bg` d'une cellule.
///
/// # Example
/// ```
/// use nuru_core::image::ColorMode;
/// assert_eq!(ColorMode::FourBit.to_string(), "4bit");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Aucune couleur : les champs `fg`/`bg` sont ignorés.
    #[default]
    None,
    /// Couleurs ANSI 4 bits (0–7 standard, 8–15 vives).
    FourBit,
    /// Couleurs indexées 8 bits (palette terminal 256 couleurs).
    EightBit,
    /// `fg`/`bg` indexent une palette de couleurs externe.
    Palette,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::FourBit => "4bit",
            Self::EightBit => "8bit",
            Self::Palette => "palette",
        })
    }
}

/// Mode d'interprétation du champ `ch` d'une cellule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphMode {
    /// Pas de glyphe : chaque cellule affiche une espace.
    #[default]
    None,
    /// `ch` est un codepoint ASCII.
    Ascii,
    /// `ch` est un codepoint Unicode (BMP).
    Unicode,
    /// `ch` indexe une palette de glyphes externe.
    Palette,
}

impl fmt::Display for GlyphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Ascii => "ascii",
            Self::Unicode => "unicode",
            Self::Palette => "palette",
        })
    }
}

/// Une cellule de la grille : glyphe + couleurs.
///
/// La sémantique des champs dépend des modes portés par l'image.
/// Valeur simple, sans identité au-delà de sa position dans la grille.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Code du glyphe (codepoint direct ou index de palette).
    pub ch: u16,
    /// Code de couleur foreground.
    pub fg: u8,
    /// Code de couleur background.
    pub bg: u8,
}

/// Image nuru décodée : en-tête + grille de cellules row-major.
///
/// Immuable une fois chargée. Le renderer l'emprunte sans jamais la
/// modifier.
///
/// # Example
/// ```
/// use nuru_core::image::{ColorMode, GlyphMode, Image};
/// let img = Image::blank(8, 4, ColorMode::None, GlyphMode::Ascii);
/// assert_eq!(img.cells.len(), 32);
/// assert_eq!(img.cell(0, 0).ch, 0);
/// ```
#[derive(Clone, Debug)]
pub struct Image {
    /// Signature du fichier, opaque (affichée par le mode info).
    pub signature: [u8; 7],
    /// Version du format, opaque.
    pub version: u8,
    /// Interprétation des champs couleur.
    pub color_mode: ColorMode,
    /// Interprétation du champ glyphe.
    pub glyph_mode: GlyphMode,
    /// Canal de métadonnées (décodé, ignoré par le renderer).
    pub mdata_mode: u8,
    /// Largeur de la grille en cellules.
    pub cols: u16,
    /// Hauteur de la grille en cellules.
    pub rows: u16,
    /// Sentinelle « pas de glyphe » : une cellule dont `ch` vaut cette
    /// clé est rendue comme une espace.
    pub ch_key: u16,
    /// Sentinelle « pas de foreground ».
    pub fg_key: u8,
    /// Sentinelle « pas de background ».
    pub bg_key: u8,
    /// Nom de la palette de glyphes référencée par l'image, si le
    /// drapeau « palette nommée » est levé.
    pub glyph_pal: Option<String>,
    /// Nom de la palette de couleurs référencée par l'image.
    pub color_pal: Option<String>,
    /// Cellules, row-major, `cols × rows`, taille fixe.
    pub cells: Vec<Cell>,
}

impl Image {
    /// Image vide aux dimensions données, clés à zéro.
    ///
    /// # Example
    /// ```
    /// use nuru_core::image::{ColorMode, GlyphMode, Image};
    /// let img = Image::blank(2, 2, ColorMode::EightBit, GlyphMode::None);
    /// assert_eq!((img.cols, img.rows), (2, 2));
    /// ```
    #[must_use]
    pub fn blank(cols: u16, rows: u16, color_mode: ColorMode, glyph_mode: GlyphMode) -> Self {
        Self {
            signature: SIGNATURE,
            version: 1,
            color_mode,
            glyph_mode,
            mdata_mode: 0,
            cols,
            rows,
            ch_key: 0,
            fg_key: 0,
            bg_key: 0,
            glyph_pal: None,
            color_pal: None,
            cells: vec![Cell::default(); usize::from(cols) * usize::from(rows)],
        }
    }

    /// Accès à la cellule (col, row).
    #[inline(always)]
    #[must_use]
    pub fn cell(&self, col: u16, row: u16) -> &Cell {
        debug_assert!(col < self.cols && row < self.rows, "cell out of bounds");
        &self.cells[usize::from(row) * usize::from(self.cols) + usize::from(col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_accessor_is_row_major() {
        let mut img = Image::blank(3, 2, ColorMode::None, GlyphMode::Ascii);
        // (col 2, row 1) en row-major
        img.cells[5] = Cell { ch: 65, fg: 1, bg: 2 };
        assert_eq!(img.cell(2, 1).ch, 65);
        assert_eq!(img.cell(0, 0).ch, 0);
    }

    #[test]
    fn modes_display_as_format_tokens() {
        assert_eq!(ColorMode::None.to_string(), "none");
        assert_eq!(ColorMode::EightBit.to_string(), "8bit");
        assert_eq!(GlyphMode::Unicode.to_string(), "unicode");
        assert_eq!(GlyphMode::Palette.to_string(), "palette");
    }
}
