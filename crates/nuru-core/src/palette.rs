use std::fmt;

/// Canal d'une cellule auquel une palette s'applique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Canal glyphe (`ch`).
    Glyph,
    /// Canal couleur (`fg`/`bg`).
    Color,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Glyph => "glyphes",
            Self::Color => "couleurs",
        })
    }
}

/// Couleur RGB 24 bits d'une entrée de palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Composante rouge.
    pub r: u8,
    /// Composante verte.
    pub g: u8,
    /// Composante bleue.
    pub b: u8,
}

/// Table de correspondance externe, étiquetée par son contenu.
///
/// Lecture seule, un seul propriétaire (le driver) ; le renderer
/// l'emprunte sans mutation.
///
/// # Example
/// ```
/// use nuru_core::palette::Palette;
/// let pal = Palette::Glyph(vec![' ', '░', '▒', '▓', '█']);
/// assert_eq!(pal.len(), 5);
/// assert_eq!(pal.kind(), "glyph");
/// ```
#[derive(Clone, Debug)]
pub enum Palette {
    /// Suite ordonnée de glyphes, indexée par le `ch` d'une cellule.
    Glyph(Vec<char>),
    /// Suite ordonnée d'indices 8 bits, indexée par `fg`/`bg`.
    Color8(Vec<u8>),
    /// Suite ordonnée de triplets RGB, indexée par `fg`/`bg`.
    ColorRgb(Vec<Rgb>),
}

impl Palette {
    /// Nombre d'entrées.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Glyph(v) => v.len(),
            Self::Color8(v) => v.len(),
            Self::ColorRgb(v) => v.len(),
        }
    }

    /// Vrai si la palette n'a aucune entrée.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Étiquette du type, pour les messages d'erreur et le debug.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Glyph(_) => "glyph",
            Self::Color8(_) => "color-8bit",
            Self::ColorRgb(_) => "color-rgb",
        }
    }
}
