use thiserror::Error;

use crate::palette::Channel;

/// Errors originating from the nuru core, codec, and renderer.
#[derive(Error, Debug)]
pub enum Error {
    /// Palette mode selected by the image, but no palette bound.
    #[error("Palette de {channel} requise par l'image mais non fournie")]
    MissingPalette {
        /// Channel the palette was required for.
        channel: Channel,
    },

    /// A palette of the wrong type was bound to a channel.
    #[error("Type de palette inattendu pour le canal {channel} : {found}")]
    WrongPaletteType {
        /// Channel the palette was bound to.
        channel: Channel,
        /// Type tag of the palette actually supplied.
        found: &'static str,
    },

    /// Neither XDG_CONFIG_HOME nor HOME is set.
    #[error("Ni XDG_CONFIG_HOME ni HOME ne sont définis : base de configuration introuvable")]
    UnresolvableConfigBase,

    /// Zero-sized viewport handed to the renderer.
    #[error("Viewport invalide : {cols}×{rows}")]
    InvalidViewport {
        /// Viewport columns.
        cols: u16,
        /// Viewport rows.
        rows: u16,
    },

    /// Palette lookup outside the palette bounds.
    #[error("Index {index} hors limites (palette de {len} entrées)")]
    OutOfRangeIndex {
        /// Index the cell asked for.
        index: usize,
        /// Number of entries in the bound palette.
        len: usize,
    },

    /// File signature does not match a nuru file.
    #[error("Signature invalide : fichier nuru non reconnu")]
    BadSignature,

    /// Unsupported format version.
    #[error("Version de format non supportée : {found}")]
    UnsupportedVersion {
        /// Version byte found in the header.
        found: u8,
    },

    /// Unknown mode byte in an image header.
    #[error("Octet de mode inconnu : {byte:#04x}")]
    UnknownMode {
        /// Offending header byte.
        byte: u8,
    },

    /// Unknown palette type byte.
    #[error("Type de palette inconnu : {byte:#04x}")]
    UnknownPaletteType {
        /// Offending header byte.
        byte: u8,
    },

    /// File ends before the announced payload.
    #[error("Fichier tronqué : {what}")]
    Truncated {
        /// What was being read when the file ended.
        what: &'static str,
    },

    /// Invalid grid dimensions.
    #[error("Dimensions invalides : {cols}×{rows}")]
    InvalidDimensions {
        /// Columns announced by the header.
        cols: u16,
        /// Rows announced by the header.
        rows: u16,
    },

    /// Codepoint with no character representation in a glyph palette.
    #[error("Codepoint invalide dans la palette de glyphes : {value:#06x}")]
    InvalidCodepoint {
        /// Raw codepoint value.
        value: u16,
    },

    /// Palette entry count outside 1..=256.
    #[error("Nombre d'entrées de palette invalide : {count}")]
    InvalidCount {
        /// Count announced by the header.
        count: u16,
    },

    /// Underlying I/O failure.
    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] std::io::Error),
}
