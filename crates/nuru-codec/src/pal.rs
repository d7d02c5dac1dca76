//! Décodeur de palettes `.nup`.
//!
//! En-tête : signature(7) version(1) type(1) count(2), puis les
//! entrées. Type 1 : count codepoints u16 ; type 2 : count indices
//! u8 ; type 3 : count triplets (r, g, b).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use nuru_core::error::Error;
use nuru_core::palette::{Palette, Rgb};

use crate::reader::{read_bytes, read_u8, read_u16};

/// Signature attendue en tête d'un fichier palette.
pub const PAL_SIGNATURE: [u8; 7] = *b"NURUPAL";

/// Version de format acceptée.
pub const PAL_VERSION: u8 = 1;

const TYPE_GLYPH: u8 = 1;
const TYPE_COLOR_8BIT: u8 = 2;
const TYPE_COLOR_RGB: u8 = 3;

/// Les cellules indexent les palettes sur un octet.
const MAX_ENTRIES: u16 = 256;

/// Décode une palette depuis un flux d'octets.
///
/// Les codepoints de glyphes sont validés ici : le renderer reçoit des
/// `char` sûrs, jamais de valeurs brutes.
///
/// # Errors
/// Signature, version ou type inconnu, nombre d'entrées hors de
/// `1..=256`, codepoint non représentable, flux tronqué, erreur d'E/S.
pub fn decode_palette<R: Read>(r: &mut R) -> Result<Palette, Error> {
    let signature: [u8; 7] = read_bytes(r, "signature")?;
    if signature != PAL_SIGNATURE {
        return Err(Error::BadSignature);
    }
    let version = read_u8(r, "version")?;
    if version != PAL_VERSION {
        return Err(Error::UnsupportedVersion { found: version });
    }
    let type_byte = read_u8(r, "type")?;
    let count = read_u16(r, "count")?;
    if count == 0 || count > MAX_ENTRIES {
        return Err(Error::InvalidCount { count });
    }

    match type_byte {
        TYPE_GLYPH => {
            let mut glyphs = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                let value = read_u16(r, "entrée (glyphe)")?;
                let ch =
                    char::from_u32(u32::from(value)).ok_or(Error::InvalidCodepoint { value })?;
                glyphs.push(ch);
            }
            Ok(Palette::Glyph(glyphs))
        }
        TYPE_COLOR_8BIT => {
            let mut colors = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                colors.push(read_u8(r, "entrée (couleur)")?);
            }
            Ok(Palette::Color8(colors))
        }
        TYPE_COLOR_RGB => {
            let mut colors = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                let red = read_u8(r, "entrée (rouge)")?;
                let green = read_u8(r, "entrée (vert)")?;
                let blue = read_u8(r, "entrée (bleu)")?;
                colors.push(Rgb { r: red, g: green, b: blue });
            }
            Ok(Palette::ColorRgb(colors))
        }
        _ => Err(Error::UnknownPaletteType { byte: type_byte }),
    }
}

/// Charge une palette `.nup` depuis le disque.
///
/// # Errors
/// Voir [`decode_palette`] ; s'y ajoutent les erreurs d'ouverture.
pub fn load_palette(path: &Path) -> Result<Palette, Error> {
    let mut r = BufReader::new(File::open(path)?);
    decode_palette(&mut r)
}
