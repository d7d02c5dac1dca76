//! Décodeur d'images `.nui`.
//!
//! En-tête de 40 octets, big-endian :
//! signature(7) version(1) color_mode(1) glyph_mode(1) mdata_mode(1)
//! cols(2) rows(2) ch_key(2) fg_key(1) bg_key(1)
//! glyph_pal(7, NUL-padded) color_pal(7, NUL-padded) réservé(7).
//! Les octets de mode portent le code de mode sur les 7 bits bas et le
//! drapeau « palette nommée en usage » sur le bit 7.
//!
//! Charge utile : cellules row-major. Par cellule, le glyphe (0, 1 ou
//! 2 octets selon le mode), puis les couleurs (0, 1 octet compacté
//! fg|bg, ou 2 octets), puis les métadonnées (2 octets, sautés).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use nuru_core::error::Error;
use nuru_core::image::{Cell, ColorMode, GlyphMode, Image, SIGNATURE};

use crate::reader::{read_bytes, read_u8, read_u16};

/// Version de format acceptée.
pub const IMG_VERSION: u8 = 1;

/// Drapeau « palette nommée en usage » dans les octets de mode.
const NAMED_PAL_FLAG: u8 = 0x80;

fn parse_color_mode(byte: u8) -> Result<ColorMode, Error> {
    match byte & !NAMED_PAL_FLAG {
        0 => Ok(ColorMode::None),
        1 => Ok(ColorMode::FourBit),
        2 => Ok(ColorMode::EightBit),
        3 => Ok(ColorMode::Palette),
        _ => Err(Error::UnknownMode { byte }),
    }
}

fn parse_glyph_mode(byte: u8) -> Result<GlyphMode, Error> {
    match byte & !NAMED_PAL_FLAG {
        0 => Ok(GlyphMode::None),
        1 => Ok(GlyphMode::Ascii),
        2 => Ok(GlyphMode::Unicode),
        3 => Ok(GlyphMode::Palette),
        _ => Err(Error::UnknownMode { byte }),
    }
}

/// Nom de palette NUL-padded. `Some` seulement si le drapeau « palette
/// nommée » est levé ET le nom non vide.
fn pal_name(raw: [u8; 7], flagged: bool) -> Option<String> {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    let name = String::from_utf8_lossy(&raw[..end]).into_owned();
    if !flagged {
        if !name.is_empty() {
            log::debug!("Nom de palette « {name} » ignoré : drapeau non levé");
        }
        return None;
    }
    if name.is_empty() {
        log::warn!("Drapeau de palette nommée levé mais nom vide");
        return None;
    }
    Some(name)
}

/// Décode une image depuis un flux d'octets.
///
/// # Errors
/// Signature ou version inconnue, octet de mode invalide, dimensions
/// nulles, flux tronqué, erreur d'E/S.
pub fn decode_image<R: Read>(r: &mut R) -> Result<Image, Error> {
    let signature: [u8; 7] = read_bytes(r, "signature")?;
    if signature != SIGNATURE {
        return Err(Error::BadSignature);
    }
    let version = read_u8(r, "version")?;
    if version != IMG_VERSION {
        return Err(Error::UnsupportedVersion { found: version });
    }

    let color_byte = read_u8(r, "color_mode")?;
    let glyph_byte = read_u8(r, "glyph_mode")?;
    let color_mode = parse_color_mode(color_byte)?;
    let glyph_mode = parse_glyph_mode(glyph_byte)?;
    let mdata_mode = read_u8(r, "mdata_mode")?;
    if mdata_mode > 1 {
        return Err(Error::UnknownMode { byte: mdata_mode });
    }

    let cols = read_u16(r, "cols")?;
    let rows = read_u16(r, "rows")?;
    if cols == 0 || rows == 0 {
        return Err(Error::InvalidDimensions { cols, rows });
    }

    let ch_key = read_u16(r, "ch_key")?;
    let fg_key = read_u8(r, "fg_key")?;
    let bg_key = read_u8(r, "bg_key")?;

    let glyph_pal = pal_name(read_bytes(r, "glyph_pal")?, glyph_byte & NAMED_PAL_FLAG != 0);
    let color_pal = pal_name(read_bytes(r, "color_pal")?, color_byte & NAMED_PAL_FLAG != 0);
    let _reserved: [u8; 7] = read_bytes(r, "réservé")?;

    let count = usize::from(cols) * usize::from(rows);
    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        let ch = match glyph_mode {
            GlyphMode::None => 0,
            GlyphMode::Ascii | GlyphMode::Palette => u16::from(read_u8(r, "cellule (glyphe)")?),
            GlyphMode::Unicode => read_u16(r, "cellule (glyphe)")?,
        };
        let (fg, bg) = match color_mode {
            ColorMode::None => (0, 0),
            ColorMode::FourBit => {
                // fg sur le quartet haut, bg sur le quartet bas
                let packed = read_u8(r, "cellule (couleur)")?;
                (packed >> 4, packed & 0x0f)
            }
            ColorMode::EightBit | ColorMode::Palette => (
                read_u8(r, "cellule (couleur fg)")?,
                read_u8(r, "cellule (couleur bg)")?,
            ),
        };
        if mdata_mode == 1 {
            let _ = read_u16(r, "cellule (métadonnées)")?;
        }
        cells.push(Cell { ch, fg, bg });
    }

    log::debug!("Image décodée : {cols}×{rows}, couleurs {color_mode}, glyphes {glyph_mode}");

    Ok(Image {
        signature,
        version,
        color_mode,
        glyph_mode,
        mdata_mode,
        cols,
        rows,
        ch_key,
        fg_key,
        bg_key,
        glyph_pal,
        color_pal,
        cells,
    })
}

/// Charge une image `.nui` depuis le disque.
///
/// # Errors
/// Voir [`decode_image`] ; s'y ajoutent les erreurs d'ouverture.
pub fn load_image(path: &Path) -> Result<Image, Error> {
    let mut r = BufReader::new(File::open(path)?);
    decode_image(&mut r)
}
