//! Le pipeline de rendu par cellule.
//!
//! Chaque cellule traverse deux phases indépendantes — couleur puis
//! glyphe — pilotées par les modes de l'image, et se termine par un
//! reset SGR complet. Le reset par cellule coûte quelques octets mais
//! rend la sortie indépendante de l'historique du terminal : aucun état
//! de couleur courant à suivre d'une cellule à l'autre.

use std::io::Write;

use nuru_core::error::Error;
use nuru_core::image::{Cell, ColorMode, GlyphMode, Image};
use nuru_core::palette::{Channel, Palette, Rgb};

use crate::ansi::{SGR_RESET, sgr_4bit_bg, sgr_4bit_fg};

/// Fenêtre de rendu, en cellules terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Colonnes visibles.
    pub cols: u16,
    /// Rangées visibles.
    pub rows: u16,
}

const SPACE: char = ' ';

/// Plan de couleur, résolu une fois par rendu — jamais par cellule.
enum ColorPlan<'a> {
    None,
    FourBit,
    EightBit,
    Indexed(&'a [u8]),
    Rgb(&'a [Rgb]),
}

/// Plan de glyphe, résolu une fois par rendu.
enum GlyphPlan<'a> {
    None,
    Direct,
    Palette(&'a [char]),
}

/// Vérifie la liaison de palette couleur avant la moindre écriture.
fn color_plan<'a>(img: &Image, colors: Option<&'a Palette>) -> Result<ColorPlan<'a>, Error> {
    match img.color_mode {
        ColorMode::None => Ok(ColorPlan::None),
        ColorMode::FourBit => Ok(ColorPlan::FourBit),
        ColorMode::EightBit => Ok(ColorPlan::EightBit),
        ColorMode::Palette => match colors {
            Some(Palette::Color8(lut)) => Ok(ColorPlan::Indexed(lut)),
            Some(Palette::ColorRgb(lut)) => Ok(ColorPlan::Rgb(lut)),
            Some(other) => Err(Error::WrongPaletteType {
                channel: Channel::Color,
                found: other.kind(),
            }),
            None => Err(Error::MissingPalette {
                channel: Channel::Color,
            }),
        },
    }
}

/// Vérifie la liaison de palette glyphe avant la moindre écriture.
fn glyph_plan<'a>(img: &Image, glyphs: Option<&'a Palette>) -> Result<GlyphPlan<'a>, Error> {
    match img.glyph_mode {
        GlyphMode::None => Ok(GlyphPlan::None),
        GlyphMode::Ascii | GlyphMode::Unicode => Ok(GlyphPlan::Direct),
        GlyphMode::Palette => match glyphs {
            Some(Palette::Glyph(lut)) => Ok(GlyphPlan::Palette(lut)),
            Some(other) => Err(Error::WrongPaletteType {
                channel: Channel::Glyph,
                found: other.kind(),
            }),
            None => Err(Error::MissingPalette {
                channel: Channel::Glyph,
            }),
        },
    }
}

/// Lecture défensive d'une entrée de palette : échec net plutôt que
/// lecture hors limites.
fn lookup<T: Copy>(lut: &[T], index: usize) -> Result<T, Error> {
    lut.get(index)
        .copied()
        .ok_or(Error::OutOfRangeIndex { index, len: lut.len() })
}

/// Phase couleur : émet les SGR foreground/background de la cellule.
///
/// La présence d'un canal se réduit à l'égalité avec sa clé — une
/// cellule « transparente » ne coûte aucun octet de couleur.
fn write_color<W: Write>(
    out: &mut W,
    plan: &ColorPlan<'_>,
    cell: &Cell,
    fg_key: u8,
    bg_key: u8,
) -> Result<(), Error> {
    match plan {
        ColorPlan::None => {}
        ColorPlan::FourBit => {
            if cell.fg != fg_key {
                write!(out, "\x1b[{}m", sgr_4bit_fg(cell.fg))?;
            }
            if cell.bg != bg_key {
                write!(out, "\x1b[{}m", sgr_4bit_bg(cell.bg))?;
            }
        }
        ColorPlan::EightBit => {
            if cell.fg != fg_key {
                write!(out, "\x1b[38;5;{}m", cell.fg)?;
            }
            if cell.bg != bg_key {
                write!(out, "\x1b[48;5;{}m", cell.bg)?;
            }
        }
        ColorPlan::Indexed(lut) => {
            if cell.fg != fg_key {
                write!(out, "\x1b[38;5;{}m", lookup(lut, usize::from(cell.fg))?)?;
            }
            if cell.bg != bg_key {
                write!(out, "\x1b[48;5;{}m", lookup(lut, usize::from(cell.bg))?)?;
            }
        }
        ColorPlan::Rgb(lut) => {
            if cell.fg != fg_key {
                let c = lookup(lut, usize::from(cell.fg))?;
                write!(out, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)?;
            }
            if cell.bg != bg_key {
                let c = lookup(lut, usize::from(cell.bg))?;
                write!(out, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b)?;
            }
        }
    }
    Ok(())
}

/// Phase glyphe : émet exactement un caractère par cellule.
fn write_glyph<W: Write>(
    out: &mut W,
    plan: &GlyphPlan<'_>,
    cell: &Cell,
    ch_key: u16,
) -> Result<(), Error> {
    let glyph = match plan {
        GlyphPlan::None => SPACE,
        GlyphPlan::Direct => {
            if cell.ch == ch_key {
                SPACE
            } else {
                // un codepoint sans représentation (surrogate isolé)
                // devient une espace
                char::from_u32(u32::from(cell.ch)).unwrap_or(SPACE)
            }
        }
        GlyphPlan::Palette(lut) => {
            if cell.ch == ch_key {
                SPACE
            } else {
                lookup(lut, usize::from(cell.ch))?
            }
        }
    };
    write!(out, "{glyph}")?;
    Ok(())
}

/// Rend l'image dans `out`, bornée par le viewport.
///
/// Fonction pure de ses entrées : re-rendre la même image au même
/// viewport produit des octets identiques. Les rangées et colonnes de
/// l'image au-delà du viewport sont abandonnées, sans repli de ligne
/// ni mise à l'échelle.
///
/// # Errors
/// `InvalidViewport` si une dimension est nulle ; `MissingPalette` ou
/// `WrongPaletteType` si un mode palette n'a pas de palette conforme
/// liée (détecté avant toute écriture) ; `OutOfRangeIndex` si une
/// cellule indexe hors de sa palette ; toute erreur d'écriture du sink.
///
/// # Example
/// ```
/// use nuru_core::image::{ColorMode, GlyphMode, Image};
/// use nuru_render::{Viewport, render};
/// let mut img = Image::blank(1, 1, ColorMode::None, GlyphMode::Ascii);
/// img.cells[0].ch = u16::from(b'@');
/// let mut out = Vec::new();
/// render(&mut out, &img, None, None, Viewport { cols: 80, rows: 24 }).unwrap();
/// assert_eq!(out, b"@\x1b[0m\n");
/// ```
pub fn render<W: Write>(
    out: &mut W,
    img: &Image,
    glyphs: Option<&Palette>,
    colors: Option<&Palette>,
    viewport: Viewport,
) -> Result<(), Error> {
    if viewport.cols == 0 || viewport.rows == 0 {
        return Err(Error::InvalidViewport {
            cols: viewport.cols,
            rows: viewport.rows,
        });
    }
    let color = color_plan(img, colors)?;
    let glyph = glyph_plan(img, glyphs)?;

    let rows = img.rows.min(viewport.rows);
    let cols = img.cols.min(viewport.cols);
    log::trace!("Rendu de {cols}×{rows} cellules");

    for row in 0..rows {
        for col in 0..cols {
            let cell = img.cell(col, row);
            write_color(out, &color, cell, img.fg_key, img.bg_key)?;
            write_glyph(out, &glyph, cell, img.ch_key)?;
            out.write_all(SGR_RESET.as_bytes())?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport { cols: 80, rows: 24 };

    fn rendered(
        img: &Image,
        glyphs: Option<&Palette>,
        colors: Option<&Palette>,
        vp: Viewport,
    ) -> String {
        let mut out = Vec::new();
        render(&mut out, img, glyphs, colors, vp).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut img = Image::blank(4, 2, ColorMode::EightBit, GlyphMode::Ascii);
        img.fg_key = 255;
        img.bg_key = 255;
        for (i, cell) in img.cells.iter_mut().enumerate() {
            cell.ch = u16::from(b'a') + i as u16;
            cell.fg = i as u8;
            cell.bg = 255 - i as u8;
        }
        let first = rendered(&img, None, None, VP);
        let second = rendered(&img, None, None, VP);
        assert_eq!(first, second);
    }

    #[test]
    fn keyed_channels_emit_nothing() {
        let mut img = Image::blank(1, 1, ColorMode::EightBit, GlyphMode::Ascii);
        img.fg_key = 255;
        img.bg_key = 255;
        img.ch_key = 32;
        img.cells[0] = Cell { ch: 32, fg: 255, bg: 7 };
        let out = rendered(&img, None, None, VP);
        // fg et glyphe transparents : pas de SGR foreground, une espace
        assert!(!out.contains("38;5"));
        assert!(out.contains("\x1b[48;5;7m"));
        assert_eq!(out, "\x1b[48;5;7m \x1b[0m\n");
    }

    #[test]
    fn fully_keyed_cell_costs_one_space() {
        let mut img = Image::blank(1, 1, ColorMode::EightBit, GlyphMode::Unicode);
        img.fg_key = 255;
        img.bg_key = 255;
        img.ch_key = 0;
        img.cells[0] = Cell { ch: 0, fg: 255, bg: 255 };
        assert_eq!(rendered(&img, None, None, VP), " \x1b[0m\n");
    }

    #[test]
    fn viewport_clamps_rows_and_cols() {
        let mut img = Image::blank(10, 5, ColorMode::None, GlyphMode::Ascii);
        img.ch_key = 255;
        for cell in &mut img.cells {
            cell.ch = u16::from(b'x');
        }
        let out = rendered(&img, None, None, Viewport { cols: 3, rows: 2 });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert_eq!(line.matches('x').count(), 3);
        }
    }

    #[test]
    fn one_reset_per_rendered_cell() {
        let mut img = Image::blank(10, 5, ColorMode::None, GlyphMode::None);
        img.ch_key = 255;
        let out = rendered(&img, None, None, Viewport { cols: 3, rows: 2 });
        assert_eq!(out.matches("\x1b[0m").count(), 6);
        let out = rendered(&img, None, None, VP);
        assert_eq!(out.matches("\x1b[0m").count(), 50);
    }

    #[test]
    fn four_bit_fg_mapping() {
        let mut img = Image::blank(4, 1, ColorMode::FourBit, GlyphMode::None);
        img.fg_key = 255;
        img.bg_key = 255;
        for (cell, code) in img.cells.iter_mut().zip([0u8, 7, 8, 15]) {
            cell.fg = code;
            cell.bg = 255;
        }
        let out = rendered(&img, None, None, VP);
        for sgr in ["\x1b[30m", "\x1b[37m", "\x1b[90m", "\x1b[97m"] {
            assert!(out.contains(sgr), "séquence absente : {sgr:?}");
        }
    }

    #[test]
    fn four_bit_bg_is_fg_plus_ten() {
        let mut img = Image::blank(2, 1, ColorMode::FourBit, GlyphMode::None);
        img.fg_key = 255;
        img.bg_key = 255;
        img.cells[0] = Cell { ch: 0, fg: 255, bg: 0 };
        img.cells[1] = Cell { ch: 0, fg: 255, bg: 15 };
        let out = rendered(&img, None, None, VP);
        assert!(out.contains("\x1b[40m"));
        assert!(out.contains("\x1b[107m"));
    }

    #[test]
    fn missing_color_palette_fails_without_output() {
        let img = Image::blank(2, 2, ColorMode::Palette, GlyphMode::None);
        let mut out = Vec::new();
        let err = render(&mut out, &img, None, None, VP).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPalette { channel: Channel::Color }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_glyph_palette_fails_without_output() {
        let img = Image::blank(1, 1, ColorMode::None, GlyphMode::Palette);
        let mut out = Vec::new();
        let err = render(&mut out, &img, None, None, VP).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingPalette { channel: Channel::Glyph }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn wrong_palette_type_is_rejected() {
        let img = Image::blank(1, 1, ColorMode::None, GlyphMode::Palette);
        let pal = Palette::Color8(vec![0]);
        let mut out = Vec::new();
        let err = render(&mut out, &img, Some(&pal), None, VP).unwrap_err();
        assert!(matches!(err, Error::WrongPaletteType { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn rgb_palette_entry_emitted_exactly_once() {
        let mut entries = vec![Rgb::default(); 4];
        entries[3] = Rgb { r: 255, g: 0, b: 0 };
        let pal = Palette::ColorRgb(entries);
        let mut img = Image::blank(1, 1, ColorMode::Palette, GlyphMode::None);
        img.fg_key = 255;
        img.bg_key = 255;
        img.cells[0] = Cell { ch: 0, fg: 3, bg: 255 };
        let out = rendered(&img, None, Some(&pal), VP);
        assert_eq!(out.matches("\x1b[38;2;255;0;0m").count(), 1);
    }

    #[test]
    fn indexed_palette_resolves_through_lut() {
        let pal = Palette::Color8(vec![16, 196, 46]);
        let mut img = Image::blank(1, 1, ColorMode::Palette, GlyphMode::None);
        img.fg_key = 255;
        img.bg_key = 255;
        img.cells[0] = Cell { ch: 0, fg: 1, bg: 2 };
        let out = rendered(&img, None, Some(&pal), VP);
        assert!(out.contains("\x1b[38;5;196m"));
        assert!(out.contains("\x1b[48;5;46m"));
    }

    #[test]
    fn glyph_palette_resolves_through_lut() {
        let pal = Palette::Glyph(vec!['.', '#']);
        let mut img = Image::blank(2, 1, ColorMode::None, GlyphMode::Palette);
        img.ch_key = 255;
        img.cells[0].ch = 1;
        img.cells[1].ch = 255; // clé → espace
        let out = rendered(&img, Some(&pal), None, VP);
        assert_eq!(out, "#\x1b[0m \x1b[0m\n");
    }

    #[test]
    fn out_of_range_index_fails_fast() {
        let pal = Palette::Color8(vec![16]);
        let mut img = Image::blank(1, 1, ColorMode::Palette, GlyphMode::None);
        img.fg_key = 255;
        img.bg_key = 255;
        img.cells[0] = Cell { ch: 0, fg: 5, bg: 255 };
        let mut out = Vec::new();
        let err = render(&mut out, &img, None, Some(&pal), VP).unwrap_err();
        assert!(matches!(err, Error::OutOfRangeIndex { index: 5, len: 1 }));
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let img = Image::blank(1, 1, ColorMode::None, GlyphMode::None);
        let mut out = Vec::new();
        assert!(matches!(
            render(&mut out, &img, None, None, Viewport { cols: 0, rows: 24 }),
            Err(Error::InvalidViewport { cols: 0, rows: 24 })
        ));
        assert!(matches!(
            render(&mut out, &img, None, None, Viewport { cols: 80, rows: 0 }),
            Err(Error::InvalidViewport { cols: 80, rows: 0 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn glyph_mode_none_always_prints_a_space() {
        let mut img = Image::blank(1, 1, ColorMode::None, GlyphMode::None);
        img.cells[0].ch = u16::from(b'Z'); // ignoré par le mode
        assert_eq!(rendered(&img, None, None, VP), " \x1b[0m\n");
    }
}
