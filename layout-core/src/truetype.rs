use std::collections::BTreeMap;

use crate::fonts::{FontFace, FontMetrics};

/// Metrics parsed from a TrueType face: the character map, horizontal
/// advances, and the vertical extent used for line boxes. Glyph outlines
/// are never touched; this type exists purely to answer width and
/// line-height queries.
pub struct TrueTypeFont {
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    /// Unicode codepoint -> glyph ID
    cmap: BTreeMap<u32, u16>,
    /// Glyph ID -> advance width in font units
    glyph_widths: BTreeMap<u16, u16>,
    default_width: u16,
}

impl TrueTypeFont {
    /// Parse metrics from raw `.ttf` bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        let face =
            ttf_parser::Face::parse(data, 0).map_err(|e| format!("failed to parse TTF: {}", e))?;

        let units_per_em = face.units_per_em();
        let ascent = face.ascender();
        let descent = face.descender();

        // Build cmap: Unicode -> GlyphID
        let mut cmap = BTreeMap::new();
        let subtables = face
            .tables()
            .cmap
            .ok_or_else(|| "font has no cmap table".to_string())?;
        for subtable in subtables.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let Some(gid) = subtable.glyph_index(cp) {
                    cmap.insert(cp, gid.0);
                }
            });
        }

        // Build glyph widths from hmtx
        let num_glyphs = face.number_of_glyphs();
        let mut glyph_widths = BTreeMap::new();
        for gid in 0..num_glyphs {
            let glyph_id = ttf_parser::GlyphId(gid);
            let width = face.glyph_hor_advance(glyph_id).unwrap_or(0);
            glyph_widths.insert(gid, width);
        }

        // Default width = width of glyph 0 (notdef)
        let default_width = glyph_widths.get(&0).copied().unwrap_or(0);

        Ok(TrueTypeFont {
            units_per_em,
            ascent,
            descent,
            cmap,
            glyph_widths,
            default_width,
        })
    }

    /// Advance of a character in font units.
    fn char_advance(&self, ch: char) -> u16 {
        let gid = self.cmap.get(&(ch as u32)).copied().unwrap_or(0);
        self.glyph_widths
            .get(&gid)
            .copied()
            .unwrap_or(self.default_width)
    }

    /// Measure text width in points.
    pub fn measure_text(&self, text: &str, size: f64) -> f64 {
        let total: u64 = text.chars().map(|ch| self.char_advance(ch) as u64).sum();
        total as f64 * size / self.units_per_em as f64
    }

    /// Line height for a given size using ascent - descent.
    pub fn line_height(&self, size: f64) -> f64 {
        let height = (self.ascent as i32 - self.descent as i32) as f64 / self.units_per_em as f64;
        height * size
    }
}

/// A `FontMetrics` provider assembled from role-assigned TrueType faces.
/// Only `regular` is required; missing roles resolve through the
/// standard fallback chain.
pub struct TrueTypeMetrics {
    regular: TrueTypeFont,
    bold: Option<TrueTypeFont>,
    italic: Option<TrueTypeFont>,
    bold_italic: Option<TrueTypeFont>,
    emoji: Option<TrueTypeFont>,
}

impl TrueTypeMetrics {
    pub fn new(regular: TrueTypeFont) -> Self {
        TrueTypeMetrics {
            regular,
            bold: None,
            italic: None,
            bold_italic: None,
            emoji: None,
        }
    }

    pub fn set_bold(&mut self, font: TrueTypeFont) -> &mut Self {
        self.bold = Some(font);
        self
    }

    pub fn set_italic(&mut self, font: TrueTypeFont) -> &mut Self {
        self.italic = Some(font);
        self
    }

    pub fn set_bold_italic(&mut self, font: TrueTypeFont) -> &mut Self {
        self.bold_italic = Some(font);
        self
    }

    pub fn set_emoji(&mut self, font: TrueTypeFont) -> &mut Self {
        self.emoji = Some(font);
        self
    }

    fn face(&self, face: FontFace) -> &TrueTypeFont {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontFace::Italic => self.italic.as_ref().unwrap_or(&self.regular),
            FontFace::BoldItalic => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .unwrap_or(&self.regular),
            FontFace::Emoji => self.emoji.as_ref().unwrap_or(&self.regular),
        }
    }
}

impl FontMetrics for TrueTypeMetrics {
    fn width_of(&self, face: FontFace, size: f64, text: &str) -> f64 {
        self.face(face).measure_text(text, size)
    }

    fn line_height(&self, face: FontFace, size: f64) -> f64 {
        self.face(face).line_height(size)
    }

    fn has_face(&self, face: FontFace) -> bool {
        match face {
            FontFace::Regular => true,
            FontFace::Bold => self.bold.is_some(),
            FontFace::Italic => self.italic.is_some(),
            FontFace::BoldItalic => self.bold_italic.is_some(),
            FontFace::Emoji => self.emoji.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(TrueTypeFont::from_bytes(b"not a font").is_err());
        assert!(TrueTypeFont::from_bytes(&[]).is_err());
    }
}
