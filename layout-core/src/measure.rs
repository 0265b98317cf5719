use std::collections::HashMap;

use crate::error::Warning;
use crate::fonts::{resolve_face, FontFace, FontMetrics};
use crate::markdown::StyledWord;

/// Font role selected by a token's style flags. Emoji wins over weight
/// and slant.
pub fn face_for(bold: bool, italic: bool, emoji: bool) -> FontFace {
    if emoji {
        FontFace::Emoji
    } else {
        match (bold, italic) {
            (false, false) => FontFace::Regular,
            (true, false) => FontFace::Bold,
            (false, true) => FontFace::Italic,
            (true, true) => FontFace::BoldItalic,
        }
    }
}

/// Per-engine width memo keyed by (face, size, text). Sizes are keyed by
/// their bit pattern; the cache never changes results, only cost, and is
/// discarded with the engine.
#[derive(Default)]
pub struct WidthCache {
    map: HashMap<(FontFace, u64, String), f64>,
}

impl WidthCache {
    pub fn new() -> Self {
        WidthCache::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Raw width from the port, memoized. Fallback handling belongs to
    /// the caller so the warning carries token context.
    fn width_of(&mut self, metrics: &dyn FontMetrics, face: FontFace, size: f64, text: &str) -> f64 {
        let key = (face, size.to_bits(), text.to_string());
        if let Some(&w) = self.map.get(&key) {
            return w;
        }
        let w = metrics.width_of(face, size, text);
        self.map.insert(key, w);
        w
    }
}

/// Assign a width and height to every token.
///
/// Each token is measured in the face its style selects, after fallback
/// resolution against the provider. A port that returns NaN or a
/// negative width gets the heuristic `chars · size / 2` substituted and
/// a warning recorded. Hard breaks occupy no width but keep the font
/// height so empty lines are as tall as text lines.
pub fn measure_words(
    words: &mut [StyledWord],
    metrics: &dyn FontMetrics,
    size: f64,
    use_image_for_emojis: bool,
    cache: &mut WidthCache,
    warnings: &mut Vec<Warning>,
    element_id: &str,
) {
    for word in words.iter_mut() {
        word.height = size;
        if word.is_hard_break {
            word.width = 0.0;
            continue;
        }
        word.image_backed = use_image_for_emojis && word.is_emoji;

        let face = resolve_face(metrics, face_for(word.bold, word.italic, word.is_emoji));
        let raw = cache.width_of(metrics, face, size, &word.text);
        if raw.is_finite() && raw >= 0.0 {
            word.width = raw;
        } else {
            word.width = word.text.chars().count() as f64 * size / 2.0;
            tracing::warn!(
                element = element_id,
                text = word.text.as_str(),
                "font port returned an unusable width; substituting heuristic"
            );
            warnings.push(Warning::MeasurementFallback {
                element: element_id.to_string(),
                text: word.text.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_table_matches_style_flags() {
        assert_eq!(face_for(false, false, false), FontFace::Regular);
        assert_eq!(face_for(true, false, false), FontFace::Bold);
        assert_eq!(face_for(false, true, false), FontFace::Italic);
        assert_eq!(face_for(true, true, false), FontFace::BoldItalic);
        // Emoji overrides weight and slant.
        assert_eq!(face_for(true, true, true), FontFace::Emoji);
    }
}
