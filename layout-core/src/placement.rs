use crate::element::{AlignX, AlignY};
use crate::markdown::StyledWord;
use crate::wrap::WrappedLine;

/// A maximal group of adjacent same-styled words on one line, rendered
/// with a single font face.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub is_emoji: bool,
    /// The consumer should substitute a raster image for this run.
    pub image_backed: bool,
    pub width: f64,
}

/// Total height of a wrapped text block. Each line contributes its own
/// height; consecutive lines are separated by `advance − font_size`, so
/// a block of n uniform lines spans `font_size + (n−1)·advance`.
pub fn text_height(lines: &[WrappedLine], advance: f64, font_size: f64) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let heights: f64 = lines.iter().map(|l| l.height).sum();
    heights + (lines.len() - 1) as f64 * (advance - font_size)
}

/// Horizontal offset of a line inside its content box.
pub fn line_x_offset(align: AlignX, avail: f64, line_width: f64) -> f64 {
    match align {
        AlignX::Left => 0.0,
        AlignX::Center => (avail - line_width) / 2.0,
        AlignX::Right => avail - line_width,
    }
}

/// Vertical offset of a text block inside its content box.
pub fn block_y_offset(align: AlignY, avail: f64, block_height: f64) -> f64 {
    match align {
        AlignY::Top => 0.0,
        AlignY::Center => (avail - block_height) / 2.0,
        AlignY::Bottom => avail - block_height,
    }
}

/// Group a line's words into runs: adjacent tokens with the same style
/// key merge, concatenating text and summing widths. Hard-break tokens
/// carry no glyphs and are skipped.
pub fn merge_runs(words: &[StyledWord]) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    for word in words {
        if word.is_hard_break {
            continue;
        }
        match runs.last_mut() {
            Some(run)
                if (run.bold, run.italic, run.is_emoji, run.image_backed) == word.style_key() =>
            {
                run.text.push_str(&word.text);
                run.width += word.width;
            }
            _ => runs.push(TextRun {
                text: word.text.clone(),
                bold: word.bold,
                italic: word.italic,
                is_emoji: word.is_emoji,
                image_backed: word.image_backed,
                width: word.width,
            }),
        }
    }
    runs
}
