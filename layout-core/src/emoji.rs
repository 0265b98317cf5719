//! Lexical emoji detection.
//!
//! Detection is purely table-driven: a token is an emoji when its first
//! scalar falls in an Emoji_Presentation range, or when it carries a
//! forcing mark (variation selector 16 or the combining keycap). No
//! shaping or font data is consulted.

/// Variation selector 16: forces emoji presentation on the preceding
/// character (e.g. `☀` + VS16 = `☀️`).
pub const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Combining enclosing keycap, used by keycap sequences like `1️⃣`.
pub const COMBINING_KEYCAP: char = '\u{20E3}';

/// Zero-width joiner, glue inside multi-person/compound emoji.
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

/// Inclusive codepoint ranges with default emoji presentation.
/// Covers the mainstream emoji blocks; symbols that need VS16 to become
/// emoji are handled by the forcing rules instead.
const EMOJI_PRESENTATION_RANGES: &[(u32, u32)] = &[
    (0x231A, 0x231B),   // watch, hourglass
    (0x23E9, 0x23EC),   // fast-forward block
    (0x23F0, 0x23F0),   // alarm clock
    (0x23F3, 0x23F3),   // hourglass with sand
    (0x25FD, 0x25FE),   // small squares
    (0x2614, 0x2615),   // umbrella, hot beverage
    (0x2648, 0x2653),   // zodiac
    (0x267F, 0x267F),   // wheelchair
    (0x2693, 0x2693),   // anchor
    (0x26A1, 0x26A1),   // high voltage
    (0x26AA, 0x26AB),   // circles
    (0x26BD, 0x26BE),   // soccer, baseball
    (0x26C4, 0x26C5),   // snowman, sun behind cloud
    (0x26CE, 0x26CE),   // ophiuchus
    (0x26D4, 0x26D4),   // no entry
    (0x26EA, 0x26EA),   // church
    (0x26F2, 0x26F3),   // fountain, golf
    (0x26F5, 0x26F5),   // sailboat
    (0x26FA, 0x26FA),   // tent
    (0x26FD, 0x26FD),   // fuel pump
    (0x2705, 0x2705),   // check mark button
    (0x270A, 0x270B),   // fists
    (0x2728, 0x2728),   // sparkles
    (0x274C, 0x274C),   // cross mark
    (0x274E, 0x274E),   // cross mark button
    (0x2753, 0x2755),   // question/exclamation ornaments
    (0x2757, 0x2757),   // exclamation mark
    (0x2795, 0x2797),   // heavy math signs
    (0x27B0, 0x27B0),   // curly loop
    (0x27BF, 0x27BF),   // double curly loop
    (0x2B1B, 0x2B1C),   // large squares
    (0x2B50, 0x2B50),   // star
    (0x2B55, 0x2B55),   // hollow red circle
    (0x1F004, 0x1F004), // mahjong red dragon
    (0x1F0CF, 0x1F0CF), // joker
    (0x1F18E, 0x1F18E), // AB button
    (0x1F191, 0x1F19A), // squared CL..VS
    (0x1F1E6, 0x1F1FF), // regional indicators
    (0x1F201, 0x1F201), // squared katakana koko
    (0x1F21A, 0x1F21A), // squared CJK "free of charge"
    (0x1F22F, 0x1F22F), // squared CJK "reserved"
    (0x1F232, 0x1F236), // squared CJK block
    (0x1F238, 0x1F23A), // squared CJK block
    (0x1F250, 0x1F251), // circled CJK
    (0x1F300, 0x1F320), // weather and landscape
    (0x1F32D, 0x1F335), // food block start
    (0x1F337, 0x1F37C), // plants, food
    (0x1F37E, 0x1F393), // celebration
    (0x1F3A0, 0x1F3CA), // activities
    (0x1F3CF, 0x1F3D3), // sports equipment
    (0x1F3E0, 0x1F3F0), // buildings
    (0x1F3F4, 0x1F3F4), // black flag
    (0x1F3F8, 0x1F43E), // objects, animals
    (0x1F440, 0x1F440), // eyes
    (0x1F442, 0x1F4FC), // body parts, people, objects
    (0x1F4FF, 0x1F53D), // objects, symbols
    (0x1F54B, 0x1F54E), // religious buildings
    (0x1F550, 0x1F567), // clock faces
    (0x1F57A, 0x1F57A), // man dancing
    (0x1F595, 0x1F596), // hands
    (0x1F5A4, 0x1F5A4), // black heart
    (0x1F5FB, 0x1F64F), // places, smileys, gestures
    (0x1F680, 0x1F6C5), // transport
    (0x1F6CC, 0x1F6CC), // person in bed
    (0x1F6D0, 0x1F6D2), // symbols, shopping trolley
    (0x1F6D5, 0x1F6D7), // hindu temple, hut, elevator
    (0x1F6DC, 0x1F6DF), // transport additions
    (0x1F6EB, 0x1F6EC), // airplane departure/arrival
    (0x1F6F4, 0x1F6FC), // scooters, pickup truck
    (0x1F7E0, 0x1F7EB), // colored circles and squares
    (0x1F7F0, 0x1F7F0), // heavy equals sign
    (0x1F90C, 0x1F93A), // gestures, people
    (0x1F93C, 0x1F945), // sports
    (0x1F947, 0x1F9FF), // medals through geometric objects
    (0x1FA70, 0x1FA7C), // objects
    (0x1FA80, 0x1FA89), // objects
    (0x1FA90, 0x1FABD), // animals, objects
    (0x1FABF, 0x1FAC5), // people additions
    (0x1FACE, 0x1FADB), // animals, food additions
    (0x1FAE0, 0x1FAE8), // faces
    (0x1FAF0, 0x1FAF8), // hands
];

/// Skin tone modifiers attach to the preceding emoji.
const TONE_MODIFIERS: (u32, u32) = (0x1F3FB, 0x1F3FF);

/// Whether `c` has default emoji presentation.
pub fn is_emoji_base(c: char) -> bool {
    let cp = c as u32;
    EMOJI_PRESENTATION_RANGES
        .iter()
        .any(|&(lo, hi)| cp >= lo && cp <= hi)
}

/// Whether `c` continues an emoji sequence rather than starting a new
/// token: joiners, forcing marks, and skin tone modifiers.
pub fn is_emoji_extender(c: char) -> bool {
    let cp = c as u32;
    c == VARIATION_SELECTOR_16
        || c == COMBINING_KEYCAP
        || c == ZERO_WIDTH_JOINER
        || (cp >= TONE_MODIFIERS.0 && cp <= TONE_MODIFIERS.1)
}

/// Whether a complete token renders as an emoji: it starts with an
/// emoji-presentation scalar, or a forcing mark appears anywhere in it
/// (keycaps, VS16-bearing symbols).
pub fn is_emoji(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        None => false,
        Some(first) => {
            is_emoji_base(first)
                || token
                    .chars()
                    .any(|c| c == VARIATION_SELECTOR_16 || c == COMBINING_KEYCAP)
        }
    }
}

/// Whether any scalar in `text` would begin an emoji token.
pub fn contains_emoji(text: &str) -> bool {
    text.chars()
        .any(|c| is_emoji_base(c) || c == VARIATION_SELECTOR_16 || c == COMBINING_KEYCAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_emoji_detected() {
        assert!(is_emoji("😀"));
        assert!(is_emoji("🎉"));
        assert!(is_emoji("⚡"));
        assert!(is_emoji("🇧🇷"));
    }

    #[test]
    fn plain_text_not_detected() {
        assert!(!is_emoji("hello"));
        assert!(!is_emoji("a"));
        assert!(!is_emoji("*"));
        assert!(!is_emoji(""));
    }

    #[test]
    fn forcing_marks_detected() {
        // Sun (text presentation by default) forced by VS16.
        assert!(is_emoji("☀\u{FE0F}"));
        assert!(!is_emoji("☀"));
        // Keycap sequence: digit + VS16 + combining keycap.
        assert!(is_emoji("1\u{FE0F}\u{20E3}"));
    }

    #[test]
    fn tone_modifier_extends() {
        assert!(is_emoji_extender('\u{1F3FB}'));
        assert!(is_emoji_extender(ZERO_WIDTH_JOINER));
        assert!(!is_emoji_extender('x'));
    }
}
