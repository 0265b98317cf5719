/// Logical font roles the engine selects between when rendering styled
/// text. Providers map each role to an actual face; missing roles fall
/// back along `BoldItalic → Bold → Regular`, `Italic → Regular`, and
/// `Emoji → Regular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
    BoldItalic,
    Emoji,
}

/// Measurement port consumed by the engine.
///
/// `width_of` must be pure over its inputs: the same (face, size, text)
/// triple always yields the same width. The engine caches on that
/// assumption.
pub trait FontMetrics {
    /// Advance width of `text` at `size` points.
    fn width_of(&self, face: FontFace, size: f64, text: &str) -> f64;

    /// Nominal line box height at `size` points. Explicit line-height
    /// configuration on a text element overrides this.
    fn line_height(&self, face: FontFace, size: f64) -> f64;

    /// Whether the provider carries a dedicated face for this role.
    fn has_face(&self, face: FontFace) -> bool;
}

/// Resolve a requested role against the provider's available faces.
pub fn resolve_face<M: FontMetrics + ?Sized>(metrics: &M, requested: FontFace) -> FontFace {
    use FontFace::*;
    if metrics.has_face(requested) {
        return requested;
    }
    match requested {
        BoldItalic if metrics.has_face(Bold) => Bold,
        _ => Regular,
    }
}

/// Character widths for Helvetica (ASCII 32..=126) in units of 1/1000 em.
/// Source: Adobe Helvetica AFM data.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, // 32 space
    278, // 33 !
    355, // 34 "
    556, // 35 #
    556, // 36 $
    889, // 37 %
    667, // 38 &
    191, // 39 '
    333, // 40 (
    333, // 41 )
    389, // 42 *
    584, // 43 +
    278, // 44 ,
    333, // 45 -
    278, // 46 .
    278, // 47 /
    556, // 48 0
    556, // 49 1
    556, // 50 2
    556, // 51 3
    556, // 52 4
    556, // 53 5
    556, // 54 6
    556, // 55 7
    556, // 56 8
    556, // 57 9
    278, // 58 :
    278, // 59 ;
    584, // 60 <
    584, // 61 =
    584, // 62 >
    556, // 63 ?
    1015, // 64 @
    667, // 65 A
    667, // 66 B
    722, // 67 C
    722, // 68 D
    667, // 69 E
    611, // 70 F
    778, // 71 G
    722, // 72 H
    278, // 73 I
    500, // 74 J
    667, // 75 K
    556, // 76 L
    833, // 77 M
    722, // 78 N
    778, // 79 O
    667, // 80 P
    778, // 81 Q
    722, // 82 R
    667, // 83 S
    611, // 84 T
    722, // 85 U
    667, // 86 V
    944, // 87 W
    667, // 88 X
    667, // 89 Y
    611, // 90 Z
    278, // 91 [
    278, // 92 backslash
    278, // 93 ]
    469, // 94 ^
    556, // 95 _
    333, // 96 `
    556, // 97 a
    556, // 98 b
    500, // 99 c
    556, // 100 d
    556, // 101 e
    278, // 102 f
    556, // 103 g
    556, // 104 h
    222, // 105 i
    222, // 106 j
    500, // 107 k
    222, // 108 l
    833, // 109 m
    556, // 110 n
    556, // 111 o
    556, // 112 p
    556, // 113 q
    333, // 114 r
    500, // 115 s
    278, // 116 t
    556, // 117 u
    500, // 118 v
    722, // 119 w
    500, // 120 x
    500, // 121 y
    500, // 122 z
    334, // 123 {
    260, // 124 |
    334, // 125 }
    584, // 126 ~
];

/// Character widths for Helvetica-Bold (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe Helvetica-Bold AFM data.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, // 32 space
    333, // 33 !
    474, // 34 "
    556, // 35 #
    556, // 36 $
    889, // 37 %
    722, // 38 &
    238, // 39 '
    333, // 40 (
    333, // 41 )
    389, // 42 *
    584, // 43 +
    278, // 44 ,
    333, // 45 -
    278, // 46 .
    278, // 47 /
    556, // 48 0
    556, // 49 1
    556, // 50 2
    556, // 51 3
    556, // 52 4
    556, // 53 5
    556, // 54 6
    556, // 55 7
    556, // 56 8
    556, // 57 9
    333, // 58 :
    333, // 59 ;
    584, // 60 <
    584, // 61 =
    584, // 62 >
    611, // 63 ?
    975, // 64 @
    722, // 65 A
    722, // 66 B
    722, // 67 C
    722, // 68 D
    667, // 69 E
    611, // 70 F
    778, // 71 G
    722, // 72 H
    278, // 73 I
    556, // 74 J
    722, // 75 K
    611, // 76 L
    833, // 77 M
    722, // 78 N
    778, // 79 O
    667, // 80 P
    778, // 81 Q
    722, // 82 R
    667, // 83 S
    611, // 84 T
    722, // 85 U
    667, // 86 V
    944, // 87 W
    667, // 88 X
    667, // 89 Y
    611, // 90 Z
    333, // 91 [
    278, // 92 backslash
    333, // 93 ]
    584, // 94 ^
    556, // 95 _
    333, // 96 `
    556, // 97 a
    611, // 98 b
    556, // 99 c
    611, // 100 d
    556, // 101 e
    333, // 102 f
    611, // 103 g
    611, // 104 h
    278, // 105 i
    278, // 106 j
    556, // 107 k
    278, // 108 l
    889, // 109 m
    611, // 110 n
    611, // 111 o
    611, // 112 p
    611, // 113 q
    389, // 114 r
    556, // 115 s
    333, // 116 t
    611, // 117 u
    556, // 118 v
    778, // 119 w
    556, // 120 x
    556, // 121 y
    500, // 122 z
    389, // 123 {
    280, // 124 |
    389, // 125 }
    584, // 126 ~
];

/// Default width for characters outside the mapped range (1/1000 em).
const DEFAULT_WIDTH: u16 = 278;

/// Line box multiplier for the builtin faces.
const BUILTIN_LINE_FACTOR: f64 = 1.2;

/// Metrics provider backed by the builtin Helvetica family.
///
/// The oblique cuts share the upright advance widths (true of the
/// Helvetica AFM data), so only the Regular and Bold tables are stored.
/// There is no emoji face; emoji tokens fall back to Regular.
#[derive(Debug, Default)]
pub struct BuiltinFontMetrics;

impl BuiltinFontMetrics {
    pub fn new() -> Self {
        BuiltinFontMetrics
    }

    /// Width of a character in 1/1000 em units.
    pub fn char_width(face: FontFace, ch: char) -> u16 {
        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return DEFAULT_WIDTH;
        }
        let index = (code - 32) as usize;
        match face {
            FontFace::Regular | FontFace::Italic | FontFace::Emoji => HELVETICA_WIDTHS[index],
            FontFace::Bold | FontFace::BoldItalic => HELVETICA_BOLD_WIDTHS[index],
        }
    }
}

impl FontMetrics for BuiltinFontMetrics {
    fn width_of(&self, face: FontFace, size: f64, text: &str) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| Self::char_width(face, ch) as u32)
            .sum();
        total as f64 * size / 1000.0
    }

    fn line_height(&self, _face: FontFace, size: f64) -> f64 {
        size * BUILTIN_LINE_FACTOR
    }

    fn has_face(&self, face: FontFace) -> bool {
        !matches!(face, FontFace::Emoji)
    }
}
