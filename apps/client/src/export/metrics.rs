//! Static Helvetica metrics and A4 page geometry for PDF export.
//!
//! Character widths are in em units (1/1000 of the AFM glyph widths) and
//! cover ASCII 0x20..=0x7E. Index = (char as usize) - 32. Bold text is
//! measured with the regular table, which underestimates it slightly.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Geometry of the single exported page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_spacing: f32,
    /// Extra gap above a section heading, in mm.
    pub section_gap_mm: f32,
}

impl PageSpec {
    /// A4 portrait, 15 mm margins, 11 pt body text.
    pub fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 15.0,
            heading_size_pt: 14.0,
            body_size_pt: 11.0,
            line_spacing: 1.4,
            section_gap_mm: 4.0,
        }
    }

    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn line_height_mm(&self, size_pt: f32) -> f32 {
        size_pt * self.line_spacing * MM_PER_PT
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: [f32; 95] = [
    // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
    0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
    // 0-9
    0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
    // :      ;      <      =      >      ?      @
    0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
    // A      B      C      D      E      F      G      H      I      J      K      L      M
    0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
    // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
    0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
    // [      \      ]      ^      _      `
    0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
    // a      b      c      d      e      f      g      h      i      j      k      l      m
    0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
    // n      o      p      q      r      s      t      u      v      w      x      y      z
    0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
    // {      |      }      ~
    0.334, 0.260, 0.334, 0.584,
];

/// Fallback width for characters outside printable ASCII.
const AVERAGE_CHAR_WIDTH: f32 = 0.556;

/// Drawn in place of characters the builtin fonts have no code for.
pub const REPLACEMENT_CHAR: char = '?';

/// WinAnsiEncoding code points 0x80..=0x9F that are not Latin-1.
const WIN_ANSI_EXTRAS: [char; 27] = [
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// True when `c` has a code in WinAnsiEncoding, the only encoding the
/// builtin Helvetica fonts can draw.
pub fn is_encodable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&c)
}

/// Swaps every character the builtin fonts cannot draw for
/// [`REPLACEMENT_CHAR`]. Returns the drawable text and the number of swaps.
pub fn to_encodable(text: &str) -> (String, usize) {
    let mut replaced = 0;
    let cleaned = text
        .chars()
        .map(|c| {
            if is_encodable(c) || c.is_whitespace() {
                c
            } else {
                replaced += 1;
                REPLACEMENT_CHAR
            }
        })
        .collect();
    (cleaned, replaced)
}

/// Rendered width of `s` in em units.
pub fn measure_em(s: &str) -> f32 {
    s.chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[code - 32]
            } else {
                AVERAGE_CHAR_WIDTH
            }
        })
        .sum()
}

/// Rendered width of `s` in millimetres at `size_pt`.
pub fn measure_mm(s: &str, size_pt: f32) -> f32 {
    measure_em(s) * size_pt * MM_PER_PT
}

/// Greedy word wrap to `max_width_mm`.
///
/// A single word wider than the line keeps a line of its own rather than
/// being split. Whitespace-only input yields no lines.
pub fn wrap(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let space = measure_mm(" ", size_pt);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_width = measure_mm(word, size_pt);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width > max_width_mm {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
