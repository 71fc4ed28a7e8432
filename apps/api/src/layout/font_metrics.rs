//! Static font-metric tables for the builtin PDF font families.
//!
//! Character widths are in em units (relative to font size). The tables are
//! an approximation of the Adobe core-font metrics; greedy word-wrap over
//! them matches the PDF output closely enough to place line breaks, while
//! borderline characters are absorbed by the renderer's margins.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

/// Millimetres per PostScript point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// The builtin font families used by the three resume templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Modern and creative templates.
    Helvetica,
    /// Classic template.
    TimesRoman,
}

/// Converts a column width in millimetres to em units at the given font size.
pub fn max_line_em(width_mm: f32, font_size_pt: f32) -> f32 {
    width_mm / (font_size_pt * MM_PER_PT)
}

/// Static character-width table for a font family.
///
/// All widths are in em units at 1em (i.e., at the rendered font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wraps a string into lines no wider than `max_em`.
    ///
    /// A single word wider than the line gets a line of its own rather than
    /// being split mid-word. Empty input yields no lines.
    pub fn wrap_words(&self, s: &str, max_em: f32) -> Vec<String> {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_w = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + self.space_width + word_w > max_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_w;
            }
        }
        lines.push(current);
        lines
    }
}

/// Helvetica (Adobe core sans-serif).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.28, 0.28, 0.36, 0.56, 0.56, 0.89, 0.67, 0.19, 0.33, 0.33, 0.39, 0.58, 0.28, 0.33, 0.28, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.58, 0.58, 0.58, 0.56, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.67, 0.72, 0.72, 0.67, 0.61, 0.78, 0.72, 0.28, 0.50, 0.67, 0.56, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.78, 0.67, 0.78, 0.72, 0.67, 0.61, 0.72, 0.67, 0.94, 0.67, 0.67, 0.61,
        // [     \     ]     ^     _     `
        0.28, 0.28, 0.28, 0.47, 0.56, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.28, 0.56, 0.56, 0.22, 0.22, 0.50, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.50, 0.28, 0.56, 0.50, 0.72, 0.50, 0.50, 0.50,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.58,
    ],
    average_char_width: 0.53,
    space_width: 0.28,
};

/// Times Roman (Adobe core serif). Narrower lowercase than Helvetica.
static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesRoman,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.33, 0.41, 0.50, 0.50, 0.83, 0.78, 0.18, 0.33, 0.33, 0.50, 0.56, 0.25, 0.33, 0.25, 0.28,
        // 0     1     2     3     4     5     6     7     8     9
        0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50, 0.50,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.56, 0.56, 0.56, 0.44, 0.92,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.72, 0.67, 0.67, 0.72, 0.61, 0.56, 0.72, 0.72, 0.33, 0.39, 0.72, 0.61, 0.89,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.72, 0.56, 0.72, 0.67, 0.56, 0.61, 0.72, 0.72, 0.94, 0.72, 0.72, 0.61,
        // [     \     ]     ^     _     `
        0.33, 0.28, 0.33, 0.47, 0.50, 0.33,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.44, 0.50, 0.44, 0.50, 0.44, 0.33, 0.50, 0.50, 0.28, 0.28, 0.50, 0.28, 0.78,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.50, 0.50, 0.50, 0.33, 0.39, 0.28, 0.50, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.48, 0.20, 0.48, 0.54,
    ],
    average_char_width: 0.50,
    space_width: 0.25,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Helvetica => &HELVETICA_TABLE,
        FontFamily::TimesRoman => &TIMES_ROMAN_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.28).abs() < 1e-4,
            "space width should be 0.28, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_wrap_words_empty_yields_no_lines() {
        let metrics = get_metrics(FontFamily::Helvetica);
        assert!(metrics.wrap_words("", 40.0).is_empty());
        assert!(metrics.wrap_words("   ", 40.0).is_empty());
    }

    #[test]
    fn test_wrap_words_short_string_single_line() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let lines = metrics.wrap_words("Lead Product Engineer", 40.0);
        assert_eq!(lines, vec!["Lead Product Engineer"]);
    }

    #[test]
    fn test_wrap_words_breaks_between_words() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let text = "word ".repeat(30);
        let lines = metrics.wrap_words(text.trim(), 10.0);
        assert!(lines.len() > 1, "30 words at 10em must wrap");
        for line in &lines {
            assert!(
                metrics.measure_str(line) <= 10.0 + 1e-3,
                "line '{line}' exceeds the wrap width"
            );
        }
        // no words lost
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), 30);
    }

    #[test]
    fn test_wrap_words_oversized_word_gets_own_line() {
        let metrics = get_metrics(FontFamily::Helvetica);
        let lines = metrics.wrap_words("a incomprehensibilities b", 4.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "incomprehensibilities");
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "experience with distributed resume pipelines";
        let helvetica = get_metrics(FontFamily::Helvetica);
        let times = get_metrics(FontFamily::TimesRoman);
        assert!(times.measure_str(text) < helvetica.measure_str(text));
    }

    #[test]
    fn test_max_line_em_letter_body() {
        // 180mm of usable width at 10pt is roughly 51em
        let em = max_line_em(180.0, 10.0);
        assert!(em > 45.0 && em < 55.0, "got {em}");
    }
}
