//! Static character-width tables for the built-in PDF fonts used by the CV templates.
//!
//! Widths are in em units (relative to font size), taken from the standard AFM metrics
//! of the base-14 fonts. Tables cover ASCII 0x20..=0x7E (95 printable characters);
//! index = (char as usize) - 32. Anything else falls back to `average_char_width`.

use crate::cv::template::FontFace;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Marker appended to clipped text.
pub const ELLIPSIS: &str = "...";

/// Static character-width table for a font face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
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

    /// Width of `s` in millimetres at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt / PT_PER_MM
    }

    /// Cuts `text` so that it, plus a trailing `...`, fits `max_width_mm`.
    /// Text that already fits is returned unchanged.
    pub fn truncate_to_width(&self, text: &str, size_pt: f32, max_width_mm: f32) -> String {
        if self.width_mm(text, size_pt) <= max_width_mm {
            return text.to_string();
        }
        let mut kept: String = text.to_string();
        while !kept.is_empty() {
            kept.pop();
            let candidate = format!("{}{ELLIPSIS}", kept.trim_end());
            if self.width_mm(&candidate, size_pt) <= max_width_mm {
                return candidate;
            }
        }
        ELLIPSIS.to_string()
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_mm` at `size_pt`.
    ///
    /// A single word wider than the line is kept whole on its own line. Explicit
    /// newlines in `text` start a new line. Blank input yields no lines.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let max_width_em = max_width_mm * PT_PER_MM / size_pt;
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_str(word);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + self.space_width + word_w > max_width_em {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += self.space_width + word_w;
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
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
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.480,
    space_width: 0.250,
};

pub fn get_metrics(font: FontFace) -> &'static FontMetricTable {
    match font {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::TimesRoman => &TIMES_ROMAN_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(FontFace::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontFace::TimesRoman);
        assert!((metrics.measure_str("ş") - metrics.average_char_width).abs() < 1e-6);
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Kıdemli Yazılım Geliştirici";
        assert!(
            get_metrics(FontFace::TimesRoman).measure_str(text)
                < get_metrics(FontFace::Helvetica).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_blank_yields_no_lines() {
        assert!(get_metrics(FontFace::Helvetica).wrap("   ", 10.0, 50.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = get_metrics(FontFace::Helvetica).wrap("Merhaba dünya", 10.0, 100.0);
        assert_eq!(lines, vec!["Merhaba dünya"]);
    }

    #[test]
    fn test_wrap_long_text_respects_width() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_mm(line, 10.0) <= 60.0 + 1e-3, "overlong line {line:?}");
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined.len(), 60);
    }

    #[test]
    fn test_wrap_keeps_oversized_word_whole() {
        let long_word = "x".repeat(200);
        let lines = get_metrics(FontFace::Helvetica).wrap(&long_word, 10.0, 20.0);
        assert_eq!(lines, vec![long_word]);
    }

    #[test]
    fn test_truncate_to_width_keeps_fitting_text() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.truncate_to_width("Ada Lovelace", 10.0, 100.0), "Ada Lovelace");
    }

    #[test]
    fn test_truncate_to_width_clips_with_ellipsis() {
        let metrics = get_metrics(FontFace::Helvetica);
        let text = "cok.uzun.bir.eposta.adresi@ornek-sirket.com.tr ".repeat(5);
        let clipped = metrics.truncate_to_width(&text, 10.0, 40.0);
        assert!(clipped.ends_with(ELLIPSIS), "got {clipped:?}");
        assert!(metrics.width_mm(&clipped, 10.0) <= 40.0);
        assert!(text.starts_with(clipped.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn test_wrap_honours_explicit_newlines() {
        let lines = get_metrics(FontFace::Helvetica).wrap("bir\niki", 10.0, 100.0);
        assert_eq!(lines, vec!["bir", "iki"]);
    }
}
