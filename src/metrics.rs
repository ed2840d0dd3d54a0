use serde::{Deserialize, Serialize};

/// The two weights of the Helvetica family the documents are typeset in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Advance widths of Helvetica for the codepoints 32 to 126, in thousandths of an em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths of Helvetica-Bold for the codepoints 32 to 126, in thousandths of an em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const BULLET_WIDTH: u16 = 350;
const FALLBACK_WIDTH: u16 = 556;

/// Points per millimetre.
const POINTS_PER_MILLIMETER: f32 = 72.0 / 25.4;

fn character_width(character: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match character {
        ' '..='~' => table[character as usize - ' ' as usize],
        '•' => BULLET_WIDTH,
        _ => FALLBACK_WIDTH,
    }
}

/// Measures the width of a single line of text in millimetres, for a font size given in points.
pub fn text_width(text: &str, weight: FontWeight, font_size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|character| u32::from(character_width(character, weight)))
        .sum();
    units as f32 / 1000.0 * font_size / POINTS_PER_MILLIMETER
}

/// Breaks `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines always start a new line. Words are packed greedily, a word that does not fit
/// on a line of its own is split between characters. Empty text produces no lines at all.
pub fn wrap_text(text: &str, weight: FontWeight, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }

    let fits = |candidate: &str| text_width(candidate, weight, font_size) <= max_width;

    for paragraph in text.lines() {
        let mut current_line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };
            if fits(&candidate) {
                current_line = candidate;
                continue;
            }

            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            if fits(word) {
                current_line = word.to_string();
                continue;
            }

            // Oversized word
            for character in word.chars() {
                current_line.push(character);
                if !fits(&current_line) && current_line.chars().count() > 1 {
                    current_line.pop();
                    lines.push(std::mem::take(&mut current_line));
                    current_line.push(character);
                }
            }
        }

        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_the_afm_tables() {
        // "Go" is 778 + 556 units in Helvetica
        let expected = 1334.0 / 1000.0 * 10.0 / POINTS_PER_MILLIMETER;
        assert!((text_width("Go", FontWeight::Regular, 10.0) - expected).abs() < 1e-4);
        assert!(
            text_width("Resume", FontWeight::Bold, 12.0)
                > text_width("Resume", FontWeight::Regular, 12.0)
        );
        assert_eq!(text_width("", FontWeight::Regular, 10.0), 0.0);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("Hello world", FontWeight::Regular, 10.0, 170.0);
        assert_eq!(lines, vec!["Hello world"]);
    }

    #[test]
    fn long_text_wraps_without_losing_words() {
        let text = "lorem ipsum dolor sit amet ".repeat(30);
        let lines = wrap_text(&text, FontWeight::Regular, 10.0, 170.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, FontWeight::Regular, 10.0) <= 170.0);
        }
        assert_eq!(
            lines.join(" ").split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn explicit_newlines_are_kept() {
        let lines = wrap_text("first\nsecond", FontWeight::Regular, 10.0, 170.0);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn oversized_words_are_split_between_characters() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, FontWeight::Regular, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, FontWeight::Regular, 10.0) <= 20.0);
        }
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("", FontWeight::Regular, 10.0, 170.0).is_empty());
        assert!(wrap_text("   ", FontWeight::Regular, 10.0, 170.0).is_empty());
    }
}
