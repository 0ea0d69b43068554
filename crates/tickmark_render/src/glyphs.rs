//! Built-in 5×7 pixel font
//!
//! Each glyph is seven rows; bit 4 of a row is the leftmost column. Only the
//! characters a clock face needs are present.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Blank column between adjacent glyphs, in font pixels
pub const GLYPH_SPACING: u32 = 1;

pub type Glyph = [u8; GLYPH_HEIGHT as usize];

const ZERO: Glyph = [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110];
const ONE: Glyph = [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110];
const TWO: Glyph = [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111];
const THREE: Glyph = [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110];
const FOUR: Glyph = [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010];
const FIVE: Glyph = [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110];
const SIX: Glyph = [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110];
const SEVEN: Glyph = [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000];
const EIGHT: Glyph = [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110];
const NINE: Glyph = [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100];
const LETTER_A: Glyph = [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001];
const LETTER_M: Glyph = [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001];
const LETTER_P: Glyph = [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000];
const COLON: Glyph = [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000];
const SPACE: Glyph = [0; GLYPH_HEIGHT as usize];

pub fn glyph(ch: char) -> Option<&'static Glyph> {
    let glyph = match ch {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        'A' | 'a' => &LETTER_A,
        'M' | 'm' => &LETTER_M,
        'P' | 'p' => &LETTER_P,
        ':' => &COLON,
        ' ' => &SPACE,
        _ => return None,
    };
    Some(glyph)
}

/// Whether the font pixel at (`col`, `row`) is set
pub fn is_set(glyph: &Glyph, col: u32, row: u32) -> bool {
    if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
        return false;
    }
    glyph[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

/// Width in font pixels of `chars` glyphs laid out in a row
pub fn run_width(chars: u32) -> u32 {
    if chars == 0 {
        return 0;
    }
    chars * GLYPH_WIDTH + (chars - 1) * GLYPH_SPACING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_digit_has_a_distinct_glyph() {
        let digits: Vec<&Glyph> = ('0'..='9').filter_map(glyph).collect();
        assert_eq!(digits.len(), 10);
        for (i, a) in digits.iter().enumerate() {
            for b in &digits[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn rows_fit_in_five_columns() {
        for ch in "0123456789APM: ".chars() {
            let g = glyph(ch).unwrap();
            assert!(g.iter().all(|row| *row < 0b100000), "{ch:?}");
        }
    }

    #[test]
    fn pixel_lookup_reads_left_to_right() {
        let one = glyph('1').unwrap();
        assert!(is_set(one, 2, 0));
        assert!(!is_set(one, 0, 0));
        assert!(is_set(one, 1, 6));
        assert!(!is_set(one, 0, 6));
        assert!(!is_set(one, 5, 0));
    }

    #[test]
    fn unknown_characters_have_no_glyph() {
        assert!(glyph('Z').is_none());
        assert_eq!(run_width(2), 11);
        assert_eq!(run_width(0), 0);
    }
}
