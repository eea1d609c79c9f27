use crate::normalization::Normalizer;

const ARABIC_INDIC_ZERO: u32 = 0x0660;
const PERSIAN_ZERO: u32 = 0x06F0;

/// Rewrites Arabic-Indic (U+0660..U+0669) and Persian (U+06F0..U+06F9)
/// digits as ASCII digits. Everything else passes through untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct Numerals;

impl Normalizer for Numerals {
    fn normal_text(&self, s: &str) -> String {
        s.chars().map(ascii_digit).collect()
    }
}

pub fn convert(s: &str) -> String {
    Numerals.normal_text(s)
}

fn ascii_digit(c: char) -> char {
    let u = c as u32;
    let value = match u {
        0x0660..=0x0669 => u - ARABIC_INDIC_ZERO,
        0x06F0..=0x06F9 => u - PERSIAN_ZERO,
        _ => return c,
    };

    (b'0' + value as u8) as char
}
