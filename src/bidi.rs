//! Right-to-left rendering repair.
//!
//! Text extracted from Arabic-script pages sometimes carries a numeric token
//! in visual rather than logical order. When the text holds any Arabic-block
//! character, each ASCII digit run of identifier length is reversed.
//!
//! This is a heuristic. A long digit run that was already in logical order
//! (a phone number, a serial) is reversed just the same; callers that can
//! check the result should keep the unrepaired text around as well.

use crate::normalization::Normalizer;

/// Shortest digit run treated as a reversed identifier.
pub const MIN_REVERSED_RUN: usize = 10;

#[derive(Copy, Clone, Debug, Default)]
pub struct BidiRepair;

impl Normalizer for BidiRepair {
    fn normal_text(&self, s: &str) -> String {
        if !s.chars().any(is_arabic) {
            return s.into();
        }

        let mut chars: Vec<char> = s.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            if !chars[start].is_ascii_digit() {
                start += 1;
                continue;
            }

            let end = chars[start..]
                .iter()
                .position(|c| !c.is_ascii_digit())
                .map_or(chars.len(), |len| start + len);

            if end - start >= MIN_REVERSED_RUN {
                chars[start..end].reverse();
            }
            start = end;
        }

        chars.into_iter().collect()
    }
}

pub fn repair(s: &str) -> String {
    BidiRepair.normal_text(s)
}

pub fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::repair;

    #[test]
    fn latin_text_is_untouched() {
        assert_eq!(repair("ISBN 9780195153071"), "ISBN 9780195153071");
    }

    #[test]
    fn long_runs_reverse_in_arabic_context() {
        assert_eq!(repair("ردمك 1703515910879"), "ردمك 9780195153071");
    }

    #[test]
    fn short_runs_survive() {
        assert_eq!(repair("ردمك 978-0-19-515307-1"), "ردمك 978-0-19-515307-1");
        assert_eq!(repair("ص 123456789"), "ص 123456789");
    }

    #[test]
    fn every_long_run_is_reversed_independently() {
        assert_eq!(
            repair("0123456789 ك 98765432100"),
            "9876543210 ك 00123456789"
        );
    }

    #[test]
    fn run_at_end_of_text() {
        assert_eq!(repair("ه1234567890"), "ه0987654321");
    }
}
