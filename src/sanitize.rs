use crate::{confusion, normalization::Normalizer};

/// Label tokens that introduce an identifier, removed in this order.
///
/// Longer Arabic phrases come before their prefixes so the shorter form never
/// strands a trailing word.
pub const LABELS: &[&str] = &[
    "ISBN",
    "I.S.B.N",
    "ردمك",
    "ر.د.م.ك",
    "الرقم الدولي المعياري للكتاب",
    "الرقم الدولي المعياري",
];

/// Strips every occurrence of every label, wherever it sits in the text.
#[derive(Copy, Clone, Debug, Default)]
pub struct Labels;

impl Normalizer for Labels {
    fn normal_text(&self, s: &str) -> String {
        let mut text: Vec<char> = s.chars().collect();
        for label in LABELS {
            let label: Vec<char> = label.chars().collect();
            text = strip(&text, &label);
        }

        text.into_iter().collect::<String>().trim().into()
    }
}

/// Keeps ASCII digits and `X`, uppercased.
#[derive(Copy, Clone, Debug, Default)]
pub struct Clean;

impl Normalizer for Clean {
    fn normal_text(&self, s: &str) -> String {
        s.chars()
            .filter_map(|c| match c {
                '0'..='9' => Some(c),
                'x' | 'X' => Some('X'),
                _ => None,
            })
            .collect()
    }
}

/// Like [`Clean`], but confusable glyphs survive for the correction search.
#[derive(Copy, Clone, Debug, Default)]
pub struct CleanLenient;

impl Normalizer for CleanLenient {
    fn normal_text(&self, s: &str) -> String {
        s.chars()
            .filter_map(|c| match c {
                '0'..='9' => Some(c),
                'x' | 'X' => Some('X'),
                c if confusion::is_confusable(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}

pub fn remove_labels(s: &str) -> String {
    Labels.normal_text(s)
}

pub fn clean(s: &str) -> String {
    Clean.normal_text(s)
}

pub fn clean_lenient(s: &str) -> String {
    CleanLenient.normal_text(s)
}

fn strip(text: &[char], label: &[char]) -> Vec<char> {
    let mut result = Vec::with_capacity(text.len());
    let mut idx = 0;
    while idx < text.len() {
        let window = text.get(idx..idx + label.len());
        let is_label = window.map_or(false, |window| {
            window
                .iter()
                .zip(label)
                .all(|(&glyph, &expected)| glyph_matches(glyph, expected))
        });

        if is_label {
            idx += label.len();
        } else {
            result.push(text[idx]);
            idx += 1;
        }
    }
    result
}

// OCR misreads of a label letter count as that letter: "I5BN" is still a label.
fn glyph_matches(glyph: char, expected: char) -> bool {
    glyph == expected
        || glyph.to_lowercase().eq(expected.to_lowercase())
        || confusion::candidates(expected.to_ascii_uppercase())
            .map_or(false, |candidates| candidates.contains(&glyph))
}
