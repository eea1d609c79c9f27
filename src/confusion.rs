/// Characters OCR (or a script mix-up) commonly produces in place of a digit,
/// each with the digits it most likely stands for, most likely first.
///
/// Order matters: the correction search takes the first substitution that
/// checks out, so earlier rows and earlier candidates win.
pub const CONFUSIONS: &[(char, &[char])] = &[
    ('o', &['0']),
    ('O', &['0']),
    ('l', &['1']),
    ('I', &['1']),
    ('B', &['8']),
    ('S', &['5']),
    ('Z', &['2']),
    // Arabic heh is a small loop: the Arabic-Indic zero, or the five.
    ('\u{0647}', &['0', '5']),
    // Arabic seen
    ('\u{0633}', &['5']),
    // Arabic-Indic eight, in case it reaches the search unconverted.
    ('\u{0668}', &['8']),
];

pub fn candidates(c: char) -> Option<&'static [char]> {
    CONFUSIONS
        .iter()
        .find(|&&(key, _)| key == c)
        .map(|&(_, candidates)| candidates)
}

pub fn is_confusable(c: char) -> bool {
    candidates(c).is_some()
}
