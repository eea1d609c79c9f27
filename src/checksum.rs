use crate::weights::Weights;
use serde::Serialize;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IsbnFormat {
    #[serde(rename = "10")]
    Isbn10,
    #[serde(rename = "13")]
    Isbn13,
}

impl IsbnFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            IsbnFormat::Isbn10 => "10",
            IsbnFormat::Isbn13 => "13",
        }
    }

    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            10 => Some(IsbnFormat::Isbn10),
            13 => Some(IsbnFormat::Isbn13),
            _ => None,
        }
    }
}

impl fmt::Display for IsbnFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ISBN-{}", self.as_str())
    }
}

/// An identifier whose check character has been verified.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ValidatedIsbn {
    isbn: String,
    format: IsbnFormat,
}

impl ValidatedIsbn {
    /// Accepts a cleaned candidate only if its checksum holds.
    pub fn parse(candidate: &str) -> Option<Self> {
        classify(candidate).map(|format| ValidatedIsbn {
            isbn: candidate.into(),
            format,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.isbn
    }

    pub fn format(&self) -> IsbnFormat {
        self.format
    }

    /// The 978-prefixed form of an ISBN-10; an ISBN-13 is returned as is.
    pub fn to_isbn13(&self) -> ValidatedIsbn {
        match self.format {
            IsbnFormat::Isbn13 => self.clone(),
            IsbnFormat::Isbn10 => {
                let mut isbn = format!("978{}", &self.isbn[..9]);
                isbn.push(ean13_check_digit(&isbn));
                ValidatedIsbn {
                    isbn,
                    format: IsbnFormat::Isbn13,
                }
            }
        }
    }
}

impl fmt::Display for ValidatedIsbn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.isbn)
    }
}

/// Dispatches on length alone: 10 characters are checked as ISBN-10, 13 as
/// ISBN-13, anything else is invalid without inspection.
pub fn classify(candidate: &str) -> Option<IsbnFormat> {
    let format = IsbnFormat::from_len(candidate.chars().count())?;
    let is_valid = match format {
        IsbnFormat::Isbn10 => validate10(candidate),
        IsbnFormat::Isbn13 => validate13(candidate),
    };

    if is_valid {
        Some(format)
    } else {
        None
    }
}

/// MOD 11 over weights 10..=2, with `X` standing for 10 in the last place.
pub fn validate10(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != 10 {
        return false;
    }

    let (values, check) = bytes.split_at(9);
    if !values.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let check_value = match check[0] {
        b'X' => 10,
        u if u.is_ascii_digit() => i32::from(u - b'0'),
        _ => return false,
    };

    (weighted_sum(values, Weights::isbn10()) + check_value) % 11 == 0
}

/// EAN-13: weights 1,3,1,3... over the first twelve digits, MOD 10.
pub fn validate13(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let (values, check) = bytes.split_at(12);
    let expected = (10 - weighted_sum(values, Weights::ean13()) % 10) % 10;
    i32::from(check[0] - b'0') == expected
}

fn weighted_sum(values: &[u8], weights: Weights) -> i32 {
    values
        .iter()
        .map(|&u| i32::from(u - b'0'))
        .zip(weights)
        .fold(0, |a, (value, weight)| (value * weight) + a)
}

// Expects twelve ASCII digits.
fn ean13_check_digit(body: &str) -> char {
    let check = (10 - weighted_sum(body.as_bytes(), Weights::ean13()) % 10) % 10;
    (b'0' + check as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn10() {
        assert!(validate10("0195153073"));
        assert!(validate10("043942089X"));
        assert!(!validate10("0195153070"));
        assert!(!validate10("04394208X9"));
        assert!(!validate10("043942089x"));
        assert!(!validate10("019515307"));
    }

    #[test]
    fn isbn13() {
        assert!(validate13("9780195153071"));
        assert!(validate13("9786001002540"));
        assert!(!validate13("9780195153070"));
        assert!(!validate13("978019515307X"));
        assert!(!validate13("978019515307"));
    }

    #[test]
    fn classify_dispatches_by_length() {
        assert_eq!(classify("0195153073"), Some(IsbnFormat::Isbn10));
        assert_eq!(classify("9780195153071"), Some(IsbnFormat::Isbn13));
        assert_eq!(classify("0195153070"), None);
        assert_eq!(classify("97801951530"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("978600100254ه"), None);
    }

    #[test]
    fn single_digit_changes_invalidate_isbn10() {
        let valid = "0195153073";
        for idx in 0..9 {
            let original = valid.as_bytes()[idx];
            for digit in b'0'..=b'9' {
                if digit == original {
                    continue;
                }
                let mut bytes = valid.as_bytes().to_vec();
                bytes[idx] = digit;
                let changed = String::from_utf8(bytes).unwrap();
                // Weights 2..=10 are all coprime to 11, so no change survives.
                assert!(!validate10(&changed), "{} passed", changed);
            }
        }
    }

    #[test]
    fn single_digit_changes_invalidate_isbn13() {
        let valid = "9780195153071";
        for idx in 0..12 {
            let original = valid.as_bytes()[idx];
            for digit in b'0'..=b'9' {
                if digit == original {
                    continue;
                }
                let mut bytes = valid.as_bytes().to_vec();
                bytes[idx] = digit;
                let changed = String::from_utf8(bytes).unwrap();
                assert!(!validate13(&changed), "{} passed", changed);
            }
        }
    }

    #[test]
    fn validated_isbn_conversion() {
        let isbn10 = ValidatedIsbn::parse("0195153073").unwrap();
        assert_eq!(isbn10.format(), IsbnFormat::Isbn10);
        assert_eq!(isbn10.format().to_string(), "ISBN-10");

        let isbn13 = isbn10.to_isbn13();
        assert_eq!(isbn13.as_str(), "9780195153071");
        assert_eq!(isbn13.format(), IsbnFormat::Isbn13);
        assert_eq!(isbn13.to_isbn13(), isbn13);

        assert!(ValidatedIsbn::parse("0195153070").is_none());
    }

    #[test]
    fn serializes_format_as_length() {
        let isbn = ValidatedIsbn::parse("043942089X").unwrap();
        let json = serde_json::to_string(&isbn).unwrap();
        assert_eq!(json, r#"{"isbn":"043942089X","format":"10"}"#);
    }
}
