use crate::{
    bidi::BidiRepair,
    checksum::{IsbnFormat, ValidatedIsbn},
    correction,
    normalization::Normalizer,
    numerals::Numerals,
    sanitize::{Clean, CleanLenient, Labels},
};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Counters for one pipeline. Every processed input lands in exactly one of
/// `valid`, `corrected` or `failed`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_processed: u64,
    pub valid: u64,
    pub corrected: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The cleaned text checked out as it was.
    Valid(ValidatedIsbn),
    /// A confusable glyph had to be substituted first.
    Corrected(ValidatedIsbn),
    Failed,
}

impl Outcome {
    pub fn isbn(&self) -> Option<&ValidatedIsbn> {
        match self {
            Outcome::Valid(isbn) | Outcome::Corrected(isbn) => Some(isbn),
            Outcome::Failed => None,
        }
    }

    pub fn into_isbn(self) -> Option<ValidatedIsbn> {
        match self {
            Outcome::Valid(isbn) | Outcome::Corrected(isbn) => Some(isbn),
            Outcome::Failed => None,
        }
    }

    pub fn is_corrected(&self) -> bool {
        match self {
            Outcome::Corrected(_) => true,
            _ => false,
        }
    }
}

/// Turns raw OCR text into a checksum-verified ISBN.
///
/// The pipeline may be shared between threads; the counters are updated
/// under a single lock so a snapshot never sees a half-recorded call.
#[derive(Debug, Default)]
pub struct NormalizationPipeline {
    stats: Mutex<Statistics>,
}

impl NormalizationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&self, raw: &str) -> Option<ValidatedIsbn> {
        self.evaluate(raw).and_then(Outcome::into_isbn)
    }

    /// Like `normalize`, but reports whether a correction was needed.
    ///
    /// Empty input returns `None` and is not counted.
    pub fn evaluate(&self, raw: &str) -> Option<Outcome> {
        if raw.is_empty() {
            return None;
        }

        let outcome = resolve(raw);
        self.record(&outcome);
        Some(outcome)
    }

    pub fn statistics(&self) -> Statistics {
        *self.lock()
    }

    fn record(&self, outcome: &Outcome) {
        let mut stats = self.lock();
        stats.total_processed += 1;
        match outcome {
            Outcome::Valid(_) => stats.valid += 1,
            Outcome::Corrected(_) => stats.corrected += 1,
            Outcome::Failed => stats.failed += 1,
        }
    }

    // Counters stay consistent even if a holder panicked: each update is a
    // pair of plain increments.
    fn lock(&self) -> MutexGuard<Statistics> {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn resolve(raw: &str) -> Outcome {
    let readings = readings(raw);

    for reading in &readings {
        let candidate = Clean.normal_text(reading);
        if IsbnFormat::from_len(candidate.len()).is_none() {
            debug!(%candidate, len = candidate.len(), "candidate has no identifier length");
            continue;
        }

        if let Some(isbn) = ValidatedIsbn::parse(&candidate) {
            debug!(%isbn, "checksum holds");
            return Outcome::Valid(isbn);
        }
    }

    for reading in &readings {
        let draft = CleanLenient.normal_text(reading);
        if let Some(isbn) = correction::search(&draft) {
            debug!(%draft, %isbn, "corrected confusable glyphs");
            return Outcome::Corrected(isbn);
        }
    }

    debug!(raw, "no identifier recovered");
    Outcome::Failed
}

// The text in logical order, then (when it differs) with right-to-left digit
// runs repaired, both with labels removed. Reversing a digit string preserves
// both checksums, so a passing checksum cannot tell the two apart; the
// logical reading is preferred.
fn readings(raw: &str) -> Vec<String> {
    let logical = Numerals.normal_text(raw);
    let repaired = BidiRepair.normal_text(&logical);

    let mut readings = vec![Labels.normal_text(&logical)];
    if repaired != logical {
        readings.push(Labels.normal_text(&repaired));
    }
    readings
}
