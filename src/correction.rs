//! Repairs a draft identifier by swapping confusable glyphs for the digits
//! they most likely stand for until a checksum passes.
//!
//! Pass one tries a single substitution at a time, left to right, each
//! candidate in table order. Pass two runs only when pass one finds nothing
//! and the draft has at most `MAX_CORRECTED_POSITIONS` confusable positions;
//! it substitutes several positions at once: every pair first, then the
//! triple, and for each group every candidate combination with the leftmost
//! position varying slowest. A draft with two misread glyphs cannot pass on
//! a single substitution, so pass two must combine them rather than repeat
//! pass one.

use crate::{
    checksum::{IsbnFormat, ValidatedIsbn},
    confusion,
};
use tracing::debug;

/// Largest number of confusable positions pass two will combine.
pub const MAX_CORRECTED_POSITIONS: usize = 3;

type Slot = (usize, &'static [char]);

pub fn search(draft: &str) -> Option<ValidatedIsbn> {
    let chars: Vec<char> = draft.chars().collect();
    IsbnFormat::from_len(chars.len())?;

    let slots: Vec<Slot> = chars
        .iter()
        .enumerate()
        .filter_map(|(idx, &c)| confusion::candidates(c).map(|candidates| (idx, candidates)))
        .collect();

    if slots.is_empty() {
        return None;
    }

    single(&chars, &slots).or_else(|| {
        if slots.len() > MAX_CORRECTED_POSITIONS {
            debug!(
                positions = slots.len(),
                "too many confusable positions to combine"
            );
            return None;
        }
        combined(&chars, &slots)
    })
}

fn single(chars: &[char], slots: &[Slot]) -> Option<ValidatedIsbn> {
    let mut attempt = chars.to_vec();
    for &(idx, candidates) in slots {
        for &candidate in candidates {
            attempt[idx] = candidate;
            if let Some(isbn) = accept(&attempt) {
                return Some(isbn);
            }
        }
        attempt[idx] = chars[idx];
    }
    None
}

fn combined(chars: &[char], slots: &[Slot]) -> Option<ValidatedIsbn> {
    let all = 1u32 << slots.len();
    for size in 2..=slots.len() {
        for mask in (1..all).filter(|mask| mask.count_ones() as usize == size) {
            let group: Vec<Slot> = slots
                .iter()
                .enumerate()
                .filter(|&(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &slot)| slot)
                .collect();

            if let Some(isbn) = odometer(chars, &group) {
                return Some(isbn);
            }
        }
    }
    None
}

// Every candidate combination for one group, rightmost slot turning fastest.
fn odometer(chars: &[char], group: &[Slot]) -> Option<ValidatedIsbn> {
    let mut picks = vec![0; group.len()];
    let mut attempt = chars.to_vec();

    loop {
        for (&(idx, candidates), &pick) in group.iter().zip(&picks) {
            attempt[idx] = candidates[pick];
        }
        if let Some(isbn) = accept(&attempt) {
            return Some(isbn);
        }

        let mut wheel = group.len();
        loop {
            if wheel == 0 {
                return None;
            }
            wheel -= 1;
            picks[wheel] += 1;
            if picks[wheel] < group[wheel].1.len() {
                break;
            }
            picks[wheel] = 0;
        }
    }
}

fn accept(attempt: &[char]) -> Option<ValidatedIsbn> {
    let candidate: String = attempt.iter().collect();
    ValidatedIsbn::parse(&candidate)
}
