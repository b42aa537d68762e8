//! Randomized board generation.

use crate::board::{cell_count, validate_dimension, Board, CardValue};
use crate::error::{MemoryError, MemoryErrorKind, MemoryResult};
use crate::picker::RandomPicker;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Symbols of the classic food-and-plants deck. Enough for a 4×4 board.
pub const DEFAULT_ALPHABET: [&str; 11] = [
    "☕", "🌽", "🥕", "🧁", "🧀", "🥪", "🥞", "🥜", "🥂", "🍀", "🍄",
];

/// Board dimension used when none is configured.
pub const DEFAULT_DIMENSION: usize = 4;

/// Returns [`DEFAULT_ALPHABET`] as card values.
pub fn default_alphabet() -> Vec<CardValue> {
    DEFAULT_ALPHABET.iter().map(|s| CardValue::from(*s)).collect()
}

/// Builds a `dimension × dimension` board of shuffled pairs.
///
/// Duplicate symbols in `alphabet` count once.
///
/// # Errors
///
/// - [`MemoryErrorKind::InvalidDimension`] if `dimension` is zero or odd.
/// - [`MemoryErrorKind::InsufficientAlphabet`] if the alphabet has fewer than
///   `dimension² / 2` distinct values.
#[instrument(skip(alphabet, picker), fields(alphabet_len = alphabet.len()))]
pub fn generate(
    dimension: usize,
    alphabet: &[CardValue],
    picker: &mut RandomPicker,
) -> MemoryResult<Board> {
    if let Err(err) = validate_dimension(dimension) {
        warn!(dimension, "Rejected board dimension");
        return Err(err);
    }

    let distinct = distinct_values(alphabet);
    // No alphabet can fill a board whose cell count overflows.
    let pairs = cell_count(dimension).map_or(usize::MAX, |cells| cells / 2);
    if distinct.len() < pairs {
        warn!(needed = pairs, available = distinct.len(), "Alphabet too small");
        return Err(MemoryError::new(MemoryErrorKind::InsufficientAlphabet {
            needed: pairs,
            available: distinct.len(),
        }));
    }

    let picks = picker.pick_without_replacement(&distinct, pairs)?;
    debug!(?picks, "Picked pair values");

    let doubled: Vec<CardValue> = picks.iter().chain(picks.iter()).cloned().collect();
    let layout = picker.shuffle(&doubled);

    info!(dimension, cards = layout.len(), "Generated board");
    Ok(Board::from_pairs(dimension, layout))
}

/// Keeps the first occurrence of every value, preserving order.
fn distinct_values(alphabet: &[CardValue]) -> Vec<CardValue> {
    let mut seen = HashSet::new();
    alphabet
        .iter()
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}
