//! Core domain types: card values, cards and the board.

use crate::error::{MemoryError, MemoryErrorKind, MemoryResult};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An opaque symbol printed on a card. Only equality matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardValue(String);

impl CardValue {
    /// Creates a card value from any string-like symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Returns the symbol as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardValue {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Positional identity of a card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[display("card {_0}")]
#[serde(transparent)]
pub struct CardId(pub usize);

impl CardId {
    /// Returns the board index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Visual state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    /// Face down.
    Hidden,
    /// Revealed and waiting for resolution.
    #[display("face up")]
    FaceUp,
    /// Part of a found pair; terminal.
    Matched,
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    id: CardId,
    value: CardValue,
    face_up: bool,
    matched: bool,
}

impl Card {
    fn new(id: CardId, value: CardValue) -> Self {
        Self {
            id,
            value,
            face_up: false,
            matched: false,
        }
    }

    /// Returns the card's position.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the symbol on the card.
    pub fn value(&self) -> &CardValue {
        &self.value
    }

    /// Whether the card is showing its value.
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Whether the card belongs to a found pair.
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Collapses the two flags into a single visual state.
    pub fn state(&self) -> CardState {
        if self.matched {
            CardState::Matched
        } else if self.face_up {
            CardState::FaceUp
        } else {
            CardState::Hidden
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.face_up = true;
    }

    pub(crate) fn hide(&mut self) {
        self.face_up = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}

/// Square grid of paired cards in row-major order.
///
/// Shape and value assignment are fixed at construction; only the per-card
/// `face_up`/`matched` flags change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    dimension: usize,
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from an explicit row-major layout.
    ///
    /// # Errors
    ///
    /// - [`MemoryErrorKind::InvalidDimension`] if `dimension` is zero or odd,
    ///   or the layout does not hold exactly `dimension²` values.
    /// - [`MemoryErrorKind::UnpairedValue`] if some value does not appear
    ///   exactly twice.
    pub fn from_layout(dimension: usize, values: Vec<CardValue>) -> MemoryResult<Self> {
        validate_dimension(dimension)?;
        if cell_count(dimension) != Some(values.len()) {
            return Err(MemoryError::new(MemoryErrorKind::InvalidDimension { dimension }));
        }

        let mut counts: HashMap<&CardValue, usize> = HashMap::new();
        for value in &values {
            *counts.entry(value).or_default() += 1;
        }
        if let Some((value, count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(MemoryError::new(MemoryErrorKind::UnpairedValue {
                value: value.to_string(),
                count: *count,
            }));
        }

        Ok(Self::from_pairs(dimension, values))
    }

    /// Assembles a board from values already known to be paired.
    pub(crate) fn from_pairs(dimension: usize, values: Vec<CardValue>) -> Self {
        let cards = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| Card::new(CardId(index), value))
            .collect();
        Self { dimension, cards }
    }

    /// Number of cards per row and column.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the board holds no cards. Never true for a generated board.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in row-major order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Looks up a card by id.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Card at a grid coordinate.
    pub fn at(&self, row: usize, column: usize) -> Option<&Card> {
        if row >= self.dimension || column >= self.dimension {
            return None;
        }
        self.cards.get(row * self.dimension + column)
    }

    /// Whether every card has been matched.
    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    /// Number of cards still in play.
    pub fn unmatched_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched()).count()
    }

    /// Ids of revealed cards that are not part of a found pair.
    pub fn pending_face_up(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.state() == CardState::FaceUp)
            .map(Card::id)
            .collect()
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Formats the board as a human-readable grid, values hidden as `?`.
    pub fn display(&self) -> String {
        self.cards
            .chunks(self.dimension.max(1))
            .map(|row| {
                row.iter()
                    .map(|card| match card.state() {
                        CardState::Hidden => "?".to_string(),
                        CardState::FaceUp | CardState::Matched => card.value().to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Rejects zero and odd dimensions.
/// Number of cells on a `dimension × dimension` board, `None` on overflow.
pub(crate) fn cell_count(dimension: usize) -> Option<usize> {
    dimension.checked_mul(dimension)
}

pub(crate) fn validate_dimension(dimension: usize) -> MemoryResult<()> {
    if dimension == 0 || dimension % 2 != 0 {
        return Err(MemoryError::new(MemoryErrorKind::InvalidDimension { dimension }));
    }
    Ok(())
}
