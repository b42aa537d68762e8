//! Error types for the memory game core.

use derive_more::{Display, Error};

/// The specific failure behind a [`MemoryError`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MemoryErrorKind {
    /// Board dimension was zero or odd.
    #[display("Board dimension must be a positive even number, got {}", dimension)]
    InvalidDimension {
        /// The rejected dimension.
        dimension: usize,
    },
    /// Alphabet has fewer distinct symbols than the board has pairs.
    #[display("Alphabet has {} distinct values but the board needs {}", available, needed)]
    InsufficientAlphabet {
        /// Distinct values required (dimension² / 2).
        needed: usize,
        /// Distinct values supplied.
        available: usize,
    },
    /// An explicit layout holds a value other than exactly twice.
    #[display("Value {} appears {} times; every value must form exactly one pair", value, count)]
    UnpairedValue {
        /// The offending symbol.
        value: String,
        /// How often it appeared.
        count: usize,
    },
    /// A flip referenced a card index outside the board.
    #[display("Card {} does not exist on a board of {} cards", id, board_len)]
    InvalidCardReference {
        /// The requested card index.
        id: usize,
        /// Number of cards on the board.
        board_len: usize,
    },
    /// Asked to draw more elements than the source holds.
    #[display("Cannot pick {} elements from a sequence of {}", requested, available)]
    InvalidArgument {
        /// Number of elements requested.
        requested: usize,
        /// Number of elements available.
        available: usize,
    },
}

/// Memory game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Memory game error: {} at {}:{}", kind, file, line)]
pub struct MemoryError {
    /// What went wrong.
    pub kind: MemoryErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MemoryError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    pub fn new(kind: MemoryErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> &MemoryErrorKind {
        &self.kind
    }
}

impl From<MemoryErrorKind> for MemoryError {
    #[track_caller]
    fn from(kind: MemoryErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result alias for the memory game core.
pub type MemoryResult<T> = Result<T, MemoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_location() {
        let err = MemoryError::new(MemoryErrorKind::InvalidDimension { dimension: 3 });
        let text = err.to_string();
        assert!(text.contains("positive even number, got 3"));
        assert!(text.contains("error.rs"));
    }

    #[test]
    fn test_from_kind_tracks_caller() {
        let err = MemoryError::from(MemoryErrorKind::InvalidArgument {
            requested: 5,
            available: 2,
        });
        assert_eq!(err.file, file!());
        assert!(matches!(err.kind(), MemoryErrorKind::InvalidArgument { .. }));
    }
}
