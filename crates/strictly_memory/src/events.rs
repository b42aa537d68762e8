//! Values published to the rendering collaborator.

use crate::board::{Card, CardId, CardState, CardValue};
use derive_more::Display;
use serde::Serialize;

/// Move counter and elapsed time, as shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize)]
#[display("{} moves | Time: {} sec", total_moves, elapsed_seconds)]
pub struct StatusLine {
    /// Accepted flips so far.
    pub total_moves: u64,
    /// Seconds on the clock.
    pub elapsed_seconds: u64,
}

impl StatusLine {
    /// The `"{n} moves"` label.
    pub fn moves_label(&self) -> String {
        format!("{} moves", self.total_moves)
    }

    /// The `"Time: {n} sec"` label.
    pub fn time_label(&self) -> String {
        format!("Time: {} sec", self.elapsed_seconds)
    }
}

/// Final score, published once when the last pair is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[display("You Won! with {} moves under {} seconds", total_moves, elapsed_seconds)]
pub struct WinSummary {
    /// Accepted flips over the whole session.
    pub total_moves: u64,
    /// Seconds on the clock when the win was announced.
    pub elapsed_seconds: u64,
}

impl From<StatusLine> for WinSummary {
    fn from(status: StatusLine) -> Self {
        Self {
            total_moves: status.total_moves,
            elapsed_seconds: status.elapsed_seconds,
        }
    }
}

/// What a renderer may show for one card.
///
/// `value` is only present once the card has been revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Card position.
    pub id: CardId,
    /// Visual state.
    pub state: CardState,
    /// Symbol, if visible.
    pub value: Option<CardValue>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let state = card.state();
        let value = match state {
            CardState::Hidden => None,
            CardState::FaceUp | CardState::Matched => Some(card.value().clone()),
        };
        Self {
            id: card.id(),
            state,
            value,
        }
    }
}

/// State changes a renderer reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The clock started and the start control is now disabled.
    GameStarted,
    /// A card turned face up.
    CardRevealed {
        /// Card position.
        id: CardId,
        /// Symbol now visible.
        value: CardValue,
    },
    /// Two revealed cards share a value and stay up for good.
    PairMatched {
        /// First card of the pair.
        first: CardId,
        /// Second card of the pair.
        second: CardId,
    },
    /// Unmatched cards turned back over.
    CardsHidden {
        /// Cards that are face down again.
        ids: Vec<CardId>,
    },
    /// One clock second elapsed.
    Tick(StatusLine),
    /// The board is cleared.
    Won(WinSummary),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        let status = StatusLine {
            total_moves: 12,
            elapsed_seconds: 34,
        };
        assert_eq!(status.moves_label(), "12 moves");
        assert_eq!(status.time_label(), "Time: 34 sec");
        assert_eq!(status.to_string(), "12 moves | Time: 34 sec");
    }

    #[test]
    fn test_win_banner_text() {
        let summary = WinSummary {
            total_moves: 20,
            elapsed_seconds: 41,
        };
        assert_eq!(summary.to_string(), "You Won! with 20 moves under 41 seconds");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::Tick(StatusLine {
            total_moves: 2,
            elapsed_seconds: 3,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "tick");
        assert_eq!(json["total_moves"], 2);
        assert_eq!(json["elapsed_seconds"], 3);

        let event = GameEvent::CardsHidden {
            ids: vec![CardId(1), CardId(4)],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "cards_hidden");
        assert_eq!(json["ids"], serde_json::json!([1, 4]));
    }
}
