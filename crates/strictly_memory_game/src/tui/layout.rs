//! Screen geometry and pointer hit testing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use strictly_memory::{CardId, TargetResolver};

/// Width of one card cell, borders included.
pub const CELL_WIDTH: u16 = 7;

/// Height of one card cell, borders included.
pub const CELL_HEIGHT: u16 = 3;

const START_WIDTH: u16 = 13;

/// Something the player pointed at or selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    /// Mouse click at a terminal cell.
    Pointer {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
    /// The card under the keyboard cursor.
    Cursor(usize),
    /// Keyboard shortcut for the start control.
    StartKey,
}

/// Where everything was drawn on the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Title bar.
    pub title: Rect,
    /// Region holding the card grid.
    pub board: Rect,
    /// Card rectangles in board order. Cards that do not fit are absent.
    pub cells: Vec<(CardId, Rect)>,
    /// Status line.
    pub status: Rect,
    /// Start control.
    pub start: Rect,
}

impl BoardLayout {
    /// Lays out a `dimension × dimension` grid inside `area`.
    pub fn compute(area: Rect, dimension: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(CELL_HEIGHT), // Board
                Constraint::Length(3), // Status
                Constraint::Length(3), // Start control
            ])
            .split(area);

        let board = chunks[1];
        let side = u16::try_from(dimension).unwrap_or(u16::MAX);
        let grid_width = side.saturating_mul(CELL_WIDTH);
        let grid_height = side.saturating_mul(CELL_HEIGHT);
        let left = board.x + board.width.saturating_sub(grid_width) / 2;
        let top = board.y + board.height.saturating_sub(grid_height) / 2;

        // Only rows and columns that can fit inside the board area are drawn.
        let rows = dimension.min(usize::from(board.height / CELL_HEIGHT));
        let columns = dimension.min(usize::from(board.width / CELL_WIDTH));

        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                let x = u16::try_from(column).unwrap_or(u16::MAX).saturating_mul(CELL_WIDTH);
                let y = u16::try_from(row).unwrap_or(u16::MAX).saturating_mul(CELL_HEIGHT);
                let cell = Rect::new(
                    left.saturating_add(x),
                    top.saturating_add(y),
                    CELL_WIDTH,
                    CELL_HEIGHT,
                );
                let visible = cell.intersection(board);
                if visible == cell {
                    cells.push((CardId(row * dimension + column), cell));
                }
            }
        }

        let footer = chunks[3];
        let start = Rect::new(
            footer.x + footer.width.saturating_sub(START_WIDTH) / 2,
            footer.y,
            START_WIDTH.min(footer.width),
            footer.height,
        );

        Self {
            title: chunks[0],
            board,
            cells,
            status: chunks[2],
            start,
        }
    }

    /// Rectangle of a card, if it was drawn.
    pub fn cell(&self, id: CardId) -> Option<Rect> {
        self.cells.iter().find(|(cell_id, _)| *cell_id == id).map(|(_, rect)| *rect)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

impl TargetResolver<UiTarget> for BoardLayout {
    fn card_at(&self, target: &UiTarget) -> Option<CardId> {
        match *target {
            UiTarget::Pointer { column, row } => self
                .cells
                .iter()
                .find(|(_, rect)| contains(*rect, column, row))
                .map(|(id, _)| *id),
            UiTarget::Cursor(index) => Some(CardId(index)),
            UiTarget::StartKey => None,
        }
    }

    fn is_start_control(&self, target: &UiTarget) -> bool {
        match *target {
            UiTarget::Pointer { column, row } => contains(self.start, column, row),
            UiTarget::StartKey => true,
            UiTarget::Cursor(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout::compute(Rect::new(0, 0, 80, 24), 4)
    }

    #[test]
    fn test_all_cells_fit_standard_terminal() {
        let layout = layout();
        assert_eq!(layout.cells.len(), 16);
        for (_, rect) in &layout.cells {
            assert_eq!(rect.intersection(layout.board), *rect);
        }
    }

    #[test]
    fn test_pointer_resolves_enclosing_card() {
        let layout = layout();
        let cell = layout.cell(CardId(5)).unwrap();

        let inside = UiTarget::Pointer {
            column: cell.x + 1,
            row: cell.y + 1,
        };
        assert_eq!(layout.card_at(&inside), Some(CardId(5)));

        let border = UiTarget::Pointer {
            column: cell.x,
            row: cell.y,
        };
        assert_eq!(layout.card_at(&border), Some(CardId(5)));
    }

    #[test]
    fn test_huge_dimension_keeps_only_visible_cells() {
        let dimension = 1usize << 32;
        let layout = BoardLayout::compute(Rect::new(0, 0, 80, 24), dimension);

        assert!(!layout.cells.is_empty());
        let max_columns = usize::from(80 / CELL_WIDTH);
        assert!(layout.cells.len() <= max_columns * usize::from(24 / CELL_HEIGHT));
        for (id, rect) in &layout.cells {
            assert_eq!(rect.intersection(layout.board), *rect);
            assert!(id.index() % dimension < max_columns);
        }
    }

    #[test]
    fn test_pointer_outside_grid_hits_nothing() {
        let layout = layout();
        let target = UiTarget::Pointer { column: 0, row: 0 };
        assert_eq!(layout.card_at(&target), None);
        assert!(!layout.is_start_control(&target));
    }

    #[test]
    fn test_pointer_on_start_control() {
        let layout = layout();
        let target = UiTarget::Pointer {
            column: layout.start.x + 2,
            row: layout.start.y + 1,
        };
        assert!(layout.is_start_control(&target));
        assert_eq!(layout.card_at(&target), None);
    }

    #[test]
    fn test_keyboard_targets() {
        let layout = layout();
        assert_eq!(layout.card_at(&UiTarget::Cursor(3)), Some(CardId(3)));
        assert!(layout.is_start_control(&UiTarget::StartKey));
        assert!(!layout.is_start_control(&UiTarget::Cursor(3)));
    }

    #[test]
    fn test_tiny_terminal_drops_cells() {
        let layout = BoardLayout::compute(Rect::new(0, 0, 20, 14), 4);
        assert!(layout.cells.len() < 16);
    }
}
