//! Keyboard and mouse mapping.

use super::layout::UiTarget;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the game.
    Quit,
    /// Move the cursor.
    Move(KeyCode),
    /// Flip the card under the cursor.
    FlipCursor,
    /// Press the start control.
    Start,
    /// Nothing bound.
    None,
}

/// Maps a key to an action.
pub fn key_action(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => KeyAction::Move(code),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::FlipCursor,
        KeyCode::Char('s') => KeyAction::Start,
        _ => KeyAction::None,
    }
}

/// Moves a row-major cursor on a square grid. Stops at the edges.
pub fn move_cursor(cursor: usize, dimension: usize, key: KeyCode) -> usize {
    if dimension == 0 {
        return cursor;
    }
    let row = cursor / dimension;
    let column = cursor % dimension;

    let (row, column) = match key {
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, (column + 1).min(dimension - 1)),
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => ((row + 1).min(dimension - 1), column),
        _ => (row, column),
    };
    row * dimension + column
}

/// Turns a left click into a pointer target.
pub fn pointer_target(event: MouseEvent) -> Option<UiTarget> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UiTarget::Pointer {
            column: event.column,
            row: event.row,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(0, 4, KeyCode::Right), 1);
        assert_eq!(move_cursor(1, 4, KeyCode::Down), 5);
        assert_eq!(move_cursor(5, 4, KeyCode::Left), 4);
        assert_eq!(move_cursor(5, 4, KeyCode::Up), 1);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(0, 4, KeyCode::Left), 0);
        assert_eq!(move_cursor(0, 4, KeyCode::Up), 0);
        assert_eq!(move_cursor(3, 4, KeyCode::Right), 3);
        assert_eq!(move_cursor(15, 4, KeyCode::Down), 15);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key_action(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(key_action(KeyCode::Char(' ')), KeyAction::FlipCursor);
        assert_eq!(key_action(KeyCode::Enter), KeyAction::FlipCursor);
        assert_eq!(key_action(KeyCode::Char('s')), KeyAction::Start);
        assert_eq!(key_action(KeyCode::Up), KeyAction::Move(KeyCode::Up));
        assert_eq!(key_action(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_only_left_press_is_a_pointer() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            pointer_target(click),
            Some(UiTarget::Pointer { column: 10, row: 4 })
        );

        let release = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            ..click
        };
        assert_eq!(pointer_target(release), None);
    }
}
