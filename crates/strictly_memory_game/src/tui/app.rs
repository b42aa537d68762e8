//! Application state and logic.

use super::input::{key_action, move_cursor, pointer_target, KeyAction};
use super::layout::{BoardLayout, UiTarget};
use crossterm::event::{KeyCode, MouseEvent};
use strictly_memory::{
    CardView, Dispatch, FlipEngine, GameEvent, InputDispatcher, Scheduler, StatusLine,
    TargetResolver, TimerEvent, WinSummary,
};
use tracing::{debug, error, info};

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// Leave the game.
    Quit,
}

/// Main application state.
pub struct App<S> {
    engine: FlipEngine<S>,
    dispatcher: InputDispatcher<BoardLayout>,
    cursor: usize,
    status: StatusLine,
    banner: Option<WinSummary>,
    message: String,
}

impl<S: Scheduler> App<S> {
    /// Creates the application around a ready engine.
    pub fn new(engine: FlipEngine<S>) -> Self {
        Self {
            engine,
            dispatcher: InputDispatcher::new(BoardLayout::default()),
            cursor: 0,
            status: StatusLine::default(),
            banner: None,
            message: "Flip a card or press Start".to_string(),
        }
    }

    /// The engine.
    pub fn engine(&self) -> &FlipEngine<S> {
        &self.engine
    }

    /// Card views for rendering.
    pub fn cards(&self) -> Vec<CardView> {
        self.engine.card_views()
    }

    /// Board side length.
    pub fn dimension(&self) -> usize {
        self.engine.board().dimension()
    }

    /// Index of the card under the keyboard cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Status line as of the last clock tick.
    pub fn status(&self) -> StatusLine {
        self.status
    }

    /// The win banner, once announced.
    pub fn banner(&self) -> Option<WinSummary> {
        self.banner
    }

    /// Latest one-line message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the start control is still active.
    pub fn start_enabled(&self) -> bool {
        self.engine.start_control_enabled()
    }

    /// Stores the geometry of the frame just drawn, for hit testing.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        *self.dispatcher.resolver_mut() = layout;
    }

    /// Applies a timer delivered by the scheduler.
    pub fn on_timer(&mut self, event: TimerEvent) {
        self.engine.fire(event);
        self.absorb_events();
    }

    /// Handles a key press.
    pub fn on_key(&mut self, code: KeyCode) -> Control {
        match key_action(code) {
            KeyAction::Quit => return Control::Quit,
            KeyAction::Move(key) => {
                self.cursor = move_cursor(self.cursor, self.dimension(), key);
            }
            KeyAction::FlipCursor => self.interact(UiTarget::Cursor(self.cursor)),
            KeyAction::Start => self.interact(UiTarget::StartKey),
            KeyAction::None => {}
        }
        Control::Continue
    }

    /// Handles a mouse event.
    pub fn on_mouse(&mut self, event: MouseEvent) {
        if let Some(target) = pointer_target(event) {
            if let Some(id) = self.dispatcher.resolver().card_at(&target) {
                self.cursor = id.index();
            }
            self.interact(target);
        }
    }

    fn interact(&mut self, target: UiTarget) {
        match self.dispatcher.dispatch(&mut self.engine, &target) {
            Ok(Dispatch::Ignored) => debug!(?target, "Nothing to do"),
            Ok(result) => debug!(?target, ?result, "Interaction handled"),
            Err(e) => error!(error = %e, ?target, "Interaction resolved to a missing card"),
        }
        self.absorb_events();
    }

    fn absorb_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::GameStarted => {
                    self.message = "Clock is running".to_string();
                }
                GameEvent::CardRevealed { value, .. } => {
                    self.message = format!("Revealed {}", value);
                }
                GameEvent::PairMatched { .. } => {
                    self.message = "Match!".to_string();
                }
                GameEvent::CardsHidden { .. } => {
                    self.message = "No match".to_string();
                }
                GameEvent::Tick(status) => {
                    self.status = status;
                }
                GameEvent::Won(summary) => {
                    info!(%summary, "Showing win banner");
                    self.status = StatusLine {
                        total_moves: summary.total_moves,
                        elapsed_seconds: summary.elapsed_seconds,
                    };
                    self.banner = Some(summary);
                    self.message = "Press q to quit".to_string();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};
    use ratatui::layout::Rect;
    use std::time::Duration;
    use strictly_memory::{Board, CardId, CardState, CardValue, ManualScheduler, RESOLVE_DELAY};

    fn app() -> App<ManualScheduler> {
        let values = ["A", "B", "B", "A"].iter().map(|s| CardValue::from(*s)).collect();
        let board = Board::from_layout(2, values).unwrap();
        let mut app = App::new(FlipEngine::new(board, ManualScheduler::new()));
        app.set_layout(BoardLayout::compute(Rect::new(0, 0, 80, 24), 2));
        app
    }

    fn pump(app: &mut App<ManualScheduler>, by: Duration) {
        let deadline = app.engine.scheduler().now() + by;
        while let Some(event) = app.engine.scheduler_mut().pop_due(deadline) {
            app.on_timer(event);
        }
        app.engine.scheduler_mut().settle(deadline);
    }

    #[test]
    fn test_keyboard_flip_under_cursor() {
        let mut app = app();
        app.on_key(KeyCode::Right);
        assert_eq!(app.cursor(), 1);

        app.on_key(KeyCode::Enter);

        assert_eq!(app.cards()[1].state, CardState::FaceUp);
        assert!(!app.start_enabled());
    }

    #[test]
    fn test_status_refreshes_on_tick_only() {
        let mut app = app();
        app.on_key(KeyCode::Enter);
        assert_eq!(app.status().total_moves, 0);

        pump(&mut app, Duration::from_secs(1));

        assert_eq!(
            app.status(),
            StatusLine {
                total_moves: 1,
                elapsed_seconds: 1
            }
        );
    }

    #[test]
    fn test_click_on_start_control() {
        let mut app = app();
        let start = app.dispatcher.resolver().start;

        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: start.x + 1,
            row: start.y + 1,
            modifiers: KeyModifiers::NONE,
        });

        assert!(app.engine().is_started());
        assert_eq!(app.engine().status().total_moves, 0);
    }

    #[test]
    fn test_click_moves_cursor_and_flips() {
        let mut app = app();
        let cell = app.dispatcher.resolver().cell(CardId(3)).unwrap();

        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: cell.x + 2,
            row: cell.y + 1,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(app.cursor(), 3);
        assert_eq!(app.cards()[3].state, CardState::FaceUp);
    }

    #[test]
    fn test_full_game_shows_banner() {
        let mut app = app();
        app.on_key(KeyCode::Enter);
        app.on_key(KeyCode::Down);
        app.on_key(KeyCode::Right);
        app.on_key(KeyCode::Enter);
        pump(&mut app, RESOLVE_DELAY);
        app.on_key(KeyCode::Up);
        app.on_key(KeyCode::Enter);
        app.on_key(KeyCode::Down);
        app.on_key(KeyCode::Left);
        app.on_key(KeyCode::Enter);
        pump(&mut app, RESOLVE_DELAY);

        let banner = app.banner().expect("won");
        assert_eq!(banner.total_moves, 4);
        assert_eq!(banner.to_string(), "You Won! with 4 moves under 2 seconds");
        assert_eq!(app.on_key(KeyCode::Char('q')), Control::Quit);
    }
}
