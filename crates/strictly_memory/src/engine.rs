//! The flip/match/reset state machine.
//!
//! [`FlipEngine`] is the single owner of the board, the session and the
//! scheduler. Every transition runs to completion on the caller's thread;
//! deferred work comes back through [`FlipEngine::fire`].

use crate::board::{Board, CardId, CardState};
use crate::error::{MemoryError, MemoryErrorKind, MemoryResult};
use crate::events::{CardView, GameEvent, StatusLine, WinSummary};
use crate::scheduler::{ManualScheduler, Scheduler, TimerEvent, RESOLVE_DELAY, WIN_DELAY};
use crate::session::{GameSession, WinProgress};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// What an accepted or ignored flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The card was already face up or matched; nothing changed.
    Ignored,
    /// First card of a pair turned over.
    Revealed,
    /// Second card turned over and matched the first.
    Matched,
    /// Second card turned over and differs from the first.
    Mismatched,
    /// Two cards were already pending: the move counts but the card stays down.
    Suppressed,
}

/// Controller for one game.
#[derive(Debug)]
pub struct FlipEngine<S> {
    board: Board,
    session: GameSession,
    scheduler: S,
    events: Vec<GameEvent>,
}

impl<S: Scheduler> FlipEngine<S> {
    /// Wraps a freshly generated board in a new, not-started session.
    #[instrument(skip_all, fields(cards = board.len()))]
    pub fn new(board: Board, scheduler: S) -> Self {
        info!("Creating flip engine");
        Self {
            board,
            session: GameSession::new(),
            scheduler,
            events: Vec::new(),
        }
    }

    /// Flips a card.
    ///
    /// Face-up and matched cards are ignored. Every other flip counts as a
    /// move, even when two cards are already waiting to be resolved; in that
    /// case the card simply stays face down.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryErrorKind::InvalidCardReference`] if `id` is not on
    /// the board.
    #[instrument(skip(self), fields(card = %id, flipped = self.session.flipped_count()))]
    pub fn attempt_flip(&mut self, id: CardId) -> MemoryResult<FlipOutcome> {
        let state = match self.board.get(id) {
            Some(card) => card.state(),
            None => {
                error!(board_len = self.board.len(), "Flip referenced a missing card");
                return Err(MemoryError::new(MemoryErrorKind::InvalidCardReference {
                    id: id.index(),
                    board_len: self.board.len(),
                }));
            }
        };
        if state != CardState::Hidden {
            debug!(%state, "Flip ignored");
            return Ok(FlipOutcome::Ignored);
        }

        self.begin();

        let moves = self.session.clock_mut().record_move();
        let flipped = self.session.bump_flipped();
        debug!(moves, flipped, "Flip accepted");

        let outcome = if flipped <= 2 {
            self.reveal(id);
            if flipped == 2 {
                self.compare_pending()
            } else {
                FlipOutcome::Revealed
            }
        } else {
            debug!("Two cards pending, flip counted but not shown");
            FlipOutcome::Suppressed
        };

        self.check_win();
        Ok(outcome)
    }

    /// Starts the game from the start control.
    ///
    /// Single-shot: returns `false` once the session has started, whether by
    /// this control or by the first flip.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        self.begin()
    }

    /// Applies deferred work delivered by the scheduler.
    #[instrument(skip(self))]
    pub fn fire(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ResolvePending => self.resolve_pending(),
            TimerEvent::AnnounceWin => self.announce_win(),
            TimerEvent::ClockTick => {
                if let Some(status) = self.session.clock_mut().tick() {
                    debug!(%status, "Clock tick");
                    self.events.push(GameEvent::Tick(status));
                }
            }
        }
    }

    /// Returns and clears the events published since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that pump it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Render view of every card, in board order.
    pub fn card_views(&self) -> Vec<CardView> {
        self.board.cards().iter().map(CardView::from).collect()
    }

    /// Current move count and elapsed time.
    pub fn status(&self) -> StatusLine {
        self.session.status()
    }

    /// Whether the game has started.
    pub fn is_started(&self) -> bool {
        self.session.is_started()
    }

    /// Whether the win has been announced.
    pub fn is_won(&self) -> bool {
        self.session.is_won()
    }

    /// The announced result, once won.
    pub fn summary(&self) -> Option<WinSummary> {
        self.session.summary()
    }

    /// Whether the start control still accepts activation.
    pub fn start_control_enabled(&self) -> bool {
        !self.session.is_started()
    }

    fn begin(&mut self) -> bool {
        if !self.session.mark_started() {
            return false;
        }
        self.session.clock_mut().start(&mut self.scheduler);
        info!("Game started");
        self.events.push(GameEvent::GameStarted);
        true
    }

    fn reveal(&mut self, id: CardId) {
        if let Some(card) = self.board.card_mut(id) {
            card.reveal();
            let value = card.value().clone();
            self.events.push(GameEvent::CardRevealed { id, value });
        }
    }

    /// Checks the two pending cards and schedules their resolution.
    fn compare_pending(&mut self) -> FlipOutcome {
        let pending = self.board.pending_face_up();
        let outcome = match pending[..] {
            [first, second] => {
                let same = self.board.get(first).map(|c| c.value())
                    == self.board.get(second).map(|c| c.value());
                if same {
                    for id in [first, second] {
                        if let Some(card) = self.board.card_mut(id) {
                            card.mark_matched();
                        }
                    }
                    info!(%first, %second, "Pair matched");
                    self.events.push(GameEvent::PairMatched { first, second });
                    FlipOutcome::Matched
                } else {
                    debug!(%first, %second, "Pair mismatched");
                    FlipOutcome::Mismatched
                }
            }
            _ => {
                warn!(pending = pending.len(), "Expected exactly two pending cards");
                FlipOutcome::Mismatched
            }
        };

        self.scheduler
            .schedule_once(RESOLVE_DELAY, TimerEvent::ResolvePending);
        outcome
    }

    fn resolve_pending(&mut self) {
        let hidden = self.board.pending_face_up();
        for id in &hidden {
            if let Some(card) = self.board.card_mut(*id) {
                card.hide();
            }
        }
        self.session.reset_flipped();

        if !hidden.is_empty() {
            debug!(?hidden, "Unmatched cards turned back over");
            self.events.push(GameEvent::CardsHidden { ids: hidden });
        }
    }

    fn check_win(&mut self) {
        if self.session.progress() == WinProgress::Playing && self.board.all_matched() {
            info!(moves = self.session.total_moves(), "Board cleared, win pending");
            self.session.set_progress(WinProgress::Pending);
            self.scheduler.schedule_once(WIN_DELAY, TimerEvent::AnnounceWin);
        }
    }

    fn announce_win(&mut self) {
        if self.session.progress() != WinProgress::Pending {
            warn!(progress = ?self.session.progress(), "Win announcement without pending win");
            return;
        }
        let summary = WinSummary::from(self.session.status());
        self.session.set_progress(WinProgress::Won(summary));
        self.events.push(GameEvent::Won(summary));
        self.session.clock_mut().stop(&mut self.scheduler);
        info!(%summary, "Game won");
    }
}

impl FlipEngine<ManualScheduler> {
    /// Moves virtual time forward, firing every timer that comes due.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.now() + by;
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.fire(event);
        }
        self.scheduler.settle(deadline);
    }
}
