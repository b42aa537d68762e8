//! Routing of raw interactions to the engine.

use crate::board::CardId;
use crate::engine::{FlipEngine, FlipOutcome};
use crate::error::MemoryResult;
use crate::scheduler::Scheduler;
use tracing::{debug, instrument, trace};

/// Maps a host-specific interaction target to game entities.
///
/// Hosts implement this for whatever their input events point at: screen
/// coordinates, widget ids, cursor positions.
pub trait TargetResolver<T: ?Sized> {
    /// The card enclosing `target`, if any.
    fn card_at(&self, target: &T) -> Option<CardId>;

    /// Whether `target` is the start control.
    fn is_start_control(&self, target: &T) -> bool;
}

/// What a dispatched interaction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Forwarded to the engine as a flip.
    Flip(FlipOutcome),
    /// Activated the start control.
    Started,
    /// Hit nothing actionable.
    Ignored,
}

/// Host-independent interaction target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// A card by board index.
    Card(usize),
    /// The start control.
    StartControl,
    /// Anything else.
    Background,
}

/// Resolver for [`Interaction`] targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectResolver;

impl TargetResolver<Interaction> for DirectResolver {
    fn card_at(&self, target: &Interaction) -> Option<CardId> {
        match target {
            Interaction::Card(index) => Some(CardId(*index)),
            Interaction::StartControl | Interaction::Background => None,
        }
    }

    fn is_start_control(&self, target: &Interaction) -> bool {
        matches!(target, Interaction::StartControl)
    }
}

/// Routes interactions through a [`TargetResolver`] to a [`FlipEngine`].
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher<R> {
    resolver: R,
}

impl<R> InputDispatcher<R> {
    /// Creates a dispatcher around a resolver.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Mutable access to the resolver, e.g. to refresh a layout.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Handles one interaction.
    ///
    /// A card that is not face up is flipped. Otherwise, if the target is
    /// the start control and it is still enabled, the game starts.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidCardReference` when the resolver names a card that
    /// is not on the board.
    #[instrument(skip_all)]
    pub fn dispatch<T, S>(&self, engine: &mut FlipEngine<S>, target: &T) -> MemoryResult<Dispatch>
    where
        T: ?Sized,
        R: TargetResolver<T>,
        S: Scheduler,
    {
        if let Some(id) = self.resolver.card_at(target) {
            let face_up = engine.board().get(id).is_some_and(|card| card.is_face_up());
            if !face_up {
                trace!(card = %id, "Dispatching flip");
                return engine.attempt_flip(id).map(Dispatch::Flip);
            }
        }

        if self.resolver.is_start_control(target) && engine.start_control_enabled() {
            engine.start();
            return Ok(Dispatch::Started);
        }

        debug!("Interaction ignored");
        Ok(Dispatch::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, CardValue};
    use crate::scheduler::ManualScheduler;

    fn engine() -> FlipEngine<ManualScheduler> {
        let values = ["A", "B", "A", "B"].iter().map(|s| CardValue::from(*s)).collect();
        FlipEngine::new(Board::from_layout(2, values).unwrap(), ManualScheduler::new())
    }

    #[test]
    fn test_card_target_flips() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);

        let result = dispatcher.dispatch(&mut game, &Interaction::Card(1)).unwrap();

        assert_eq!(result, Dispatch::Flip(FlipOutcome::Revealed));
        assert_eq!(game.session().total_moves(), 1);
    }

    #[test]
    fn test_face_up_card_ignored() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);
        dispatcher.dispatch(&mut game, &Interaction::Card(1)).unwrap();

        let result = dispatcher.dispatch(&mut game, &Interaction::Card(1)).unwrap();

        assert_eq!(result, Dispatch::Ignored);
        assert_eq!(game.session().total_moves(), 1);
    }

    #[test]
    fn test_start_control_is_single_shot() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);

        assert_eq!(
            dispatcher.dispatch(&mut game, &Interaction::StartControl).unwrap(),
            Dispatch::Started
        );
        assert_eq!(
            dispatcher.dispatch(&mut game, &Interaction::StartControl).unwrap(),
            Dispatch::Ignored
        );
        assert_eq!(game.session().total_moves(), 0);
        assert!(game.session().is_running());
    }

    #[test]
    fn test_start_control_disabled_after_first_flip() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);
        dispatcher.dispatch(&mut game, &Interaction::Card(0)).unwrap();

        assert_eq!(
            dispatcher.dispatch(&mut game, &Interaction::StartControl).unwrap(),
            Dispatch::Ignored
        );
    }

    #[test]
    fn test_background_ignored() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);
        assert_eq!(
            dispatcher.dispatch(&mut game, &Interaction::Background).unwrap(),
            Dispatch::Ignored
        );
        assert!(!game.is_started());
    }

    #[test]
    fn test_unknown_card_propagates_error() {
        let mut game = engine();
        let dispatcher = InputDispatcher::new(DirectResolver);
        assert!(dispatcher.dispatch(&mut game, &Interaction::Card(9)).is_err());
    }
}
