use crate::envelope::ActionEnvelope;
use crate::time::SpeedMultiplier;
use crate::types::Tick;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Victory,
    Defeat,
}

/// Wall-clock pacing inputs a game exposes to a real-time driver.
pub trait Paced {
    /// Current player-selected speed multiplier.
    fn speed_multiplier(&self) -> SpeedMultiplier;
}

/// Contract between a deterministic simulation and the host that drives it.
///
/// `step` must be a pure function of current state, tick, and the action
/// batch; all randomness derives from the seed passed to `new`.
pub trait Game: Sized {
    type Config: Clone + Send + Sync + 'static;
    type Action: Clone + Send + Sync + 'static;
    type Observation: Clone + Send + Sync + 'static;
    type Event: Clone + Send + Sync + 'static;

    fn new(config: Self::Config, seed: u64) -> Self;

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    );

    fn observe(&self, tick: Tick) -> Self::Observation;

    fn is_terminal(&self) -> Option<TerminalOutcome>;
}
