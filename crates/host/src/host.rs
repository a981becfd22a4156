use rampart_core::{ActionEnvelope, Game, TerminalOutcome, Tick};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct RunResult<G: Game> {
    pub outcome: Option<TerminalOutcome>,
    pub final_tick: Tick,
    pub events: Vec<G::Event>,
}

/// Deterministic driver for a single game session.
///
/// Actions are queued against the tick they should execute on; replaying the
/// same config, seed, and submissions reproduces the run exactly.
pub struct MatchHost<G: Game> {
    game: G,
    current_tick: Tick,
    tick_hz: u32,
    pending_actions: BTreeMap<Tick, Vec<ActionEnvelope<G::Action>>>,
}

impl<G: Game> MatchHost<G> {
    pub fn new(config: G::Config, seed: u64, tick_hz: u32) -> Self {
        Self {
            game: G::new(config, seed),
            current_tick: 0,
            tick_hz,
            pending_actions: BTreeMap::new(),
        }
    }

    /// Submit an action to be executed at its intended tick.
    /// Past or current ticks slide to the next tick. Returns the tick the
    /// action was actually scheduled for.
    pub fn submit(&mut self, mut action: ActionEnvelope<G::Action>) -> Tick {
        let scheduled_tick = if action.intended_tick <= self.current_tick {
            self.current_tick + 1
        } else {
            action.intended_tick
        };

        action.intended_tick = scheduled_tick;
        self.pending_actions
            .entry(scheduled_tick)
            .or_default()
            .push(action);

        scheduled_tick
    }

    pub fn run_for_ticks(&mut self, max_ticks: Tick) -> RunResult<G> {
        let mut all_events = Vec::new();

        for _ in 0..max_ticks {
            if let Some(outcome) = self.game.is_terminal() {
                return RunResult {
                    outcome: Some(outcome),
                    final_tick: self.current_tick,
                    events: all_events,
                };
            }

            self.current_tick += 1;

            let mut actions = self
                .pending_actions
                .remove(&self.current_tick)
                .unwrap_or_default();

            // Sort by action_id for determinism
            actions.sort_by_key(|a| a.action_id);

            let mut tick_events = Vec::new();
            self.game
                .step(self.current_tick, &actions, &mut tick_events);
            all_events.extend(tick_events);
        }

        let outcome = self.game.is_terminal();
        RunResult {
            outcome,
            final_tick: self.current_tick,
            events: all_events,
        }
    }

    /// Advance by one tick. Returns None if the game is already terminal,
    /// otherwise the events from this tick.
    pub fn step_one_tick(&mut self) -> Option<Vec<G::Event>> {
        if self.game.is_terminal().is_some() {
            return None;
        }

        self.current_tick += 1;

        let mut actions = self
            .pending_actions
            .remove(&self.current_tick)
            .unwrap_or_default();

        actions.sort_by_key(|a| a.action_id);

        let mut tick_events = Vec::new();
        self.game
            .step(self.current_tick, &actions, &mut tick_events);

        Some(tick_events)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn is_terminal(&self) -> Option<TerminalOutcome> {
        self.game.is_terminal()
    }
}
