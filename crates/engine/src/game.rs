use crate::actions::Action;
use crate::combat;
use crate::config::{GameConfig, TowerKind};
use crate::economy;
use crate::events::{Event, RejectReason};
use crate::movement;
use crate::observe::{self, Observation};
use crate::status;
use crate::upgrades;
use crate::waves;
use crate::world::{FinalReport, GameState, RoundPhase, Tower, TowerId};
use rampart_core::{ActionEnvelope, Game, Paced, SpeedMultiplier, TerminalOutcome, Tick};

/// The tower-defense engine behind the `Game` contract.
///
/// One authoritative `GameState` advanced by a sequenced tick: actions,
/// spawning, movement, combat, status reconciliation, death processing,
/// round completion. The whole tick is a no-op while paused or hidden.
pub struct DefenseGame {
    state: GameState,
}

impl DefenseGame {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// End-of-run summary for the persistence boundary, if the run ended.
    pub fn final_report(&self) -> Option<FinalReport> {
        if let Some(report) = self.state.game_over {
            return Some(report);
        }
        self.state.victory.then_some(FinalReport {
            round: self.state.round,
            kills: self.state.kills,
        })
    }
}

impl Game for DefenseGame {
    type Config = GameConfig;
    type Action = Action;
    type Observation = Observation;
    type Event = Event;

    /// The config is assumed validated (`GameConfig::validate`) at the load
    /// boundary; construction itself cannot fail.
    fn new(config: Self::Config, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
        }
    }

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        let state = &mut self.state;
        state.tick = tick;

        if state.game_over.is_some() || state.victory {
            return;
        }

        // Actions run even while paused so an unpause can arrive.
        for envelope in actions {
            apply_action(state, &envelope.payload, out_events);
        }

        if state.is_suspended() {
            return;
        }

        state.sim_tick += 1;
        waves::run(state, out_events);
        movement::run(state, out_events);
        combat::run(state);
        status::run(state);
        economy::process_deaths(state, out_events);
        waves::check_round_complete(state, out_events);
    }

    fn observe(&self, tick: Tick) -> Self::Observation {
        observe::snapshot(&self.state, tick)
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        if self.state.game_over.is_some() {
            return Some(TerminalOutcome::Defeat);
        }
        if self.state.victory {
            return Some(TerminalOutcome::Victory);
        }
        None
    }
}

impl Paced for DefenseGame {
    fn speed_multiplier(&self) -> SpeedMultiplier {
        self.state.speed
    }
}

fn apply_action(state: &mut GameState, action: &Action, events: &mut Vec<Event>) {
    match action {
        Action::PlaceTower { kind, x, y } => place_tower(state, *kind, *x, *y, events),
        Action::SelectTower { tower } => {
            if state.world.towers.contains_key(*tower) {
                state.selected_tower = Some(*tower);
                events.push(Event::TowerSelected { id: *tower });
            } else {
                events.push(Event::ActionRejected {
                    reason: RejectReason::UnknownTower,
                });
            }
        }
        Action::SetTargetingMode { tower, mode } => match state.world.towers.get_mut(*tower) {
            Some(t) => {
                t.targeting_mode = *mode;
                events.push(Event::TargetingModeSet {
                    tower: *tower,
                    mode: *mode,
                });
            }
            None => events.push(Event::ActionRejected {
                reason: RejectReason::UnknownTower,
            }),
        },
        Action::PurchaseUpgrade { tower, path, level } => {
            let _ = upgrades::try_purchase(state, *tower, *path, *level, events);
        }
        Action::SellTower { tower } => sell_tower(state, *tower, events),
        Action::SetPaused(paused) => {
            state.paused = *paused;
            events.push(Event::PausedSet { paused: *paused });
        }
        Action::SetVisible(visible) => {
            state.visible = *visible;
        }
        Action::SetSpeed(multiplier) => {
            state.speed = *multiplier;
            events.push(Event::SpeedChanged {
                multiplier: *multiplier,
            });
        }
        Action::AdvanceRound => {
            if state.phase == (RoundPhase::Cleared { advance_at: None }) {
                waves::advance_round(state, events);
            } else {
                events.push(Event::ActionRejected {
                    reason: RejectReason::RoundNotCleared,
                });
            }
        }
    }
}

fn place_tower(state: &mut GameState, kind: TowerKind, x: f32, y: f32, events: &mut Vec<Event>) {
    if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
        events.push(Event::ActionRejected {
            reason: RejectReason::BlockedPlacement,
        });
        return;
    }
    let spacing = state.config.min_tower_spacing;
    let blocked = state
        .world
        .towers
        .values()
        .any(|t| t.distance_to(x, y) < spacing);
    if blocked {
        events.push(Event::ActionRejected {
            reason: RejectReason::BlockedPlacement,
        });
        return;
    }
    let price = state.config.towers.spec(kind).price;
    if state.money < price {
        events.push(Event::ActionRejected {
            reason: RejectReason::InsufficientFunds,
        });
        return;
    }

    state.money -= price;
    let id = state
        .world
        .towers
        .insert(Tower::from_archetype(&state.config, kind, x, y));
    tracing::debug!(?kind, x, y, "tower placed");
    events.push(Event::TowerPlaced { id, kind });
}

fn sell_tower(state: &mut GameState, tower_id: TowerId, events: &mut Vec<Event>) {
    match state.world.towers.remove(tower_id) {
        Some(tower) => {
            if state.selected_tower == Some(tower_id) {
                state.selected_tower = None;
            }
            let refund = tower.worth * state.config.sell_refund_percent / 100;
            state.money += refund;
            tracing::debug!(kind = ?tower.kind, refund, "tower sold");
            events.push(Event::TowerSold {
                id: tower_id,
                refund,
            });
        }
        None => events.push(Event::ActionRejected {
            reason: RejectReason::UnknownTower,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpgradePath;

    fn game() -> DefenseGame {
        DefenseGame::new(GameConfig::default(), 23)
    }

    fn act(game: &mut DefenseGame, action: Action) -> Vec<Event> {
        let mut events = Vec::new();
        let envelope = ActionEnvelope {
            action_id: 1,
            intended_tick: game.state().tick + 1,
            payload: action,
        };
        let tick = game.state().tick + 1;
        game.step(tick, &[envelope], &mut events);
        events
    }

    #[test]
    fn placing_a_tower_deducts_its_price() {
        let mut g = game();
        let money = g.state().money;
        let events = act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        );
        assert_eq!(g.state().money, money - 50);
        assert_eq!(g.state().world.towers.len(), 1);
        assert!(events.iter().any(|e| matches!(e, Event::TowerPlaced { .. })));
    }

    #[test]
    fn placement_on_top_of_a_tower_is_rejected() {
        let mut g = game();
        act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        );
        let events = act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.5,
                y: 2.0,
            },
        );
        assert_eq!(g.state().world.towers.len(), 1);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                reason: RejectReason::BlockedPlacement
            }
        )));
    }

    #[test]
    fn unaffordable_tower_is_rejected() {
        let mut g = game();
        g.state_mut().money = 10;
        let events = act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Mortar,
                x: 2.0,
                y: 2.0,
            },
        );
        assert!(g.state().world.towers.is_empty());
        assert_eq!(g.state().money, 10);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                reason: RejectReason::InsufficientFunds
            }
        )));
    }

    #[test]
    fn selling_refunds_a_share_of_worth() {
        let mut g = game();
        act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        );
        let money = g.state().money;
        let id = g.state().world.towers.keys().next().expect("tower placed");
        let events = act(&mut g, Action::SellTower { tower: id });

        assert!(g.state().world.towers.is_empty());
        assert_eq!(g.state().money, money + 50 * 75 / 100);
        assert!(events.iter().any(|e| matches!(e, Event::TowerSold { .. })));
    }

    #[test]
    fn pause_freezes_game_time() {
        let mut g = game();
        act(&mut g, Action::SetPaused(true));
        let sim = g.state().sim_tick;

        let mut events = Vec::new();
        for tick in 10..100 {
            g.step(tick, &[], &mut events);
        }
        assert_eq!(g.state().sim_tick, sim);

        // Unpausing resumes: the unpause tick and the next one both advance.
        act(&mut g, Action::SetPaused(false));
        let mut events = Vec::new();
        g.step(200, &[], &mut events);
        assert_eq!(g.state().sim_tick, sim + 2);
    }

    #[test]
    fn hidden_view_also_freezes_game_time() {
        let mut g = game();
        act(&mut g, Action::SetVisible(false));
        let sim = g.state().sim_tick;

        let mut events = Vec::new();
        g.step(50, &[], &mut events);
        assert_eq!(g.state().sim_tick, sim);
    }

    #[test]
    fn speed_action_only_changes_the_reported_multiplier() {
        let mut g = game();
        assert_eq!(g.speed_multiplier(), SpeedMultiplier::Normal);
        act(&mut g, Action::SetSpeed(SpeedMultiplier::Triple));
        assert_eq!(g.speed_multiplier(), SpeedMultiplier::Triple);
    }

    #[test]
    fn manual_advance_requires_a_cleared_round() {
        let mut g = game();
        let events = act(&mut g, Action::AdvanceRound);
        assert_eq!(g.state().round, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::ActionRejected {
                reason: RejectReason::RoundNotCleared
            }
        )));

        g.state_mut().phase = RoundPhase::Cleared { advance_at: None };
        act(&mut g, Action::AdvanceRound);
        assert_eq!(g.state().round, 2);
    }

    #[test]
    fn selection_tracks_the_tower_and_clears_on_sell() {
        let mut g = game();
        act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        );
        let id = g.state().world.towers.keys().next().expect("tower placed");

        act(&mut g, Action::SelectTower { tower: id });
        assert_eq!(g.state().selected_tower, Some(id));

        act(&mut g, Action::SellTower { tower: id });
        assert_eq!(g.state().selected_tower, None);
    }

    #[test]
    fn upgrade_action_routes_to_the_upgrade_engine() {
        let mut g = game();
        g.state_mut().money = 10_000;
        act(
            &mut g,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        );
        let id = g.state().world.towers.keys().next().expect("tower placed");
        act(
            &mut g,
            Action::PurchaseUpgrade {
                tower: id,
                path: UpgradePath::Top,
                level: 1,
            },
        );
        assert_eq!(g.state().world.towers[id].top_level, 1);
    }

    #[test]
    fn defeat_is_terminal() {
        let mut g = game();
        g.state_mut().game_over = Some(FinalReport { round: 4, kills: 9 });
        assert_eq!(g.is_terminal(), Some(TerminalOutcome::Defeat));
        assert_eq!(g.final_report(), Some(FinalReport { round: 4, kills: 9 }));
    }
}
