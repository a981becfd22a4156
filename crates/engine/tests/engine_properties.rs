//! Cross-system properties driven through the public `Game` interface.

use rampart_core::{ActionEnvelope, Game, SpeedMultiplier, Tick};
use rampart_engine::config::{EnemyKind, GameConfig, TowerKind};
use rampart_engine::world::{LingeringZone, PoisonEffect, Tower};
use rampart_engine::{Action, DefenseGame, Event};

fn envelope(action_id: u64, tick: Tick, payload: Action) -> ActionEnvelope<Action> {
    ActionEnvelope {
        action_id,
        intended_tick: tick,
        payload,
    }
}

fn run_ticks(game: &mut DefenseGame, from: Tick, count: u64, events: &mut Vec<Event>) -> Tick {
    let mut tick = from;
    for _ in 0..count {
        tick += 1;
        game.step(tick, &[], events);
    }
    tick
}

/// A basic tower (attack 50, 1000 ms interval, radius 27) next to the spawn
/// against a single 100 hp enemy: half dead after one cycle, dead with the
/// reward banked after two.
#[test]
fn reference_scenario_two_cycles_kill_a_basic_enemy() {
    let mut game = DefenseGame::new(GameConfig::default(), 1);

    // Keep the scheduler out of the scenario.
    game.state_mut().next_spawn_tick = u64::MAX;
    let enemy = game.state_mut().spawn_enemy(EnemyKind::Basic);

    let mut events = Vec::new();
    game.step(
        1,
        &[envelope(
            1,
            1,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 2.0,
                y: 2.0,
            },
        )],
        &mut events,
    );

    let money_after_place = game.state().money;
    assert_eq!(money_after_place, 180 - 50);
    assert_eq!(game.state().world.enemies[enemy].hp, 50.0);

    // One full attack interval later the second shot lands and kills.
    let interval = game.state().config.ticks_of_millis(1_000);
    run_ticks(&mut game, 1, interval, &mut events);

    assert!(game.state().world.enemies.is_empty());
    assert_eq!(game.state().money, money_after_place + 15);
    assert_eq!(game.state().kills, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::EnemyKilled { reward: 15, .. })));
}

/// Direct hit, poison tick, and lingering-zone tick all cross the death
/// threshold in the same tick; the reward is still granted exactly once.
#[test]
fn overlapping_death_sources_pay_one_reward() {
    let mut game = DefenseGame::new(GameConfig::default(), 2);
    let state = game.state_mut();
    state.next_spawn_tick = u64::MAX;

    let _arrow = state.world.towers.insert(Tower::from_archetype(
        &state.config,
        TowerKind::Arrow,
        2.0,
        2.0,
    ));
    // Venom parked far away so only its lingering effects act this tick.
    let venom = state.world.towers.insert(Tower::from_archetype(
        &state.config,
        TowerKind::Venom,
        80.0,
        20.0,
    ));

    let enemy = state.spawn_enemy_at(EnemyKind::Basic, 5.0, 5.0);
    state.world.enemies[enemy].hp = 1.0;
    state.world.enemies[enemy].poison = Some(PoisonEffect {
        source: venom,
        damage_per_tick: 18.0,
        next_tick: 1,
        ticks_left: 4,
        stops_regen: false,
    });
    state.world.zones.push(LingeringZone {
        x: 5.0,
        y: 5.0,
        radius: 12.0,
        damage_per_tick: 8.0,
        source: venom,
        expires_tick: 1_000,
    });
    state.next_zone_tick = 1;

    let money_before = state.money;
    let mut events = Vec::new();
    game.step(1, &[], &mut events);

    assert!(game.state().world.enemies.is_empty());
    assert_eq!(game.state().money, money_before + 15);
    assert_eq!(game.state().kills, 1);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, Event::EnemyKilled { .. }))
            .count(),
        1
    );
}

fn fortified_game(seed: u64) -> DefenseGame {
    let mut game = DefenseGame::new(GameConfig::default(), seed);
    let state = game.state_mut();
    state.money = 100_000;
    for (kind, x, y) in [
        (TowerKind::Mortar, 30.0, 30.0),
        (TowerKind::Tesla, 22.0, 40.0),
        (TowerKind::Arrow, 10.0, 10.0),
        (TowerKind::Volley, 40.0, 60.0),
    ] {
        let _ = state
            .world
            .towers
            .insert(Tower::from_archetype(&state.config, kind, x, y));
    }
    game
}

/// With the quota met and the field empty, auto mode advances exactly once
/// after the configured delay.
#[test]
fn a_defended_round_clears_and_auto_advances() {
    let mut game = fortified_game(3);
    let mut events = Vec::new();

    let mut tick = 0;
    for _ in 0..40_000 {
        tick += 1;
        game.step(tick, &[], &mut events);
        if game.state().round >= 2 {
            break;
        }
    }

    assert_eq!(game.state().round, 2, "round never advanced");
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, Event::RoundCleared { round: 1 }))
            .count(),
        1
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, Event::RoundStarted { round: 2 }))
            .count(),
        1
    );
    assert_eq!(game.state().lives, game.state().config.start_lives);
}

fn run_fortified(seed: u64, speed: Option<SpeedMultiplier>) -> (u32, u32, u32, Vec<Event>) {
    let mut game = fortified_game(seed);
    let mut events = Vec::new();

    let mut tick = 0;
    if let Some(multiplier) = speed {
        tick = 1;
        game.step(
            1,
            &[envelope(1, 1, Action::SetSpeed(multiplier))],
            &mut events,
        );
    }
    // Every variant runs exactly 8000 game-time ticks.
    run_ticks(&mut game, tick, 8_000 - tick, &mut events);

    let kill_events: Vec<Event> = events
        .iter()
        .filter(|e| matches!(e, Event::EnemyKilled { .. }))
        .cloned()
        .collect();
    (
        game.state().kills,
        game.state().money,
        game.state().round,
        kill_events,
    )
}

/// The speed multiplier only changes wall-clock pacing: the same tick count
/// produces identical kills, money, and round at 1x, 2x, and 3x.
#[test]
fn speed_multiplier_does_not_change_outcomes() {
    let baseline = run_fortified(7, None);
    let double = run_fortified(7, Some(SpeedMultiplier::Double));
    let triple = run_fortified(7, Some(SpeedMultiplier::Triple));

    assert_eq!(baseline, double);
    assert_eq!(baseline, triple);
}

/// Same seed, same submissions: bit-identical event streams.
#[test]
fn identical_runs_are_deterministic() {
    let a = run_fortified(42, None);
    let b = run_fortified(42, None);
    assert_eq!(a, b);
    assert!(!a.3.is_empty(), "the scenario should produce kills");
}

/// The same config, seed, and submissions through the host replay to the
/// same final tick and outcome.
#[test]
fn host_replay_reproduces_the_run() {
    let run = || {
        let mut config = GameConfig::default();
        config.start_lives = 2;
        let mut host = rampart_host::MatchHost::<DefenseGame>::new(config, 31, 400);
        host.submit(envelope(
            1,
            1,
            Action::PlaceTower {
                kind: TowerKind::Arrow,
                x: 10.0,
                y: 10.0,
            },
        ));
        host.submit(envelope(
            2,
            1,
            Action::PlaceTower {
                kind: TowerKind::Frost,
                x: 22.0,
                y: 40.0,
            },
        ));
        let result = host.run_for_ticks(200_000);
        (
            result.outcome,
            result.final_tick,
            host.game().state().kills,
            host.game().state().round,
        )
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(first.0, Some(rampart_core::TerminalOutcome::Defeat));
}

/// Leaked enemies drain lives and eventually end the run with a report.
#[test]
fn an_undefended_run_ends_in_defeat() {
    let mut config = GameConfig::default();
    config.start_lives = 3;
    let mut game = DefenseGame::new(config, 9);

    let mut events = Vec::new();
    let mut tick = 0;
    for _ in 0..200_000 {
        tick += 1;
        game.step(tick, &[], &mut events);
        if game.is_terminal().is_some() {
            break;
        }
    }

    assert_eq!(
        game.is_terminal(),
        Some(rampart_core::TerminalOutcome::Defeat)
    );
    let report = game.final_report().expect("defeat produces a report");
    assert!(report.round >= 1);
    assert!(events.iter().any(|e| matches!(e, Event::GameOver { .. })));
}
