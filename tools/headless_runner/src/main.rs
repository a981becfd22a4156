//! Headless scenario runner: builds a standard defense, runs the engine as
//! fast as possible (or paced in real time), and prints a run summary.

use clap::Parser;
use rampart_core::{ActionEnvelope, SpeedMultiplier};
use rampart_engine::config::{GameConfig, TowerKind};
use rampart_engine::{Action, DefenseGame, Event};
use rampart_host::MatchHost;
use rampart_server::{spawn_tick_loop, SessionHandle, SessionStatus};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Run a scripted tower-defense match without a renderer")]
struct Args {
    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long, short)]
    realtime: bool,

    /// Simulation seed; identical seeds replay identical runs.
    #[arg(long, default_value_t = 12_345)]
    seed: u64,

    /// Speed multiplier index: 0 = 1x, 1 = 2x, 2 = 3x.
    #[arg(long, default_value_t = 0)]
    speed: u8,

    /// Win the run by clearing this round.
    #[arg(long)]
    final_round: Option<u32>,

    /// Game-time budget in seconds for the fast path, wall-clock budget
    /// for the realtime path.
    #[arg(long, default_value_t = 600)]
    max_secs: u64,

    /// Optional JSON config file overriding the built-in tables.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// The scripted build order, placed as money allows.
const BUILD_PLAN: [(TowerKind, f32, f32); 8] = [
    (TowerKind::Arrow, 10.0, 10.0),
    (TowerKind::Frost, 22.0, 40.0),
    (TowerKind::Mortar, 32.0, 30.0),
    (TowerKind::Tesla, 24.0, 55.0),
    (TowerKind::Volley, 45.0, 65.0),
    (TowerKind::Venom, 55.0, 78.0),
    (TowerKind::Gatling, 68.0, 78.0),
    (TowerKind::Flame, 80.0, 72.0),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    config.final_round = args.final_round.or(config.final_round);
    config.validate()?;

    let speed = SpeedMultiplier::from_index(args.speed)
        .ok_or("speed index must be 0, 1, or 2")?;
    let tick_hz = config.tick_hz;

    let mut host = MatchHost::<DefenseGame>::new(config, args.seed, tick_hz);

    let mut action_id = 1;
    if speed != SpeedMultiplier::Normal {
        submit(&mut host, &mut action_id, 1, Action::SetSpeed(speed));
    }
    // Placements are staggered five seconds apart so later slots can be
    // paid for with kill money.
    for (slot, (kind, x, y)) in BUILD_PLAN.iter().enumerate() {
        let tick = 1 + slot as u64 * u64::from(tick_hz) * 5;
        submit(
            &mut host,
            &mut action_id,
            tick,
            Action::PlaceTower {
                kind: *kind,
                x: *x,
                y: *y,
            },
        );
    }

    if args.realtime {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(run_realtime(host, args.max_secs));
    } else {
        run_fast(&mut host, args.max_secs);
    }

    Ok(())
}

fn submit(host: &mut MatchHost<DefenseGame>, action_id: &mut u64, tick: u64, payload: Action) {
    let _ = host.submit(ActionEnvelope {
        action_id: *action_id,
        intended_tick: tick,
        payload,
    });
    *action_id += 1;
}

fn run_fast(host: &mut MatchHost<DefenseGame>, max_secs: u64) {
    let max_ticks = max_secs * u64::from(host.tick_hz());
    let result = host.run_for_ticks(max_ticks);

    println!("=== Run complete ===");
    println!("Outcome: {:?}", result.outcome);
    println!("Final tick: {}", result.final_tick);
    print_state(host.game());
    print_event_summary(&result.events);
}

async fn run_realtime(host: MatchHost<DefenseGame>, max_secs: u64) {
    let handle = SessionHandle::new(host, 4_096);
    let loop_task = spawn_tick_loop(handle.clone());

    let started = tokio::time::Instant::now();
    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let obs = handle.observe().await;
        println!(
            "round {} | money {} | lives {} | kills {} | enemies {}",
            obs.round,
            obs.money,
            obs.lives,
            obs.kills,
            obs.enemies.len()
        );

        if !matches!(handle.status().await, SessionStatus::Running) {
            break;
        }
        if started.elapsed() >= Duration::from_secs(max_secs) {
            handle.request_shutdown();
            break;
        }
    }

    if let Err(err) = loop_task.await {
        tracing::warn!("tick loop task failed: {}", err);
    }

    println!("=== Session over: {:?} ===", handle.status().await);
}

fn print_state(game: &DefenseGame) {
    let state = game.state();
    println!("Round: {}", state.round);
    println!("Money: {}", state.money);
    println!("Lives: {}", state.lives);
    println!("Kills: {}", state.kills);
    println!("Towers:");
    for (_, tower) in state.world.towers.iter() {
        println!(
            "  {:?} at ({:.0}, {:.0}) — damage {:.0}, kills {}, paths {}/{}",
            tower.kind,
            tower.x,
            tower.y,
            tower.lifetime_damage,
            tower.kills,
            tower.top_level,
            tower.bottom_level
        );
    }
}

fn print_event_summary(events: &[Event]) {
    let mut spawned = 0u32;
    let mut killed = 0u32;
    let mut leaked = 0u32;
    let mut rounds = 0u32;
    let mut rejected = 0u32;
    for event in events {
        match event {
            Event::EnemySpawned { .. } => spawned += 1,
            Event::EnemyKilled { .. } => killed += 1,
            Event::EnemyLeaked { .. } => leaked += 1,
            Event::RoundStarted { .. } => rounds += 1,
            Event::ActionRejected { .. } => rejected += 1,
            _ => {}
        }
    }
    println!(
        "Events: {} spawned, {} killed, {} leaked, {} round starts, {} rejected actions",
        spawned, killed, leaked, rounds, rejected
    );
}
