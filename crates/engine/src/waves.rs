use crate::config::EnemyKind;
use crate::events::Event;
use crate::world::{GameState, RoundPhase};

/// Spawn-weighted enemy quota for a round: one linear ramp through 26, a
/// steeper one for 27-30, then the steep form halved.
pub fn quota(round: u32) -> u32 {
    if round <= 26 {
        6 + 2 * round
    } else if round <= 30 {
        6 + 3 * round
    } else {
        (6 + 3 * round) / 2
    }
}

/// Milliseconds between spawns. Shrinks as rounds climb; round 32 is the
/// slow-rolling boss round.
pub fn spawn_interval_ms(round: u32) -> u32 {
    if round == 32 {
        2_500
    } else {
        (1_000_u32.saturating_sub(15 * round)).max(250)
    }
}

/// Composition table: which archetype the n-th spawn of a round is.
pub fn archetype_for(round: u32, index: u32) -> EnemyKind {
    match round {
        0..=5 => EnemyKind::Basic,
        6..=10 => {
            if index % 3 == 0 {
                EnemyKind::Runner
            } else {
                EnemyKind::Basic
            }
        }
        11..=15 => {
            if index % 4 == 0 {
                EnemyKind::Brute
            } else if index % 3 == 0 {
                EnemyKind::Runner
            } else {
                EnemyKind::Basic
            }
        }
        16..=21 => {
            if index % 5 == 0 {
                EnemyKind::Shade
            } else if index % 4 == 0 {
                EnemyKind::Mender
            } else if index % 3 == 0 {
                EnemyKind::Runner
            } else {
                EnemyKind::Basic
            }
        }
        22..=26 => {
            if index % 6 == 0 {
                EnemyKind::Broodmother
            } else if index % 5 == 0 {
                EnemyKind::Shade
            } else if index % 4 == 0 {
                EnemyKind::Mender
            } else if index % 2 == 0 {
                EnemyKind::Runner
            } else {
                EnemyKind::Basic
            }
        }
        27..=31 => {
            if index % 7 == 0 {
                EnemyKind::Broodmother
            } else if index % 5 == 0 {
                EnemyKind::Brute
            } else if index % 3 == 0 {
                EnemyKind::Shade
            } else {
                EnemyKind::Runner
            }
        }
        32 => EnemyKind::Boss,
        _ => {
            if index % 8 == 0 {
                EnemyKind::Boss
            } else if index % 3 == 0 {
                EnemyKind::Brute
            } else if index % 2 == 0 {
                EnemyKind::Shade
            } else {
                EnemyKind::Runner
            }
        }
    }
}

/// Drive spawning for this tick: due death-spawns first, then the round's
/// scheduled spawns, then a pending auto-advance deadline.
pub fn run(state: &mut GameState, events: &mut Vec<Event>) {
    process_pending_spawns(state, events);

    match state.phase {
        RoundPhase::InRound => {
            if state.spawned_quota < quota(state.round) && state.sim_tick >= state.next_spawn_tick {
                spawn_next(state, events);
            }
        }
        RoundPhase::Cleared {
            advance_at: Some(at),
        } if state.sim_tick >= at => {
            advance_round(state, events);
        }
        RoundPhase::Cleared { .. } => {}
    }
}

fn process_pending_spawns(state: &mut GameState, events: &mut Vec<Event>) {
    let sim_tick = state.sim_tick;
    let due: Vec<_> = {
        let pending = &mut state.world.pending_spawns;
        let mut due = Vec::new();
        let mut i = 0;
        while i < pending.len() {
            if pending[i].due_tick <= sim_tick {
                due.push(pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due
    };

    for spawn in due {
        let id = state.spawn_enemy_at(spawn.kind, spawn.x, spawn.y);
        events.push(Event::EnemySpawned {
            id,
            kind: spawn.kind,
        });
    }
}

fn spawn_next(state: &mut GameState, events: &mut Vec<Event>) {
    let kind = archetype_for(state.round, state.spawn_index);
    let id = state.spawn_enemy(kind);
    let weight = state.world.enemies[id].quota_weight;

    state.spawn_index += 1;
    state.spawned_quota += weight;
    state.next_spawn_tick =
        state.sim_tick + state.config.ticks_of_millis(spawn_interval_ms(state.round));

    tracing::debug!(round = state.round, ?kind, "enemy spawned");
    events.push(Event::EnemySpawned { id, kind });
}

/// Round completion: the quota is met AND nothing is alive or pending.
/// Runs after cleanup so corpses from this tick are already gone.
pub fn check_round_complete(state: &mut GameState, events: &mut Vec<Event>) {
    if state.phase != RoundPhase::InRound {
        return;
    }
    if state.spawned_quota < quota(state.round) {
        return;
    }
    if !state.world.enemies.is_empty() || !state.world.pending_spawns.is_empty() {
        return;
    }

    tracing::info!(round = state.round, "round cleared");
    events.push(Event::RoundCleared { round: state.round });

    if state.config.final_round == Some(state.round) {
        state.victory = true;
        events.push(Event::Victory {
            round: state.round,
            kills: state.kills,
        });
        return;
    }

    let advance_at = state.config.auto_advance.then(|| {
        state.sim_tick + state.config.ticks_of_millis(state.config.round_advance_delay_ms)
    });
    state.phase = RoundPhase::Cleared { advance_at };
}

/// The explicit round-boundary reset: spawn counters, the reward-dedup set,
/// and any stale pending spawns all restart here.
pub fn advance_round(state: &mut GameState, events: &mut Vec<Event>) {
    state.round += 1;
    state.spawned_quota = 0;
    state.spawn_index = 0;
    state.rewarded.clear();
    state.world.pending_spawns.clear();
    state.next_spawn_tick =
        state.sim_tick + state.config.ticks_of_millis(state.config.first_spawn_delay_ms);
    state.phase = RoundPhase::InRound;

    tracing::info!(round = state.round, "round started");
    events.push(Event::RoundStarted { round: state.round });
}
