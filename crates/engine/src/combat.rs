use crate::config::{AttackType, LingeringSpec, TowerSpec};
use crate::status;
use crate::targeting;
use crate::world::{AttackCommit, EnemyId, GameState, LingeringZone, TowerId};
use rand::Rng;

/// One combat pass: settle due cooldowns, then fire every ready tower that
/// finds a target.
pub fn run(state: &mut GameState) {
    release_commits(state);

    let tower_ids: Vec<TowerId> = state.world.towers.keys().collect();
    for tower_id in tower_ids {
        if state.world.towers[tower_id].is_attacking() {
            continue;
        }
        let selection = targeting::select_targets(state, tower_id);
        if selection.is_empty() {
            // An idle cycle lets a spun-up barrel wind down.
            state.world.towers[tower_id].accel_stacks = 0;
            continue;
        }
        resolve_attack(state, tower_id, &selection);
    }
}

/// Settle every commit whose release tick has arrived: flush accumulated
/// damage into the tower's lifetime counter and drop the exclusive locks.
fn release_commits(state: &mut GameState) {
    let sim_tick = state.sim_tick;
    let mut unlocked: Vec<EnemyId> = Vec::new();

    for (_, tower) in state.world.towers.iter_mut() {
        let due = tower
            .commit
            .as_ref()
            .map_or(false, |c| c.release_tick <= sim_tick);
        if !due {
            continue;
        }
        if let Some(commit) = tower.commit.take() {
            tower.lifetime_damage += commit.damage;
            unlocked.extend(commit.affected);
        }
    }

    for id in unlocked {
        if let Some(enemy) = state.world.enemies.get_mut(id) {
            enemy.targeted = false;
        }
    }
}

fn resolve_attack(state: &mut GameState, tower_id: TowerId, selection: &[EnemyId]) {
    let spec = state.world.towers[tower_id].spec.clone();

    // One critical roll per attack; the multiplier covers every target.
    let crit_mult = match &spec.critical {
        Some(c) if state.rng.gen::<f64>() < c.chance => c.multiplier,
        _ => 1.0,
    };
    let accel_mult = match &spec.acceleration {
        Some(a) => {
            let stacks = state.world.towers[tower_id].accel_stacks.min(a.max_stacks);
            a.per_hit.powi(stacks as i32)
        }
        None => 1.0,
    };
    let damage = spec.attack * crit_mult * accel_mult;

    let mut dealt_total = 0.0;
    let mut affected: Vec<EnemyId> = Vec::new();

    match spec.attack_type {
        AttackType::Single | AttackType::Double | AttackType::Triple | AttackType::Quadruple => {
            for &target in selection {
                dealt_total += strike(state, tower_id, &spec, target, damage, true);
                affected.push(target);
            }
        }
        AttackType::Explosion => {
            let primary = selection[0];
            let (cx, cy) = match state.world.enemies.get(primary) {
                Some(e) => (e.x, e.y),
                None => return,
            };
            dealt_total += strike(state, tower_id, &spec, primary, damage, true);
            lock(state, primary);
            affected.push(primary);

            if let Some(explosion) = &spec.explosion {
                let splash: Vec<EnemyId> = state
                    .world
                    .enemies
                    .iter()
                    .filter(|(id, e)| {
                        *id != primary && !e.is_dead() && e.distance_to(cx, cy) <= explosion.radius
                    })
                    .map(|(id, _)| id)
                    .collect();
                for target in splash {
                    dealt_total += strike(state, tower_id, &spec, target, damage * 0.25, false);
                    lock(state, target);
                    affected.push(target);
                }
            }
            if let Some(lingering) = &spec.lingering {
                spawn_zone(state, tower_id, cx, cy, lingering);
            }
        }
        AttackType::Chain => {
            let mut current = selection[0];
            dealt_total += strike(state, tower_id, &spec, current, damage, true);
            lock(state, current);
            affected.push(current);

            if let Some(chain) = &spec.chain {
                for _ in 0..chain.count {
                    let from = match state.world.enemies.get(current) {
                        Some(e) => (e.x, e.y),
                        None => break,
                    };
                    let next = match nearest_unchained(state, from, chain.range) {
                        Some(id) => id,
                        None => break,
                    };
                    // Every hop carries full attack, no falloff.
                    dealt_total += strike(state, tower_id, &spec, next, damage, false);
                    lock(state, next);
                    affected.push(next);
                    current = next;
                }
            }
        }
        AttackType::Lingering => {
            for &target in selection {
                dealt_total += strike(state, tower_id, &spec, target, damage, true);
                affected.push(target);
            }
            if let Some(lingering) = &spec.lingering {
                if let Some(enemy) = state.world.enemies.get(selection[0]) {
                    let (x, y) = (enemy.x, enemy.y);
                    spawn_zone(state, tower_id, x, y, lingering);
                }
            }
        }
    }

    let interval = state.config.ticks_of_millis(spec.attack_interval_ms);
    let release_tick = state.sim_tick + interval;
    let tower = &mut state.world.towers[tower_id];
    tower.commit = Some(AttackCommit {
        release_tick,
        damage: dealt_total,
        affected,
    });
    if spec.acceleration.is_some() {
        tower.accel_stacks = tower.accel_stacks.saturating_add(1);
    }
}

/// Apply one hit to one enemy: mark and boss multipliers, the armor rule,
/// the execute threshold, then on-hit status effects. `primary` gates the
/// effects that only land on the main target; stun is rolled per affected
/// enemy. Returns hp actually removed.
fn strike(
    state: &mut GameState,
    tower_id: TowerId,
    spec: &TowerSpec,
    enemy_id: EnemyId,
    amount: f32,
    primary: bool,
) -> f32 {
    let stun_hit = match &spec.stun {
        Some(s) => state.rng.gen::<f64>() < s.chance,
        None => false,
    };
    let round = state.round;
    let sim_tick = state.sim_tick;
    let config = &state.config;

    let enemy = match state.world.enemies.get_mut(enemy_id) {
        Some(e) => e,
        None => return 0.0,
    };
    if enemy.is_dead() {
        return 0.0;
    }

    let mut dmg = amount;
    if let Some(mark) = &enemy.mark {
        dmg *= mark.damage_multiplier;
    }
    if enemy.boss {
        if let Some(mult) = spec.boss_damage_multiplier {
            dmg *= mult;
        }
    }

    let mut dealt = 0.0;
    if enemy.armored {
        // A piercing hit is spent stripping the plating; anything else
        // bounces off.
        if spec.hits_armored {
            enemy.armored = false;
        }
    } else {
        enemy.hp -= dmg;
        enemy.last_hit_by = Some(tower_id);
        dealt = dmg;
        if let Some(threshold) = spec.execute_threshold {
            if enemy.hp > 0.0 && enemy.hp / enemy.max_hp <= threshold {
                enemy.hp = 0.0;
            }
        }
    }

    if stun_hit {
        if let Some(s) = &spec.stun {
            status::apply_stun(config, sim_tick, enemy, tower_id, s);
        }
    }
    if primary {
        if let Some(s) = &spec.slow {
            status::apply_slow(config, round, sim_tick, enemy, tower_id, s);
        }
        if let Some(p) = &spec.poison {
            status::apply_poison(config, sim_tick, enemy, tower_id, p);
        }
        if let Some(m) = &spec.mark {
            status::apply_mark(enemy, tower_id, m);
        }
    }

    dealt
}

fn lock(state: &mut GameState, enemy_id: EnemyId) {
    if let Some(enemy) = state.world.enemies.get_mut(enemy_id) {
        enemy.targeted = true;
    }
}

fn nearest_unchained(state: &GameState, from: (f32, f32), range: f32) -> Option<EnemyId> {
    let mut best: Option<(EnemyId, f32)> = None;
    for (id, enemy) in state.world.enemies.iter() {
        if enemy.is_dead() || enemy.targeted {
            continue;
        }
        let d = enemy.distance_to(from.0, from.1);
        if d > range {
            continue;
        }
        let closer = best.map_or(true, |(_, bd)| d < bd);
        if closer {
            best = Some((id, d));
        }
    }
    best.map(|(id, _)| id)
}

fn spawn_zone(state: &mut GameState, tower_id: TowerId, x: f32, y: f32, spec: &LingeringSpec) {
    let expires_tick = state.sim_tick + state.config.ticks_of_millis(spec.duration_ms);
    state.world.zones.push(LingeringZone {
        x,
        y,
        radius: spec.radius,
        damage_per_tick: spec.damage_per_tick,
        source: tower_id,
        expires_tick,
    });
}
