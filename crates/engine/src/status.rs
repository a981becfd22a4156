use crate::config::{GameConfig, MarkSpec, PoisonSpec, SlowSpec, StunSpec};
use crate::world::{
    Enemy, GameState, MarkEffect, PoisonEffect, SlowEffect, StunEffect, TowerId,
};
use rampart_core::Tick;
use std::collections::HashMap;

/// Reconcile all status state for this tick: expire slows and stuns, run
/// poison and regen cadences, tick lingering zones, drop expired zones.
pub fn run(state: &mut GameState) {
    expire_slows(state);
    expire_stuns(state);
    tick_poisons(state);
    tick_regen(state);
    tick_zones(state);
}

/// Apply a slow, clamped to the round's minimum floor. A weaker slow never
/// replaces a stronger incumbent; equal-or-stronger overwrites.
pub fn apply_slow(
    config: &GameConfig,
    round: u32,
    sim_tick: Tick,
    enemy: &mut Enemy,
    source: TowerId,
    slow: &SlowSpec,
) {
    let magnitude = slow.magnitude.max(config.slow_floor(round));
    if let Some(existing) = &enemy.slow {
        if magnitude > existing.magnitude {
            return;
        }
    }
    enemy.slow = Some(SlowEffect {
        source,
        magnitude,
        until_tick: sim_tick + config.ticks_of_millis(slow.duration_ms),
    });
    enemy.refresh_speed();
}

/// Apply or extend a stun. Stun duration is additive across hits while
/// active, scaled by the victim's stun resistance.
pub fn apply_stun(
    config: &GameConfig,
    sim_tick: Tick,
    enemy: &mut Enemy,
    source: TowerId,
    stun: &StunSpec,
) {
    let base = config.ticks_of_millis(stun.duration_ms);
    let added = (base as f64 * enemy.stun_resistance as f64) as u64;
    match &mut enemy.stun {
        Some(existing) => existing.until_tick += added,
        None => {
            enemy.stun = Some(StunEffect {
                source,
                until_tick: sim_tick + added,
            })
        }
    }
    enemy.refresh_speed();
}

/// Start a poison window. Total damage over the window is four times the
/// tower's poison damage, split evenly across the cadence.
pub fn apply_poison(
    config: &GameConfig,
    sim_tick: Tick,
    enemy: &mut Enemy,
    source: TowerId,
    poison: &PoisonSpec,
) {
    if enemy.poison.is_some() {
        return;
    }
    let total_ticks = config.poison_total_ticks();
    let interval = config.ticks_of_millis(config.poison_interval_ms);
    enemy.poison = Some(PoisonEffect {
        source,
        damage_per_tick: 4.0 * poison.damage / total_ticks as f32,
        next_tick: sim_tick + interval,
        ticks_left: total_ticks,
        stops_regen: poison.stops_regen,
    });
    if poison.stops_regen {
        enemy.can_regen = false;
    }
}

pub fn apply_mark(enemy: &mut Enemy, source: TowerId, mark: &MarkSpec) {
    if enemy.mark.is_some() {
        return;
    }
    enemy.mark = Some(MarkEffect {
        source,
        damage_multiplier: mark.multiplier,
        death_burst: mark.death_burst,
        burst_radius: mark.burst_radius,
    });
}

/// Damage from a non-attack source (poison tick, zone tick, death burst).
/// Marks amplify it; armor still blocks it. Returns the amount dealt.
pub fn dot_damage(enemy: &mut Enemy, source: TowerId, amount: f32) -> f32 {
    if enemy.is_dead() || enemy.armored {
        return 0.0;
    }
    let mut dmg = amount;
    if let Some(mark) = &enemy.mark {
        dmg *= mark.damage_multiplier;
    }
    enemy.hp -= dmg;
    enemy.last_hit_by = Some(source);
    dmg
}

fn expire_slows(state: &mut GameState) {
    let sim_tick = state.sim_tick;
    for (_, enemy) in state.world.enemies.iter_mut() {
        let expired = enemy.slow.map_or(false, |s| s.until_tick <= sim_tick);
        if expired {
            enemy.slow = None;
            enemy.refresh_speed();
        }
    }
}

fn expire_stuns(state: &mut GameState) {
    let sim_tick = state.sim_tick;
    for (_, enemy) in state.world.enemies.iter_mut() {
        let expired = enemy.stun.map_or(false, |s| s.until_tick <= sim_tick);
        if expired {
            enemy.stun = None;
            enemy.refresh_speed();
        }
    }
}

fn tick_poisons(state: &mut GameState) {
    let sim_tick = state.sim_tick;
    let interval = state.config.ticks_of_millis(state.config.poison_interval_ms);
    for (_, enemy) in state.world.enemies.iter_mut() {
        let mut effect = match enemy.poison {
            Some(p) if p.next_tick <= sim_tick => p,
            _ => continue,
        };
        if !enemy.is_dead() {
            let _ = dot_damage(enemy, effect.source, effect.damage_per_tick);
        }
        effect.ticks_left -= 1;
        if effect.ticks_left == 0 {
            enemy.poison = None;
            enemy.can_regen = true;
        } else {
            effect.next_tick += interval;
            enemy.poison = Some(effect);
        }
    }
}

fn tick_regen(state: &mut GameState) {
    if state.sim_tick < state.next_regen_tick {
        return;
    }
    state.next_regen_tick = state.sim_tick + state.config.ticks_of_millis(state.config.regen_interval_ms);

    for (_, enemy) in state.world.enemies.iter_mut() {
        if enemy.is_dead() || !enemy.can_regen || enemy.regen_per_second <= 0.0 {
            continue;
        }
        enemy.hp = (enemy.hp + enemy.regen_per_second).min(enemy.max_hp);
    }
}

/// Lingering zones damage every live enemy inside them on the zone
/// cadence. Per enemy, the tick's total is applied once; per tower, dealt
/// damage is credited in aggregate.
fn tick_zones(state: &mut GameState) {
    let sim_tick = state.sim_tick;

    // Expiry is checked every tick so a zone never outlives its deadline
    // by a full cadence.
    state.world.zones.retain(|z| z.expires_tick > sim_tick);

    if state.sim_tick < state.next_zone_tick {
        return;
    }
    state.next_zone_tick = state.sim_tick + state.config.ticks_of_millis(state.config.zone_interval_ms);

    if state.world.zones.is_empty() {
        return;
    }

    let zones: Vec<(f32, f32, f32, f32, TowerId)> = state
        .world
        .zones
        .iter()
        .map(|z| (z.x, z.y, z.radius, z.damage_per_tick, z.source))
        .collect();

    let mut tower_damage: HashMap<TowerId, f32> = HashMap::new();

    for (_, enemy) in state.world.enemies.iter_mut() {
        if enemy.is_dead() {
            continue;
        }
        let mut total = 0.0;
        let mut contributions: Vec<(TowerId, f32)> = Vec::new();
        for &(zx, zy, radius, dpt, source) in &zones {
            if enemy.distance_to(zx, zy) <= radius {
                total += dpt;
                contributions.push((source, dpt));
            }
        }
        if total <= 0.0 {
            continue;
        }
        let first_source = contributions[0].0;
        let dealt = dot_damage(enemy, first_source, total);
        if dealt > 0.0 {
            let scale = dealt / total;
            for (source, dpt) in contributions {
                *tower_damage.entry(source).or_insert(0.0) += dpt * scale;
            }
        }
    }

    for (source, damage) in tower_damage {
        // A sold tower's zones keep burning; the credit is simply dropped.
        if let Some(tower) = state.world.towers.get_mut(source) {
            tower.lifetime_damage += damage;
        }
    }
}
