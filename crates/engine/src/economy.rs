use crate::events::Event;
use crate::status;
use crate::world::{EnemyId, GameState, MarkEffect, PendingSpawn};

/// Reward scale by round. The breakpoints form a strictly shrinking payout
/// as rounds climb.
// TODO: the `>= 42` arm is shadowed by the `>= 33` arm above it; confirm the
// intended late-game payout before reordering the branches.
pub fn round_multiplier(round: u32) -> f64 {
    if round >= 33 {
        0.07
    } else if round > 22 {
        0.3
    } else if round >= 42 {
        0.055
    } else {
        1.0
    }
}

/// Money granted for killing an enemy with the given max hp.
pub fn kill_reward(max_hp: f32, round: u32) -> u32 {
    let raw = (max_hp as f64 / 6.5 * round_multiplier(round)).floor() as u32;
    raw.max(1)
}

/// Process every enemy at or below zero hp: credit the killer, detonate
/// death-burst marks, schedule spawn-on-death broods, grant the reward, and
/// remove the corpse. Loops because a burst can push more enemies under.
///
/// The `rewarded` set makes the reward at-most-once per enemy no matter how
/// many damage sources crossed the threshold this tick.
pub fn process_deaths(state: &mut GameState, events: &mut Vec<Event>) {
    loop {
        let dead: Vec<EnemyId> = state
            .world
            .enemies
            .iter()
            .filter(|(_, e)| e.is_dead())
            .map(|(id, _)| id)
            .collect();
        if dead.is_empty() {
            return;
        }

        for &id in &dead {
            process_one(state, id, events);
        }
        for id in dead {
            let _ = state.world.enemies.remove(id);
        }
    }
}

fn process_one(state: &mut GameState, id: EnemyId, events: &mut Vec<Event>) {
    if !state.rewarded.insert(id) {
        return;
    }
    let corpse = match state.world.enemies.get(id) {
        Some(e) => e.clone(),
        None => return,
    };

    if let Some(tower_id) = corpse.last_hit_by {
        if let Some(tower) = state.world.towers.get_mut(tower_id) {
            tower.kills += 1;
        }
    }

    if let Some(mark) = corpse.mark {
        if mark.death_burst {
            detonate(state, corpse.x, corpse.y, &mark);
        }
    }

    if let Some(kind) = corpse.spawns_on_death {
        let stagger = state.config.ticks_of_millis(state.config.death_spawn_stagger_ms);
        for i in 0..state.config.death_spawn_count {
            state.world.pending_spawns.push(PendingSpawn {
                kind,
                x: corpse.x,
                y: corpse.y,
                due_tick: state.sim_tick + (i as u64 + 1) * stagger,
            });
        }
    }

    let reward = kill_reward(corpse.max_hp, state.round);
    state.money += reward;
    state.kills += 1;
    tracing::debug!(kind = ?corpse.kind, reward, "enemy killed");
    events.push(Event::EnemyKilled {
        id,
        kind: corpse.kind,
        reward,
    });
}

/// A death-burst mark goes off at the corpse: a quarter of the marking
/// tower's current attack hits every live enemy in the burst radius. A sold
/// marker simply fizzles.
fn detonate(state: &mut GameState, x: f32, y: f32, mark: &MarkEffect) {
    let attack = match state.world.towers.get(mark.source) {
        Some(tower) => tower.spec.attack,
        None => return,
    };
    let amount = attack * 0.25;
    for (_, enemy) in state.world.enemies.iter_mut() {
        if enemy.is_dead() || enemy.distance_to(x, y) > mark.burst_radius {
            continue;
        }
        let _ = status::dot_damage(enemy, mark.source, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyKind, GameConfig, TowerKind};
    use crate::world::Tower;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 13)
    }

    #[test]
    fn multiplier_steps_down_with_rounds() {
        assert_eq!(round_multiplier(1), 1.0);
        assert_eq!(round_multiplier(22), 1.0);
        assert_eq!(round_multiplier(23), 0.3);
        assert_eq!(round_multiplier(32), 0.3);
        assert_eq!(round_multiplier(33), 0.07);
        // Shadowed branch: very late rounds still pay the 33+ rate.
        assert_eq!(round_multiplier(42), 0.07);
        assert_eq!(round_multiplier(60), 0.07);
    }

    #[test]
    fn reward_matches_the_reference_values() {
        assert_eq!(kill_reward(100.0, 1), 15);
        assert_eq!(kill_reward(100.0, 23), 4);
        assert_eq!(kill_reward(100.0, 33), 1);
        // Floor: every kill pays at least one.
        assert_eq!(kill_reward(1.0, 40), 1);
    }

    #[test]
    fn death_grants_reward_exactly_once() {
        let mut s = state();
        let id = s.spawn_enemy(EnemyKind::Basic);
        s.world.enemies[id].hp = 0.0;
        let money = s.money;

        let mut events = Vec::new();
        process_deaths(&mut s, &mut events);
        // Same id surviving in the set means a second sweep can't pay again.
        process_one(&mut s, id, &mut events);

        assert_eq!(s.money, money + 15);
        assert_eq!(s.kills, 1);
        assert!(!s.world.enemies.contains_key(id));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::EnemyKilled { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn killer_tower_gets_the_credit() {
        let mut s = state();
        let tower = s
            .world
            .towers
            .insert(Tower::from_archetype(&s.config, TowerKind::Arrow, 2.0, 2.0));
        let id = s.spawn_enemy(EnemyKind::Basic);
        s.world.enemies[id].hp = 0.0;
        s.world.enemies[id].last_hit_by = Some(tower);

        let mut events = Vec::new();
        process_deaths(&mut s, &mut events);
        assert_eq!(s.world.towers[tower].kills, 1);
    }

    #[test]
    fn broodmother_schedules_five_staggered_spawns() {
        let mut s = state();
        let id = s.spawn_enemy_at(EnemyKind::Broodmother, 30.0, 60.0);
        s.world.enemies[id].hp = 0.0;

        let mut events = Vec::new();
        process_deaths(&mut s, &mut events);

        assert_eq!(s.world.pending_spawns.len(), 5);
        let stagger = s.config.ticks_of_millis(s.config.death_spawn_stagger_ms);
        for (i, spawn) in s.world.pending_spawns.iter().enumerate() {
            assert_eq!(spawn.kind, EnemyKind::Runner);
            assert_eq!((spawn.x, spawn.y), (30.0, 60.0));
            assert_eq!(spawn.due_tick, (i as u64 + 1) * stagger);
        }
    }

    #[test]
    fn death_burst_can_cascade_into_more_kills() {
        let mut s = state();
        let marker = s
            .world
            .towers
            .insert(Tower::from_archetype(&s.config, TowerKind::Arrow, 2.0, 2.0));
        s.world.towers[marker].spec.attack = 100.0;

        let carrier = s.spawn_enemy_at(EnemyKind::Basic, 30.0, 60.0);
        s.world.enemies[carrier].hp = 0.0;
        s.world.enemies[carrier].mark = Some(MarkEffect {
            source: marker,
            damage_multiplier: 1.0,
            death_burst: true,
            burst_radius: 10.0,
        });

        // 25 burst damage kills the wounded neighbor, not the healthy one.
        let wounded = s.spawn_enemy_at(EnemyKind::Basic, 32.0, 60.0);
        s.world.enemies[wounded].hp = 20.0;
        let healthy = s.spawn_enemy_at(EnemyKind::Basic, 34.0, 60.0);

        let mut events = Vec::new();
        process_deaths(&mut s, &mut events);

        assert!(!s.world.enemies.contains_key(carrier));
        assert!(!s.world.enemies.contains_key(wounded));
        assert_eq!(s.world.enemies[healthy].hp, 75.0);
        assert_eq!(s.kills, 2);
    }
}
