use crate::events::Event;
use crate::path;
use crate::world::{EnemyId, FinalReport, GameState};

/// Advance every live enemy along the path on the movement cadence.
/// Enemies that walk off the end are removed and cost lives.
pub fn run(state: &mut GameState, events: &mut Vec<Event>) {
    if state.sim_tick < state.next_movement_tick {
        return;
    }
    state.next_movement_tick = state.sim_tick + state.config.movement_ticks();

    let ids: Vec<EnemyId> = state.world.enemies.keys().collect();
    let mut leaked = Vec::new();

    for id in ids {
        let enemy = &mut state.world.enemies[id];
        if enemy.is_dead() || enemy.speed <= 0.0 {
            continue;
        }
        let ((nx, ny), reached_end) = path::advance(enemy.x, enemy.y, enemy.speed);
        enemy.x = nx;
        enemy.y = ny;
        if reached_end {
            leaked.push(id);
        }
    }

    for id in leaked {
        if let Some(enemy) = state.world.enemies.remove(id) {
            state.lives = state.lives.saturating_sub(enemy.leak_damage);
            events.push(Event::EnemyLeaked {
                id,
                lives_left: state.lives,
            });
            if state.lives == 0 && state.game_over.is_none() {
                state.game_over = Some(FinalReport {
                    round: state.round,
                    kills: state.kills,
                });
                tracing::info!(round = state.round, kills = state.kills, "game over");
                events.push(Event::GameOver {
                    round: state.round,
                    kills: state.kills,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyKind, GameConfig};

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 1)
    }

    /// Run exactly one movement step worth of ticks.
    fn step_movement(state: &mut GameState, events: &mut Vec<Event>) {
        let cadence = state.config.movement_ticks();
        for _ in 0..cadence {
            state.sim_tick += 1;
            run(state, events);
        }
    }

    #[test]
    fn enemies_move_their_speed_per_step() {
        let mut s = state();
        let id = s.spawn_enemy(EnemyKind::Basic);
        let speed = s.world.enemies[id].speed;
        let before = path::progress(s.world.enemies[id].x, s.world.enemies[id].y);

        let mut events = Vec::new();
        step_movement(&mut s, &mut events);

        let enemy = &s.world.enemies[id];
        let after = path::progress(enemy.x, enemy.y);
        assert!((after - before - speed).abs() < 1e-5);
    }

    #[test]
    fn stunned_enemies_do_not_move() {
        let mut s = state();
        let id = s.spawn_enemy(EnemyKind::Basic);
        s.world.enemies[id].speed = 0.0;
        let (x, y) = (s.world.enemies[id].x, s.world.enemies[id].y);

        let mut events = Vec::new();
        step_movement(&mut s, &mut events);

        assert_eq!((s.world.enemies[id].x, s.world.enemies[id].y), (x, y));
    }

    #[test]
    fn leaking_costs_lives_and_removes_the_enemy() {
        let mut s = state();
        let id = s.spawn_enemy_at(EnemyKind::Brute, 99.9, 70.0);
        let lives = s.lives;

        let mut events = Vec::new();
        step_movement(&mut s, &mut events);

        assert!(!s.world.enemies.contains_key(id));
        assert_eq!(s.lives, lives - 2);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::EnemyLeaked { .. })));
    }

    #[test]
    fn last_leak_triggers_game_over() {
        let mut s = state();
        s.lives = 1;
        s.spawn_enemy_at(EnemyKind::Basic, 99.9, 70.0);

        let mut events = Vec::new();
        step_movement(&mut s, &mut events);

        assert_eq!(s.lives, 0);
        assert!(s.game_over.is_some());
        assert!(events.iter().any(|e| matches!(e, Event::GameOver { .. })));
    }
}
