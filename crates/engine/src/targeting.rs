use crate::config::{AttackType, TargetingMode};
use crate::path;
use crate::world::{EnemyId, GameState, TowerId};

/// Select up to N targets for a tower, or an empty vec if nothing
/// qualifies (no attack this tick).
///
/// Filters: live, in radius, stealth detection, redundant-effect skip
/// (a slowing/poisoning tower ignores enemies already carrying an
/// equal-or-stronger copy of its effect), and the chain/explosion
/// exclusive lock.
pub fn select_targets(state: &GameState, tower_id: TowerId) -> Vec<EnemyId> {
    let tower = match state.world.towers.get(tower_id) {
        Some(t) => t,
        None => return Vec::new(),
    };
    let spec = &tower.spec;
    let wants = spec.attack_type.targets_selected();
    let needs_lock = matches!(spec.attack_type, AttackType::Chain | AttackType::Explosion);

    // (id, progress, hp) in insertion order so stable sorts keep spawn
    // order on ties.
    let mut candidates: Vec<(EnemyId, f32, f32)> = Vec::new();
    for (id, enemy) in state.world.enemies.iter() {
        if enemy.is_dead() {
            continue;
        }
        if enemy.stealth && !spec.hits_stealth {
            continue;
        }
        if needs_lock && enemy.targeted {
            continue;
        }
        if enemy.distance_to(tower.x, tower.y) > spec.radius {
            continue;
        }
        if let (Some(slow), Some(existing)) = (&spec.slow, &enemy.slow) {
            if existing.magnitude <= slow.magnitude {
                continue;
            }
        }
        if spec.poison.is_some() && enemy.poison.is_some() {
            continue;
        }
        candidates.push((id, path::progress(enemy.x, enemy.y), enemy.hp));
    }

    match tower.targeting_mode {
        TargetingMode::First => candidates.sort_by(|a, b| b.1.total_cmp(&a.1)),
        TargetingMode::Last => candidates.sort_by(|a, b| a.1.total_cmp(&b.1)),
        TargetingMode::HighestHp => candidates.sort_by(|a, b| b.2.total_cmp(&a.2)),
    }

    candidates.truncate(wants);
    candidates.into_iter().map(|(id, _, _)| id).collect()
}
