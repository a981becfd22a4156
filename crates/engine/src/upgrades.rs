use crate::config::{UpgradePath, UpgradeSpec};
use crate::events::{Event, RejectReason};
use crate::world::{GameState, TowerId};

/// Attempt to buy an upgrade. Validates existence, level order, the
/// path-exclusivity lock, and funds; on success merges the stat patch and
/// bumps the path level and tower worth.
pub fn try_purchase(
    state: &mut GameState,
    tower_id: TowerId,
    path: UpgradePath,
    level: u8,
    events: &mut Vec<Event>,
) -> bool {
    let upgrade: UpgradeSpec = {
        let tower = match state.world.towers.get(tower_id) {
            Some(t) => t,
            None => {
                events.push(Event::ActionRejected {
                    reason: RejectReason::UnknownTower,
                });
                return false;
            }
        };

        let chain = state.config.upgrades.chains(tower.kind).chain(path);
        let upgrade = match chain.iter().find(|u| u.level == level) {
            Some(u) => u,
            None => {
                events.push(Event::ActionRejected {
                    reason: RejectReason::UpgradeUnavailable,
                });
                return false;
            }
        };

        if tower.path_level(path) != upgrade.requires {
            events.push(Event::ActionRejected {
                reason: RejectReason::UpgradeUnavailable,
            });
            return false;
        }

        // Past level 3 on one path, the other path only accepts its two
        // cheapest steps.
        if tower.path_level(path.other()) >= 3 && upgrade.requires >= 2 {
            events.push(Event::ActionRejected {
                reason: RejectReason::PathLocked,
            });
            return false;
        }

        upgrade.clone()
    };

    if state.money < upgrade.cost {
        events.push(Event::ActionRejected {
            reason: RejectReason::InsufficientFunds,
        });
        return false;
    }

    state.money -= upgrade.cost;
    let tower = &mut state.world.towers[tower_id];
    upgrade.effect.apply(&mut tower.spec);
    tower.set_path_level(path, level);
    tower.worth += upgrade.cost;
    if level >= 3 && tower.chosen_path.is_none() {
        tower.chosen_path = Some(path);
    }

    tracing::debug!(?path, level, cost = upgrade.cost, "upgrade purchased");
    events.push(Event::UpgradePurchased {
        tower: tower_id,
        path,
        level,
        cost: upgrade.cost,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, TowerKind};
    use crate::world::Tower;

    fn state_with_tower() -> (GameState, TowerId) {
        let mut s = GameState::new(GameConfig::default(), 19);
        s.money = 100_000;
        let id = s
            .world
            .towers
            .insert(Tower::from_archetype(&s.config, TowerKind::Arrow, 2.0, 2.0));
        (s, id)
    }

    fn buy(state: &mut GameState, id: TowerId, path: UpgradePath, level: u8) -> bool {
        let mut events = Vec::new();
        try_purchase(state, id, path, level, &mut events)
    }

    #[test]
    fn purchases_walk_the_chain_in_order() {
        let (mut s, id) = state_with_tower();

        assert!(buy(&mut s, id, UpgradePath::Top, 1));
        assert!(buy(&mut s, id, UpgradePath::Top, 2));
        assert_eq!(s.world.towers[id].top_level, 2);
        assert_eq!(s.world.towers[id].spec.attack, 85.0);
    }

    #[test]
    fn skipping_a_level_is_rejected() {
        let (mut s, id) = state_with_tower();
        assert!(!buy(&mut s, id, UpgradePath::Top, 2));
        assert_eq!(s.world.towers[id].top_level, 0);
    }

    #[test]
    fn insufficient_funds_reject_without_mutation() {
        let (mut s, id) = state_with_tower();
        s.money = 10;

        let mut events = Vec::new();
        assert!(!try_purchase(&mut s, id, UpgradePath::Top, 1, &mut events));
        assert_eq!(s.money, 10);
        assert_eq!(s.world.towers[id].top_level, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ActionRejected { reason: RejectReason::InsufficientFunds })));
    }

    #[test]
    fn unknown_tower_is_rejected() {
        let (mut s, id) = state_with_tower();
        s.world.towers.remove(id);
        assert!(!buy(&mut s, id, UpgradePath::Top, 1));
    }

    #[test]
    fn reaching_level_three_locks_the_other_path_above_two() {
        let (mut s, id) = state_with_tower();

        for level in 1..=3 {
            assert!(buy(&mut s, id, UpgradePath::Top, level));
        }
        assert_eq!(s.world.towers[id].chosen_path, Some(UpgradePath::Top));

        // The minor early steps stay open...
        assert!(buy(&mut s, id, UpgradePath::Bottom, 1));
        assert!(buy(&mut s, id, UpgradePath::Bottom, 2));
        // ...but the third step is locked out.
        let mut events = Vec::new();
        assert!(!try_purchase(&mut s, id, UpgradePath::Bottom, 3, &mut events));
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::ActionRejected { reason: RejectReason::PathLocked })));
    }

    #[test]
    fn the_chosen_path_can_keep_climbing() {
        let (mut s, id) = state_with_tower();
        for level in 1..=6 {
            assert!(buy(&mut s, id, UpgradePath::Top, level));
        }
        assert_eq!(s.world.towers[id].top_level, 6);
    }

    #[test]
    fn worth_accumulates_every_purchase() {
        let (mut s, id) = state_with_tower();
        let base_worth = s.world.towers[id].worth;

        assert!(buy(&mut s, id, UpgradePath::Top, 1));
        let cost = s.config.upgrades.arrow.top[0].cost;
        assert_eq!(s.world.towers[id].worth, base_worth + cost);
    }

    #[test]
    fn money_is_deducted_exactly_once() {
        let (mut s, id) = state_with_tower();
        let before = s.money;
        assert!(buy(&mut s, id, UpgradePath::Top, 1));
        assert_eq!(s.money, before - s.config.upgrades.arrow.top[0].cost);
    }
}
