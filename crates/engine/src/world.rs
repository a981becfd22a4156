use crate::config::{
    EnemyKind, GameConfig, TargetingMode, TowerKind, TowerSpec, UpgradePath,
};
use crate::path;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rampart_core::{SpeedMultiplier, Tick};
use serde::Serialize;
use slotmap::{new_key_type, SlotMap};
use std::collections::HashSet;

new_key_type! { pub struct EnemyId; }
new_key_type! { pub struct TowerId; }

/// Slow applied by one tower. Strength is the speed multiplier; smaller is
/// stronger, and only an equal-or-stronger slow may replace it.
#[derive(Clone, Copy, Debug)]
pub struct SlowEffect {
    pub source: TowerId,
    pub magnitude: f32,
    pub until_tick: Tick,
}

/// Stun applied by one tower. Re-applications extend `until_tick`.
#[derive(Clone, Copy, Debug)]
pub struct StunEffect {
    pub source: TowerId,
    pub until_tick: Tick,
}

/// Poison applied by one tower; damage is dealt on a fixed cadence until
/// `ticks_left` runs out.
#[derive(Clone, Copy, Debug)]
pub struct PoisonEffect {
    pub source: TowerId,
    pub damage_per_tick: f32,
    pub next_tick: Tick,
    pub ticks_left: u32,
    pub stops_regen: bool,
}

/// Mark applied by one tower; multiplies all future damage from any source.
#[derive(Clone, Copy, Debug)]
pub struct MarkEffect {
    pub source: TowerId,
    pub damage_multiplier: f32,
    pub death_burst: bool,
    pub burst_radius: f32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Effective speed after status effects; movement reads this.
    pub speed: f32,
    pub base_speed: f32,
    pub armored: bool,
    pub stealth: bool,
    pub can_regen: bool,
    pub regen_per_second: f32,
    pub spawns_on_death: Option<EnemyKind>,
    pub stun_resistance: f32,
    pub quota_weight: u32,
    pub leak_damage: u32,
    pub boss: bool,
    /// Exclusive lock while a chain/explosion resolver owns this enemy in
    /// the current attack; cleared at the owning tower's cooldown release.
    pub targeted: bool,
    pub slow: Option<SlowEffect>,
    pub stun: Option<StunEffect>,
    pub poison: Option<PoisonEffect>,
    pub mark: Option<MarkEffect>,
    pub last_hit_by: Option<TowerId>,
}

impl Enemy {
    pub fn from_archetype(config: &GameConfig, kind: EnemyKind, x: f32, y: f32) -> Self {
        let spec = config.enemies.spec(kind);
        Self {
            kind,
            x,
            y,
            hp: spec.max_hp,
            max_hp: spec.max_hp,
            speed: spec.base_speed,
            base_speed: spec.base_speed,
            armored: spec.armored,
            stealth: spec.stealth,
            can_regen: spec.can_regen,
            regen_per_second: spec.regen_per_second,
            spawns_on_death: spec.spawns_on_death,
            stun_resistance: spec.stun_resistance,
            quota_weight: spec.quota_weight,
            leak_damage: spec.leak_damage,
            boss: spec.boss,
            targeted: false,
            slow: None,
            stun: None,
            poison: None,
            mark: None,
            last_hit_by: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Recompute effective speed from the current stun/slow state.
    /// Stun dominates; a slow alone scales the base speed.
    pub fn refresh_speed(&mut self) {
        self.speed = if self.stun.is_some() {
            0.0
        } else if let Some(slow) = &self.slow {
            self.base_speed * slow.magnitude
        } else {
            self.base_speed
        };
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// In-flight attack: damage and affected enemies accumulate here until the
/// cooldown releases. `Some` doubles as the tower's attacking lock.
#[derive(Clone, Debug)]
pub struct AttackCommit {
    pub release_tick: Tick,
    pub damage: f32,
    pub affected: Vec<EnemyId>,
}

#[derive(Clone, Debug)]
pub struct Tower {
    pub kind: TowerKind,
    pub x: f32,
    pub y: f32,
    /// Per-instance stat copy; upgrades patch this, never the config table.
    pub spec: TowerSpec,
    /// Archetype attack at placement, kept as the unmodified reference.
    pub base_attack: f32,
    pub targeting_mode: TargetingMode,
    pub commit: Option<AttackCommit>,
    pub accel_stacks: u32,
    /// Cumulative investment; only ever grows, backs the sell refund.
    pub worth: u32,
    pub lifetime_damage: f32,
    pub kills: u32,
    pub top_level: u8,
    pub bottom_level: u8,
    pub chosen_path: Option<UpgradePath>,
}

impl Tower {
    pub fn from_archetype(config: &GameConfig, kind: TowerKind, x: f32, y: f32) -> Self {
        let spec = config.towers.spec(kind).clone();
        let base_attack = spec.attack;
        let worth = spec.price;
        Self {
            kind,
            x,
            y,
            spec,
            base_attack,
            targeting_mode: TargetingMode::default(),
            commit: None,
            accel_stacks: 0,
            worth,
            lifetime_damage: 0.0,
            kills: 0,
            top_level: 0,
            bottom_level: 0,
            chosen_path: None,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.commit.is_some()
    }

    pub fn path_level(&self, path: UpgradePath) -> u8 {
        match path {
            UpgradePath::Top => self.top_level,
            UpgradePath::Bottom => self.bottom_level,
        }
    }

    pub fn set_path_level(&mut self, path: UpgradePath, level: u8) {
        match path {
            UpgradePath::Top => self.top_level = level,
            UpgradePath::Bottom => self.bottom_level = level,
        }
    }

    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Stationary damage area anchored to a point, not an enemy.
#[derive(Clone, Debug)]
pub struct LingeringZone {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub damage_per_tick: f32,
    pub source: TowerId,
    pub expires_tick: Tick,
}

/// A death-spawn scheduled at a corpse position.
#[derive(Clone, Debug)]
pub struct PendingSpawn {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub due_tick: Tick,
}

#[derive(Clone, Debug, Default)]
pub struct World {
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub towers: SlotMap<TowerId, Tower>,
    pub zones: Vec<LingeringZone>,
    pub pending_spawns: Vec<PendingSpawn>,
}

/// Round lifecycle. `Cleared` with no deadline waits for a manual advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    InRound,
    Cleared { advance_at: Option<Tick> },
}

/// End-of-run summary handed to the persistence boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FinalReport {
    pub round: u32,
    pub kills: u32,
}

/// The single authoritative simulation state, advanced only by the sequenced
/// tick in `game.rs`.
pub struct GameState {
    pub config: GameConfig,
    /// Host tick counter; advances every `step`, even while suspended.
    pub tick: Tick,
    /// Game-time tick counter; frozen while paused or hidden. All deadlines
    /// and cadences live in this timebase.
    pub sim_tick: Tick,
    pub world: World,

    pub round: u32,
    pub spawned_quota: u32,
    pub spawn_index: u32,
    pub next_spawn_tick: Tick,
    pub phase: RoundPhase,
    /// Enemies whose kill reward has been granted; reset at round advance.
    pub rewarded: HashSet<EnemyId>,

    pub money: u32,
    pub lives: u32,
    pub kills: u32,
    /// Tower the player currently has selected in the UI.
    pub selected_tower: Option<TowerId>,

    pub paused: bool,
    pub visible: bool,
    pub speed: SpeedMultiplier,

    pub next_movement_tick: Tick,
    pub next_zone_tick: Tick,
    pub next_regen_tick: Tick,

    pub game_over: Option<FinalReport>,
    pub victory: bool,

    pub rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let first_spawn = config.ticks_of_millis(config.first_spawn_delay_ms);
        let movement = config.movement_ticks();
        let zone = config.ticks_of_millis(config.zone_interval_ms);
        let regen = config.ticks_of_millis(config.regen_interval_ms);
        Self {
            tick: 0,
            sim_tick: 0,
            world: World::default(),
            round: 1,
            spawned_quota: 0,
            spawn_index: 0,
            next_spawn_tick: first_spawn,
            phase: RoundPhase::InRound,
            rewarded: HashSet::new(),
            money: config.start_money,
            lives: config.start_lives,
            kills: 0,
            selected_tower: None,
            paused: false,
            visible: true,
            speed: SpeedMultiplier::Normal,
            next_movement_tick: movement,
            next_zone_tick: zone,
            next_regen_tick: regen,
            game_over: None,
            victory: false,
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Spawn an enemy of the given archetype at an explicit position.
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, x: f32, y: f32) -> EnemyId {
        let enemy = Enemy::from_archetype(&self.config, kind, x, y);
        self.world.enemies.insert(enemy)
    }

    /// Spawn an enemy at the path entrance.
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> EnemyId {
        let (x, y) = path::SPAWN;
        self.spawn_enemy_at(kind, x, y)
    }

    pub fn is_suspended(&self) -> bool {
        self.paused || !self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 7)
    }

    #[test]
    fn enemy_copies_archetype_flags() {
        let mut s = state();
        let id = s.spawn_enemy(EnemyKind::Brute);
        let enemy = &s.world.enemies[id];
        assert!(enemy.armored);
        assert_eq!(enemy.hp, enemy.max_hp);
        assert_eq!(enemy.speed, enemy.base_speed);
        assert_eq!(enemy.quota_weight, 2);
    }

    #[test]
    fn stun_dominates_slow_in_speed_refresh() {
        let mut s = state();
        let id = s.spawn_enemy(EnemyKind::Basic);
        let tower = s.world.towers.insert(Tower::from_archetype(
            &s.config,
            TowerKind::Frost,
            10.0,
            10.0,
        ));

        let enemy = &mut s.world.enemies[id];
        enemy.slow = Some(SlowEffect {
            source: tower,
            magnitude: 0.5,
            until_tick: 100,
        });
        enemy.refresh_speed();
        assert_eq!(enemy.speed, enemy.base_speed * 0.5);

        enemy.stun = Some(StunEffect {
            source: tower,
            until_tick: 50,
        });
        enemy.refresh_speed();
        assert_eq!(enemy.speed, 0.0);

        enemy.stun = None;
        enemy.refresh_speed();
        assert_eq!(enemy.speed, enemy.base_speed * 0.5);

        enemy.slow = None;
        enemy.refresh_speed();
        assert_eq!(enemy.speed, enemy.base_speed);
    }

    #[test]
    fn tower_placement_copies_spec_and_sets_worth() {
        let s = state();
        let tower = Tower::from_archetype(&s.config, TowerKind::Arrow, 2.0, 2.0);
        assert_eq!(tower.worth, s.config.towers.arrow.price);
        assert_eq!(tower.base_attack, s.config.towers.arrow.attack);
        assert!(!tower.is_attacking());
        assert_eq!(tower.path_level(UpgradePath::Top), 0);
    }

    #[test]
    fn new_state_starts_in_round_one() {
        let s = state();
        assert_eq!(s.round, 1);
        assert_eq!(s.phase, RoundPhase::InRound);
        assert_eq!(s.money, s.config.start_money);
        assert_eq!(s.lives, s.config.start_lives);
        assert!(!s.is_suspended());
    }
}
