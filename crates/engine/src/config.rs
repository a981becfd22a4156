use rampart_core::Micros;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tower archetypes. Each owns a spec in the tower table and two upgrade
/// chains in the upgrade table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    Arrow,
    Gatling,
    Volley,
    Venom,
    Frost,
    Tesla,
    Mortar,
    Flame,
}

impl TowerKind {
    pub const ALL: [TowerKind; 8] = [
        TowerKind::Arrow,
        TowerKind::Gatling,
        TowerKind::Volley,
        TowerKind::Venom,
        TowerKind::Frost,
        TowerKind::Tesla,
        TowerKind::Mortar,
        TowerKind::Flame,
    ];
}

/// Enemy archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Runner,
    Brute,
    Shade,
    Mender,
    Broodmother,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Basic,
        EnemyKind::Runner,
        EnemyKind::Brute,
        EnemyKind::Shade,
        EnemyKind::Mender,
        EnemyKind::Broodmother,
        EnemyKind::Boss,
    ];
}

/// How an attack resolves once targets are selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Single,
    Double,
    Triple,
    Quadruple,
    Chain,
    Explosion,
    Lingering,
}

impl AttackType {
    /// Number of targets the targeting pass hands to the resolver.
    pub fn targets_selected(self) -> usize {
        match self {
            AttackType::Single | AttackType::Chain | AttackType::Explosion | AttackType::Lingering => 1,
            AttackType::Double => 2,
            AttackType::Triple => 3,
            AttackType::Quadruple => 4,
        }
    }
}

/// Candidate ranking rule for target selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingMode {
    #[default]
    First,
    Last,
    HighestHp,
}

/// One of the two mutually-exclusive upgrade branches of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradePath {
    Top,
    Bottom,
}

impl UpgradePath {
    pub fn other(self) -> UpgradePath {
        match self {
            UpgradePath::Top => UpgradePath::Bottom,
            UpgradePath::Bottom => UpgradePath::Top,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CriticalSpec {
    pub chance: f64,
    pub multiplier: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StunSpec {
    pub chance: f64,
    pub duration_ms: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlowSpec {
    /// Speed multiplier applied to the victim; smaller is stronger.
    pub magnitude: f32,
    pub duration_ms: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoisonSpec {
    /// Base damage; the victim takes four times this over the poison window.
    pub damage: f32,
    pub stops_regen: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarkSpec {
    /// Multiplier applied to all future damage against the marked enemy.
    pub multiplier: f32,
    pub death_burst: bool,
    pub burst_radius: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccelerationSpec {
    /// Damage multiplier compounded per consecutive attack cycle.
    pub per_hit: f32,
    pub max_stacks: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplosionSpec {
    pub radius: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSpec {
    /// Maximum hops beyond the seed target.
    pub count: u32,
    pub range: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LingeringSpec {
    pub damage_per_tick: f32,
    pub radius: f32,
    pub duration_ms: u32,
}

/// Full stat block for a tower archetype. Towers carry a per-instance copy;
/// the table itself is never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TowerSpec {
    pub price: u32,
    pub attack: f32,
    pub attack_interval_ms: u32,
    pub radius: f32,
    pub attack_type: AttackType,
    #[serde(default)]
    pub hits_stealth: bool,
    #[serde(default)]
    pub hits_armored: bool,
    #[serde(default)]
    pub boss_damage_multiplier: Option<f32>,
    #[serde(default)]
    pub critical: Option<CriticalSpec>,
    #[serde(default)]
    pub stun: Option<StunSpec>,
    #[serde(default)]
    pub slow: Option<SlowSpec>,
    #[serde(default)]
    pub poison: Option<PoisonSpec>,
    #[serde(default)]
    pub mark: Option<MarkSpec>,
    #[serde(default)]
    pub acceleration: Option<AccelerationSpec>,
    #[serde(default)]
    pub execute_threshold: Option<f32>,
    #[serde(default)]
    pub explosion: Option<ExplosionSpec>,
    #[serde(default)]
    pub chain: Option<ChainSpec>,
    #[serde(default)]
    pub lingering: Option<LingeringSpec>,
}

fn default_stun_resistance() -> f32 {
    1.0
}

/// Stat block for an enemy archetype.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemySpec {
    pub max_hp: f32,
    /// Path units covered per movement step.
    pub base_speed: f32,
    #[serde(default)]
    pub armored: bool,
    #[serde(default)]
    pub stealth: bool,
    #[serde(default)]
    pub can_regen: bool,
    #[serde(default)]
    pub regen_per_second: f32,
    #[serde(default)]
    pub spawns_on_death: Option<EnemyKind>,
    /// Scales stun durations added to this enemy; bosses shrug most of it off.
    #[serde(default = "default_stun_resistance")]
    pub stun_resistance: f32,
    pub quota_weight: u32,
    pub leak_damage: u32,
    #[serde(default)]
    pub boss: bool,
}

/// Tower archetype table, one spec per kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TowerTable {
    pub arrow: TowerSpec,
    pub gatling: TowerSpec,
    pub volley: TowerSpec,
    pub venom: TowerSpec,
    pub frost: TowerSpec,
    pub tesla: TowerSpec,
    pub mortar: TowerSpec,
    pub flame: TowerSpec,
}

impl TowerTable {
    pub fn spec(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Arrow => &self.arrow,
            TowerKind::Gatling => &self.gatling,
            TowerKind::Volley => &self.volley,
            TowerKind::Venom => &self.venom,
            TowerKind::Frost => &self.frost,
            TowerKind::Tesla => &self.tesla,
            TowerKind::Mortar => &self.mortar,
            TowerKind::Flame => &self.flame,
        }
    }
}

/// Enemy archetype table, one spec per kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyTable {
    pub basic: EnemySpec,
    pub runner: EnemySpec,
    pub brute: EnemySpec,
    pub shade: EnemySpec,
    pub mender: EnemySpec,
    pub broodmother: EnemySpec,
    pub boss: EnemySpec,
}

impl EnemyTable {
    pub fn spec(&self, kind: EnemyKind) -> &EnemySpec {
        match kind {
            EnemyKind::Basic => &self.basic,
            EnemyKind::Runner => &self.runner,
            EnemyKind::Brute => &self.brute,
            EnemyKind::Shade => &self.shade,
            EnemyKind::Mender => &self.mender,
            EnemyKind::Broodmother => &self.broodmother,
            EnemyKind::Boss => &self.boss,
        }
    }
}

/// Partial stat patch an upgrade merges onto a tower's spec copy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatPatch {
    #[serde(default)]
    pub attack: Option<f32>,
    #[serde(default)]
    pub attack_interval_ms: Option<u32>,
    #[serde(default)]
    pub radius: Option<f32>,
    #[serde(default)]
    pub hits_stealth: Option<bool>,
    #[serde(default)]
    pub hits_armored: Option<bool>,
    #[serde(default)]
    pub boss_damage_multiplier: Option<f32>,
    #[serde(default)]
    pub critical: Option<CriticalSpec>,
    #[serde(default)]
    pub stun: Option<StunSpec>,
    #[serde(default)]
    pub slow: Option<SlowSpec>,
    #[serde(default)]
    pub poison: Option<PoisonSpec>,
    #[serde(default)]
    pub mark: Option<MarkSpec>,
    #[serde(default)]
    pub acceleration: Option<AccelerationSpec>,
    #[serde(default)]
    pub execute_threshold: Option<f32>,
    #[serde(default)]
    pub explosion: Option<ExplosionSpec>,
    #[serde(default)]
    pub chain: Option<ChainSpec>,
    #[serde(default)]
    pub lingering: Option<LingeringSpec>,
}

impl StatPatch {
    /// Merge every set field onto the spec.
    pub fn apply(&self, spec: &mut TowerSpec) {
        if let Some(v) = self.attack {
            spec.attack = v;
        }
        if let Some(v) = self.attack_interval_ms {
            spec.attack_interval_ms = v;
        }
        if let Some(v) = self.radius {
            spec.radius = v;
        }
        if let Some(v) = self.hits_stealth {
            spec.hits_stealth = v;
        }
        if let Some(v) = self.hits_armored {
            spec.hits_armored = v;
        }
        if let Some(v) = self.boss_damage_multiplier {
            spec.boss_damage_multiplier = Some(v);
        }
        if let Some(v) = &self.critical {
            spec.critical = Some(v.clone());
        }
        if let Some(v) = &self.stun {
            spec.stun = Some(v.clone());
        }
        if let Some(v) = &self.slow {
            spec.slow = Some(v.clone());
        }
        if let Some(v) = &self.poison {
            spec.poison = Some(v.clone());
        }
        if let Some(v) = &self.mark {
            spec.mark = Some(v.clone());
        }
        if let Some(v) = &self.acceleration {
            spec.acceleration = Some(v.clone());
        }
        if let Some(v) = self.execute_threshold {
            spec.execute_threshold = Some(v);
        }
        if let Some(v) = &self.explosion {
            spec.explosion = Some(v.clone());
        }
        if let Some(v) = &self.chain {
            spec.chain = Some(v.clone());
        }
        if let Some(v) = &self.lingering {
            spec.lingering = Some(v.clone());
        }
    }
}

/// One purchasable upgrade step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeSpec {
    pub level: u8,
    /// Path level the tower must already hold on this path.
    pub requires: u8,
    pub cost: u32,
    pub effect: StatPatch,
}

/// The two upgrade chains of one tower kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeChains {
    pub top: Vec<UpgradeSpec>,
    pub bottom: Vec<UpgradeSpec>,
}

impl UpgradeChains {
    pub fn chain(&self, path: UpgradePath) -> &[UpgradeSpec] {
        match path {
            UpgradePath::Top => &self.top,
            UpgradePath::Bottom => &self.bottom,
        }
    }
}

/// Upgrade tree table, two chains per tower kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpgradeTable {
    pub arrow: UpgradeChains,
    pub gatling: UpgradeChains,
    pub volley: UpgradeChains,
    pub venom: UpgradeChains,
    pub frost: UpgradeChains,
    pub tesla: UpgradeChains,
    pub mortar: UpgradeChains,
    pub flame: UpgradeChains,
}

impl UpgradeTable {
    pub fn chains(&self, kind: TowerKind) -> &UpgradeChains {
        match kind {
            TowerKind::Arrow => &self.arrow,
            TowerKind::Gatling => &self.gatling,
            TowerKind::Volley => &self.volley,
            TowerKind::Venom => &self.venom,
            TowerKind::Frost => &self.frost,
            TowerKind::Tesla => &self.tesla,
            TowerKind::Mortar => &self.mortar,
            TowerKind::Flame => &self.flame,
        }
    }
}

/// Complete engine configuration: timing, economy, and the archetype tables.
///
/// Treated as immutable once validated; the engine only mutates per-instance
/// copies of specs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub tick_hz: u32,
    /// Movement cadence in microseconds of game time.
    pub movement_interval_us: u32,
    pub zone_interval_ms: u32,
    pub poison_interval_ms: u32,
    pub poison_duration_ms: u32,
    pub regen_interval_ms: u32,

    pub start_money: u32,
    pub start_lives: u32,
    pub sell_refund_percent: u32,

    pub auto_advance: bool,
    pub round_advance_delay_ms: u32,
    pub first_spawn_delay_ms: u32,
    /// Clearing this round wins the run; `None` plays endless.
    pub final_round: Option<u32>,

    pub death_spawn_count: u32,
    pub death_spawn_stagger_ms: u32,

    pub min_tower_spacing: f32,

    pub slow_floor_early: f32,
    pub slow_floor_late: f32,
    pub slow_floor_switch_round: u32,

    pub towers: TowerTable,
    pub enemies: EnemyTable,
    pub upgrades: UpgradeTable,
}

impl GameConfig {
    pub fn ticks_of_millis(&self, ms: u32) -> u64 {
        Micros::from_millis(ms).to_ticks(self.tick_hz)
    }

    pub fn ticks_of_micros(&self, us: u32) -> u64 {
        Micros::from_micros(us).to_ticks(self.tick_hz)
    }

    pub fn movement_ticks(&self) -> u64 {
        self.ticks_of_micros(self.movement_interval_us)
    }

    /// Number of poison damage applications over one poison window.
    pub fn poison_total_ticks(&self) -> u32 {
        (self.poison_duration_ms / self.poison_interval_ms).max(1)
    }

    /// Minimum effective slow multiplier for the given round.
    pub fn slow_floor(&self, round: u32) -> f32 {
        if round < self.slow_floor_switch_round {
            self.slow_floor_early
        } else {
            self.slow_floor_late
        }
    }

    /// Fail-fast sanity check over the whole table set. Run once at load;
    /// the engine assumes a validated config afterwards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::InvalidTiming("tick_hz must be positive"));
        }
        if self.movement_ticks() == 0 {
            return Err(ConfigError::InvalidTiming(
                "movement interval is shorter than one tick",
            ));
        }
        for field in [
            ("zone_interval_ms", self.zone_interval_ms),
            ("poison_interval_ms", self.poison_interval_ms),
            ("poison_duration_ms", self.poison_duration_ms),
            ("regen_interval_ms", self.regen_interval_ms),
        ] {
            if self.ticks_of_millis(field.1) == 0 {
                return Err(ConfigError::InvalidTiming(field.0));
            }
        }
        if self.sell_refund_percent > 100 {
            return Err(ConfigError::InvalidTiming("sell_refund_percent over 100"));
        }

        for kind in TowerKind::ALL {
            let spec = self.towers.spec(kind);
            Self::validate_tower(kind, spec)?;
            let chains = self.upgrades.chains(kind);
            for path in [UpgradePath::Top, UpgradePath::Bottom] {
                Self::validate_chain(kind, path, chains.chain(path))?;
            }
        }

        for kind in EnemyKind::ALL {
            let spec = self.enemies.spec(kind);
            if spec.max_hp <= 0.0 {
                return Err(ConfigError::InvalidEnemy(kind, "max_hp must be positive"));
            }
            if spec.base_speed <= 0.0 {
                return Err(ConfigError::InvalidEnemy(kind, "base_speed must be positive"));
            }
            if spec.quota_weight == 0 {
                return Err(ConfigError::InvalidEnemy(kind, "quota_weight must be positive"));
            }
            if spec.stun_resistance <= 0.0 {
                return Err(ConfigError::InvalidEnemy(
                    kind,
                    "stun_resistance must be positive",
                ));
            }
        }

        Ok(())
    }

    fn validate_tower(kind: TowerKind, spec: &TowerSpec) -> Result<(), ConfigError> {
        if spec.price == 0 {
            return Err(ConfigError::InvalidTower(kind, "price must be positive"));
        }
        if spec.radius <= 0.0 {
            return Err(ConfigError::InvalidTower(kind, "radius must be positive"));
        }
        if spec.attack_interval_ms == 0 {
            return Err(ConfigError::InvalidTower(kind, "attack interval is zero"));
        }
        match spec.attack_type {
            AttackType::Chain if spec.chain.is_none() => {
                return Err(ConfigError::InvalidTower(kind, "chain tower without chain spec"));
            }
            AttackType::Explosion if spec.explosion.is_none() => {
                return Err(ConfigError::InvalidTower(
                    kind,
                    "explosion tower without explosion spec",
                ));
            }
            AttackType::Lingering if spec.lingering.is_none() => {
                return Err(ConfigError::InvalidTower(
                    kind,
                    "lingering tower without lingering spec",
                ));
            }
            _ => {}
        }
        if let Some(slow) = &spec.slow {
            if slow.magnitude <= 0.0 || slow.magnitude >= 1.0 {
                return Err(ConfigError::InvalidTower(kind, "slow magnitude outside (0, 1)"));
            }
        }
        if let Some(crit) = &spec.critical {
            if !(0.0..=1.0).contains(&crit.chance) {
                return Err(ConfigError::InvalidTower(kind, "critical chance outside [0, 1]"));
            }
        }
        if let Some(stun) = &spec.stun {
            if !(0.0..=1.0).contains(&stun.chance) {
                return Err(ConfigError::InvalidTower(kind, "stun chance outside [0, 1]"));
            }
        }
        Ok(())
    }

    fn validate_chain(
        kind: TowerKind,
        path: UpgradePath,
        chain: &[UpgradeSpec],
    ) -> Result<(), ConfigError> {
        for (i, upgrade) in chain.iter().enumerate() {
            let expected = (i + 1) as u8;
            if upgrade.level != expected {
                return Err(ConfigError::InvalidUpgrade(kind, path, expected, "levels not consecutive"));
            }
            if upgrade.requires != upgrade.level - 1 {
                return Err(ConfigError::InvalidUpgrade(
                    kind,
                    path,
                    upgrade.level,
                    "requires must name the predecessor level",
                ));
            }
            if upgrade.cost == 0 {
                return Err(ConfigError::InvalidUpgrade(kind, path, upgrade.level, "cost is zero"));
            }
        }
        Ok(())
    }
}

/// Construction-time configuration failure. Fatal at load, never raised
/// mid-simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTiming(&'static str),
    InvalidTower(TowerKind, &'static str),
    InvalidEnemy(EnemyKind, &'static str),
    InvalidUpgrade(TowerKind, UpgradePath, u8, &'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTiming(reason) => write!(f, "invalid timing config: {}", reason),
            ConfigError::InvalidTower(kind, reason) => {
                write!(f, "invalid tower spec {:?}: {}", kind, reason)
            }
            ConfigError::InvalidEnemy(kind, reason) => {
                write!(f, "invalid enemy spec {:?}: {}", kind, reason)
            }
            ConfigError::InvalidUpgrade(kind, path, level, reason) => write!(
                f,
                "invalid upgrade {:?} {:?} level {}: {}",
                kind, path, level, reason
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

fn upgrade(level: u8, cost: u32, effect: StatPatch) -> UpgradeSpec {
    UpgradeSpec {
        level,
        requires: level - 1,
        cost,
        effect,
    }
}

fn patch() -> StatPatch {
    StatPatch::default()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_hz: 400,
            movement_interval_us: 22_500,
            zone_interval_ms: 100,
            poison_interval_ms: 500,
            poison_duration_ms: 2_000,
            regen_interval_ms: 1_000,

            start_money: 180,
            start_lives: 100,
            sell_refund_percent: 75,

            auto_advance: true,
            round_advance_delay_ms: 3_000,
            first_spawn_delay_ms: 1_000,
            final_round: None,

            death_spawn_count: 5,
            death_spawn_stagger_ms: 250,

            min_tower_spacing: 3.0,

            slow_floor_early: 0.2,
            slow_floor_late: 0.4,
            slow_floor_switch_round: 30,

            towers: default_towers(),
            enemies: default_enemies(),
            upgrades: default_upgrades(),
        }
    }
}

fn base_tower(price: u32, attack: f32, interval_ms: u32, radius: f32, attack_type: AttackType) -> TowerSpec {
    TowerSpec {
        price,
        attack,
        attack_interval_ms: interval_ms,
        radius,
        attack_type,
        hits_stealth: false,
        hits_armored: false,
        boss_damage_multiplier: None,
        critical: None,
        stun: None,
        slow: None,
        poison: None,
        mark: None,
        acceleration: None,
        execute_threshold: None,
        explosion: None,
        chain: None,
        lingering: None,
    }
}

fn default_towers() -> TowerTable {
    TowerTable {
        arrow: base_tower(50, 50.0, 1_000, 27.0, AttackType::Single),
        gatling: TowerSpec {
            acceleration: Some(AccelerationSpec {
                per_hit: 1.07,
                max_stacks: 12,
            }),
            ..base_tower(180, 8.0, 400, 24.0, AttackType::Quadruple)
        },
        volley: base_tower(160, 30.0, 1_200, 32.0, AttackType::Triple),
        venom: TowerSpec {
            poison: Some(PoisonSpec {
                damage: 18.0,
                stops_regen: true,
            }),
            ..base_tower(140, 10.0, 800, 26.0, AttackType::Double)
        },
        frost: TowerSpec {
            hits_stealth: true,
            slow: Some(SlowSpec {
                magnitude: 0.5,
                duration_ms: 2_500,
            }),
            ..base_tower(110, 12.0, 900, 30.0, AttackType::Single)
        },
        tesla: TowerSpec {
            hits_stealth: true,
            stun: Some(StunSpec {
                chance: 0.35,
                duration_ms: 600,
            }),
            chain: Some(ChainSpec {
                count: 4,
                range: 18.0,
            }),
            ..base_tower(240, 28.0, 1_400, 33.0, AttackType::Chain)
        },
        mortar: TowerSpec {
            hits_armored: true,
            boss_damage_multiplier: Some(1.5),
            explosion: Some(ExplosionSpec { radius: 15.0 }),
            ..base_tower(300, 90.0, 3_000, 60.0, AttackType::Explosion)
        },
        flame: TowerSpec {
            lingering: Some(LingeringSpec {
                damage_per_tick: 8.0,
                radius: 12.0,
                duration_ms: 2_500,
            }),
            ..base_tower(170, 20.0, 1_500, 20.0, AttackType::Lingering)
        },
    }
}

fn default_enemies() -> EnemyTable {
    EnemyTable {
        basic: EnemySpec {
            max_hp: 100.0,
            base_speed: 0.25,
            armored: false,
            stealth: false,
            can_regen: false,
            regen_per_second: 0.0,
            spawns_on_death: None,
            stun_resistance: 1.0,
            quota_weight: 1,
            leak_damage: 1,
            boss: false,
        },
        runner: EnemySpec {
            max_hp: 60.0,
            base_speed: 0.45,
            armored: false,
            stealth: false,
            can_regen: false,
            regen_per_second: 0.0,
            spawns_on_death: None,
            stun_resistance: 1.0,
            quota_weight: 1,
            leak_damage: 1,
            boss: false,
        },
        brute: EnemySpec {
            max_hp: 320.0,
            base_speed: 0.18,
            armored: true,
            stealth: false,
            can_regen: false,
            regen_per_second: 0.0,
            spawns_on_death: None,
            stun_resistance: 0.8,
            quota_weight: 2,
            leak_damage: 2,
            boss: false,
        },
        shade: EnemySpec {
            max_hp: 80.0,
            base_speed: 0.35,
            armored: false,
            stealth: true,
            can_regen: false,
            regen_per_second: 0.0,
            spawns_on_death: None,
            stun_resistance: 1.0,
            quota_weight: 1,
            leak_damage: 1,
            boss: false,
        },
        mender: EnemySpec {
            max_hp: 150.0,
            base_speed: 0.22,
            armored: false,
            stealth: false,
            can_regen: true,
            regen_per_second: 6.0,
            spawns_on_death: None,
            stun_resistance: 1.0,
            quota_weight: 1,
            leak_damage: 1,
            boss: false,
        },
        broodmother: EnemySpec {
            max_hp: 260.0,
            base_speed: 0.15,
            armored: false,
            stealth: false,
            can_regen: false,
            regen_per_second: 0.0,
            spawns_on_death: Some(EnemyKind::Runner),
            stun_resistance: 1.0,
            quota_weight: 3,
            leak_damage: 2,
            boss: false,
        },
        boss: EnemySpec {
            max_hp: 4_000.0,
            base_speed: 0.10,
            armored: true,
            stealth: false,
            can_regen: true,
            regen_per_second: 20.0,
            spawns_on_death: None,
            stun_resistance: 0.25,
            quota_weight: 15,
            leak_damage: 20,
            boss: true,
        },
    }
}

fn default_upgrades() -> UpgradeTable {
    UpgradeTable {
        arrow: UpgradeChains {
            // Top: raw damage. Bottom: marksman tricks.
            top: vec![
                upgrade(1, 70, StatPatch { attack: Some(65.0), ..patch() }),
                upgrade(2, 110, StatPatch { attack: Some(85.0), ..patch() }),
                upgrade(3, 170, StatPatch { attack: Some(115.0), attack_interval_ms: Some(900), ..patch() }),
                upgrade(4, 260, StatPatch { attack: Some(150.0), ..patch() }),
                upgrade(5, 400, StatPatch { attack: Some(210.0), attack_interval_ms: Some(800), ..patch() }),
                upgrade(6, 620, StatPatch { attack: Some(300.0), hits_armored: Some(true), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 60, StatPatch { radius: Some(31.0), ..patch() }),
                upgrade(2, 100, StatPatch { hits_stealth: Some(true), ..patch() }),
                upgrade(3, 180, StatPatch { critical: Some(CriticalSpec { chance: 0.2, multiplier: 2.0 }), ..patch() }),
                upgrade(4, 280, StatPatch { mark: Some(MarkSpec { multiplier: 1.3, death_burst: false, burst_radius: 0.0 }), ..patch() }),
                upgrade(5, 430, StatPatch { critical: Some(CriticalSpec { chance: 0.3, multiplier: 2.5 }), ..patch() }),
                upgrade(6, 650, StatPatch { execute_threshold: Some(0.1), ..patch() }),
            ],
        },
        gatling: UpgradeChains {
            // Top: spin-up. Bottom: reach and armor shredding.
            top: vec![
                upgrade(1, 90, StatPatch { attack: Some(10.0), ..patch() }),
                upgrade(2, 140, StatPatch { attack_interval_ms: Some(350), ..patch() }),
                upgrade(3, 220, StatPatch { acceleration: Some(AccelerationSpec { per_hit: 1.09, max_stacks: 14 }), ..patch() }),
                upgrade(4, 330, StatPatch { attack: Some(13.0), ..patch() }),
                upgrade(5, 500, StatPatch { attack_interval_ms: Some(300), ..patch() }),
                upgrade(6, 750, StatPatch { acceleration: Some(AccelerationSpec { per_hit: 1.12, max_stacks: 16 }), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 80, StatPatch { radius: Some(27.0), ..patch() }),
                upgrade(2, 130, StatPatch { hits_stealth: Some(true), ..patch() }),
                upgrade(3, 210, StatPatch { radius: Some(30.0), ..patch() }),
                upgrade(4, 320, StatPatch { hits_armored: Some(true), ..patch() }),
                upgrade(5, 480, StatPatch { attack: Some(12.0), radius: Some(33.0), ..patch() }),
                upgrade(6, 700, StatPatch { boss_damage_multiplier: Some(1.3), ..patch() }),
            ],
        },
        volley: UpgradeChains {
            top: vec![
                upgrade(1, 80, StatPatch { attack: Some(38.0), ..patch() }),
                upgrade(2, 130, StatPatch { attack: Some(48.0), ..patch() }),
                upgrade(3, 200, StatPatch { attack_interval_ms: Some(1_000), ..patch() }),
                upgrade(4, 310, StatPatch { attack: Some(64.0), ..patch() }),
                upgrade(5, 470, StatPatch { attack: Some(84.0), attack_interval_ms: Some(900), ..patch() }),
                upgrade(6, 690, StatPatch { attack: Some(110.0), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 75, StatPatch { radius: Some(36.0), ..patch() }),
                upgrade(2, 120, StatPatch { radius: Some(40.0), ..patch() }),
                upgrade(3, 190, StatPatch { hits_stealth: Some(true), ..patch() }),
                upgrade(4, 300, StatPatch { radius: Some(45.0), ..patch() }),
                upgrade(5, 450, StatPatch { critical: Some(CriticalSpec { chance: 0.15, multiplier: 1.8 }), ..patch() }),
                upgrade(6, 670, StatPatch { radius: Some(50.0), hits_armored: Some(true), ..patch() }),
            ],
        },
        venom: UpgradeChains {
            // Top: stronger toxin. Bottom: contact damage.
            top: vec![
                upgrade(1, 85, StatPatch { poison: Some(PoisonSpec { damage: 24.0, stops_regen: true }), ..patch() }),
                upgrade(2, 140, StatPatch { poison: Some(PoisonSpec { damage: 32.0, stops_regen: true }), ..patch() }),
                upgrade(3, 220, StatPatch { poison: Some(PoisonSpec { damage: 44.0, stops_regen: true }), ..patch() }),
                upgrade(4, 340, StatPatch { poison: Some(PoisonSpec { damage: 60.0, stops_regen: true }), ..patch() }),
                upgrade(5, 510, StatPatch { poison: Some(PoisonSpec { damage: 82.0, stops_regen: true }), ..patch() }),
                upgrade(6, 760, StatPatch { poison: Some(PoisonSpec { damage: 115.0, stops_regen: true }), radius: Some(30.0), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 70, StatPatch { attack: Some(14.0), ..patch() }),
                upgrade(2, 115, StatPatch { attack_interval_ms: Some(700), ..patch() }),
                upgrade(3, 185, StatPatch { attack: Some(20.0), ..patch() }),
                upgrade(4, 290, StatPatch { hits_stealth: Some(true), ..patch() }),
                upgrade(5, 440, StatPatch { attack: Some(28.0), attack_interval_ms: Some(600), ..patch() }),
                upgrade(6, 660, StatPatch { attack: Some(40.0), ..patch() }),
            ],
        },
        frost: UpgradeChains {
            // Top: deeper chill. Bottom: damage so the slow can finish jobs.
            top: vec![
                upgrade(1, 75, StatPatch { slow: Some(SlowSpec { magnitude: 0.45, duration_ms: 2_800 }), ..patch() }),
                upgrade(2, 120, StatPatch { slow: Some(SlowSpec { magnitude: 0.4, duration_ms: 3_100 }), ..patch() }),
                upgrade(3, 190, StatPatch { slow: Some(SlowSpec { magnitude: 0.35, duration_ms: 3_400 }), ..patch() }),
                upgrade(4, 300, StatPatch { slow: Some(SlowSpec { magnitude: 0.3, duration_ms: 3_700 }), ..patch() }),
                upgrade(5, 460, StatPatch { slow: Some(SlowSpec { magnitude: 0.25, duration_ms: 4_000 }), ..patch() }),
                upgrade(6, 680, StatPatch { slow: Some(SlowSpec { magnitude: 0.2, duration_ms: 4_500 }), radius: Some(36.0), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 70, StatPatch { attack: Some(16.0), ..patch() }),
                upgrade(2, 115, StatPatch { attack: Some(22.0), ..patch() }),
                upgrade(3, 185, StatPatch { attack_interval_ms: Some(750), ..patch() }),
                upgrade(4, 290, StatPatch { attack: Some(32.0), ..patch() }),
                upgrade(5, 440, StatPatch { stun: Some(StunSpec { chance: 0.15, duration_ms: 400 }), ..patch() }),
                upgrade(6, 660, StatPatch { attack: Some(48.0), ..patch() }),
            ],
        },
        tesla: UpgradeChains {
            // Top: longer arcs. Bottom: harder shocks.
            top: vec![
                upgrade(1, 110, StatPatch { chain: Some(ChainSpec { count: 5, range: 19.0 }), ..patch() }),
                upgrade(2, 170, StatPatch { chain: Some(ChainSpec { count: 6, range: 20.0 }), ..patch() }),
                upgrade(3, 260, StatPatch { chain: Some(ChainSpec { count: 7, range: 22.0 }), ..patch() }),
                upgrade(4, 390, StatPatch { chain: Some(ChainSpec { count: 8, range: 24.0 }), ..patch() }),
                upgrade(5, 580, StatPatch { chain: Some(ChainSpec { count: 10, range: 26.0 }), ..patch() }),
                upgrade(6, 850, StatPatch { chain: Some(ChainSpec { count: 12, range: 30.0 }), radius: Some(38.0), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 100, StatPatch { attack: Some(36.0), ..patch() }),
                upgrade(2, 160, StatPatch { stun: Some(StunSpec { chance: 0.45, duration_ms: 700 }), ..patch() }),
                upgrade(3, 250, StatPatch { attack: Some(48.0), ..patch() }),
                upgrade(4, 380, StatPatch { stun: Some(StunSpec { chance: 0.55, duration_ms: 850 }), ..patch() }),
                upgrade(5, 560, StatPatch { attack: Some(66.0), attack_interval_ms: Some(1_200), ..patch() }),
                upgrade(6, 830, StatPatch { stun: Some(StunSpec { chance: 0.7, duration_ms: 1_000 }), ..patch() }),
            ],
        },
        mortar: UpgradeChains {
            // Top: bigger shells. Bottom: burning ground.
            top: vec![
                upgrade(1, 130, StatPatch { attack: Some(115.0), ..patch() }),
                upgrade(2, 200, StatPatch { explosion: Some(ExplosionSpec { radius: 18.0 }), ..patch() }),
                upgrade(3, 310, StatPatch { attack: Some(150.0), ..patch() }),
                upgrade(4, 460, StatPatch { explosion: Some(ExplosionSpec { radius: 22.0 }), ..patch() }),
                upgrade(5, 680, StatPatch { attack: Some(200.0), attack_interval_ms: Some(2_600), ..patch() }),
                upgrade(6, 980, StatPatch { boss_damage_multiplier: Some(2.0), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 120, StatPatch { radius: Some(66.0), ..patch() }),
                upgrade(2, 190, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 5.0, radius: 9.0, duration_ms: 1_500 }), ..patch() }),
                upgrade(3, 300, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 7.0, radius: 10.0, duration_ms: 2_000 }), ..patch() }),
                upgrade(4, 450, StatPatch { mark: Some(MarkSpec { multiplier: 1.2, death_burst: true, burst_radius: 12.0 }), ..patch() }),
                upgrade(5, 660, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 10.0, radius: 12.0, duration_ms: 2_500 }), ..patch() }),
                upgrade(6, 960, StatPatch { attack_interval_ms: Some(2_400), radius: Some(75.0), ..patch() }),
            ],
        },
        flame: UpgradeChains {
            // Top: hotter ground. Bottom: wider throw.
            top: vec![
                upgrade(1, 85, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 11.0, radius: 12.0, duration_ms: 2_500 }), ..patch() }),
                upgrade(2, 140, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 14.0, radius: 13.0, duration_ms: 2_800 }), ..patch() }),
                upgrade(3, 220, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 18.0, radius: 14.0, duration_ms: 3_100 }), ..patch() }),
                upgrade(4, 340, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 24.0, radius: 15.0, duration_ms: 3_400 }), ..patch() }),
                upgrade(5, 510, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 32.0, radius: 16.0, duration_ms: 3_700 }), ..patch() }),
                upgrade(6, 760, StatPatch { lingering: Some(LingeringSpec { damage_per_tick: 44.0, radius: 18.0, duration_ms: 4_000 }), ..patch() }),
            ],
            bottom: vec![
                upgrade(1, 80, StatPatch { attack: Some(26.0), ..patch() }),
                upgrade(2, 130, StatPatch { radius: Some(23.0), ..patch() }),
                upgrade(3, 210, StatPatch { attack: Some(34.0), attack_interval_ms: Some(1_300), ..patch() }),
                upgrade(4, 320, StatPatch { hits_stealth: Some(true), ..patch() }),
                upgrade(5, 480, StatPatch { attack: Some(46.0), radius: Some(26.0), ..patch() }),
                upgrade(6, 710, StatPatch { attack: Some(64.0), attack_interval_ms: Some(1_100), ..patch() }),
            ],
        },
    }
}
