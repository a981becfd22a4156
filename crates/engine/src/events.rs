use crate::config::{EnemyKind, TargetingMode, TowerKind, UpgradePath};
use crate::world::{EnemyId, TowerId};
use rampart_core::SpeedMultiplier;

/// Everything observable that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    RoundStarted {
        round: u32,
    },
    RoundCleared {
        round: u32,
    },
    EnemySpawned {
        id: EnemyId,
        kind: EnemyKind,
    },
    EnemyKilled {
        id: EnemyId,
        kind: EnemyKind,
        reward: u32,
    },
    EnemyLeaked {
        id: EnemyId,
        lives_left: u32,
    },
    TowerPlaced {
        id: TowerId,
        kind: TowerKind,
    },
    TowerSold {
        id: TowerId,
        refund: u32,
    },
    UpgradePurchased {
        tower: TowerId,
        path: UpgradePath,
        level: u8,
        cost: u32,
    },
    TowerSelected {
        id: TowerId,
    },
    TargetingModeSet {
        tower: TowerId,
        mode: TargetingMode,
    },
    PausedSet {
        paused: bool,
    },
    SpeedChanged {
        multiplier: SpeedMultiplier,
    },
    ActionRejected {
        reason: RejectReason,
    },
    GameOver {
        round: u32,
        kills: u32,
    },
    Victory {
        round: u32,
        kills: u32,
    },
}

/// Why a player action was refused. Always a no-op, never a crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientFunds,
    BlockedPlacement,
    UnknownTower,
    UpgradeUnavailable,
    PathLocked,
    RoundNotCleared,
}
