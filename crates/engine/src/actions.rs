use crate::config::{TargetingMode, TowerKind, UpgradePath};
use crate::world::TowerId;
use rampart_core::SpeedMultiplier;

/// Player-action boundary. Every variant is validated against current
/// money/state before mutating anything.
#[derive(Clone, Debug)]
pub enum Action {
    PlaceTower {
        kind: TowerKind,
        x: f32,
        y: f32,
    },
    SelectTower {
        tower: TowerId,
    },
    SetTargetingMode {
        tower: TowerId,
        mode: TargetingMode,
    },
    PurchaseUpgrade {
        tower: TowerId,
        path: UpgradePath,
        level: u8,
    },
    SellTower {
        tower: TowerId,
    },
    SetPaused(bool),
    SetVisible(bool),
    SetSpeed(SpeedMultiplier),
    AdvanceRound,
}
