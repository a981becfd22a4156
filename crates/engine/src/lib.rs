pub mod actions;
pub mod combat;
pub mod config;
pub mod economy;
pub mod events;
pub mod game;
pub mod movement;
pub mod observe;
pub mod path;
pub mod status;
pub mod targeting;
pub mod upgrades;
pub mod waves;
pub mod world;

pub use actions::Action;
pub use config::{ConfigError, EnemyKind, GameConfig, TargetingMode, TowerKind, UpgradePath};
pub use events::{Event, RejectReason};
pub use game::DefenseGame;
pub use observe::Observation;
pub use world::{EnemyId, GameState, TowerId};
