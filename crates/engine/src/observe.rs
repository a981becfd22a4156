//! Read-only snapshots for the render boundary. The renderer gets plain
//! serializable data and can never reach back into simulation state.

use crate::config::{AttackType, EnemyKind, TargetingMode, TowerKind};
use crate::path;
use crate::waves;
use crate::world::{FinalReport, GameState, RoundPhase};
use rampart_core::Tick;
use serde::Serialize;
use slotmap::Key;

#[derive(Clone, Debug, Serialize)]
pub struct EnemySnapshot {
    pub id: u64,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub progress: f32,
    pub armored: bool,
    pub stealth: bool,
    pub slowed: bool,
    pub stunned: bool,
    pub poisoned: bool,
    pub marked: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct TowerSnapshot {
    pub id: u64,
    pub kind: TowerKind,
    pub x: f32,
    pub y: f32,
    pub attack: f32,
    pub radius: f32,
    pub attack_type: AttackType,
    pub targeting_mode: TargetingMode,
    pub attacking: bool,
    pub top_level: u8,
    pub bottom_level: u8,
    pub worth: u32,
    pub lifetime_damage: f32,
    pub kills: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct ZoneSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct Observation {
    pub tick: Tick,
    pub sim_tick: Tick,
    pub round: u32,
    pub quota: u32,
    pub spawned_quota: u32,
    pub round_cleared: bool,
    /// True when a cleared round waits for a manual advance.
    pub can_advance: bool,
    pub money: u32,
    pub lives: u32,
    pub kills: u32,
    pub selected_tower: Option<u64>,
    pub paused: bool,
    pub visible: bool,
    pub speed_factor: u32,
    pub enemies: Vec<EnemySnapshot>,
    pub towers: Vec<TowerSnapshot>,
    pub zones: Vec<ZoneSnapshot>,
    pub game_over: Option<FinalReport>,
}

pub fn snapshot(state: &GameState, tick: Tick) -> Observation {
    let (round_cleared, can_advance) = match state.phase {
        RoundPhase::InRound => (false, false),
        RoundPhase::Cleared { advance_at } => (true, advance_at.is_none()),
    };

    Observation {
        tick,
        sim_tick: state.sim_tick,
        round: state.round,
        quota: waves::quota(state.round),
        spawned_quota: state.spawned_quota,
        round_cleared,
        can_advance,
        money: state.money,
        lives: state.lives,
        kills: state.kills,
        selected_tower: state.selected_tower.map(|id| id.data().as_ffi()),
        paused: state.paused,
        visible: state.visible,
        speed_factor: state.speed.factor(),
        enemies: state
            .world
            .enemies
            .iter()
            .map(|(id, e)| EnemySnapshot {
                id: id.data().as_ffi(),
                kind: e.kind,
                x: e.x,
                y: e.y,
                hp: e.hp,
                max_hp: e.max_hp,
                progress: path::progress(e.x, e.y),
                armored: e.armored,
                stealth: e.stealth,
                slowed: e.slow.is_some(),
                stunned: e.stun.is_some(),
                poisoned: e.poison.is_some(),
                marked: e.mark.is_some(),
            })
            .collect(),
        towers: state
            .world
            .towers
            .iter()
            .map(|(id, t)| TowerSnapshot {
                id: id.data().as_ffi(),
                kind: t.kind,
                x: t.x,
                y: t.y,
                attack: t.spec.attack,
                radius: t.spec.radius,
                attack_type: t.spec.attack_type,
                targeting_mode: t.targeting_mode,
                attacking: t.is_attacking(),
                top_level: t.top_level,
                bottom_level: t.bottom_level,
                worth: t.worth,
                lifetime_damage: t.lifetime_damage,
                kills: t.kills,
            })
            .collect(),
        zones: state
            .world
            .zones
            .iter()
            .map(|z| ZoneSnapshot {
                x: z.x,
                y: z.y,
                radius: z.radius,
            })
            .collect(),
        game_over: state.game_over,
    }
}
