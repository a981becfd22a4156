use crate::types::{ActionId, Tick};

/// A player action scheduled for execution at a specific tick.
#[derive(Clone, Debug)]
pub struct ActionEnvelope<A> {
    pub action_id: ActionId,
    pub intended_tick: Tick,
    pub payload: A,
}
