/// Monotonically increasing simulation tick counter.
pub type Tick = u64;

/// Identifier assigned to a submitted action; orders same-tick actions.
pub type ActionId = u64;
