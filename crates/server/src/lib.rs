pub mod errors;
pub mod events;
pub mod session;
pub mod tick_loop;

pub use errors::SubmitError;
pub use events::{EventCursor, EventLog, LoggedEvent};
pub use session::{SessionHandle, SessionStatus};
pub use tick_loop::{run_tick_loop, spawn_tick_loop};
