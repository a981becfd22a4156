use crate::session::SessionHandle;
use rampart_core::{Game, Paced};
use tokio::time::{interval, MissedTickBehavior};

/// Run the wall-clock tick loop for a session.
///
/// The tick period is the game-time tick duration divided by the player's
/// speed multiplier; the multiplier is re-read every tick and the interval
/// rebuilt when it changes. Missed ticks are skipped, never replayed — a
/// stalled host resumes at the current pace with no catch-up burst.
pub async fn run_tick_loop<G>(handle: SessionHandle<G>)
where
    G: Game + Paced + Send + 'static,
    G::Action: Send,
    G::Observation: Send,
    G::Event: Send,
    G::Config: Send,
{
    let tick_hz = handle.tick_hz();
    let mut speed = handle.speed_multiplier().await;

    let mut ticker = interval(speed.tick_period(tick_hz));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if handle.should_shutdown() {
            break;
        }

        let finished = handle.step_one_tick().await;
        if finished {
            break;
        }

        let current = handle.speed_multiplier().await;
        if current != speed {
            speed = current;
            ticker = interval(speed.tick_period(tick_hz));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }
    }
}

/// Spawn a tick loop as a tokio task.
pub fn spawn_tick_loop<G>(handle: SessionHandle<G>) -> tokio::task::JoinHandle<()>
where
    G: Game + Paced + Send + 'static,
    G::Action: Send,
    G::Observation: Send,
    G::Event: Send,
    G::Config: Send,
{
    tokio::spawn(run_tick_loop(handle))
}
