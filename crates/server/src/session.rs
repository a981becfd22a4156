use crate::errors::SubmitError;
use crate::events::{EventCursor, EventLog, LoggedEvent};
use rampart_core::{ActionEnvelope, ActionId, Game, Paced, SpeedMultiplier, TerminalOutcome, Tick};
use rampart_host::MatchHost;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Status of a running session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Finished(TerminalOutcome),
    Terminated,
}

struct SessionInner<G: Game> {
    host: MatchHost<G>,
    events: EventLog<G::Event>,
    next_action_id: ActionId,
    status: SessionStatus,
}

/// Thread-safe handle to a single game session.
///
/// All mutation goes through the inner mutex: the tick loop and action
/// submitters are serialized, which is the whole concurrency story for a
/// single-writer simulation.
pub struct SessionHandle<G: Game> {
    inner: Arc<Mutex<SessionInner<G>>>,
    shutdown: Arc<AtomicBool>,
    tick_hz: u32,
}

impl<G: Game> Clone for SessionHandle<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            shutdown: Arc::clone(&self.shutdown),
            tick_hz: self.tick_hz,
        }
    }
}

impl<G: Game> SessionHandle<G> {
    pub fn new(host: MatchHost<G>, event_log_capacity: usize) -> Self {
        let tick_hz = host.tick_hz();
        Self {
            inner: Arc::new(Mutex::new(SessionInner {
                host,
                events: EventLog::new(event_log_capacity),
                next_action_id: 1,
                status: SessionStatus::Running,
            })),
            shutdown: Arc::new(AtomicBool::new(false)),
            tick_hz,
        }
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    pub fn should_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Submit an action for execution on the next tick.
    /// Returns the assigned action id and the tick it was scheduled for.
    pub async fn submit_action(&self, action: G::Action) -> Result<(ActionId, Tick), SubmitError> {
        let mut inner = self.inner.lock().await;

        if !matches!(inner.status, SessionStatus::Running) {
            return Err(SubmitError::Terminated);
        }

        let action_id = inner.next_action_id;
        inner.next_action_id += 1;

        let intended_tick = inner.host.current_tick() + 1;
        let scheduled_tick = inner.host.submit(ActionEnvelope {
            action_id,
            intended_tick,
            payload: action,
        });

        Ok((action_id, scheduled_tick))
    }

    pub async fn observe(&self) -> G::Observation {
        let inner = self.inner.lock().await;
        let tick = inner.host.current_tick();
        inner.host.game().observe(tick)
    }

    /// Poll events from the given cursor.
    pub async fn poll_events(&self, cursor: EventCursor) -> (Vec<LoggedEvent<G::Event>>, EventCursor) {
        let inner = self.inner.lock().await;
        inner.events.read_from(cursor)
    }

    pub async fn current_tick(&self) -> Tick {
        let inner = self.inner.lock().await;
        inner.host.current_tick()
    }

    pub async fn status(&self) -> SessionStatus {
        let inner = self.inner.lock().await;
        inner.status
    }

    /// Step one tick and update status.
    /// Returns true if the session is now finished.
    pub async fn step_one_tick(&self) -> bool {
        let mut inner = self.inner.lock().await;

        if !matches!(inner.status, SessionStatus::Running) {
            return true;
        }

        if let Some(events) = inner.host.step_one_tick() {
            let tick = inner.host.current_tick();
            for event in events {
                inner.events.push(tick, event);
            }
        }

        if let Some(outcome) = inner.host.is_terminal() {
            inner.status = SessionStatus::Finished(outcome);
            return true;
        }

        false
    }

    pub async fn terminate(&self) {
        let mut inner = self.inner.lock().await;
        inner.status = SessionStatus::Terminated;
        drop(inner);
        self.request_shutdown();
    }
}

impl<G: Game + Paced> SessionHandle<G> {
    /// Current pacing multiplier reported by the game.
    pub async fn speed_multiplier(&self) -> SpeedMultiplier {
        let inner = self.inner.lock().await;
        inner.host.game().speed_multiplier()
    }
}
