use rampart_core::{ActionEnvelope, Game, Paced, SpeedMultiplier, TerminalOutcome, Tick};
use rampart_host::MatchHost;
use rampart_server::{spawn_tick_loop, EventCursor, SessionHandle, SessionStatus, SubmitError};
use std::time::Duration;
use tokio::time::sleep;

/// Minimal paced game for exercising the session plumbing: counts ticks,
/// finishes at a target, and reports whatever speed it was told.
struct TickerGame {
    ticks: u64,
    target: u64,
    speed: SpeedMultiplier,
}

#[derive(Clone, Debug)]
struct TickerConfig {
    target: u64,
}

#[derive(Clone, Debug)]
enum TickerAction {
    SetSpeed(SpeedMultiplier),
}

#[derive(Clone, Debug, PartialEq)]
enum TickerEvent {
    Ticked(Tick),
}

impl Game for TickerGame {
    type Config = TickerConfig;
    type Action = TickerAction;
    type Observation = u64;
    type Event = TickerEvent;

    fn new(config: Self::Config, _seed: u64) -> Self {
        Self {
            ticks: 0,
            target: config.target,
            speed: SpeedMultiplier::Normal,
        }
    }

    fn step(
        &mut self,
        tick: Tick,
        actions: &[ActionEnvelope<Self::Action>],
        out_events: &mut Vec<Self::Event>,
    ) {
        for action in actions {
            let TickerAction::SetSpeed(speed) = &action.payload;
            self.speed = *speed;
        }
        self.ticks += 1;
        out_events.push(TickerEvent::Ticked(tick));
    }

    fn observe(&self, _tick: Tick) -> Self::Observation {
        self.ticks
    }

    fn is_terminal(&self) -> Option<TerminalOutcome> {
        (self.ticks >= self.target).then_some(TerminalOutcome::Victory)
    }
}

impl Paced for TickerGame {
    fn speed_multiplier(&self) -> SpeedMultiplier {
        self.speed
    }
}

fn session(target: u64, tick_hz: u32) -> SessionHandle<TickerGame> {
    let host = MatchHost::<TickerGame>::new(TickerConfig { target }, 0, tick_hz);
    SessionHandle::new(host, 256)
}

#[tokio::test(flavor = "multi_thread")]
async fn tick_loop_runs_to_completion() {
    let handle = session(20, 200);
    let task = spawn_tick_loop(handle.clone());

    task.await.expect("tick loop joins");

    assert_eq!(handle.observe().await, 20);
    assert_eq!(
        handle.status().await,
        SessionStatus::Finished(TerminalOutcome::Victory)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn events_stream_through_the_cursor() {
    let handle = session(5, 400);
    let task = spawn_tick_loop(handle.clone());
    task.await.expect("tick loop joins");

    let (events, cursor) = handle.poll_events(EventCursor::default()).await;
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].event, TickerEvent::Ticked(1));

    let (more, _) = handle.poll_events(cursor).await;
    assert!(more.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn submissions_after_finish_are_refused() {
    let handle = session(3, 400);
    let task = spawn_tick_loop(handle.clone());
    task.await.expect("tick loop joins");

    let result = handle
        .submit_action(TickerAction::SetSpeed(SpeedMultiplier::Double))
        .await;
    assert_eq!(result.err(), Some(SubmitError::Terminated));
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_stops_an_unfinished_session() {
    let handle = session(u64::MAX, 50);
    let task = spawn_tick_loop(handle.clone());

    sleep(Duration::from_millis(100)).await;
    handle.request_shutdown();
    task.await.expect("tick loop joins");

    assert_eq!(handle.status().await, SessionStatus::Running);
    assert!(handle.observe().await > 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn raising_the_multiplier_speeds_up_wall_clock_progress() {
    // 10 ticks at 50 Hz is 200 ms of wall clock at 1x and ~66 ms at 3x.
    let slow = session(10, 50);
    let task = spawn_tick_loop(slow.clone());
    let started = std::time::Instant::now();
    task.await.expect("tick loop joins");
    let slow_elapsed = started.elapsed();

    let fast = session(10, 50);
    fast.submit_action(TickerAction::SetSpeed(SpeedMultiplier::Triple))
        .await
        .expect("submit succeeds");
    let task = spawn_tick_loop(fast.clone());
    let started = std::time::Instant::now();
    task.await.expect("tick loop joins");
    let fast_elapsed = started.elapsed();

    assert!(
        fast_elapsed < slow_elapsed,
        "3x should finish sooner: {:?} vs {:?}",
        fast_elapsed,
        slow_elapsed
    );
}
