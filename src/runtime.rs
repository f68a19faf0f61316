use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum TyperEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source is gone; no further input can arrive
    Disconnected,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TyperEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => TyperEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => TyperEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TyperEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TyperEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> TyperEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => TyperEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => TyperEvent::Disconnected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Armed {
    epoch: u64,
    next_due: Instant,
}

/// Once-per-period countdown scheduler bound to a single session epoch.
///
/// `sync` arms it when a session starts running and cancels it as soon as the
/// session stops running or is replaced; `poll` yields the armed epoch for each
/// period that has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    period: Duration,
    armed: Option<Armed>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn sync(&mut self, epoch: u64, running: bool, now: Instant) {
        if !running {
            self.armed = None;
        } else if self.armed.map(|a| a.epoch) != Some(epoch) {
            self.armed = Some(Armed {
                epoch,
                next_due: now + self.period,
            });
        }
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_due {
            return None;
        }
        armed.next_due += self.period;
        Some(armed.epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        match runner.step() {
            TyperEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TyperEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            TyperEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn step_reports_closed_source() {
        let (tx, rx) = mpsc::channel::<TyperEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            TyperEvent::Disconnected => {}
            other => panic!("expected Disconnected, got {other:?}"),
        }
    }

    #[test]
    fn step_drains_events_before_reporting_closed_source() {
        let (tx, rx) = mpsc::channel();
        tx.send(TyperEvent::Resize).unwrap();
        drop(tx);
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        assert!(matches!(runner.step(), TyperEvent::Resize));
        assert!(matches!(runner.step(), TyperEvent::Disconnected));
    }

    #[test]
    fn countdown_fires_once_per_period() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.sync(3, true, t0);

        assert_eq!(countdown.poll(t0 + Duration::from_millis(999)), None);
        assert_eq!(countdown.poll(t0 + Duration::from_secs(1)), Some(3));
        assert_eq!(countdown.poll(t0 + Duration::from_millis(1500)), None);
        assert_eq!(countdown.poll(t0 + Duration::from_secs(2)), Some(3));
    }

    #[test]
    fn countdown_catches_up_after_a_stall() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.sync(1, true, t0);

        let late = t0 + Duration::from_millis(3200);
        let fired = std::iter::from_fn(|| countdown.poll(late)).count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn countdown_resync_keeps_schedule_for_same_epoch() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.sync(1, true, t0);
        countdown.sync(1, true, t0 + Duration::from_millis(800));

        assert_eq!(countdown.poll(t0 + Duration::from_secs(1)), Some(1));
    }

    #[test]
    fn countdown_rearms_for_new_epoch() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.sync(1, true, t0);
        countdown.sync(2, true, t0 + Duration::from_millis(500));

        assert_eq!(countdown.poll(t0 + Duration::from_secs(1)), None);
        assert_eq!(countdown.poll(t0 + Duration::from_millis(1500)), Some(2));
    }

    #[test]
    fn countdown_cancels_when_not_running() {
        let t0 = Instant::now();
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.sync(1, true, t0);
        countdown.sync(1, false, t0);

        assert!(!countdown.is_armed());
        assert_eq!(countdown.poll(t0 + Duration::from_secs(5)), None);

        countdown.sync(1, true, t0);
        countdown.cancel();
        assert!(!countdown.is_armed());
    }
}
