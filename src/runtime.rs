use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// How often the host wakes up to advance the countdown and redraw
pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // key releases are reported on some platforms
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    Some(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => Some(AppEvent::Resize),
                Ok(_) => None,
                Err(e) => {
                    tracing::error!("terminal event read failed: {e}");
                    break;
                }
            };

            if let Some(evt) = evt {
                if tx.send(evt).is_err() {
                    break;
                }
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
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed event source for tests and headless runs
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Advances the application one event at a time
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

    /// Blocks up to one tick interval; yields Tick when nothing arrived
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}
