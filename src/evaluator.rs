use std::time::{Duration, Instant};

use crate::metrics::{accuracy_percent, progress_percent, words_per_minute};
use crate::session::{SessionState, Status};

/// How a single target character renders
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Untyped,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharView {
    pub ch: char,
    pub class: CharClass,
    pub is_cursor: bool,
}

/// Speed, accuracy and error count at one instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    pub speed: u32,
    pub accuracy: u32,
    pub errors: usize,
}

/// Everything the typing screen draws
#[derive(Clone, Debug, PartialEq)]
pub struct LiveView {
    pub status: Status,
    pub remaining_secs: u32,
    pub metrics: Metrics,
    pub progress: u32,
    pub chars: Vec<CharView>,
}

/// One-second countdown armed while the session is active
#[derive(Clone, Copy, Debug)]
struct Countdown {
    armed_at: Instant,
    fired: u64,
}

impl Countdown {
    fn arm(now: Instant) -> Self {
        Self {
            armed_at: now,
            fired: 0,
        }
    }

    /// Whole seconds elapsed since arming that have not been ticked yet
    fn due(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.armed_at)
            .as_secs()
            .saturating_sub(self.fired)
    }
}

/// Evaluates typed input against a target text for one timed attempt.
#[derive(Debug)]
pub struct Evaluator {
    target: Vec<char>,
    duration_secs: u32,
    state: SessionState,
    countdown: Option<Countdown>,
}

impl Evaluator {
    pub fn new(target: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            target: target.into().chars().collect(),
            duration_secs,
            state: SessionState::new(duration_secs),
            countdown: None,
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn typed_text(&self) -> String {
        self.state.typed.iter().collect()
    }

    pub fn matched(&self) -> usize {
        self.state.matched
    }

    pub fn errors(&self) -> usize {
        self.state.errors
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn has_started(&self) -> bool {
        self.state.status != Status::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.state.status == Status::Complete
    }

    /// True while a countdown is pending
    pub fn is_ticking(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn on_input(&mut self, value: &str) -> bool {
        self.on_input_at(value, Instant::now())
    }

    /// Handle an input change carrying the full typed string. Returns false
    /// when the change is ignored.
    pub fn on_input_at(&mut self, value: &str, now: Instant) -> bool {
        match self.state.status {
            Status::Complete => return false,
            Status::Idle if value.is_empty() => return false,
            Status::Idle => self.start_at(now),
            Status::Active => {}
        }

        let next: Vec<char> = value.chars().collect();
        let prev_len = self.state.typed.len();

        if next.len() > prev_len {
            // only the final appended char is judged
            if let Some(&last) = next.last() {
                if self.target.get(self.state.matched) == Some(&last) {
                    self.state.matched += 1;
                } else {
                    self.state.errors += 1;
                }
            }
        } else if next.len() < prev_len {
            self.state.matched = self.state.matched.min(next.len());
        }

        self.state.typed = next;
        self.state.last_input_at = Some(now);

        tracing::trace!(
            typed = self.state.typed.len(),
            matched = self.state.matched,
            errors = self.state.errors,
            "input"
        );

        true
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now())
    }

    /// Idle -> Active. Records the start instant and arms the countdown.
    /// No-op unless idle.
    pub fn start_at(&mut self, now: Instant) {
        if self.state.status != Status::Idle {
            return;
        }

        self.state.status = Status::Active;
        self.state.started_at = Some(now);
        self.countdown = Some(Countdown::arm(now));

        tracing::debug!(duration_secs = self.duration_secs, "session started");
    }

    /// One countdown second. Returns the final metrics on the tick that
    /// reaches zero, and never again for this attempt.
    pub fn tick(&mut self) -> Option<Metrics> {
        if self.state.status != Status::Active {
            self.countdown = None;
            return None;
        }

        self.countdown.as_mut()?.fired += 1;
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);

        if self.state.remaining_secs > 0 {
            return None;
        }

        let metrics = self.metrics();
        self.state.status = Status::Complete;
        self.countdown = None;

        tracing::info!(
            speed = metrics.speed,
            accuracy = metrics.accuracy,
            errors = metrics.errors,
            "session complete"
        );

        Some(metrics)
    }

    /// Apply every countdown second that has elapsed by `now`
    pub fn advance(&mut self, now: Instant) -> Option<Metrics> {
        let due = self.countdown.map(|c| c.due(now)).unwrap_or(0);

        for _ in 0..due {
            if let Some(metrics) = self.tick() {
                return Some(metrics);
            }
        }

        None
    }

    /// Throw away the current attempt and go back to idle on the same text
    pub fn reset(&mut self) {
        self.state = SessionState::new(self.duration_secs);
        self.countdown = None;
        tracing::debug!("session reset");
    }

    /// Reset onto a fresh target text
    pub fn restart(&mut self, target: impl Into<String>) {
        self.target = target.into().chars().collect();
        self.reset();
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(&self.state.typed, &self.target)
    }

    /// Words per minute as of the latest input change
    pub fn speed(&self) -> u32 {
        match (self.state.started_at, self.state.last_input_at) {
            (Some(start), Some(last)) => words_per_minute(
                self.state.typed.len(),
                last.saturating_duration_since(start),
            ),
            _ => 0,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            speed: self.speed(),
            accuracy: self.accuracy(),
            errors: self.state.errors,
        }
    }

    pub fn progress(&self) -> u32 {
        progress_percent(self.state.matched, self.target.len())
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(u64::from(
            self.duration_secs.saturating_sub(self.state.remaining_secs),
        ))
    }

    pub fn classify(&self) -> Vec<CharView> {
        self.target
            .iter()
            .enumerate()
            .map(|(idx, &ch)| {
                let class = match self.state.typed.get(idx) {
                    None => CharClass::Untyped,
                    Some(&typed) if typed == ch => CharClass::Correct,
                    Some(_) => CharClass::Incorrect,
                };
                CharView {
                    ch,
                    class,
                    is_cursor: idx == self.state.matched,
                }
            })
            .collect()
    }

    pub fn view(&self) -> LiveView {
        LiveView {
            status: self.state.status,
            remaining_secs: self.state.remaining_secs,
            metrics: self.metrics(),
            progress: self.progress(),
            chars: self.classify(),
        }
    }
}
