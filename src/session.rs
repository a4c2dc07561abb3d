use std::time::{Duration, Instant};

use tracing::debug;

use crate::metrics::{self, Metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Idle,
    Running,
    Finished,
}

/// What an input event did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Started,
    Finished,
    /// First input already covered the whole target (e.g. a paste)
    StartedAndFinished,
}

impl Transition {
    pub fn started(self) -> bool {
        matches!(self, Transition::Started | Transition::StartedAndFinished)
    }

    pub fn finished(self) -> bool {
        matches!(self, Transition::Finished | Transition::StartedAndFinished)
    }
}

/// One attempt at typing a single target sentence
#[derive(Debug, Clone)]
pub struct Session {
    target: String,
    target_len: usize,
    typed: String,
    status: Status,
    started_at: Option<Instant>,
    elapsed: Duration,
}

pub fn strip_newlines(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

impl Session {
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            target_len: target.chars().count(),
            target,
            typed: String::new(),
            status: Status::Idle,
            started_at: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Replace the target and return to Idle
    pub fn load(&mut self, target: impl Into<String>) {
        *self = Session::new(target);
        debug!(target_len = self.target_len, "session loaded");
    }

    /// Full content of the input field changed
    pub fn on_input(&mut self, text: &str, now: Instant) -> Transition {
        if self.status == Status::Finished {
            return Transition::None;
        }

        self.typed = strip_newlines(text);

        let mut transition = Transition::None;
        if self.status == Status::Idle {
            if self.typed.is_empty() {
                return transition;
            }
            self.status = Status::Running;
            self.started_at = Some(now);
            self.elapsed = Duration::ZERO;
            transition = Transition::Started;
            debug!("session started");
        }

        if self.typed_len() >= self.target_len && self.finish(now) {
            transition = if transition.started() {
                Transition::StartedAndFinished
            } else {
                Transition::Finished
            };
        }

        transition
    }

    /// Abandon the attempt, keeping the same target
    pub fn cancel(&mut self) {
        self.typed.clear();
        self.status = Status::Idle;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        debug!("session cancelled");
    }

    /// Freeze elapsed time. Returns false unless the session was running.
    pub fn finish(&mut self, now: Instant) -> bool {
        if self.status != Status::Running {
            return false;
        }
        self.sample(now);
        self.status = Status::Finished;
        debug!(elapsed_ms = self.elapsed_ms(), "session finished");
        true
    }

    /// Refresh elapsed time from the start instant while running
    pub fn sample(&mut self, now: Instant) -> Duration {
        if let (Status::Running, Some(started_at)) = (self.status, self.started_at) {
            self.elapsed = now.saturating_duration_since(started_at);
        }
        self.elapsed
    }

    pub fn metrics(&self) -> Metrics {
        metrics::compute(&self.target, &self.typed, self.elapsed_ms())
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn typed_len(&self) -> usize {
        self.typed.chars().count()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new("hello");
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.typed(), "");
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(session.target_len, 5);
    }

    #[test]
    fn test_first_input_starts_the_session() {
        let t0 = Instant::now();
        let mut session = Session::new("hello");

        assert_eq!(session.on_input("h", t0), Transition::Started);
        assert!(session.is_running());
        assert_eq!(session.started_at, Some(t0));

        assert_eq!(session.on_input("he", t0 + ms(100)), Transition::None);
        assert_eq!(session.typed(), "he");
    }

    #[test]
    fn test_empty_input_keeps_idle() {
        let mut session = Session::new("hello");
        assert_eq!(session.on_input("", Instant::now()), Transition::None);
        assert_eq!(session.on_input("\n", Instant::now()), Transition::None);
        assert_eq!(session.status(), Status::Idle);
    }

    #[test]
    fn test_newlines_are_stripped() {
        let mut session = Session::new("hello world");
        session.on_input("hello\r\nwor\nld", Instant::now());
        assert_eq!(session.typed(), "helloworld");
    }

    #[test]
    fn test_reaching_target_length_finishes_and_freezes() {
        let t0 = Instant::now();
        let mut session = Session::new("cat");

        session.on_input("c", t0);
        session.on_input("ca", t0 + ms(500));
        assert_eq!(session.on_input("cat", t0 + ms(1_000)), Transition::Finished);

        assert!(session.is_finished());
        assert_eq!(session.elapsed(), ms(1_000));

        // sampling after finish does not move the clock
        session.sample(t0 + ms(5_000));
        assert_eq!(session.elapsed(), ms(1_000));
    }

    #[test]
    fn test_edits_after_finish_are_ignored() {
        let t0 = Instant::now();
        let mut session = Session::new("hi");
        session.on_input("h", t0);
        session.on_input("hi", t0 + ms(200));

        assert_eq!(session.on_input("h", t0 + ms(300)), Transition::None);
        assert_eq!(session.typed(), "hi");
        assert!(session.is_finished());
    }

    #[test]
    fn test_paste_covering_target_starts_and_finishes() {
        let t0 = Instant::now();
        let mut session = Session::new("hi");
        assert_matches!(session.on_input("hi there", t0), Transition::StartedAndFinished);
        assert!(session.is_finished());
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_finish_only_from_running() {
        let t0 = Instant::now();
        let mut session = Session::new("hello");
        assert!(!session.finish(t0));
        assert_eq!(session.status(), Status::Idle);

        session.on_input("h", t0);
        assert!(session.finish(t0 + ms(750)));
        assert!(!session.finish(t0 + ms(900)));
        assert_eq!(session.elapsed(), ms(750));
    }

    #[test]
    fn test_cancel_resets_to_idle() {
        let t0 = Instant::now();
        let mut session = Session::new("hello");
        session.on_input("hel", t0);
        session.sample(t0 + ms(400));

        session.cancel();

        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.typed(), "");
        assert_eq!(session.elapsed(), Duration::ZERO);
        assert_eq!(session.started_at, None);
        assert_eq!(session.target(), "hello");
    }

    #[test]
    fn test_cancel_from_finished() {
        let t0 = Instant::now();
        let mut session = Session::new("a");
        session.on_input("a", t0);
        assert!(session.is_finished());

        session.cancel();
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.on_input("a", t0 + ms(10)), Transition::StartedAndFinished);
    }

    #[test]
    fn test_load_replaces_target() {
        let t0 = Instant::now();
        let mut session = Session::new("first");
        session.on_input("fir", t0);

        session.load("second");

        assert_eq!(session.target(), "second");
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.typed(), "");
    }

    #[test]
    fn test_backspacing_rescores_positionally() {
        let t0 = Instant::now();
        let mut session = Session::new("hello");
        session.on_input("hex", t0);
        session.on_input("he", t0 + ms(100));
        session.on_input("hel", t0 + ms(200));
        session.sample(t0 + ms(200));

        assert_eq!(session.metrics().accuracy, 100);
        assert_eq!(session.metrics().correct_chars, 3);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Idle.to_string(), "idle");
        assert_eq!(Status::Running.to_string(), "running");
        assert_eq!(Status::Finished.to_string(), "finished");
    }
}
