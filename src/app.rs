use std::time::{Duration, Instant};

use tracing::debug;

use crate::best::BestScore;
use crate::input::{Action, Edit, InputField};
use crate::metrics::Metrics;
use crate::sentences::SentenceProvider;
use crate::session::{Session, Status};
use crate::timer::Timer;

/// How long the best score stays emphasised after an improvement
pub const BEST_FLASH: Duration = Duration::from_millis(420);

/// Values currently shown in the readouts
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    pub seconds: f64,
    pub wpm: u32,
    pub accuracy: u32,
    pub best: u32,
    pub best_flash_until: Option<Instant>,
}

impl Scoreboard {
    fn new(best: u32) -> Self {
        Self {
            seconds: 0.0,
            wpm: 0,
            accuracy: 0,
            best,
            best_flash_until: None,
        }
    }

    fn reset_readouts(&mut self) {
        self.seconds = 0.0;
        self.wpm = 0;
        self.accuracy = 0;
    }

    pub fn is_flashing(&self) -> bool {
        self.best_flash_until.is_some()
    }
}

/// Owns the typing session and everything that reacts to it
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub scoreboard: Scoreboard,
    input: InputField,
    timer: Timer,
    best: BestScore,
    provider: SentenceProvider,
    should_quit: bool,
}

impl App {
    pub fn new(provider: SentenceProvider, best: BestScore, tick: Duration) -> Self {
        let scoreboard = Scoreboard::new(best.current());
        Self {
            session: Session::new(provider.next_sentence()),
            scoreboard,
            input: InputField::default(),
            timer: Timer::new(tick),
            best,
            provider,
            should_quit: false,
        }
    }

    pub fn handle(&mut self, action: Action, now: Instant) {
        debug!(?action, status = %self.session.status(), "action");
        match action {
            Action::Edit(edit) => self.on_edit(edit, now),
            Action::Cancel => self.cancel(),
            Action::Restart | Action::NextSentence => self.load_new_sentence(),
            Action::ResetBest => self.reset_best(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn on_edit(&mut self, edit: Edit, now: Instant) {
        // the field is frozen once the sentence is done
        if self.session.is_finished() {
            return;
        }
        let text = self.input.apply(edit).to_owned();
        self.on_input(&text, now);
    }

    /// The input field now holds `text`
    pub fn on_input(&mut self, text: &str, now: Instant) {
        let transition = self.session.on_input(text, now);

        if transition.started() {
            self.timer.start(now);
        }
        if transition.finished() {
            self.on_finished(now);
            return;
        }
        if self.session.is_running() {
            self.scoreboard.accuracy = self.session.metrics().accuracy;
        }
    }

    /// Periodic refresh; only does work when a tick is due
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(until) = self.scoreboard.best_flash_until {
            if now >= until {
                self.scoreboard.best_flash_until = None;
            }
        }

        if self.timer.poll(now).is_none() {
            return;
        }
        if !self.session.is_running() {
            // nothing should be scheduled outside a run
            self.timer.stop();
            return;
        }

        let elapsed = self.session.sample(now);
        self.scoreboard.seconds = elapsed.as_secs_f64();
        self.scoreboard.wpm = self.session.metrics().wpm;
    }

    fn on_finished(&mut self, now: Instant) {
        self.timer.stop();

        let Metrics {
            wpm,
            accuracy,
            seconds,
            ..
        } = self.session.metrics();
        self.scoreboard.seconds = seconds;
        self.scoreboard.wpm = wpm;
        self.scoreboard.accuracy = accuracy;

        if self.best.save(wpm) {
            self.scoreboard.best = self.best.current();
            self.scoreboard.best_flash_until = Some(now + BEST_FLASH);
        }
    }

    pub fn cancel(&mut self) {
        self.timer.stop();
        self.input.clear();
        self.session.cancel();
        self.scoreboard.reset_readouts();
    }

    pub fn load_new_sentence(&mut self) {
        self.timer.stop();
        self.input.clear();
        self.session.load(self.provider.next_sentence());
        self.scoreboard.reset_readouts();
    }

    pub fn reset_best(&mut self) {
        self.best.clear();
        self.scoreboard.best = 0;
        self.scoreboard.best_flash_until = None;
    }

    pub fn status(&self) -> Status {
        self.session.status()
    }

    pub fn best(&self) -> u32 {
        self.best.current()
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// Longest the event loop may block before the next scheduled refresh
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let tick = self.timer.until_due(now);
        let flash = self
            .scoreboard
            .best_flash_until
            .map(|until| until.saturating_duration_since(now));
        match (tick, flash) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether the screen changes on ticks (live readouts or the best-score flash)
    pub fn is_animating(&self) -> bool {
        self.session.is_running() || self.scoreboard.is_flashing()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
