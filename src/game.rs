use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::clock::{Clock, MonotonicClock};
use crate::presenter::{Banner, Presenter, Tone};
use crate::settings::{DelayMode, RoundsTarget, Settings};
use crate::stats::ReactionStats;
use crate::timer::{Scheduler, Timer, TimerHandle, TimerQueue};
use crate::util::round_ms;

/// Pause between a successful round and the next one
pub const NEXT_ROUND_PAUSE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Idle,
    Waiting,
    Go,
}

/// Outcome of a reaction input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Nothing to react to
    Ignored,
    /// Pressed before the signal; the round is void
    TooSoon,
    /// Reaction time in milliseconds
    Recorded(u32),
}

/// The reaction game: owns all state, one pending timer at most
#[derive(Debug)]
pub struct Game<P: Presenter, S: Scheduler = TimerQueue, C: Clock = MonotonicClock> {
    presenter: P,
    scheduler: S,
    clock: C,
    rng: StdRng,
    settings: Settings,
    state: GameState,
    started_at: Option<Duration>,
    stats: ReactionStats,
    pending: Option<TimerHandle>,
}

impl<P: Presenter, S: Scheduler, C: Clock> Game<P, S, C> {
    pub fn new(settings: Settings, presenter: P, scheduler: S, clock: C, rng: StdRng) -> Self {
        let settings = Settings {
            rounds_target: settings.rounds_target.sanitized(),
            ..settings
        };
        let mut game = Self {
            presenter,
            scheduler,
            clock,
            rng,
            settings,
            state: GameState::Idle,
            started_at: None,
            stats: ReactionStats::new(),
            pending: None,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &ReactionStats {
        &self.stats
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the earliest scheduled timer fires
    pub fn next_timer_in(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Idle -> Waiting. Also used to re-enter Waiting after the inter-round pause.
    pub fn start(&mut self) {
        self.cancel_pending();
        self.state = GameState::Waiting;
        self.started_at = None;

        if let RoundsTarget::Finite(target) = self.settings.rounds_target {
            // defensive: rounds_done should never pass the target
            let rounds_done = self.stats.rounds_done().min(target);
            if rounds_done == target {
                info!(rounds_target = target, "starting a new series");
                self.stats.set_rounds_done(0);
                self.publish_scoreboard();
            } else {
                self.stats.set_rounds_done(rounds_done);
            }
        }

        self.presenter.show_banner(&Banner::new(
            "Wait for GREEN…",
            Tone::Wait,
            "Don't press yet.",
        ));

        let delay = self.settings.delay_mode.sample(&mut self.rng);
        let deadline = self.clock.now() + delay;
        self.pending = Some(self.scheduler.schedule(deadline, Timer::Signal));
        debug!(delay_ms = delay.as_millis() as u64, "waiting for signal");
    }

    /// Handle a reaction key press
    pub fn react(&mut self) -> Reaction {
        match self.state {
            GameState::Idle => Reaction::Ignored,
            GameState::Waiting => {
                self.cancel_pending();
                self.state = GameState::Idle;
                self.presenter.show_banner(
                    &Banner::new("Too soon!", Tone::Idle, "Press S and wait for GREEN.")
                        .too_soon(),
                );
                debug!("reacted before the signal");
                Reaction::TooSoon
            }
            GameState::Go => {
                let now = self.clock.now();
                let started_at = self.started_at.take().unwrap_or(now);
                let elapsed = now.saturating_sub(started_at);
                let ms = round_ms(elapsed.as_secs_f64() * 1000.0);

                self.stats.record(ms);
                self.publish_scoreboard();
                debug!(ms, rounds_done = self.stats.rounds_done(), "round recorded");

                if self
                    .settings
                    .rounds_target
                    .is_reached(self.stats.rounds_done())
                {
                    self.end_series();
                } else {
                    self.schedule_next();
                }
                Reaction::Recorded(ms)
            }
        }
    }

    /// Back to a clean slate. Always succeeds.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = GameState::Idle;
        self.started_at = None;
        self.stats.clear();
        self.presenter.show_banner(&Banner::new(
            "Press S to start",
            Tone::Idle,
            "Wait for GREEN, then press space/enter.",
        ));
        self.publish_scoreboard();
        debug!("game reset");
    }

    pub fn set_rounds_target(&mut self, rounds_target: RoundsTarget) {
        info!(%rounds_target, "rounds target changed");
        self.settings.rounds_target = rounds_target.sanitized();
        self.reset();
    }

    /// Takes effect on the next start
    pub fn set_delay_mode(&mut self, delay_mode: DelayMode) {
        info!(%delay_mode, "delay mode changed");
        self.settings.delay_mode = delay_mode;
    }

    /// Fire every timer that is due. Returns how many fired.
    pub fn pump_timers(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((handle, timer)) = self.scheduler.pop_due(now) {
            self.fire(handle, timer);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, handle: TimerHandle, timer: Timer) {
        if self.pending != Some(handle) {
            debug!(?timer, "ignoring stale timer");
            return;
        }
        self.pending = None;

        match (timer, self.state) {
            (Timer::Signal, GameState::Waiting) => self.show_signal(),
            (Timer::NextRound, GameState::Idle) => self.start(),
            (timer, state) => debug!(?timer, %state, "timer fired out of state"),
        }
    }

    fn show_signal(&mut self) {
        self.state = GameState::Go;
        self.started_at = Some(self.clock.now());
        self.presenter
            .show_banner(&Banner::new("GO!", Tone::Go, "Press space/enter NOW!"));
        debug!("signal shown");
    }

    fn schedule_next(&mut self) {
        self.state = GameState::Idle;
        self.presenter.show_banner(&Banner::new(
            "Nice! Next round…",
            Tone::Idle,
            "Get ready for the next round.",
        ));
        let deadline = self.clock.now() + NEXT_ROUND_PAUSE;
        self.pending = Some(self.scheduler.schedule(deadline, Timer::NextRound));
    }

    fn end_series(&mut self) {
        self.state = GameState::Idle;
        let average = self.stats.average();
        let label = match average {
            Some(avg) => format!("Series done: avg {avg} ms"),
            None => "Series done".to_string(),
        };
        self.presenter.show_banner(&Banner::new(
            label,
            Tone::Idle,
            "Press S to try again or change settings.",
        ));
        info!(
            rounds = self.stats.rounds_done(),
            average_ms = average,
            best_ms = self.stats.best(),
            "series finished"
        );
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn publish_scoreboard(&mut self) {
        let scoreboard = self.stats.scoreboard();
        self.presenter.show_scoreboard(&scoreboard);
    }
}
