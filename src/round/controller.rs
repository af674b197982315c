use std::sync::mpsc::Sender;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::timer::{Tick, Ticker};
use crate::content::{CategorizedWord, CategoryPool, SkippedWord};
use crate::error::{PoolError, RoundError};
use crate::observer::{Observers, SubscriptionId};

pub const MIN_TIME_LIMIT: u32 = 30;
pub const MAX_TIME_LIMIT: u32 = 300;
pub const DEFAULT_TIME_LIMIT: u32 = 120;
pub const DEFAULT_TICK_MILLIS: u64 = 1000;

/// Word round configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub time_limit_secs: u32,
    pub tick_millis: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            time_limit_secs: DEFAULT_TIME_LIMIT,
            tick_millis: DEFAULT_TICK_MILLIS,
        }
    }
}

/// Check a time limit against [`MIN_TIME_LIMIT`]..=[`MAX_TIME_LIMIT`].
pub fn validate_time_limit(secs: u32) -> Result<u32, RoundError> {
    if (MIN_TIME_LIMIT..=MAX_TIME_LIMIT).contains(&secs) {
        Ok(secs)
    } else {
        Err(RoundError::TimeLimitOutOfRange {
            value: secs,
            min: MIN_TIME_LIMIT,
            max: MAX_TIME_LIMIT,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Configuring,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    TimeUp,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    pub time_limit: u32,
    pub remaining: u32,
    pub score: u32,
    pub current: Option<CategorizedWord>,
    pub skipped: Vec<SkippedWord>,
    pub finish_reason: Option<FinishReason>,
}

/// Drives the word-guessing game: countdown, score, skipped words.
///
/// The countdown is advanced by [`tick`](Self::tick), either directly or from
/// a [`Ticker`] attached with [`attach_timer`](Self::attach_timer). Every
/// round gets a fresh epoch, and ticks from an earlier round are ignored.
pub struct TimedRoundController<R = StdRng> {
    pool: CategoryPool<R>,
    phase: RoundPhase,
    time_limit: u32,
    remaining: u32,
    score: u32,
    current: Option<CategorizedWord>,
    skipped: Vec<SkippedWord>,
    finish_reason: Option<FinishReason>,
    epoch: u64,
    tick_interval: Duration,
    timer: Option<Sender<Tick>>,
    ticker: Option<Ticker>,
    observers: Observers<RoundSnapshot>,
}

impl<R: Rng> TimedRoundController<R> {
    pub fn new(pool: CategoryPool<R>, time_limit: u32) -> Result<Self, RoundError> {
        let time_limit = validate_time_limit(time_limit)?;
        Ok(TimedRoundController {
            pool,
            phase: RoundPhase::Configuring,
            time_limit,
            remaining: time_limit,
            score: 0,
            current: None,
            skipped: Vec::new(),
            finish_reason: None,
            epoch: 0,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MILLIS),
            timer: None,
            ticker: None,
            observers: Observers::new(),
        })
    }

    /// Build a controller with the configured time limit and tick rate.
    pub fn from_config(pool: CategoryPool<R>, config: &RoundConfig) -> Result<Self, RoundError> {
        let mut round = Self::new(pool, config.time_limit_secs)?;
        round.tick_interval = Duration::from_millis(config.tick_millis.max(1));
        Ok(round)
    }

    /// Deliver ticks on `ticks` every [`tick_interval`](Self::tick_interval)
    /// while a round is running.
    pub fn attach_timer(&mut self, ticks: Sender<Tick>) {
        self.timer = Some(ticks);
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Whether a ticker thread is currently counting down this round.
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Change the time limit for the next round. Not allowed mid-round.
    pub fn set_time_limit(&mut self, secs: u32) -> Result<(), RoundError> {
        if self.phase == RoundPhase::Running {
            return Err(RoundError::NotConfigurable);
        }
        self.time_limit = validate_time_limit(secs)?;
        if self.phase == RoundPhase::Configuring {
            self.remaining = self.time_limit;
        }
        self.notify();
        Ok(())
    }

    /// Begin a new round from any phase.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> RoundSnapshot {
        self.stop_timer();
        self.epoch += 1;
        self.phase = RoundPhase::Running;
        self.remaining = self.time_limit;
        self.score = 0;
        self.skipped.clear();
        self.current = None;
        self.finish_reason = None;
        info!(epoch = self.epoch, time_limit = self.time_limit, "round started");

        if self.next_word() {
            if let Some(ticks) = &self.timer {
                self.ticker = Some(Ticker::spawn(self.tick_interval, self.epoch, ticks.clone()));
            }
        }
        self.notify();
        self.snapshot()
    }

    /// Count down one second. Ignored unless running.
    pub fn tick(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        debug!(remaining = self.remaining, "tick");
        if self.remaining == 0 {
            self.finish(FinishReason::TimeUp);
        }
        self.notify();
    }

    /// Apply a tick from the attached timer, dropping ticks from old rounds.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        if tick.epoch != self.epoch || self.phase != RoundPhase::Running {
            debug!(tick = tick.epoch, epoch = self.epoch, "stale tick ignored");
            return false;
        }
        self.tick();
        true
    }

    /// Score the current word and move on.
    pub fn mark_correct(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }
        self.score += 1;
        self.next_word();
        self.notify();
    }

    /// Log the current word as skipped and move on.
    pub fn mark_skip(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }
        if let Some(current) = &self.current {
            self.skipped.push(SkippedWord {
                word: current.word.clone(),
                category: current.category.clone(),
            });
        }
        self.next_word();
        self.notify();
    }

    /// Draw the next word, finishing the round if none is eligible.
    fn next_word(&mut self) -> bool {
        let current = self.current.as_ref().map(|c| &c.word);
        match self.pool.draw(current, &self.skipped) {
            Ok(next) => {
                self.current = Some(next);
                true
            }
            Err(PoolError::Exhausted | PoolError::Empty) => {
                self.finish(FinishReason::Exhausted);
                false
            }
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.stop_timer();
        self.phase = RoundPhase::Finished;
        self.finish_reason = Some(reason);
        info!(
            ?reason,
            score = self.score,
            skipped = self.skipped.len(),
            "round finished"
        );
    }

    fn stop_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn current(&self) -> Option<&CategorizedWord> {
        self.current.as_ref()
    }

    pub fn skipped(&self) -> &[SkippedWord] {
        &self.skipped
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            time_limit: self.time_limit,
            remaining: self.remaining,
            score: self.score,
            current: self.current.clone(),
            skipped: self.skipped.clone(),
            finish_reason: self.finish_reason,
        }
    }

    pub fn subscribe(&mut self, f: impl FnMut(&RoundSnapshot) + 'static) -> SubscriptionId {
        self.observers.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self) {
        if !self.observers.is_empty() {
            let snapshot = self.snapshot();
            self.observers.notify(&snapshot);
        }
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
