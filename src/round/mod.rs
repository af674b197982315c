//! Timed word-guessing round and its countdown timer.

mod controller;
mod timer;

pub use controller::{
    format_clock, validate_time_limit, FinishReason, RoundConfig, RoundPhase, RoundSnapshot,
    TimedRoundController, DEFAULT_TICK_MILLIS, DEFAULT_TIME_LIMIT, MAX_TIME_LIMIT, MIN_TIME_LIMIT,
};
pub use timer::{Tick, Ticker};
