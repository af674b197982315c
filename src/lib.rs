//! # Quiz Four
//!
//! Game logic for three classroom mini-games: four-in-a-row where every move
//! is gated by a trivia question, a timed word-guessing round, and a paged
//! flashcard viewer. Rendering is left to the caller, which observes
//! snapshots published after each state change.
//!
//! ## Modules
//!
//! - [`game`] — Board, overwrite rule, win detection, turn rotation
//! - [`content`] — Quiz/vocabulary items, JSON collections, samplers
//! - [`quiz`] — Quiz gate between drop requests and the board
//! - [`round`] — Timed word round and its cancellable ticker
//! - [`flashcards`] — Paged flashcard deck
//! - [`observer`] — Snapshot subscription
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod content;
pub mod error;
pub mod flashcards;
pub mod game;
pub mod observer;
pub mod quiz;
pub mod round;
