//! # Minimax Connect Four
//!
//! Connect Four on a configurable grid against a computer opponent that
//! searches the game tree with minimax and alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: in-place board, players, ordered scores
//! - [`ai`] — Agent trait, minimax search, random baseline
//! - [`play`] — Line-based match loop and input parsing
//! - [`ui`] — Terminal UI with keyboard and mouse input
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
pub mod ui;
