//! # Connect Four
//!
//! A two-player Connect Four game played in the terminal. Pieces are dropped
//! by clicking a cell or picking a column from the keyboard; four in a row
//! along any line wins.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: grid, players, game state machine, observer events
//! - [`ui`] — Terminal UI built with Ratatui and Crossterm
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — File-backed logger setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
