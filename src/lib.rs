//! Space invaders for the terminal.
//!
//! [`game`] holds the whole simulation: entities, the marching formation,
//! collisions, scoring and the game-over state machine. It is driven one
//! frame at a time with an [`game::Input`] snapshot and a millisecond clock,
//! and hands back a render list plus HUD values. Everything else in the
//! crate (events, input tracking, timers, the ratatui front end) is the
//! frame loop around it.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod input;
pub mod scores;
pub mod timer;
pub mod ui;

pub use error::{GameError, Result};
