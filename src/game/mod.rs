//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, rendering or
//! timing dependencies. The host decides when to tick; the engine decides what
//! a tick does.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use state::{Board, Cell, CollisionType, GameState, SessionState, Snake};
