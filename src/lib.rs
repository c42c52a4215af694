//! Grid Snake - the classic Snake game on a square grid
//!
//! This library provides:
//! - Core game logic with no I/O or timing (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal mode and its tick scheduler (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
