//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame, velocities in pixels per tick
//! - Seeded RNG only (serves are the sole random input)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, clamp_vertical_speed, paddle_spin};
pub use state::{MatchEvent, MatchPhase, MatchState, Side};
pub use tick::{TickInput, clamp_paddle_y, tick};
