//! Neon Pong - a neon-styled take on the classic two-paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, match state)
//! - `driver`: Per-frame match driver and menu/running/over lifecycle
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::FrameDriver;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Court dimensions in logical pixels, origin top-left, y down
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 500.0;

    /// Paddle defaults - player defends the left edge, AI the right
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 84.0;
    /// X of the player paddle's left edge
    pub const PLAYER_X: f32 = 16.0;
    /// X of the AI paddle's left edge, mirrored inset
    pub const AI_X: f32 = COURT_WIDTH - PADDLE_WIDTH - 16.0;
    /// AI paddle travel per tick
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults - the ball is a square, velocities are per tick
    pub const BALL_SIZE: f32 = 14.0;
    pub const BALL_SPEED: f32 = 6.2;
    /// Vertical speed cap after paddle spin
    pub const MAX_BALL_VY: f32 = BALL_SPEED * 1.1;
    /// Spin added per pixel of offset between ball and paddle centers
    pub const SPIN_FACTOR: f32 = 0.13;
    /// Serve vy is BALL_SPEED scaled by a uniform draw from this spread
    pub const SERVE_SPREAD: f32 = 0.35;

    /// AI ignores ball-center offsets smaller than this (pixels)
    pub const AI_DEAD_ZONE: f32 = 8.0;

    /// First side to reach this many points wins the match
    pub const WINNING_SCORE: u8 = 5;
}
