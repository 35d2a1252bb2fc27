//! Match state and core simulation types
//!
//! All state the simulation needs lives here; there are no globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// No match in progress (menu is showing)
    Idle,
    /// Active gameplay
    Running,
    /// Match finished; state is frozen until the next start
    Over { player_won: bool },
}

/// Which paddle an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Ai,
}

/// Events produced by a single tick, newest appended last.
///
/// Collaborators (scoreboard, audio, game-over screen) consume these;
/// the simulation itself never calls outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// Ball bounced off the top or bottom edge
    WallBounce,
    /// Ball bounced off a paddle
    PaddleHit { side: Side },
    /// A point was scored; carries both new totals
    ScoreChanged { player: u8, ai: u8 },
    /// A side reached the winning score; emitted exactly once per match
    MatchOver { player_won: bool, player: u8, ai: u8 },
}

/// Paddle top when vertically centered in the court
const CENTERED_PADDLE_Y: f32 = (COURT_HEIGHT - PADDLE_HEIGHT) / 2.0;
/// Ball top-left when centered in the court
const CENTERED_BALL_POS: Vec2 = Vec2::new(
    (COURT_WIDTH - BALL_SIZE) / 2.0,
    (COURT_HEIGHT - BALL_SIZE) / 2.0,
);

/// Complete match state (deterministic)
///
/// Coordinates are court pixels: origin at the top-left corner,
/// x rightward, y downward. Paddle fields are top edges; `ball_pos`
/// is the ball's top-left corner. Velocities are pixels per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Serve RNG stream
    pub rng: Pcg32,
    /// Top edge of the left (player) paddle
    pub player_y: f32,
    /// Top edge of the right (AI) paddle
    pub ai_y: f32,
    /// Ball top-left corner
    pub ball_pos: Vec2,
    /// Ball velocity per tick
    pub ball_vel: Vec2,
    pub player_score: u8,
    pub ai_score: u8,
    /// Current phase
    pub phase: MatchPhase,
    /// Ticks elapsed since the current match started
    pub time_ticks: u64,
}

impl MatchState {
    /// Create an idle match state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player_y: CENTERED_PADDLE_Y,
            ai_y: CENTERED_PADDLE_Y,
            ball_pos: CENTERED_BALL_POS,
            ball_vel: Vec2::ZERO,
            player_score: 0,
            ai_score: 0,
            phase: MatchPhase::Idle,
            time_ticks: 0,
        }
    }

    /// Begin a match: center the paddles, zero the scores, serve.
    ///
    /// Valid from `Idle` (first match) and from `Over` (rematch).
    pub fn start(&mut self) {
        self.player_y = CENTERED_PADDLE_Y;
        self.ai_y = CENTERED_PADDLE_Y;
        self.player_score = 0;
        self.ai_score = 0;
        self.time_ticks = 0;
        self.serve();
        self.phase = MatchPhase::Running;
    }

    /// Re-serve from the court center with a random direction.
    ///
    /// Horizontal speed is always exactly BALL_SPEED toward a random
    /// side; vertical speed is BALL_SPEED scaled by a uniform draw
    /// from [-SERVE_SPREAD, SERVE_SPREAD].
    pub fn serve(&mut self) {
        self.ball_pos = CENTERED_BALL_POS;
        let vx = if self.rng.random_bool(0.5) {
            BALL_SPEED
        } else {
            -BALL_SPEED
        };
        let vy = BALL_SPEED * self.rng.random_range(-SERVE_SPREAD..SERVE_SPREAD);
        self.ball_vel = Vec2::new(vx, vy);
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::Over { .. })
    }

    /// Winner of a finished match, `None` while Idle/Running
    pub fn winner(&self) -> Option<bool> {
        match self.phase {
            MatchPhase::Over { player_won } => Some(player_won),
            _ => None,
        }
    }

    /// Player paddle as a collision rect
    pub fn player_rect(&self) -> Rect {
        Rect::new(PLAYER_X, self.player_y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    /// AI paddle as a collision rect
    pub fn ai_rect(&self) -> Rect {
        Rect::new(AI_X, self.ai_y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    /// Ball as a collision rect
    pub fn ball_rect(&self) -> Rect {
        Rect::new(self.ball_pos.x, self.ball_pos.y, BALL_SIZE, BALL_SIZE)
    }
}
