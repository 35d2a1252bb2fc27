//! Axis-aligned collision geometry for the court
//!
//! Everything here is pure: rectangle overlap tests plus the spin rule
//! that gives paddle returns their feel (edge hits deflect, center
//! hits return flat).

use glam::Vec2;

use crate::consts::{MAX_BALL_VY, SPIN_FACTOR};

/// An axis-aligned rectangle in court pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// X of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Y of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Y of the vertical center
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.center_y())
    }

    /// True when the vertical extents overlap (strict: edge contact
    /// does not count)
    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.bottom() > other.y && self.y < other.bottom()
    }
}

/// Spin a paddle adds to the ball's vertical speed on a return
///
/// Proportional to the offset between ball center and paddle center,
/// in pixels, scaled by SPIN_FACTOR. Positive when the ball struck
/// below the paddle's center.
#[inline]
pub fn paddle_spin(ball: &Rect, paddle: &Rect) -> f32 {
    (ball.center_y() - paddle.center_y()) * SPIN_FACTOR
}

/// Clamp the ball's vertical speed to the post-spin cap
#[inline]
pub fn clamp_vertical_speed(vy: f32) -> f32 {
    vy.clamp(-MAX_BALL_VY, MAX_BALL_VY)
}
