//! Court scene assembly
//!
//! Builds the draw list for a match state: dashed center line, both
//! paddles, the ball. Pure function of the state, so identical states
//! always produce identical vertex lists.

use glam::Vec2;

use super::shapes::{dashed_vline, rect};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::MatchState;

/// Center line dash pattern, pixels on / off
const CENTER_DASH: f32 = 12.0;
const CENTER_GAP: f32 = 12.0;
/// Center line width
const CENTER_LINE_WIDTH: f32 = 4.0;

/// Build the court draw list for one frame
pub fn court_scene(state: &MatchState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(160);

    vertices.extend(dashed_vline(
        COURT_WIDTH / 2.0,
        0.0,
        COURT_HEIGHT,
        CENTER_LINE_WIDTH,
        CENTER_DASH,
        CENTER_GAP,
        colors::CENTER_LINE,
    ));
    vertices.extend(rect(
        Vec2::new(PLAYER_X, state.player_y),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        colors::PLAYER_PADDLE,
    ));
    vertices.extend(rect(
        Vec2::new(AI_X, state.ai_y),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        colors::AI_PADDLE,
    ));
    vertices.extend(rect(
        state.ball_pos,
        Vec2::new(BALL_SIZE, BALL_SIZE),
        colors::BALL,
    ));

    vertices
}
