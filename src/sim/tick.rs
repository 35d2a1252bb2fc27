//! Per-frame simulation tick
//!
//! Advances a running match by exactly one frame, deterministically.
//! Velocities are stored in pixels per tick, so there is no dt here;
//! the frame driver calls this once per displayed frame.

use super::collision::{clamp_vertical_speed, paddle_spin};
use super::state::{MatchEvent, MatchPhase, MatchState, Side};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Target top edge for the player paddle, from the pointer.
    /// Clamped to the court by the tick; `None` leaves the paddle put.
    pub target_y: Option<f32>,
}

/// Clamp a paddle top edge to the court
#[inline]
pub fn clamp_paddle_y(y: f32) -> f32 {
    y.clamp(0.0, COURT_HEIGHT - PADDLE_HEIGHT)
}

/// Advance the match by one frame
///
/// No-op unless the match is running. Events produced by the tick are
/// appended to `events` for collaborators (scoreboard, audio, game
/// over screen); the simulation itself never calls outward.
pub fn tick(state: &mut MatchState, input: &TickInput, events: &mut Vec<MatchEvent>) {
    if state.phase != MatchPhase::Running {
        return;
    }

    state.time_ticks += 1;

    // 1. Player paddle follows the pointer target
    if let Some(target) = input.target_y {
        state.player_y = clamp_paddle_y(target);
    }

    // 2. Integrate the ball
    state.ball_pos += state.ball_vel;

    // 3. Top/bottom wall bounce (velocity only, no position correction)
    if state.ball_pos.y <= 0.0 || state.ball_pos.y + BALL_SIZE >= COURT_HEIGHT {
        state.ball_vel.y = -state.ball_vel.y;
        events.push(MatchEvent::WallBounce);
    }

    let ball = state.ball_rect();

    // 4. Player paddle return
    let paddle = state.player_rect();
    if state.ball_vel.x < 0.0
        && ball.x <= paddle.right()
        && ball.overlaps_vertically(&paddle)
    {
        state.ball_vel.x = state.ball_vel.x.abs();
        state.ball_vel.y = clamp_vertical_speed(state.ball_vel.y + paddle_spin(&ball, &paddle));
        events.push(MatchEvent::PaddleHit { side: Side::Player });
    }

    // 5. AI paddle return
    let paddle = state.ai_rect();
    if state.ball_vel.x > 0.0
        && ball.right() >= paddle.x
        && ball.overlaps_vertically(&paddle)
    {
        state.ball_vel.x = -state.ball_vel.x.abs();
        state.ball_vel.y = clamp_vertical_speed(state.ball_vel.y + paddle_spin(&ball, &paddle));
        events.push(MatchEvent::PaddleHit { side: Side::Ai });
    }

    // 6. Scoring. The ball must still be travelling outward: a paddle
    //    return resolved above flipped the velocity and keeps the
    //    rally alive even if the position is already past the line.
    if state.ball_pos.x < 0.0 && state.ball_vel.x < 0.0 {
        award_point(state, events, Side::Ai);
    } else if state.ball_pos.x > COURT_WIDTH && state.ball_vel.x > 0.0 {
        award_point(state, events, Side::Player);
    }

    // 7. AI tracks the ball. This still runs on the tick that ends the
    //    match; the state freezes starting with the next tick.
    steer_ai(state);
}

/// Credit a point to `scorer`, then finish the match or re-serve
fn award_point(state: &mut MatchState, events: &mut Vec<MatchEvent>, scorer: Side) {
    let total = match scorer {
        Side::Player => {
            state.player_score += 1;
            state.player_score
        }
        Side::Ai => {
            state.ai_score += 1;
            state.ai_score
        }
    };
    events.push(MatchEvent::ScoreChanged {
        player: state.player_score,
        ai: state.ai_score,
    });

    if total >= WINNING_SCORE {
        let player_won = scorer == Side::Player;
        state.phase = MatchPhase::Over { player_won };
        events.push(MatchEvent::MatchOver {
            player_won,
            player: state.player_score,
            ai: state.ai_score,
        });
    } else {
        state.serve();
    }
}

/// Dead-zone ball tracking for the AI paddle
///
/// The paddle only reacts when the ball's center is more than
/// AI_DEAD_ZONE pixels from its own center, which is what lets spun
/// balls sneak past it.
fn steer_ai(state: &mut MatchState) {
    let ai_center = state.ai_y + PADDLE_HEIGHT / 2.0;
    let ball_center = state.ball_pos.y + BALL_SIZE / 2.0;

    if ai_center < ball_center - AI_DEAD_ZONE {
        state.ai_y += PADDLE_SPEED;
    } else if ai_center > ball_center + AI_DEAD_ZONE {
        state.ai_y -= PADDLE_SPEED;
    }
    state.ai_y = clamp_paddle_y(state.ai_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn running_state(seed: u64) -> MatchState {
        let mut state = MatchState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_tick_noop_when_idle() {
        let mut state = MatchState::new(7);
        let before = state.clone();
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state, before);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_free_flight_advances_by_velocity() {
        let mut state = running_state(1);
        state.ball_pos = Vec2::new(393.0, 243.0);
        state.ball_vel = Vec2::new(BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ball_pos.x - (393.0 + BALL_SPEED)).abs() < 0.001);
        assert!((state.ball_pos.y - 243.0).abs() < 0.001);
        assert!((state.ball_vel.x - BALL_SPEED).abs() < 0.001);
        assert_eq!((state.player_score, state.ai_score), (0, 0));
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_player_target_is_clamped() {
        let mut state = running_state(2);
        // Park the ball so nothing else moves
        state.ball_vel = Vec2::ZERO;
        state.ball_pos = Vec2::new(400.0, 243.0);
        let mut events = Vec::new();

        let input = TickInput {
            target_y: Some(-50.0),
        };
        tick(&mut state, &input, &mut events);
        assert!((state.player_y - 0.0).abs() < 0.001);

        let input = TickInput {
            target_y: Some(10_000.0),
        };
        tick(&mut state, &input, &mut events);
        assert!((state.player_y - (COURT_HEIGHT - PADDLE_HEIGHT)).abs() < 0.001);
    }

    #[test]
    fn test_wall_bounce_top() {
        let mut state = running_state(3);
        state.ball_pos = Vec2::new(400.0, 2.0);
        state.ball_vel = Vec2::new(3.0, -4.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        // Velocity reflects, position is left where it landed
        assert!((state.ball_vel.y - 4.0).abs() < 0.001);
        assert!((state.ball_pos.y - (-2.0)).abs() < 0.001);
        assert_eq!(events, vec![MatchEvent::WallBounce]);
    }

    #[test]
    fn test_wall_bounce_bottom() {
        let mut state = running_state(4);
        state.ball_pos = Vec2::new(400.0, 490.0);
        state.ball_vel = Vec2::new(3.0, 4.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ball_vel.y - (-4.0)).abs() < 0.001);
        assert_eq!(events, vec![MatchEvent::WallBounce]);
    }

    #[test]
    fn test_player_return_applies_spin() {
        let mut state = running_state(5);
        state.player_y = 50.0;
        state.ball_pos = Vec2::new(0.0, 100.0);
        state.ball_vel = Vec2::new(-BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        // Returned rightward with spin from the +15px center offset
        assert!(state.ball_vel.x > 0.0);
        assert!((state.ball_vel.x - BALL_SPEED).abs() < 0.001);
        assert!((state.ball_vel.y - 15.0 * SPIN_FACTOR).abs() < 0.001);
        // The return keeps the rally alive: nobody scores
        assert_eq!((state.player_score, state.ai_score), (0, 0));
        assert_eq!(
            events,
            vec![MatchEvent::PaddleHit { side: Side::Player }]
        );
    }

    #[test]
    fn test_ai_return_applies_spin() {
        let mut state = running_state(6);
        state.ai_y = 280.0;
        state.ball_pos = Vec2::new(752.0, 300.0);
        state.ball_vel = Vec2::new(BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!(state.ball_vel.x < 0.0);
        // Ball center 307 vs paddle center 322: upward deflection
        assert!((state.ball_vel.y - (-15.0 * SPIN_FACTOR)).abs() < 0.001);
        assert_eq!(events, vec![MatchEvent::PaddleHit { side: Side::Ai }]);
    }

    #[test]
    fn test_spin_is_capped() {
        let mut state = running_state(7);
        state.player_y = 50.0;
        // Near-edge hit with existing downward speed blows past the cap
        state.ball_pos = Vec2::new(10.0, 125.0);
        state.ball_vel = Vec2::new(-BALL_SPEED, 4.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!(state.ball_vel.x > 0.0);
        assert!((state.ball_vel.y - MAX_BALL_VY).abs() < 0.001);
    }

    #[test]
    fn test_left_exit_scores_ai_and_reserves() {
        let mut state = running_state(8);
        // Player paddle far from the ball's lane
        state.player_y = 0.0;
        state.ball_pos = Vec2::new(2.0, 400.0);
        state.ball_vel = Vec2::new(-BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!((state.player_score, state.ai_score), (0, 1));
        assert_eq!(events, vec![MatchEvent::ScoreChanged { player: 0, ai: 1 }]);
        assert!(state.is_running());
        // Ball re-served from center with a fresh legal velocity
        assert!((state.ball_pos.x - (COURT_WIDTH - BALL_SIZE) / 2.0).abs() < 0.001);
        assert!((state.ball_pos.y - (COURT_HEIGHT - BALL_SIZE) / 2.0).abs() < 0.001);
        assert!((state.ball_vel.x.abs() - BALL_SPEED).abs() < 0.001);
        assert!(state.ball_vel.y.abs() <= BALL_SPEED * SERVE_SPREAD + 0.001);
    }

    #[test]
    fn test_right_exit_scores_player() {
        let mut state = running_state(9);
        state.ball_pos = Vec2::new(795.0, 100.0);
        state.ball_vel = Vec2::new(BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!((state.player_score, state.ai_score), (1, 0));
        assert_eq!(events, vec![MatchEvent::ScoreChanged { player: 1, ai: 0 }]);
        assert!(state.is_running());
    }

    #[test]
    fn test_match_point_ends_match_exactly_once() {
        let mut state = running_state(10);
        state.player_score = 4;
        state.ball_pos = Vec2::new(795.0, 100.0);
        state.ball_vel = Vec2::new(BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.phase, MatchPhase::Over { player_won: true });
        assert_eq!(
            events,
            vec![
                MatchEvent::ScoreChanged { player: 5, ai: 0 },
                MatchEvent::MatchOver {
                    player_won: true,
                    player: 5,
                    ai: 0
                },
            ]
        );
        // No re-serve on the final point: the ball stays out
        assert!(state.ball_pos.x > COURT_WIDTH);

        // Frozen from here on, and the over event never repeats
        let frozen = state.clone();
        events.clear();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert_eq!(state, frozen);
        assert!(events.is_empty());
    }

    #[test]
    fn test_ai_match_point() {
        let mut state = running_state(11);
        state.ai_score = 4;
        state.player_y = 0.0;
        state.ball_pos = Vec2::new(2.0, 400.0);
        state.ball_vel = Vec2::new(-BALL_SPEED, 0.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.phase, MatchPhase::Over { player_won: false });
        assert_eq!(state.winner(), Some(false));
    }

    #[test]
    fn test_ai_dead_zone_holds_still() {
        let mut state = running_state(12);
        state.ai_y = 208.0; // center 250
        state.ball_vel = Vec2::ZERO;
        let mut events = Vec::new();

        // Ball center exactly on the dead zone edge: no reaction
        state.ball_pos = Vec2::new(400.0, 251.0); // center 258
        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ai_y - 208.0).abs() < 0.001);

        // One pixel past the edge: a full step toward the ball
        state.ball_pos = Vec2::new(400.0, 252.0); // center 259
        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ai_y - (208.0 + PADDLE_SPEED)).abs() < 0.001);
    }

    #[test]
    fn test_ai_tracks_upward() {
        let mut state = running_state(13);
        state.ai_y = 208.0;
        state.ball_vel = Vec2::ZERO;
        state.ball_pos = Vec2::new(400.0, 100.0);
        let mut events = Vec::new();

        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ai_y - (208.0 - PADDLE_SPEED)).abs() < 0.001);
    }

    #[test]
    fn test_ai_clamps_at_court_edges() {
        let mut state = running_state(14);
        state.ball_vel = Vec2::ZERO;
        let mut events = Vec::new();

        // Chasing a ball at the very top
        state.ai_y = 2.0;
        state.ball_pos = Vec2::new(400.0, 0.0);
        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ai_y - 0.0).abs() < 0.001);

        // Chasing a ball at the very bottom
        state.ai_y = 414.0;
        state.ball_pos = Vec2::new(400.0, 480.0);
        tick(&mut state, &TickInput::default(), &mut events);
        assert!((state.ai_y - (COURT_HEIGHT - PADDLE_HEIGHT)).abs() < 0.001);
    }

    #[test]
    fn test_serve_ranges() {
        let mut state = running_state(15);
        for _ in 0..50 {
            state.serve();
            assert!((state.ball_vel.x.abs() - BALL_SPEED).abs() < 0.001);
            assert!(state.ball_vel.y.abs() <= BALL_SPEED * SERVE_SPREAD);
            assert!((state.ball_pos.x - (COURT_WIDTH - BALL_SIZE) / 2.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_determinism() {
        // Two matches with the same seed and inputs stay identical
        let mut state1 = running_state(99999);
        let mut state2 = running_state(99999);
        let mut events1 = Vec::new();
        let mut events2 = Vec::new();

        for i in 0..500u32 {
            let input = if i % 3 == 0 {
                TickInput {
                    target_y: Some((i as f32 * 7.3) % COURT_HEIGHT),
                }
            } else {
                TickInput::default()
            };
            tick(&mut state1, &input, &mut events1);
            tick(&mut state2, &input, &mut events2);
        }

        assert_eq!(state1, state2);
        assert_eq!(events1, events2);
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_paddles_stay_in_court(
            seed in 0u64..1000,
            targets in proptest::collection::vec(-600.0f32..1100.0, 1..80),
        ) {
            let mut state = MatchState::new(seed);
            state.start();
            let mut events = Vec::new();

            for target in targets {
                let input = TickInput { target_y: Some(target) };
                tick(&mut state, &input, &mut events);
                prop_assert!(state.player_y >= 0.0);
                prop_assert!(state.player_y <= COURT_HEIGHT - PADDLE_HEIGHT);
                prop_assert!(state.ai_y >= 0.0);
                prop_assert!(state.ai_y <= COURT_HEIGHT - PADDLE_HEIGHT);
            }
        }

        #[test]
        fn prop_at_most_one_point_per_tick(
            seed in 0u64..1000,
            bx in -30.0f32..830.0,
            by in 0.0f32..486.0,
            vx in -7.0f32..7.0,
            vy in -7.0f32..7.0,
        ) {
            let mut state = MatchState::new(seed);
            state.start();
            state.ball_pos = Vec2::new(bx, by);
            state.ball_vel = Vec2::new(vx, vy);
            let before = (state.player_score, state.ai_score);
            let mut events = Vec::new();

            tick(&mut state, &TickInput::default(), &mut events);
            prop_assert!(state.player_score >= before.0);
            prop_assert!(state.ai_score >= before.1);
            let gained =
                (state.player_score - before.0) + (state.ai_score - before.1);
            prop_assert!(gained <= 1);
        }
    }
}
