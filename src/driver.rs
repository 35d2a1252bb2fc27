//! Per-frame match driver
//!
//! Owns the match state and the per-tick event buffer, and exposes the
//! menu/running/over lifecycle the shell drives. One `frame` call runs
//! exactly one simulation tick. The shell only schedules another frame
//! while the match is running, so stopping the loop is simply not
//! requesting the next one.

use crate::sim::{MatchEvent, MatchPhase, MatchState, TickInput, tick};

pub struct FrameDriver {
    state: MatchState,
    events: Vec<MatchEvent>,
}

impl FrameDriver {
    /// Create an idle driver with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            state: MatchState::new(seed),
            events: Vec::new(),
        }
    }

    /// Begin a match, from the menu or as a rematch.
    ///
    /// Returns the events of the transition: a zeroed score change so
    /// the scoreboard resets.
    pub fn start(&mut self) -> &[MatchEvent] {
        self.state.start();
        log::info!("match started (seed {})", self.state.seed);
        self.events.clear();
        self.events.push(MatchEvent::ScoreChanged { player: 0, ai: 0 });
        &self.events
    }

    /// Drop back to the menu from any phase
    pub fn return_to_menu(&mut self) {
        log::info!("returning to menu");
        self.state.phase = MatchPhase::Idle;
        self.events.clear();
    }

    /// Run one frame: exactly one simulation tick with this input.
    ///
    /// Returns the events the tick produced, oldest first. Empty when
    /// the match is not running.
    pub fn frame(&mut self, input: &TickInput) -> &[MatchEvent] {
        self.events.clear();
        tick(&mut self.state, input, &mut self.events);
        &self.events
    }

    /// Read access to the match state, for scene building and HUD queries
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
