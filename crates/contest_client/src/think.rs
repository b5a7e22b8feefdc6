//! The "agent is thinking" indicator.
//!
//! A small gauge that jumps onto the screen while a server-side agent
//! reports search progress and slides away once progress drops to 0.
//! It is purely decorative and never holds back event processing.

use std::time::Duration;

use tracing::debug;

/// Height of the indicator when fully off screen, in indicator heights.
pub const HIDDEN_HEIGHT: f32 = -0.7;

const GRAVITY: f32 = -20.0;
const JUMP_IN_SPEED: f32 = 7.0;
const JUMP_OUT_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Still,
    JumpIn,
    JumpOut,
}

/// Thinking-progress gauge with its jump animation.
#[derive(Debug, Clone)]
pub struct ThinkIndicator {
    progress: f32,
    height: f32,
    speed: f32,
    motion: Motion,
}

impl Default for ThinkIndicator {
    fn default() -> Self {
        Self {
            progress: 0.0,
            height: HIDDEN_HEIGHT,
            speed: 0.0,
            motion: Motion::Still,
        }
    }
}

impl ThinkIndicator {
    /// Creates a hidden indicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest progress and starts a jump when needed.
    ///
    /// Only a resting gauge reacts. A reset that arrives mid-jump is not
    /// replayed on landing, so the gauge then rests on screen at 0 until
    /// the next report.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
        if self.is_hidden() && self.progress > 0.0 {
            debug!(progress = self.progress, "Thinking indicator jumps in");
            self.height = HIDDEN_HEIGHT;
            self.speed = JUMP_IN_SPEED;
            self.motion = Motion::JumpIn;
        }
        if self.is_on_floor() && self.progress == 0.0 {
            debug!("Thinking indicator jumps out");
            self.height = 0.0;
            self.speed = JUMP_OUT_SPEED;
            self.motion = Motion::JumpOut;
        }
    }

    /// Advances the jump.
    pub fn update(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        match self.motion {
            Motion::Still => {}
            Motion::JumpIn => {
                self.speed += GRAVITY * dt;
                self.height += self.speed * dt + GRAVITY * dt * dt / 2.0;
                if self.speed < 0.0 && self.height < 0.0 {
                    self.motion = Motion::Still;
                    self.height = 0.0;
                    self.speed = 0.0;
                }
            }
            Motion::JumpOut => {
                if self.height > HIDDEN_HEIGHT {
                    self.height -= self.speed * dt;
                } else {
                    self.motion = Motion::Still;
                    self.height = HIDDEN_HEIGHT;
                }
            }
        }
    }

    /// Last reported progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Height above the resting position; 0 on the floor, negative below.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// True when resting off screen.
    pub fn is_hidden(&self) -> bool {
        self.motion == Motion::Still && self.height == HIDDEN_HEIGHT
    }

    /// True when resting on screen.
    pub fn is_on_floor(&self) -> bool {
        self.motion == Motion::Still && self.height == 0.0
    }
}
