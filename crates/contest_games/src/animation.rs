//! Transient per-entity animation records.
//!
//! An animation advances from progress 0 towards 1 and is finished once its
//! progress exceeds 1. Anything holding a live animation reports busy, which
//! keeps the event dispatcher from applying the next server event.

use std::time::Duration;

/// What an animation does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AnimationKind {
    /// Target slides towards a destination.
    Move,
    /// Target fades out and is removed.
    Dissolve,
}

/// A running animation towards `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation<T> {
    kind: AnimationKind,
    progress: f32,
    duration: Duration,
    target: T,
}

impl<T> Animation<T> {
    /// Starts a new animation at progress 0.
    pub fn new(kind: AnimationKind, target: T, duration: Duration) -> Self {
        Self {
            kind,
            progress: 0.0,
            duration,
            target,
        }
    }

    /// Advances by `dt` and returns true once finished.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            self.progress = f32::INFINITY;
        } else {
            self.progress += dt.as_secs_f32() / total;
        }
        self.is_finished()
    }

    /// True once progress has gone past 1.
    pub fn is_finished(&self) -> bool {
        self.progress > 1.0
    }

    /// Animation kind.
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Raw progress; may exceed 1 on the final frame.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress clamped to `[0, 1]`, for drawing.
    pub fn clamped(&self) -> f32 {
        self.progress.clamp(0.0, 1.0)
    }

    /// Animation target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Consumes the animation and yields its target.
    pub fn into_target(self) -> T {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finishes_only_past_one() {
        let mut anim = Animation::new(AnimationKind::Move, (), Duration::from_secs(1));
        assert!(!anim.advance(Duration::from_millis(500)));
        assert!(!anim.advance(Duration::from_millis(500)));
        assert!(anim.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut anim = Animation::new(AnimationKind::Dissolve, 3, Duration::ZERO);
        assert!(anim.advance(Duration::ZERO));
        assert_eq!(anim.into_target(), 3);
    }
}
