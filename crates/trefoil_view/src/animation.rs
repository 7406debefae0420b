use std::collections::VecDeque;

use serde::Serialize;
use trefoil_math::Float;
use trefoil_puzzle::{Move, Piece, PuzzleType};
use web_time::{Duration, Instant};

use crate::AnimationPreferences;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: Float = 0.5;

/// Maximum factor by which queued twists are sped up.
const MAX_TWIST_SPEEDUP: Float = 4.0;

/// Move that is currently animating.
#[derive(Debug, Copy, Clone, PartialEq)]
struct InFlightMove {
    mv: Move,
    start: Instant,
    duration: Duration,
}
impl InFlightMove {
    fn progress(&self, now: Instant) -> Float {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Snapshot of the move that is animating.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct AnimationFrame {
    /// Move in flight. It has not been applied to the pieces yet.
    pub mv: Move,
    /// Linear progress from 0 to 1.
    pub progress: Float,
    /// Progress after easing.
    pub eased: Float,
}

/// FIFO queue of moves that animate one at a time.
///
/// Pieces are only mutated when a move finishes, so the piece store always
/// holds a state that is reachable by whole moves.
#[derive(Debug, Default, Clone)]
pub struct AnimationQueue {
    /// Moves that have not started yet.
    queue: VecDeque<Move>,
    /// Move that is animating.
    current: Option<InFlightMove>,
    /// Maximum number of pending moves (reset when the queue drains).
    queue_max: usize,
}
impl AnimationQueue {
    /// Adds a move to the back of the queue.
    pub fn push(&mut self, mv: Move) {
        log::debug!("queueing move {mv:?}");
        self.queue.push_back(mv);
        self.queue_max = std::cmp::max(self.queue_max, self.len());
    }

    /// Returns the number of moves that have not been committed, including
    /// the one in flight.
    pub fn len(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }
    /// Returns whether no moves are pending.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }
    /// Returns the move in flight, if any.
    pub fn current(&self) -> Option<Move> {
        Some(self.current?.mv)
    }

    /// Advances the animation to `now`, committing the move in flight if it
    /// has finished and starting the next one if there is one.
    pub fn tick(
        &mut self,
        now: Instant,
        prefs: &AnimationPreferences,
        puzzle: &dyn PuzzleType,
        pieces: &mut [Piece],
    ) -> Option<AnimationFrame> {
        if let Some(current) = self.current {
            if current.progress(now) >= 1.0 {
                Self::commit(puzzle, pieces, &current.mv);
                self.current = None;
            }
        }

        if self.current.is_none() {
            match self.queue.pop_front() {
                Some(mv) => {
                    self.current = Some(InFlightMove {
                        mv,
                        start: now,
                        duration: self.twist_duration(prefs),
                    });
                }
                None => self.queue_max = 0,
            }
        }

        let current = self.current?;
        let progress = current.progress(now);
        Some(AnimationFrame {
            mv: current.mv,
            progress,
            eased: prefs.twist_interpolation.interpolate(progress),
        })
    }

    /// Discards every pending move, including the one in flight, without
    /// applying any of them.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current = None;
        self.queue_max = 0;
    }

    /// Immediately applies every pending move, including the one in flight.
    /// Returns the number of moves applied.
    pub fn finish_all(&mut self, puzzle: &dyn PuzzleType, pieces: &mut [Piece]) -> usize {
        let moves = self.current.take().map(|c| c.mv).into_iter();
        let moves = moves.chain(self.queue.drain(..)).collect::<Vec<_>>();
        for mv in &moves {
            Self::commit(puzzle, pieces, mv);
        }
        self.queue_max = 0;
        moves.len()
    }

    /// Returns the duration of the next twist.
    fn twist_duration(&self, prefs: &AnimationPreferences) -> Duration {
        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let speed_mod = match prefs.dynamic_twist_speed {
            true => {
                let extra = self.queue_max.saturating_sub(1) as Float;
                (extra * EXP_TWIST_FACTOR).exp().min(MAX_TWIST_SPEEDUP)
            }
            false => 1.0,
        };
        Duration::try_from_secs_f64(prefs.twist_duration as Float / speed_mod).unwrap_or_default()
    }

    fn commit(puzzle: &dyn PuzzleType, pieces: &mut [Piece], mv: &Move) {
        log::trace!("committing move {mv:?}");
        puzzle.apply_rotation(pieces, mv);
    }
}
