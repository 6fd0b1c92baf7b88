//! Phase state machine.
//!
//! A phase is one shape held for `phase_duration` frames. Its first
//! `scatter_duration` frames are [`Stage::Scatter`] (free flight after the
//! explosion), the rest [`Stage::Converge`] (spring toward the shape).
//!
//! ```text
//! timer:  1 ........ scatter-1 | scatter ........ phase-1 | 0 (rollover)
//! stage:  Scatter              | Converge                 | Scatter, next shape
//! ```

/// Sub-state of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Ballistic flight, no attraction to the target.
    Scatter,
    /// Spring toward the transformed target.
    Converge,
}

/// Emitted by [`PhaseClock::tick`] when a phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// Phase index that just ended.
    pub from: usize,
    /// Phase index now active.
    pub to: usize,
}

/// Frame counter driving the phase cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseClock {
    phase: usize,
    phase_count: usize,
    timer: u32,
    phase_duration: u32,
    scatter_duration: u32,
}

impl PhaseClock {
    /// A clock at the start of phase 0.
    pub fn new(phase_count: usize, phase_duration: u32, scatter_duration: u32) -> Self {
        Self {
            phase: 0,
            phase_count: phase_count.max(1),
            timer: 0,
            phase_duration: phase_duration.max(1),
            scatter_duration,
        }
    }

    /// Advance one frame.
    ///
    /// Returns the transition when the timer reaches the phase duration; the
    /// timer is then back at zero and the frame belongs to the new phase.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        self.timer += 1;
        if self.timer < self.phase_duration {
            return None;
        }
        self.timer = 0;
        let from = self.phase;
        self.phase = (self.phase + 1) % self.phase_count;
        Some(PhaseChange { from, to: self.phase })
    }

    /// Stage of the current frame.
    #[inline]
    pub fn stage(&self) -> Stage {
        if self.timer < self.scatter_duration {
            Stage::Scatter
        } else {
            Stage::Converge
        }
    }

    /// Active phase index.
    #[inline]
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Frames since the last phase change.
    #[inline]
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Number of phases in the cycle.
    #[inline]
    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    /// Jump to the start of `phase` (wrapped into the cycle).
    pub fn reset_to(&mut self, phase: usize) {
        self.phase = phase % self.phase_count;
        self.timer = 0;
    }
}
