//! Simulation clock.
//!
//! Turns the frame deltas a host application measures into the time steps
//! the simulation actually runs. Supports pausing, slow motion and fixed
//! time steps. The clock never reads the wall clock itself, so feeding it
//! the same deltas always yields the same steps.
//!
//! # Example
//!
//! ```ignore
//! use ember::time::SimClock;
//!
//! let mut clock = SimClock::new().with_fixed_step(1.0 / 120.0);
//!
//! // In your frame loop:
//! let plan = clock.advance(frame_delta);
//! for _ in 0..plan.count {
//!     system.step(plan.dt);
//! }
//! ```

use tracing::debug;

/// Default cap on fixed steps run for a single frame.
pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;

/// Time steps to run for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPlan {
    /// Length of each step in seconds.
    pub dt: f32,
    /// How many steps to run.
    pub count: u32,
}

impl StepPlan {
    /// A plan that runs nothing.
    pub const IDLE: StepPlan = StepPlan { dt: 0.0, count: 0 };
}

/// Deterministic clock for driving a particle simulation.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated seconds since start (scaled, excluding pauses).
    elapsed: f32,
    /// Frames seen since start, paused frames included.
    frame_count: u64,
    /// Steps handed out since start.
    step_count: u64,
    paused: bool,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
    /// Fixed step length, if stepping at a fixed rate.
    fixed_step: Option<f32>,
    /// Most fixed steps to run in one frame.
    max_substeps: u32,
    /// Scaled time not yet consumed by fixed steps.
    accumulator: f32,
}

impl SimClock {
    /// Variable-step clock at normal speed.
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            frame_count: 0,
            step_count: 0,
            paused: false,
            time_scale: 1.0,
            fixed_step: None,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    /// Step at a fixed rate of `step` seconds.
    ///
    /// Non-positive values fall back to variable stepping.
    pub fn with_fixed_step(mut self, step: f32) -> Self {
        self.set_fixed_step(Some(step));
        self
    }

    /// Cap how many fixed steps a single frame may run.
    ///
    /// Time beyond the cap is dropped so a long stall does not snowball into
    /// ever longer frames.
    pub fn with_max_substeps(mut self, max: u32) -> Self {
        self.max_substeps = max.max(1);
        self
    }

    /// Consume one frame's delta and return the steps to run.
    pub fn advance(&mut self, frame_dt: f32) -> StepPlan {
        self.frame_count += 1;

        if self.paused || frame_dt.is_nan() || frame_dt <= 0.0 {
            return StepPlan::IDLE;
        }

        let scaled = frame_dt * self.time_scale;
        if scaled <= 0.0 {
            return StepPlan::IDLE;
        }

        let plan = match self.fixed_step {
            None => StepPlan {
                dt: scaled,
                count: 1,
            },
            Some(step) => {
                self.accumulator += scaled;
                let wanted = (self.accumulator / step).floor() as u32;
                let count = wanted.min(self.max_substeps);
                self.accumulator -= count as f32 * step;
                if wanted > count {
                    debug!(wanted, count, "dropping simulation time over substep cap");
                    self.accumulator = self.accumulator.min(step);
                }
                StepPlan { dt: step, count }
            }
        };

        self.elapsed += plan.dt * plan.count as f32;
        self.step_count += plan.count as u64;
        plan
    }

    /// Simulated seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames passed to [`advance`](Self::advance).
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Simulation steps handed out.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.step_count
    }

    /// Whether time progression is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current time scale multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Fixed step length, or `None` for one step per frame.
    #[inline]
    pub fn fixed_step(&self) -> Option<f32> {
        self.fixed_step
    }

    /// Pause time progression.
    ///
    /// While paused, [`advance`](Self::advance) runs no steps.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set a fixed step, or `None` for one step per frame.
    pub fn set_fixed_step(&mut self, step: Option<f32>) {
        self.fixed_step = step.filter(|s| *s > 0.0);
        self.accumulator = 0.0;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Reset counters and pending time. Settings are kept.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frame_count = 0;
        self.step_count = 0;
        self.paused = false;
        self.accumulator = 0.0;
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = SimClock::new();
        assert_eq!(clock.frame(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), 1.0);
        assert_eq!(clock.fixed_step(), None);
    }

    #[test]
    fn test_variable_step() {
        let mut clock = SimClock::new();
        let plan = clock.advance(0.02);
        assert_eq!(plan, StepPlan { dt: 0.02, count: 1 });
        assert_eq!(clock.frame(), 1);
        assert!((clock.elapsed() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_pause() {
        let mut clock = SimClock::new();
        clock.advance(0.1);
        clock.pause();
        assert!(clock.is_paused());

        let elapsed_before = clock.elapsed();
        assert_eq!(clock.advance(0.1), StepPlan::IDLE);
        assert_eq!(clock.elapsed(), elapsed_before);

        clock.toggle_pause();
        assert_eq!(clock.advance(0.1).count, 1);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = SimClock::new();
        clock.set_time_scale(0.5);
        let plan = clock.advance(0.2);
        assert!((plan.dt - 0.1).abs() < 1e-6);

        // Negative scale should clamp to 0
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.advance(0.2), StepPlan::IDLE);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = SimClock::new().with_fixed_step(0.25);
        assert_eq!(clock.advance(0.1).count, 0);
        assert_eq!(clock.advance(0.1).count, 0);
        let plan = clock.advance(0.1);
        assert_eq!(plan, StepPlan { dt: 0.25, count: 1 });
        assert_eq!(clock.advance(0.5).count, 2);
        assert_eq!(clock.steps(), 3);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = SimClock::new().with_fixed_step(0.1).with_max_substeps(3);
        let plan = clock.advance(10.0);
        assert_eq!(plan.count, 3);
        // The backlog was dropped rather than carried over
        assert!(clock.advance(0.0).count == 0);
        assert!(clock.advance(0.1).count <= 2);
    }

    #[test]
    fn test_non_positive_fixed_step_is_variable() {
        let clock = SimClock::new().with_fixed_step(0.0);
        assert_eq!(clock.fixed_step(), None);
    }
}
