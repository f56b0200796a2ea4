//! Fixed physics step accumulator.
//!
//! Frames arrive at whatever rate the host renders, but forces must integrate
//! at a constant cadence. [`FixedStep`] banks frame time and hands out whole
//! steps; the host runs the fixed schedule once per step.

use bevy_ecs::prelude::Resource;

const DEFAULT_STEP: f32 = 0.02;
const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 8;

#[derive(Resource, Clone, Copy, Debug)]
pub struct FixedStep {
    /// Length of one physics step in seconds.
    pub step: f32,
    /// Upper bound on steps taken in a single frame; excess time is dropped.
    pub max_steps_per_frame: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl FixedStep {
    /// Non-positive or non-finite steps fall back to the default.
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_STEP
        };
        Self {
            step,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            accumulator: 0.0,
        }
    }

    /// Bank `dt` seconds and return how many steps to run now.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps_per_frame && self.accumulator >= self.step {
            log::warn!(
                "Dropping {:.3}s of simulation time after {} fixed steps",
                self.accumulator,
                steps
            );
            self.accumulator = 0.0;
        }
        steps
    }

    /// Time banked toward the next step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}
