//! Differential drive controller state for the wheelchair avatar.
//!
//! [`WheelchairDrive`] turns scroll impulses into force and torque on a
//! [`DriveBody`](super::drivebody::DriveBody) according to which wheels are
//! engaged:
//!
//! | left | right | effect                                             |
//! |------|-------|----------------------------------------------------|
//! | yes  | yes   | forward force, dropped while speed > `max_speed`   |
//! | yes  | no    | yaw torque, skipped while turn rate ≥ `max_turn_speed` |
//! | no   | yes   | same as left with the opposite sign                |
//! | no   | no    | counted, no force or torque                        |
//!
//! Every impulse that is not dropped advances the impulse counter. Only an
//! impulse on an engaged wheel can report a motion milestone: once the
//! counter reaches `milestone_every` it fires and the counter restarts from
//! zero.
//!
//! Impulses are queued by the frame schedule and drained once per fixed
//! physics step, so input cadence never changes how often forces integrate.

use bevy_ecs::prelude::Component;
use glam::Vec3;
use smallvec::SmallVec;

use super::drivebody::DriveBody;

/// A single scroll impulse together with the wheel state it was read with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueuedImpulse {
    pub scroll: f32,
    pub left: bool,
    pub right: bool,
}

impl QueuedImpulse {
    pub fn new(scroll: f32, left: bool, right: bool) -> Self {
        Self {
            scroll,
            left,
            right,
        }
    }
}

/// Result of feeding one impulse to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveOutcome {
    /// Force to add to the body this step.
    pub force: Vec3,
    /// Torque to add to the body this step.
    pub torque: Vec3,
    /// True when the impulse counter reached the milestone threshold.
    pub milestone: bool,
}

/// Differential drive tuning, impulse counter and pending impulse queue.
#[derive(Component, Clone, Debug)]
pub struct WheelchairDrive {
    /// Force per unit of scroll when both wheels push.
    pub wheel_force: f32,
    /// Torque per unit of scroll when a single wheel pushes.
    pub turn_force: f32,
    /// Linear speed ceiling for forward pushes.
    pub max_speed: f32,
    /// Yaw rate ceiling (radians per second) for turning pushes.
    pub max_turn_speed: f32,
    /// Scroll magnitudes below this are ignored as noise.
    pub scroll_threshold: f32,
    /// Number of counted impulses between motion milestones.
    pub milestone_every: u32,
    impulse_counter: u32,
    queue: SmallVec<[QueuedImpulse; 8]>,
}

impl Default for WheelchairDrive {
    fn default() -> Self {
        Self::new(200.0, 5.0, 5.0, 2.0)
    }
}

impl WheelchairDrive {
    pub fn new(wheel_force: f32, turn_force: f32, max_speed: f32, max_turn_speed: f32) -> Self {
        Self {
            wheel_force,
            turn_force,
            max_speed,
            max_turn_speed,
            scroll_threshold: 0.01,
            milestone_every: 6,
            impulse_counter: 0,
            queue: SmallVec::new(),
        }
    }

    /// Builder: set how many counted impulses make a milestone (minimum 1).
    pub fn with_milestone_every(mut self, every: u32) -> Self {
        self.milestone_every = every.max(1);
        self
    }

    /// Builder: set the scroll noise threshold.
    pub fn with_scroll_threshold(mut self, threshold: f32) -> Self {
        self.scroll_threshold = threshold.abs();
        self
    }

    /// Impulses counted since the last milestone.
    pub fn impulse_counter(&self) -> u32 {
        self.impulse_counter
    }

    /// Impulses waiting for the next fixed step.
    pub fn queued(&self) -> &[QueuedImpulse] {
        &self.queue
    }

    /// Queue an impulse for the next fixed step.
    pub fn enqueue(&mut self, impulse: QueuedImpulse) {
        self.queue.push(impulse);
    }

    /// Take every queued impulse, oldest first.
    pub fn drain_queue(&mut self) -> SmallVec<[QueuedImpulse; 8]> {
        std::mem::take(&mut self.queue)
    }

    /// Evaluate one impulse against the body's current velocities.
    ///
    /// `forward` is the avatar's facing direction. The body is only read; the
    /// caller applies the returned force and torque.
    pub fn accept_impulse(
        &mut self,
        impulse: QueuedImpulse,
        body: &DriveBody,
        forward: Vec3,
    ) -> DriveOutcome {
        let scroll = if impulse.scroll.is_finite() {
            impulse.scroll
        } else {
            0.0
        };
        if scroll.abs() < self.scroll_threshold {
            return DriveOutcome::default();
        }

        let mut outcome = DriveOutcome::default();
        match (impulse.left, impulse.right) {
            (true, true) => {
                // Strict ceiling: a body at exactly `max_speed` still accepts the push.
                if body.speed() > self.max_speed {
                    return outcome;
                }
                outcome.force = forward * scroll * self.wheel_force;
            }
            (true, false) => {
                if body.turn_speed() < self.max_turn_speed {
                    outcome.torque = Vec3::NEG_Y * scroll * self.turn_force;
                }
            }
            (false, true) => {
                if body.turn_speed() < self.max_turn_speed {
                    outcome.torque = Vec3::Y * scroll * self.turn_force;
                }
            }
            (false, false) => {
                self.impulse_counter += 1;
                return outcome;
            }
        }

        self.impulse_counter += 1;
        if self.impulse_counter >= self.milestone_every {
            self.impulse_counter = 0;
            outcome.milestone = true;
        }
        outcome
    }
}
