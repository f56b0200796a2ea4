//! Differential drive systems.
//!
//! Scroll impulses travel in two hops so input cadence and physics cadence
//! stay independent:
//! 1. [`queue_wheel_impulses`] runs every frame and copies each scroll
//!    impulse, together with the wheel grips held in that frame's snapshot,
//!    into the avatar's [`WheelchairDrive`] queue.
//! 2. [`wheelchair_drive`] runs once per fixed step, drains the queue and
//!    turns each impulse into force or torque on the [`DriveBody`].

use bevy_ecs::prelude::*;

use crate::components::drivebody::DriveBody;
use crate::components::transform::Transform;
use crate::components::wheelchair::{QueuedImpulse, WheelchairDrive};
use crate::events::motion::MotionMilestoneEvent;
use crate::resources::input::InputState;

/// Queue this frame's scroll impulses on every wheelchair.
pub fn queue_wheel_impulses(mut query: Query<&mut WheelchairDrive>, input: Res<InputState>) {
    if input.scroll_impulses.is_empty() {
        return;
    }
    let left = input.left_wheel.active;
    let right = input.right_wheel.active;
    for mut drive in query.iter_mut() {
        for &scroll in &input.scroll_impulses {
            drive.enqueue(QueuedImpulse::new(scroll, left, right));
        }
    }
}

/// Apply queued impulses to each wheelchair's body.
///
/// All impulses in a step are judged against the velocity at the start of
/// the step; the speed ceiling therefore lags by at most one step.
pub fn wheelchair_drive(
    mut query: Query<(Entity, &mut WheelchairDrive, &mut DriveBody, &Transform)>,
    mut commands: Commands,
) {
    for (entity, mut drive, mut body, transform) in query.iter_mut() {
        if drive.queued().is_empty() {
            continue;
        }
        let forward = transform.forward();
        for impulse in drive.drain_queue() {
            let outcome = drive.accept_impulse(impulse, &body, forward);
            body.add_force(outcome.force);
            body.add_torque(outcome.torque);
            if outcome.milestone {
                log::debug!("Motion milestone for {:?}", entity);
                commands.trigger(MotionMilestoneEvent { entity });
            }
        }
    }
}
