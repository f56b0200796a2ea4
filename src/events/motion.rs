//! Motion milestone event.
//!
//! The drive controller counts accepted wheel pushes and triggers
//! [`MotionMilestoneEvent`] every `milestone_every` of them. It carries no
//! physics meaning; it paces feedback such as rolling sounds so they play
//! once per handful of pushes instead of once per scroll tick.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

/// Fired when an avatar's impulse counter reaches its threshold.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionMilestoneEvent {
    /// The avatar entity.
    pub entity: Entity,
}

/// Global observer that reports motion milestones.
///
/// Hosts that play rolling sounds or rumble replace this with their own
/// observer; the drive controller does not care who listens.
pub fn observe_motion_milestone(trigger: On<MotionMilestoneEvent>) {
    log::info!("Motion milestone reached by {:?}", trigger.event().entity);
}
