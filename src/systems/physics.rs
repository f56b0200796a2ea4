//! Fixed-step integration of drive bodies.
//!
//! Runs once per fixed step after [`wheelchair_drive`](super::drive::wheelchair_drive)
//! has accumulated this step's forces. Velocities integrate from the
//! accumulators, damping is applied, and the resulting displacement and yaw
//! are written back to the entity's [`Transform`].

use bevy_ecs::prelude::*;
use glam::Quat;

use crate::components::drivebody::DriveBody;
use crate::components::transform::Transform;
use crate::resources::fixedstep::FixedStep;

pub fn integrate_drive_bodies(
    mut query: Query<(&mut DriveBody, &mut Transform)>,
    fixed: Res<FixedStep>,
) {
    let dt = fixed.step;
    for (mut body, mut transform) in query.iter_mut() {
        let (displacement, yaw) = body.step(dt);
        transform.position += displacement;
        if yaw != 0.0 {
            transform.rotation = (Quat::from_rotation_y(yaw) * transform.rotation).normalize();
        }
    }
}
