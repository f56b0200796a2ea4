//! Camera rig systems.
//!
//! - [`camera_look`] accumulates look input into the rig's clamped pitch/yaw
//!   and rebuilds the camera rotation from the followed heading.
//! - [`camera_follow`] eases the camera toward the followed position plus
//!   the rig offset.
//!
//! The two are independent; neither reads what the other writes. A rig whose
//! follow target is unset or gone is left untouched for the frame.

use bevy_ecs::prelude::*;

use crate::components::camerarig::CameraRig;
use crate::components::transform::Transform;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn camera_look(
    mut cameras: Query<(Entity, &mut CameraRig, &mut Transform)>,
    targets: Query<&Transform, Without<CameraRig>>,
    input: Res<InputState>,
    time: Res<WorldTime>,
) {
    for (camera, mut rig, mut transform) in cameras.iter_mut() {
        let Some(target) = rig.follow else {
            continue;
        };
        let Ok(target_transform) = targets.get(target) else {
            log::debug!("Camera {:?} lost its follow target {:?}", camera, target);
            continue;
        };
        rig.apply_look(input.look, time.delta);
        transform.rotation = rig.rotation(target_transform.heading());
    }
}

pub fn camera_follow(
    mut cameras: Query<(&CameraRig, &mut Transform)>,
    targets: Query<&Transform, Without<CameraRig>>,
    time: Res<WorldTime>,
) {
    for (rig, mut transform) in cameras.iter_mut() {
        let Some(target) = rig.follow else {
            continue;
        };
        if let Ok(target_transform) = targets.get(target) {
            transform.position =
                rig.follow_position(transform.position, target_transform.position, time.delta);
        }
    }
}
