//! Camera rig that looks around and follows the avatar.
//!
//! A [`CameraRig`] lives on the camera entity. The
//! [`camera_look`](crate::systems::camera::camera_look) system accumulates
//! look input into `pitch`/`yaw` and rebuilds the camera rotation from the
//! avatar's live heading every frame; the
//! [`camera_follow`](crate::systems::camera::camera_follow) system eases the
//! camera position toward the avatar.
//!
//! Yaw is relative to the avatar heading, so clamping it bounds how far the
//! player can look away from forward without limiting the chair's rotation.

use bevy_ecs::prelude::{Component, Entity};
use glam::{EulerRot, Quat, Vec2, Vec3};

/// Look and follow state for a camera bound to an avatar.
#[derive(Component, Clone, Debug)]
pub struct CameraRig {
    /// Entity whose transform the camera tracks. `None` leaves the camera idle.
    pub follow: Option<Entity>,
    /// Degrees per unit of look input per second.
    pub sensitivity: f32,
    /// Accumulated pitch in degrees. Positive looks up.
    pub pitch: f32,
    /// Accumulated yaw in degrees relative to the followed heading.
    pub yaw: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Symmetric yaw limit in degrees.
    pub max_yaw: f32,
    /// Follow interpolation rate per second.
    pub follow_smooth: f32,
    /// Offset from the followed position to the camera.
    pub offset: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            follow: None,
            sensitivity: 10.0,
            pitch: 0.0,
            yaw: 0.0,
            min_pitch: -30.0,
            max_pitch: 30.0,
            max_yaw: 60.0,
            follow_smooth: 5.0,
            offset: Vec3::new(0.0, 1.5, 0.0),
        }
    }
}

impl CameraRig {
    /// Rig following `target` with default tuning.
    pub fn following(target: Entity) -> Self {
        Self {
            follow: Some(target),
            ..Self::default()
        }
    }

    /// Accumulate one frame of look input and clamp both axes.
    ///
    /// Non-finite input is treated as no movement.
    pub fn apply_look(&mut self, look: Vec2, dt: f32) {
        let look = if look.is_finite() { look } else { Vec2::ZERO };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let (lo, hi) = ordered(self.min_pitch, self.max_pitch);
        self.pitch = (self.pitch + look.y * self.sensitivity * dt).clamp(lo, hi);

        let limit = self.max_yaw.abs();
        self.yaw = (self.yaw + look.x * self.sensitivity * dt).clamp(-limit, limit);
    }

    /// Camera rotation for a given avatar heading (radians).
    pub fn rotation(&self, heading: f32) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            heading + self.yaw.to_radians(),
            self.pitch.to_radians(),
            0.0,
        )
    }

    /// Next camera position easing from `current` toward `target + offset`.
    pub fn follow_position(&self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let t = (dt * self.follow_smooth).clamp(0.0, 1.0);
        if !t.is_finite() {
            return current;
        }
        current.lerp(target + self.offset, t)
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
