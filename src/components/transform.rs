//! World-space position and orientation of an entity.
//!
//! The [`Transform`] component is shared by the avatar, the camera and every
//! probe-able prop. Axes follow a right-handed, Y-up convention where the
//! local forward direction is `-Z`.

use bevy_ecs::prelude::Component;
use glam::{EulerRot, Quat, Vec3};

/// Position and rotation in world space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a transform at `position` with identity rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Builder: set the heading (yaw around +Y) in degrees.
    pub fn with_heading_degrees(mut self, degrees: f32) -> Self {
        self.rotation = Quat::from_rotation_y(degrees.to_radians());
        self
    }

    /// Unit vector pointing where this transform faces.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Yaw around +Y in radians.
    pub fn heading(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        yaw
    }

    /// Yaw around +Y in degrees.
    pub fn heading_degrees(&self) -> f32 {
        self.heading().to_degrees()
    }
}
