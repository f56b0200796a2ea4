//! Physically simulated body of the avatar.
//!
//! The [`DriveBody`] component stores linear and angular velocity plus the
//! force and torque accumulated during the current fixed step. Controllers
//! never write velocity directly; they call [`DriveBody::add_force`] and
//! [`DriveBody::add_torque`], and the
//! [`integrate_drive_bodies`](crate::systems::physics::integrate_drive_bodies)
//! system consumes the accumulators once per fixed step.
//!
//! Rotation about X and Z is frozen: only yaw is ever integrated, so the
//! chair cannot tip over.

use bevy_ecs::prelude::Component;
use glam::Vec3;

const DEFAULT_LINEAR_DAMPING: f32 = 1.5;
const DEFAULT_ANGULAR_DAMPING: f32 = 2.0;

/// Rigid body with force/torque accumulators and velocity damping.
///
/// # Fields
/// - `linear_velocity` - world units per second
/// - `angular_velocity` - radians per second; only `y` is non-zero
/// - `mass` / `yaw_inertia` - divide force and torque into accelerations
/// - `linear_damping` / `angular_damping` - applied as `v *= 1 / (1 + d * dt)`
/// - `frozen` - when true, integration skips this body entirely
#[derive(Component, Clone, Debug)]
pub struct DriveBody {
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    pub yaw_inertia: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub frozen: bool,
    force: Vec3,
    torque: Vec3,
}

impl Default for DriveBody {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveBody {
    /// Unit mass body at rest with the default damping.
    pub fn new() -> Self {
        Self::with_damping(DEFAULT_LINEAR_DAMPING, DEFAULT_ANGULAR_DAMPING)
    }

    /// Unit mass body at rest with custom damping.
    pub fn with_damping(linear_damping: f32, angular_damping: f32) -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            yaw_inertia: 1.0,
            linear_damping,
            angular_damping,
            frozen: false,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    /// Builder: set the mass. Non-positive values are ignored.
    pub fn with_mass(mut self, mass: f32) -> Self {
        if mass > 0.0 {
            self.mass = mass;
        }
        self
    }

    /// Accumulate a force for the current step. Non-finite input is dropped.
    pub fn add_force(&mut self, force: Vec3) {
        if force.is_finite() {
            self.force += force;
        }
    }

    /// Accumulate a torque for the current step. Only the yaw component is kept.
    pub fn add_torque(&mut self, torque: Vec3) {
        if torque.is_finite() {
            self.torque.y += torque.y;
        }
    }

    /// Force accumulated since the last integration.
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated since the last integration.
    pub fn pending_torque(&self) -> Vec3 {
        self.torque
    }

    /// Current linear speed.
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Absolute yaw rate in radians per second.
    pub fn turn_speed(&self) -> f32 {
        self.angular_velocity.y.abs()
    }

    /// Advance velocities by one step of length `dt` and clear the accumulators.
    ///
    /// Returns the yaw delta in radians to apply to the owning transform.
    pub fn step(&mut self, dt: f32) -> (Vec3, f32) {
        if self.frozen || dt <= 0.0 {
            self.clear_accumulators();
            return (Vec3::ZERO, 0.0);
        }

        self.linear_velocity += self.force / self.mass * dt;
        self.angular_velocity.y += self.torque.y / self.yaw_inertia * dt;

        self.linear_velocity *= 1.0 / (1.0 + self.linear_damping * dt);
        self.angular_velocity.y *= 1.0 / (1.0 + self.angular_damping * dt);
        self.angular_velocity.x = 0.0;
        self.angular_velocity.z = 0.0;

        self.clear_accumulators();
        (self.linear_velocity * dt, self.angular_velocity.y * dt)
    }

    fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}
