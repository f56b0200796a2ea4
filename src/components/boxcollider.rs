use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Axis-aligned box collider centered on the entity position plus `offset`.
///
/// Only used for probe raycasts; the colliders never push each other.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec3,
    pub offset: Vec3,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vec3::new(width, height, depth),
            offset: Vec3::ZERO,
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        let center = position + self.offset;
        let half = self.size.abs() * 0.5;
        (center - half, center + half)
    }

    /// Slab test. Returns the distance along `direction` (unit length) to the
    /// first intersection within `max_distance`, or `None` on a miss.
    ///
    /// A ray starting inside the box hits at distance 0.
    pub fn ray_distance(
        &self,
        position: Vec3,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<f32> {
        let (min, max) = self.aabb(position);
        let inv = Vec3::new(
            safe_recip(direction.x),
            safe_recip(direction.y),
            safe_recip(direction.z),
        );

        let t0 = (min - origin) * inv;
        let t1 = (max - origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        if t_far < t_near || t_far < 0.0 {
            return None;
        }
        let hit = t_near.max(0.0);
        (hit <= max_distance).then_some(hit)
    }
}

fn safe_recip(v: f32) -> f32 {
    if v.abs() < 1e-8 { 1e8_f32.copysign(v) } else { 1.0 / v }
}
