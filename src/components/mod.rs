//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the simulated world: the avatar body and its drive controller, the camera
//! rig and its probe, and the capabilities props expose to the probe.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned 3D box used as a raycast target
//! - [`camerarig`] – clamped look state and smooth follow for the camera
//! - [`drivebody`] – simulated body with force/torque accumulators and damping
//! - [`interactable`] – interact and look-at capabilities plus classification tags
//! - [`interactionprobe`] – per-camera focus and look-at memory, pure frame resolver
//! - [`rendersurface`] – material list with a reversible highlight overlay
//! - [`transform`] – world-space position and rotation
//! - [`wheelchair`] – differential drive tuning, impulse counter and queue

pub mod boxcollider;
pub mod camerarig;
pub mod drivebody;
pub mod interactable;
pub mod interactionprobe;
pub mod rendersurface;
pub mod transform;
pub mod wheelchair;
