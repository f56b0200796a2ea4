//! Simulation systems.
//!
//! This module groups all ECS systems that advance input, physics, camera and
//! interaction state.
//!
//! Submodules overview
//! - [`camera`] – clamped look and smooth follow for camera rigs
//! - [`drive`] – queue scroll impulses and turn them into force/torque per fixed step
//! - [`input`] – fold host input events into [`crate::resources::input::InputState`]
//! - [`physics`] – integrate drive bodies at the fixed step
//! - [`probe`] – raycast, highlight and dispatch for interaction probes
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod drive;
pub mod input;
pub mod physics;
pub mod probe;
pub mod time;
