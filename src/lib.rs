//! Wheelchair simulation library.
//!
//! This module exposes the controller's ECS components, resources, systems,
//! and events for use in integration tests and by host applications.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod scene;
pub mod systems;
