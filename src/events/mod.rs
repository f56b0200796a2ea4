//! Event types used by the simulation.
//!
//! This module groups the domain events exchanged across systems. Events
//! are triggered with `Commands::trigger` and consumed by observers, which
//! keeps the controllers unaware of what reacts to them.
//!
//! Submodules:
//! - [`input`] – press/release edges of avatar input actions
//! - [`interaction`] – interact, look-at and focus-change dispatch from the probe
//! - [`motion`] – milestone signal from the drive controller's impulse counter
pub mod input;
pub mod interaction;
pub mod motion;
