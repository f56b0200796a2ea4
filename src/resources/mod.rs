//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, configuration
//! and the UI prompt. Each submodule documents the semantics and intended
//! usage of its resource(s).
//!
//! Overview
//! - `fixedstep` – accumulator that turns frame time into fixed physics steps
//! - `gameconfig` – INI-backed tuning for drive, camera, probe and physics
//! - `input` – host event mailbox and the per-frame input snapshot
//! - `prompt` – interaction prompt text for the UI collaborator
//! - `worldtime` – simulation time and delta
pub mod fixedstep;
pub mod gameconfig;
pub mod input;
pub mod prompt;
pub mod worldtime;
