//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when an avatar
//! input action is pressed or released. The [`InputAction`] enum lists all
//! recognized actions.
//!
//! Systems can subscribe to these events to react to input without directly
//! reading the [`InputState`](crate::resources::input::InputState) resource.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Grip on the left wheel.
    LeftWheel,
    /// Grip on the right wheel.
    RightWheel,
    /// Interact with the focused object.
    Interact,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

/// Global observer that logs input edges at debug level.
pub fn observe_input_event(trigger: On<InputEvent>) {
    let event = trigger.event();
    log::debug!(
        "{:?} {}",
        event.action,
        if event.pressed { "pressed" } else { "released" }
    );
}
