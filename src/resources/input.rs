//! Per-frame input resources.
//!
//! Input reaches the simulation in two layers:
//! - [`RawInput`] is the host-facing mailbox. Device callbacks push discrete
//!   press/release/scroll/look events into it whenever they arrive.
//! - [`InputState`] is the snapshot systems read. The
//!   [`update_input_state`](crate::systems::input::update_input_state) system
//!   folds the mailbox into it once per frame, so every system in a frame
//!   observes the same input regardless of when events were delivered.
use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::events::input::InputAction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state for one logical action.
pub struct BoolState {
    /// Whether the button is currently held.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Start a new frame: keep the level, forget the edges.
    pub fn begin_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }

    /// Apply a press. Returns true if it produced a rising edge.
    pub fn press(&mut self) -> bool {
        let edge = !self.active;
        if edge {
            self.just_pressed = true;
        }
        self.active = true;
        edge
    }

    /// Apply a release. Returns true if it produced a falling edge.
    pub fn release(&mut self) -> bool {
        let edge = self.active;
        if edge {
            self.just_released = true;
        }
        self.active = false;
        edge
    }
}

/// Resource capturing the per-frame input state relevant to the avatar.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub left_wheel: BoolState,
    pub right_wheel: BoolState,
    pub interact: BoolState,
    /// Scroll impulses received this frame, in arrival order.
    pub scroll_impulses: SmallVec<[f32; 4]>,
    /// Look delta accumulated this frame.
    pub look: Vec2,
}

impl InputState {
    pub fn button(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::LeftWheel => &self.left_wheel,
            InputAction::RightWheel => &self.right_wheel,
            InputAction::Interact => &self.interact,
        }
    }

    pub fn button_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::LeftWheel => &mut self.left_wheel,
            InputAction::RightWheel => &mut self.right_wheel,
            InputAction::Interact => &mut self.interact,
        }
    }
}

/// A single device event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInputEvent {
    Press(InputAction),
    Release(InputAction),
    Scroll(f32),
    Look(Vec2),
}

/// Host-facing mailbox of device events not yet folded into [`InputState`].
#[derive(Resource, Debug, Clone, Default)]
pub struct RawInput {
    events: Vec<RawInputEvent>,
}

impl RawInput {
    pub fn press(&mut self, action: InputAction) {
        self.events.push(RawInputEvent::Press(action));
    }

    pub fn release(&mut self, action: InputAction) {
        self.events.push(RawInputEvent::Release(action));
    }

    pub fn scroll(&mut self, delta: f32) {
        self.events.push(RawInputEvent::Scroll(delta));
    }

    pub fn look(&mut self, delta: Vec2) {
        self.events.push(RawInputEvent::Look(delta));
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all pending events, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, RawInputEvent> {
        self.events.drain(..)
    }
}
