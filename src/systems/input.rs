//! Input systems.
//!
//! - [`update_input_state`] drains the host's
//!   [`RawInput`](crate::resources::input::RawInput) mailbox once per frame
//!   and writes the results into [`InputState`].
//! - Input events are emitted for every press/release edge (see
//!   [`InputEvent`]).
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::events::input::InputEvent;
use crate::resources::input::{InputState, RawInput, RawInputEvent};

/// Fold pending device events into the `InputState` snapshot.
///
/// Button levels follow the last event received; edges are kept for this
/// frame only. Non-finite scroll and look values become zero so they can
/// never reach physics or camera state.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    mut raw: ResMut<RawInput>,
    mut commands: Commands,
) {
    input.left_wheel.begin_frame();
    input.right_wheel.begin_frame();
    input.interact.begin_frame();
    input.scroll_impulses.clear();
    input.look = Vec2::ZERO;

    for event in raw.drain() {
        match event {
            RawInputEvent::Press(action) => {
                if input.button_mut(action).press() {
                    commands.trigger(InputEvent {
                        action,
                        pressed: true,
                    });
                }
            }
            RawInputEvent::Release(action) => {
                if input.button_mut(action).release() {
                    commands.trigger(InputEvent {
                        action,
                        pressed: false,
                    });
                }
            }
            RawInputEvent::Scroll(delta) => {
                let delta = if delta.is_finite() {
                    delta
                } else {
                    log::debug!("Dropping non-finite scroll delta");
                    0.0
                };
                input.scroll_impulses.push(delta);
            }
            RawInputEvent::Look(delta) => {
                if delta.is_finite() {
                    input.look += delta;
                } else {
                    log::debug!("Dropping non-finite look delta");
                }
            }
        }
    }
}
