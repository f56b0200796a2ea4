//! Interaction probe events.
//!
//! The probe never calls into world objects directly. It triggers these
//! events and whatever observers the host registered decide what an
//! interaction or a look-at actually does (open a door, play a line of
//! dialogue, swap a cursor...).
//!
//! - [`InteractEvent`] – the interact input went down while the ray was on an
//!   [`Interactable`](crate::components::interactable::Interactable)
//! - [`LookedAtEvent`] – a tagged [`LookAt`](crate::components::interactable::LookAt)
//!   object entered the ray for the first time in this streak
//! - [`FocusChangedEvent`] – the highlight moved between objects (or away)

use bevy_ecs::prelude::*;

/// Interaction entry point of the struck entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractEvent {
    /// Camera entity whose probe dispatched the interaction.
    pub probe: Entity,
    /// The interactable entity.
    pub entity: Entity,
}

/// Look-at entry point of the struck entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookedAtEvent {
    pub probe: Entity,
    pub entity: Entity,
}

/// Focus moved from `previous` to `current`. Either side may be `None`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChangedEvent {
    pub probe: Entity,
    pub previous: Option<Entity>,
    pub current: Option<Entity>,
}
