//! Capability components queried by the interaction probe.
//!
//! World objects opt into probe behavior by carrying these components:
//! - [`Interactable`] – can be interacted with; the probe triggers
//!   [`InteractEvent`](crate::events::interaction::InteractEvent) on it
//! - [`LookAt`] – reacts to being looked at; the probe triggers
//!   [`LookedAtEvent`](crate::events::interaction::LookedAtEvent) on it, but
//!   only when it also carries the [`LOOK_AT_TAG`] [`Tag`]
//! - [`Tag`] – opaque classification label compared by exact match
//!
//! The behavior behind each entry point is defined by observers, so the
//! probe never needs to know what an object does.

use bevy_ecs::prelude::Component;

/// Classification tag that arms [`LookAt`] objects.
pub const LOOK_AT_TAG: &str = "Look-at";

/// Marks an entity as interactable.
#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct Interactable {
    /// Optional per-object prompt; the configured default is used when `None`.
    pub prompt: Option<String>,
}

impl Interactable {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
        }
    }
}

/// Marks an entity as reacting to being looked at.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookAt;

/// Opaque classification label.
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn look_at() -> Self {
        Self::new(LOOK_AT_TAG)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison.
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}
