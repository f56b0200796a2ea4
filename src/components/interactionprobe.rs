//! Per-camera interaction probe state.
//!
//! The [`InteractionProbe`] component remembers which entity holds the
//! highlight overlay (the focus target) and which entity last received a
//! look-at trigger. Each frame the
//! [`interaction_probe`](crate::systems::probe::interaction_probe) system
//! raycasts from the camera, describes what it struck as a [`ProbeHit`], and
//! feeds it to [`InteractionProbe::resolve`], which decides what to do and
//! returns it as a [`ProbeOutcome`]. Keeping the decision pure makes the
//! frame-to-frame behavior easy to reason about:
//!
//! - a miss drops the highlight, the look-at memory and the prompt
//! - focus (highlight + prompt) only changes when a different highlightable
//!   object is struck, never while the same one stays under the ray
//! - an interaction fires on the frame the interact button goes down,
//!   regardless of whether focus changed that frame
//! - a look-at fires once per unbroken streak on a tagged look-at object
//!
//! State is owned by the probe instance, so several probes (split screen,
//! multiple players) never share focus or memory.

use bevy_ecs::prelude::{Component, Entity};

use super::rendersurface::MaterialId;

/// Capabilities of the entity struck by the probe ray this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeHit {
    pub entity: Entity,
    /// Has a render surface.
    pub renderable: bool,
    /// Has the interactable capability.
    pub interactable: bool,
    /// Has the look-at capability.
    pub look_at: bool,
    /// Carries the look-at classification tag.
    pub look_at_tagged: bool,
}

impl ProbeHit {
    /// A hit on plain geometry with no capabilities.
    pub fn plain(entity: Entity) -> Self {
        Self {
            entity,
            renderable: false,
            interactable: false,
            look_at: false,
            look_at_tagged: false,
        }
    }

    /// Renderable and interactable.
    pub fn highlightable(&self) -> bool {
        self.renderable && self.interactable
    }

    /// Look-at capable and tagged.
    pub fn armed_look_at(&self) -> bool {
        self.look_at && self.look_at_tagged
    }
}

/// What the prompt collaborator should show after this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptUpdate {
    /// Show the interaction prompt of the given entity.
    Show(Entity),
    /// Clear the prompt.
    Clear,
}

/// Side effects requested by one frame of probe evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Remove the overlay from this entity.
    pub unhighlight: Option<Entity>,
    /// Apply the overlay to this entity.
    pub highlight: Option<Entity>,
    pub prompt: Option<PromptUpdate>,
    /// Invoke the interaction entry point on this entity.
    pub interact: Option<Entity>,
    /// Invoke the look-at entry point on this entity.
    pub looked_at: Option<Entity>,
}

impl ProbeOutcome {
    /// True when focus moved this frame.
    pub fn focus_changed(&self) -> bool {
        self.unhighlight.is_some() || self.highlight.is_some()
    }
}

/// Raycast probe attached to a camera.
#[derive(Component, Clone, Debug)]
pub struct InteractionProbe {
    /// Maximum ray length in world units.
    pub range: f32,
    /// Material appended to the focused object's surface.
    pub highlight: MaterialId,
    /// Entity excluded from raycasts, usually the avatar the camera rides on.
    pub ignore: Option<Entity>,
    focus: Option<Entity>,
    last_looked_at: Option<Entity>,
}

impl InteractionProbe {
    pub fn new(range: f32, highlight: MaterialId) -> Self {
        Self {
            range,
            highlight,
            ignore: None,
            focus: None,
            last_looked_at: None,
        }
    }

    /// Builder: skip `entity` when raycasting.
    pub fn ignoring(mut self, entity: Entity) -> Self {
        self.ignore = Some(entity);
        self
    }

    /// Entity currently holding the highlight overlay.
    pub fn focus(&self) -> Option<Entity> {
        self.focus
    }

    /// Entity that last received a look-at trigger in the current streak.
    pub fn last_looked_at(&self) -> Option<Entity> {
        self.last_looked_at
    }

    /// Evaluate one frame.
    ///
    /// `hit` is the nearest struck entity within range; `interact_pressed` is
    /// true only on the frame the interact input went down.
    pub fn resolve(&mut self, hit: Option<ProbeHit>, interact_pressed: bool) -> ProbeOutcome {
        let mut outcome = ProbeOutcome::default();

        let Some(hit) = hit else {
            outcome.unhighlight = self.focus.take();
            outcome.prompt = Some(PromptUpdate::Clear);
            self.last_looked_at = None;
            return outcome;
        };

        if hit.highlightable() && self.focus != Some(hit.entity) {
            outcome.unhighlight = self.focus.take();
            outcome.highlight = Some(hit.entity);
            outcome.prompt = Some(PromptUpdate::Show(hit.entity));
            self.focus = Some(hit.entity);
        }

        if hit.interactable && interact_pressed {
            outcome.interact = Some(hit.entity);
        }

        if hit.armed_look_at() {
            if self.last_looked_at != Some(hit.entity) {
                outcome.looked_at = Some(hit.entity);
                self.last_looked_at = Some(hit.entity);
            }
        } else {
            self.last_looked_at = None;
        }

        outcome
    }

    /// Drop the focus on `entity` without asking for an unhighlight. The
    /// look-at streak is kept, since the entity is still in the world.
    pub fn release_focus(&mut self, entity: Entity) {
        if self.focus == Some(entity) {
            self.focus = None;
        }
    }

    /// Drop every reference to an entity that no longer exists.
    pub fn forget(&mut self, entity: Entity) {
        if self.focus == Some(entity) {
            self.focus = None;
        }
        if self.last_looked_at == Some(entity) {
            self.last_looked_at = None;
        }
    }

    /// Clear all state, returning the entity that still holds the overlay.
    pub fn reset(&mut self) -> Option<Entity> {
        self.last_looked_at = None;
        self.focus.take()
    }
}
