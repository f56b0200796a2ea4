//! Interaction probe system.
//!
//! Once per frame, after the camera has been oriented and moved, every
//! [`InteractionProbe`] casts a ray along its camera's forward axis:
//!
//! 1. The nearest [`BoxCollider`] within range is the hit. The probe's own
//!    entity and its `ignore` entity are skipped.
//! 2. The hit's capabilities are read from component presence
//!    ([`RenderSurface`], [`Interactable`], [`LookAt`], [`Tag`]).
//! 3. [`InteractionProbe::resolve`] decides the frame's effects, which are
//!    then applied here: overlay swap, prompt update, and the
//!    [`InteractEvent`], [`LookedAtEvent`] and [`FocusChangedEvent`] triggers.
//!
//! Objects lacking a capability are the normal case (walls, floors) and are
//! not reported as errors.

use bevy_ecs::name::Name;
use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::boxcollider::BoxCollider;
use crate::components::interactable::{Interactable, LOOK_AT_TAG, LookAt, Tag};
use crate::components::interactionprobe::{InteractionProbe, ProbeHit, PromptUpdate};
use crate::components::rendersurface::RenderSurface;
use crate::components::transform::Transform;
use crate::events::interaction::{FocusChangedEvent, InteractEvent, LookedAtEvent};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::prompt::InteractionPrompt;

/// Nearest collider struck by a ray, skipping `skip` entities.
pub fn nearest_hit<'a>(
    colliders: impl Iterator<Item = (Entity, &'a Transform, &'a BoxCollider)>,
    origin: Vec3,
    direction: Vec3,
    range: f32,
    skip: [Option<Entity>; 2],
) -> Option<(Entity, f32)> {
    if !(range.is_finite() && range > 0.0) || !direction.is_finite() || !origin.is_finite() {
        return None;
    }
    let direction = direction.try_normalize()?;
    colliders
        .filter(|(entity, _, _)| !skip.contains(&Some(*entity)))
        .filter_map(|(entity, transform, collider)| {
            collider
                .ray_distance(transform.position, origin, direction, range)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[allow(clippy::too_many_arguments)]
pub fn interaction_probe(
    mut probes: Query<(Entity, &mut InteractionProbe, &Transform)>,
    colliders: Query<(Entity, &Transform, &BoxCollider)>,
    mut surfaces: Query<&mut RenderSurface>,
    capabilities: Query<(Option<&Interactable>, Has<LookAt>, Option<&Tag>, Option<&Name>)>,
    input: Res<InputState>,
    config: Option<Res<GameConfig>>,
    mut prompt: ResMut<InteractionPrompt>,
    mut commands: Commands,
) {
    let interact_pressed = input.interact.just_pressed;

    for (probe_entity, mut probe, transform) in probes.iter_mut() {
        if let Some(focus) = probe.focus() {
            if !capabilities.contains(focus) {
                log::debug!("Focus target {:?} vanished", focus);
                probe.forget(focus);
            } else if !surfaces.contains(focus) {
                log::debug!("Focus target {:?} lost its render surface", focus);
                probe.release_focus(focus);
            }
        }

        let hit = nearest_hit(
            colliders.iter(),
            transform.position,
            transform.forward(),
            probe.range,
            [Some(probe_entity), probe.ignore],
        )
        .map(|(entity, _)| {
            let (interactable, look_at, tag, _) = capabilities
                .get(entity)
                .unwrap_or((None, false, None, None));
            ProbeHit {
                entity,
                renderable: surfaces.contains(entity),
                interactable: interactable.is_some(),
                look_at,
                look_at_tagged: tag.is_some_and(|t| t.is(LOOK_AT_TAG)),
            }
        });

        let outcome = probe.resolve(hit, interact_pressed);

        if let Some(previous) = outcome.unhighlight {
            if let Ok(mut surface) = surfaces.get_mut(previous) {
                surface.remove_overlay();
            }
        }
        if let Some(current) = outcome.highlight {
            if let Ok(mut surface) = surfaces.get_mut(current) {
                surface.apply_overlay(probe.highlight);
            }
        }
        if outcome.focus_changed() {
            log::debug!(
                "Probe {:?} focus {:?} -> {:?}",
                probe_entity,
                outcome.unhighlight,
                outcome.highlight
            );
            commands.trigger(FocusChangedEvent {
                probe: probe_entity,
                previous: outcome.unhighlight,
                current: outcome.highlight,
            });
        }

        match outcome.prompt {
            Some(PromptUpdate::Show(entity)) => {
                let custom = capabilities
                    .get(entity)
                    .ok()
                    .and_then(|(interactable, _, _, _)| interactable)
                    .and_then(|i| i.prompt.clone());
                let text = match (custom, config.as_deref()) {
                    (Some(text), _) => text,
                    (None, Some(config)) => config.prompt.clone(),
                    (None, None) => GameConfig::new().prompt,
                };
                prompt.show(text);
            }
            Some(PromptUpdate::Clear) => {
                if prompt.is_visible() {
                    prompt.clear();
                }
            }
            None => {}
        }

        if let Some(entity) = outcome.interact {
            log::info!("Interacting with: {}", display_name(&capabilities, entity));
            commands.trigger(InteractEvent {
                probe: probe_entity,
                entity,
            });
        }
        if let Some(entity) = outcome.looked_at {
            log::info!("Looked at: {}", display_name(&capabilities, entity));
            commands.trigger(LookedAtEvent {
                probe: probe_entity,
                entity,
            });
        }
    }
}

fn display_name(
    capabilities: &Query<(Option<&Interactable>, Has<LookAt>, Option<&Tag>, Option<&Name>)>,
    entity: Entity,
) -> String {
    capabilities
        .get(entity)
        .ok()
        .and_then(|(_, _, _, name)| name.map(|n| n.as_str().to_string()))
        .unwrap_or_else(|| format!("{:?}", entity))
}
