//! Data-driven scene loading.
//!
//! A scene is a JSON file listing named materials and the props placed
//! around the avatar. Each prop becomes an entity with a [`Transform`] and a
//! [`BoxCollider`], plus whichever capabilities it declares.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "materials": { "oak": 1, "brass": 2 },
//!   "avatar": { "position": [0.0, 0.0, 0.0], "heading": 0.0 },
//!   "props": [
//!     {
//!       "name": "Door",
//!       "position": [0.0, 1.0, -4.0],
//!       "size": [1.0, 2.0, 0.2],
//!       "materials": ["oak", "brass"],
//!       "interactable": true,
//!       "prompt": "Open\n   (E)",
//!       "look_at": false,
//!       "tag": null
//!     }
//!   ]
//! }
//! ```
//!
//! Capability flags default to `false`; `materials` defaults to none, in which
//! case the prop has no render surface.

use bevy_ecs::name::Name;
use bevy_ecs::prelude::*;
use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::boxcollider::BoxCollider;
use crate::components::interactable::{Interactable, LookAt, Tag};
use crate::components::rendersurface::{MaterialId, RenderSurface};
use crate::components::transform::Transform;

/// Starting pose of the avatar.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AvatarStart {
    pub position: Vec3,
    /// Heading in degrees.
    #[serde(default)]
    pub heading: f32,
}

impl Default for AvatarStart {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            heading: 0.0,
        }
    }
}

/// One object in the scene.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PropData {
    pub name: String,
    pub position: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub interactable: bool,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub look_at: bool,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Structure representing the scene data loaded from JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneData {
    #[serde(default)]
    pub materials: FxHashMap<String, u32>,
    #[serde(default)]
    pub avatar: AvatarStart,
    #[serde(default)]
    pub props: Vec<PropData>,
}

impl SceneData {
    /// Loads scene data from a JSON file at the specified path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene {}: {}", path.display(), e))?;
        Self::from_json(&contents)
            .map_err(|e| format!("Failed to parse scene {}: {}", path.display(), e))
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Resolve a prop's material names. Unknown names are skipped with a warning.
    pub fn resolve_materials(&self, prop: &PropData) -> Vec<MaterialId> {
        prop.materials
            .iter()
            .filter_map(|name| match self.materials.get(name) {
                Some(id) => Some(MaterialId(*id)),
                None => {
                    log::warn!("Prop '{}' uses unknown material '{}'", prop.name, name);
                    None
                }
            })
            .collect()
    }
}

/// Spawn every prop of `scene`. Returns the spawned entities keyed by prop name.
pub fn spawn_scene(world: &mut World, scene: &SceneData) -> FxHashMap<String, Entity> {
    let mut spawned = FxHashMap::default();
    for prop in &scene.props {
        let mut entity = world.spawn((
            Name::new(prop.name.clone()),
            Transform::from_position(prop.position),
            BoxCollider::new(prop.size.x, prop.size.y, prop.size.z),
        ));
        if !prop.materials.is_empty() {
            entity.insert(RenderSurface::new(scene.resolve_materials(prop)));
        }
        if prop.interactable {
            entity.insert(Interactable {
                prompt: prop.prompt.clone(),
            });
        }
        if prop.look_at {
            entity.insert(LookAt);
        }
        if let Some(tag) = &prop.tag {
            entity.insert(Tag::new(tag.clone()));
        }
        let id = entity.id();
        if spawned.insert(prop.name.clone(), id).is_some() {
            log::warn!("Duplicate prop name '{}'; keeping the last one", prop.name);
        }
    }
    log::info!("Spawned {} props", spawned.len());
    spawned
}
