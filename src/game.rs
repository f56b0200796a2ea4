//! Host-facing simulation lifecycle.
//!
//! [`Simulation`] owns the ECS world and the three schedules that make up a
//! frame, and exposes the explicit lifecycle a host drives:
//!
//! 1. [`Simulation::new`] – build the world, resources, observers and schedules
//! 2. [`Simulation::init`] – reset the prompt and snap cameras onto their targets
//! 3. [`Simulation::per_frame`] – run one frame:
//!    - fold input and queue wheel impulses
//!    - run zero or more fixed physics steps (drive, then integrate)
//!    - look, follow, probe, in that order
//! 4. [`Simulation::shutdown`] – restore highlighted materials and clear UI state
//!
//! Input arrives through [`Simulation::input`], which hands out the
//! [`RawInput`] mailbox.

use bevy_ecs::name::Name;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::camerarig::CameraRig;
use crate::components::interactionprobe::InteractionProbe;
use crate::components::rendersurface::RenderSurface;
use crate::components::transform::Transform;
use crate::events::input::observe_input_event;
use crate::events::motion::observe_motion_milestone;
use crate::resources::fixedstep::FixedStep;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputState, RawInput};
use crate::resources::prompt::InteractionPrompt;
use crate::resources::worldtime::WorldTime;
use crate::scene::{SceneData, spawn_scene};
use crate::systems::camera::{camera_follow, camera_look};
use crate::systems::drive::{queue_wheel_impulses, wheelchair_drive};
use crate::systems::input::update_input_state;
use crate::systems::physics::integrate_drive_bodies;
use crate::systems::probe::interaction_probe;
use crate::systems::time::update_world_time;

/// Footprint of the chair used for its own collider.
const AVATAR_COLLIDER_SIZE: Vec3 = Vec3::new(0.7, 1.0, 1.0);

/// Input stage: snapshot input, then queue impulses.
pub fn input_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((update_input_state, queue_wheel_impulses).chain());
    schedule
}

/// Fixed physics step: drain impulses into forces, then integrate.
pub fn fixed_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((wheelchair_drive, integrate_drive_bodies).chain());
    schedule
}

/// View stage: Look → Follow → Probe. The probe needs this frame's camera pose.
pub fn view_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((camera_look, camera_follow, interaction_probe).chain());
    schedule
}

/// ECS world plus the schedules that advance it.
pub struct Simulation {
    world: World,
    input: Schedule,
    fixed: Schedule,
    view: Schedule,
    avatar: Option<Entity>,
    camera: Option<Entity>,
    running: bool,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(FixedStep::new(config.fixed_step));
        world.insert_resource(InputState::default());
        world.insert_resource(RawInput::default());
        world.insert_resource(InteractionPrompt::default());
        world.insert_resource(config);

        world.spawn(Observer::new(observe_input_event));
        world.spawn(Observer::new(observe_motion_milestone));
        // Ensure the observers are registered before we run any systems that may trigger events.
        world.flush();

        Self {
            world,
            input: input_schedule(),
            fixed: fixed_schedule(),
            view: view_schedule(),
            avatar: None,
            camera: None,
            running: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    /// Mailbox for host input events; drained at the start of the next frame.
    pub fn input(&mut self) -> Mut<'_, RawInput> {
        self.world.resource_mut::<RawInput>()
    }

    pub fn prompt(&self) -> &InteractionPrompt {
        self.world.resource::<InteractionPrompt>()
    }

    pub fn avatar(&self) -> Option<Entity> {
        self.avatar
    }

    pub fn camera(&self) -> Option<Entity> {
        self.camera
    }

    /// Spawn the wheelchair avatar at `start`.
    pub fn spawn_avatar(&mut self, start: Transform) -> Entity {
        let config = self.config().clone();
        let avatar = self
            .world
            .spawn((
                Name::new("Wheelchair"),
                start,
                config.body_component(),
                config.drive_component(),
                BoxCollider::new(
                    AVATAR_COLLIDER_SIZE.x,
                    AVATAR_COLLIDER_SIZE.y,
                    AVATAR_COLLIDER_SIZE.z,
                )
                .with_offset(Vec3::new(0.0, AVATAR_COLLIDER_SIZE.y * 0.5, 0.0)),
            ))
            .id();
        self.avatar = Some(avatar);
        avatar
    }

    /// Spawn a camera with a rig and probe bound to `avatar`.
    pub fn spawn_camera(&mut self, avatar: Entity) -> Entity {
        let config = self.config().clone();
        let start = self
            .world
            .get::<Transform>(avatar)
            .map(|t| Transform::from_position(t.position + config.camera_offset))
            .unwrap_or_default();
        let camera = self
            .world
            .spawn((
                Name::new("Camera"),
                start,
                config.camera_component(avatar),
                config.probe_component(avatar),
            ))
            .id();
        self.camera = Some(camera);
        camera
    }

    /// Spawn the avatar, its camera and every prop of `scene`.
    pub fn load_scene(&mut self, scene: &SceneData) -> FxHashMap<String, Entity> {
        let start = Transform::from_position(scene.avatar.position)
            .with_heading_degrees(scene.avatar.heading);
        let avatar = self.spawn_avatar(start);
        self.spawn_camera(avatar);
        spawn_scene(&mut self.world, scene)
    }

    /// Prepare for the first frame.
    pub fn init(&mut self) {
        self.world.resource_mut::<InteractionPrompt>().clear();
        snap_cameras(&mut self.world);
        self.running = true;
        log::info!("Simulation initialized");
    }

    /// Advance the simulation by one frame of `dt` seconds.
    pub fn per_frame(&mut self, dt: f32) {
        let dt = update_world_time(&mut self.world, dt);

        self.input.run(&mut self.world);

        let steps = self.world.resource_mut::<FixedStep>().advance(dt);
        for _ in 0..steps {
            self.fixed.run(&mut self.world);
        }

        self.view.run(&mut self.world);

        self.world.clear_trackers();
    }

    /// Restore highlighted surfaces and clear UI state. Safe to call twice.
    pub fn shutdown(&mut self) {
        let mut probes = self.world.query::<&mut InteractionProbe>();
        let focused: Vec<Entity> = probes
            .iter_mut(&mut self.world)
            .filter_map(|mut probe| probe.reset())
            .collect();
        for entity in focused {
            if let Some(mut surface) = self.world.get_mut::<RenderSurface>(entity) {
                surface.remove_overlay();
            }
        }
        let mut prompt = self.world.resource_mut::<InteractionPrompt>();
        if prompt.is_visible() {
            prompt.clear();
        }
        if self.running {
            log::info!("Simulation shut down");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Place every rig on its target immediately so the first frame does not sweep.
fn snap_cameras(world: &mut World) {
    let mut rigs = world.query::<(Entity, &CameraRig)>();
    let pending: Vec<(Entity, Entity)> = rigs
        .iter(world)
        .filter_map(|(camera, rig)| rig.follow.map(|target| (camera, target)))
        .collect();

    for (camera, target) in pending {
        let Some(target_transform) = world.get::<Transform>(target).copied() else {
            log::warn!("Camera {:?} has no follow target to snap to", camera);
            continue;
        };
        let Some(rig) = world.get::<CameraRig>(camera).cloned() else {
            continue;
        };
        if let Some(mut transform) = world.get_mut::<Transform>(camera) {
            transform.position = target_transform.position + rig.offset;
            transform.rotation = rig.rotation(target_transform.heading());
        }
    }
}
