//! System-level integration tests for the drive, camera and probe systems.
//!
//! Each test builds a bare `World` with only the resources the systems under
//! test need, runs them through a `Schedule`, and records triggered events
//! through observers writing into a `Recorded` resource.

use bevy_ecs::name::Name;
use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::{Quat, Vec2, Vec3};

use wheelchair_sim::components::boxcollider::BoxCollider;
use wheelchair_sim::components::camerarig::CameraRig;
use wheelchair_sim::components::drivebody::DriveBody;
use wheelchair_sim::components::interactable::{Interactable, LookAt, Tag};
use wheelchair_sim::components::interactionprobe::InteractionProbe;
use wheelchair_sim::components::rendersurface::{MaterialId, RenderSurface};
use wheelchair_sim::components::transform::Transform;
use wheelchair_sim::components::wheelchair::WheelchairDrive;
use wheelchair_sim::events::input::InputAction;
use wheelchair_sim::events::interaction::{FocusChangedEvent, InteractEvent, LookedAtEvent};
use wheelchair_sim::events::motion::MotionMilestoneEvent;
use wheelchair_sim::resources::fixedstep::FixedStep;
use wheelchair_sim::resources::gameconfig::GameConfig;
use wheelchair_sim::resources::input::{InputState, RawInput};
use wheelchair_sim::resources::prompt::InteractionPrompt;
use wheelchair_sim::resources::worldtime::WorldTime;
use wheelchair_sim::systems::camera::{camera_follow, camera_look};
use wheelchair_sim::systems::drive::{queue_wheel_impulses, wheelchair_drive};
use wheelchair_sim::systems::input::update_input_state;
use wheelchair_sim::systems::physics::integrate_drive_bodies;
use wheelchair_sim::systems::probe::interaction_probe;
use wheelchair_sim::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;
const HIGHLIGHT: MaterialId = MaterialId(1000);
const OAK: MaterialId = MaterialId(1);
const BRASS: MaterialId = MaterialId(2);
const EYE: Vec3 = Vec3::new(0.0, 1.5, 0.0);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct Recorded {
    looked_at: Vec<Entity>,
    interacts: Vec<Entity>,
    focus: Vec<(Option<Entity>, Option<Entity>)>,
    milestones: Vec<Entity>,
}

fn record_look_at(trigger: On<LookedAtEvent>, mut recorded: ResMut<Recorded>) {
    recorded.looked_at.push(trigger.event().entity);
}

fn record_interact(trigger: On<InteractEvent>, mut recorded: ResMut<Recorded>) {
    recorded.interacts.push(trigger.event().entity);
}

fn record_focus(trigger: On<FocusChangedEvent>, mut recorded: ResMut<Recorded>) {
    let event = trigger.event();
    recorded.focus.push((event.previous, event.current));
}

fn record_milestone(trigger: On<MotionMilestoneEvent>, mut recorded: ResMut<Recorded>) {
    recorded.milestones.push(trigger.event().entity);
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(FixedStep::new(0.02));
    world.insert_resource(InputState::default());
    world.insert_resource(RawInput::default());
    world.insert_resource(InteractionPrompt::default());
    world.insert_resource(GameConfig::new());
    world.init_resource::<Recorded>();
    world.spawn(Observer::new(record_look_at));
    world.spawn(Observer::new(record_interact));
    world.spawn(Observer::new(record_focus));
    world.spawn(Observer::new(record_milestone));
    world.flush();
    world
}

fn tick_probe(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((update_input_state, interaction_probe).chain());
    schedule.run(world);
}

fn tick_drive(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            queue_wheel_impulses,
            wheelchair_drive,
            integrate_drive_bodies,
        )
            .chain(),
    );
    schedule.run(world);
}

fn tick_camera(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((camera_look, camera_follow).chain());
    schedule.run(world);
}

fn spawn_probe(world: &mut World) -> Entity {
    world
        .spawn((
            Transform::from_position(EYE),
            InteractionProbe::new(3.0, HIGHLIGHT),
        ))
        .id()
}

fn aim(world: &mut World, probe: Entity, degrees: f32) {
    world.get_mut::<Transform>(probe).unwrap().rotation =
        Quat::from_rotation_y(degrees.to_radians());
}

fn spawn_door(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Name::new("Door"),
            Transform::from_position(position),
            BoxCollider::new(1.0, 1.0, 1.0),
            RenderSurface::new([OAK, BRASS]),
            Interactable::default(),
        ))
        .id()
}

fn spawn_painting(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Name::new("Painting"),
            Transform::from_position(position),
            BoxCollider::new(1.0, 1.0, 0.1),
            LookAt,
            Tag::look_at(),
        ))
        .id()
}

fn materials(world: &World, entity: Entity) -> Vec<MaterialId> {
    world.get::<RenderSurface>(entity).unwrap().materials().to_vec()
}

fn highlighted(world: &World, entity: Entity) -> bool {
    world.get::<RenderSurface>(entity).unwrap().is_highlighted()
}

// ---------------------------------------------------------------------------
// Interaction probe
// ---------------------------------------------------------------------------

#[test]
fn look_at_fires_once_per_streak_and_rearms_after_miss() {
    let mut world = make_world(1.0 / 60.0);
    let probe = spawn_probe(&mut world);
    let painting = spawn_painting(&mut world, Vec3::new(0.0, 1.5, -2.0));

    for _ in 0..3 {
        tick_probe(&mut world);
    }
    assert_eq!(world.resource::<Recorded>().looked_at, vec![painting]);

    aim(&mut world, probe, 180.0);
    tick_probe(&mut world);
    assert_eq!(world.resource::<Recorded>().looked_at.len(), 1);

    aim(&mut world, probe, 0.0);
    tick_probe(&mut world);
    assert_eq!(
        world.resource::<Recorded>().looked_at,
        vec![painting, painting]
    );
}

#[test]
fn untagged_look_at_object_never_fires() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    world.spawn((
        Transform::from_position(Vec3::new(0.0, 1.5, -2.0)),
        BoxCollider::new(1.0, 1.0, 0.1),
        LookAt,
        Tag::new("look-at"),
    ));

    tick_probe(&mut world);
    tick_probe(&mut world);
    assert!(world.resource::<Recorded>().looked_at.is_empty());
}

#[test]
fn focus_swaps_between_interactables_exactly_once() {
    let mut world = make_world(1.0 / 60.0);
    let probe = spawn_probe(&mut world);
    let ahead = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.0));
    let left = spawn_door(&mut world, Vec3::new(-2.0, 1.5, -2.0));

    tick_probe(&mut world);
    tick_probe(&mut world);
    assert_eq!(materials(&world, ahead), vec![OAK, BRASS, HIGHLIGHT]);
    assert_eq!(world.resource::<Recorded>().focus, vec![(None, Some(ahead))]);
    assert!(world.resource::<InteractionPrompt>().is_visible());

    aim(&mut world, probe, 45.0);
    tick_probe(&mut world);
    tick_probe(&mut world);
    assert_eq!(materials(&world, ahead), vec![OAK, BRASS]);
    assert_eq!(materials(&world, left), vec![OAK, BRASS, HIGHLIGHT]);
    assert!(!highlighted(&world, ahead));
    assert!(highlighted(&world, left));
    assert_eq!(
        world.resource::<Recorded>().focus,
        vec![(None, Some(ahead)), (Some(ahead), Some(left))]
    );
    assert_eq!(
        world.get::<InteractionProbe>(probe).unwrap().focus(),
        Some(left)
    );
}

#[test]
fn miss_restores_materials_and_clears_prompt() {
    let mut world = make_world(1.0 / 60.0);
    let probe = spawn_probe(&mut world);
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.0));

    tick_probe(&mut world);
    assert_eq!(
        world.resource::<InteractionPrompt>().text(),
        GameConfig::new().prompt
    );

    assert!(highlighted(&world, door));

    aim(&mut world, probe, 180.0);
    tick_probe(&mut world);
    assert_eq!(materials(&world, door), vec![OAK, BRASS]);
    assert!(!highlighted(&world, door));
    assert!(!world.resource::<InteractionPrompt>().is_visible());
    assert_eq!(world.get::<InteractionProbe>(probe).unwrap().focus(), None);
}

#[test]
fn plain_geometry_in_front_keeps_existing_focus() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.5));

    tick_probe(&mut world);
    assert_eq!(materials(&world, door), vec![OAK, BRASS, HIGHLIGHT]);

    world.spawn((
        Name::new("Wall"),
        Transform::from_position(Vec3::new(0.0, 1.5, -1.0)),
        BoxCollider::new(2.0, 2.0, 0.1),
    ));
    tick_probe(&mut world);

    assert_eq!(materials(&world, door), vec![OAK, BRASS, HIGHLIGHT]);
    assert!(world.resource::<InteractionPrompt>().is_visible());
    assert_eq!(world.resource::<Recorded>().focus.len(), 1);
}

#[test]
fn out_of_range_object_is_a_miss() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -5.0));

    tick_probe(&mut world);
    assert_eq!(materials(&world, door), vec![OAK, BRASS]);
    assert!(world.resource::<Recorded>().focus.is_empty());
}

#[test]
fn interact_fires_on_press_edge_only() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.0));

    world
        .resource_mut::<RawInput>()
        .press(InputAction::Interact);
    for _ in 0..4 {
        tick_probe(&mut world);
    }
    assert_eq!(world.resource::<Recorded>().interacts, vec![door]);

    world
        .resource_mut::<RawInput>()
        .release(InputAction::Interact);
    tick_probe(&mut world);
    world
        .resource_mut::<RawInput>()
        .press(InputAction::Interact);
    tick_probe(&mut world);
    assert_eq!(world.resource::<Recorded>().interacts, vec![door, door]);
}

#[test]
fn interact_without_render_surface_still_dispatches() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    let lever = world
        .spawn((
            Transform::from_position(Vec3::new(0.0, 1.5, -2.0)),
            BoxCollider::new(1.0, 1.0, 1.0),
            Interactable::default(),
        ))
        .id();

    world
        .resource_mut::<RawInput>()
        .press(InputAction::Interact);
    tick_probe(&mut world);

    assert_eq!(world.resource::<Recorded>().interacts, vec![lever]);
    assert!(world.resource::<Recorded>().focus.is_empty());
    assert!(!world.resource::<InteractionPrompt>().is_visible());
}

#[test]
fn per_object_prompt_overrides_configured_prompt() {
    let mut world = make_world(1.0 / 60.0);
    spawn_probe(&mut world);
    world.spawn((
        Transform::from_position(Vec3::new(0.0, 1.5, -2.0)),
        BoxCollider::new(1.0, 1.0, 1.0),
        RenderSurface::new([OAK]),
        Interactable::with_prompt("Open\n   (E)"),
    ));

    tick_probe(&mut world);
    assert_eq!(world.resource::<InteractionPrompt>().text(), "Open\n   (E)");
}

#[test]
fn despawned_focus_is_forgotten_without_events() {
    let mut world = make_world(1.0 / 60.0);
    let probe = spawn_probe(&mut world);
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.0));

    tick_probe(&mut world);
    world.despawn(door);
    tick_probe(&mut world);

    assert_eq!(world.get::<InteractionProbe>(probe).unwrap().focus(), None);
    assert_eq!(world.resource::<Recorded>().focus, vec![(None, Some(door))]);
}

#[test]
fn losing_render_surface_drops_focus_but_keeps_look_at_streak() {
    let mut world = make_world(1.0 / 60.0);
    let probe = spawn_probe(&mut world);
    let portrait = world
        .spawn((
            Transform::from_position(Vec3::new(0.0, 1.5, -2.0)),
            BoxCollider::new(1.0, 1.0, 0.1),
            RenderSurface::new([OAK]),
            Interactable::default(),
            LookAt,
            Tag::look_at(),
        ))
        .id();

    tick_probe(&mut world);
    assert_eq!(
        world.get::<InteractionProbe>(probe).unwrap().focus(),
        Some(portrait)
    );
    assert_eq!(world.resource::<Recorded>().looked_at, vec![portrait]);

    world.entity_mut(portrait).remove::<RenderSurface>();
    tick_probe(&mut world);
    tick_probe(&mut world);

    assert_eq!(world.get::<InteractionProbe>(probe).unwrap().focus(), None);
    assert_eq!(world.resource::<Recorded>().looked_at, vec![portrait]);
    assert_eq!(world.resource::<Recorded>().focus.len(), 1);
}

#[test]
fn probe_skips_its_ignored_entity() {
    let mut world = make_world(1.0 / 60.0);
    let avatar = world
        .spawn((
            Transform::from_position(Vec3::new(0.0, 1.5, -0.5)),
            BoxCollider::new(1.0, 1.0, 1.0),
            RenderSurface::new([OAK]),
            Interactable::default(),
        ))
        .id();
    let probe = world
        .spawn((
            Transform::from_position(EYE),
            InteractionProbe::new(3.0, HIGHLIGHT).ignoring(avatar),
        ))
        .id();
    let door = spawn_door(&mut world, Vec3::new(0.0, 1.5, -2.5));

    tick_probe(&mut world);
    assert_eq!(
        world.get::<InteractionProbe>(probe).unwrap().focus(),
        Some(door)
    );
    assert_eq!(materials(&world, avatar), vec![OAK]);
}

// ---------------------------------------------------------------------------
// Drive
// ---------------------------------------------------------------------------

fn spawn_chair(world: &mut World, drive: WheelchairDrive) -> Entity {
    world
        .spawn((Transform::default(), DriveBody::new(), drive))
        .id()
}

fn grip(world: &mut World, left: bool, right: bool, scrolls: &[f32]) {
    let mut input = world.resource_mut::<InputState>();
    input.left_wheel.active = left;
    input.right_wheel.active = right;
    input.scroll_impulses.clear();
    input.scroll_impulses.extend_from_slice(scrolls);
}

#[test]
fn both_wheels_push_chair_forward() {
    let mut world = make_world(0.02);
    let chair = spawn_chair(&mut world, WheelchairDrive::default());

    grip(&mut world, true, true, &[0.1]);
    tick_drive(&mut world);

    let transform = world.get::<Transform>(chair).unwrap();
    assert!(transform.position.z < 0.0);
    assert!(approx_eq(transform.position.x, 0.0));
    assert!(approx_eq(transform.heading(), 0.0));
    assert!(world.get::<WheelchairDrive>(chair).unwrap().queued().is_empty());
}

#[test]
fn single_wheel_turns_toward_the_held_side() {
    let mut world = make_world(0.02);
    let left_only = spawn_chair(&mut world, WheelchairDrive::default());

    grip(&mut world, true, false, &[1.0]);
    tick_drive(&mut world);
    let heading = world.get::<Transform>(left_only).unwrap().heading();
    assert!(heading < 0.0, "left wheel should turn right, got {heading}");

    let mut world = make_world(0.02);
    let right_only = spawn_chair(&mut world, WheelchairDrive::default());
    grip(&mut world, false, true, &[1.0]);
    tick_drive(&mut world);
    let heading = world.get::<Transform>(right_only).unwrap().heading();
    assert!(heading > 0.0, "right wheel should turn left, got {heading}");
}

#[test]
fn milestone_fires_every_n_counted_impulses() {
    let mut world = make_world(0.02);
    let chair = spawn_chair(
        &mut world,
        WheelchairDrive::new(1.0, 1.0, 5.0, 2.0).with_milestone_every(3),
    );

    grip(&mut world, true, true, &[0.5, 0.5, 0.5, 0.5]);
    tick_drive(&mut world);
    assert_eq!(world.resource::<Recorded>().milestones, vec![chair]);
    assert_eq!(
        world.get::<WheelchairDrive>(chair).unwrap().impulse_counter(),
        1
    );

    grip(&mut world, false, false, &[0.5, 0.5]);
    tick_drive(&mut world);
    assert_eq!(
        world.get::<WheelchairDrive>(chair).unwrap().impulse_counter(),
        3
    );
    assert_eq!(world.resource::<Recorded>().milestones, vec![chair]);

    grip(&mut world, true, false, &[0.5, 0.5]);
    tick_drive(&mut world);
    assert_eq!(world.resource::<Recorded>().milestones, vec![chair, chair]);
    assert_eq!(
        world.get::<WheelchairDrive>(chair).unwrap().impulse_counter(),
        1
    );
}

#[test]
fn speed_ceiling_drops_forward_impulse() {
    let mut world = make_world(0.02);
    let chair = spawn_chair(&mut world, WheelchairDrive::default());
    world.get_mut::<DriveBody>(chair).unwrap().linear_velocity = Vec3::new(0.0, 0.0, -6.0);

    grip(&mut world, true, true, &[1.0]);
    tick_drive(&mut world);

    let body = world.get::<DriveBody>(chair).unwrap();
    assert!(body.speed() < 6.0);
    assert_eq!(
        world.get::<WheelchairDrive>(chair).unwrap().impulse_counter(),
        0
    );
}

#[test]
fn sub_threshold_scroll_is_ignored() {
    let mut world = make_world(0.02);
    let chair = spawn_chair(&mut world, WheelchairDrive::default());

    grip(&mut world, true, true, &[0.001, -0.005]);
    tick_drive(&mut world);

    assert_eq!(world.get::<Transform>(chair).unwrap().position, Vec3::ZERO);
    assert_eq!(
        world.get::<WheelchairDrive>(chair).unwrap().impulse_counter(),
        0
    );
}

// ---------------------------------------------------------------------------
// Camera rig
// ---------------------------------------------------------------------------

#[test]
fn look_input_is_clamped_on_both_axes() {
    let mut world = make_world(1.0);
    let avatar = world.spawn(Transform::default()).id();
    let camera = world
        .spawn((Transform::default(), CameraRig::following(avatar)))
        .id();

    world.resource_mut::<InputState>().look = Vec2::new(-1000.0, 1000.0);
    tick_camera(&mut world);

    let rig = world.get::<CameraRig>(camera).unwrap();
    assert!(approx_eq(rig.pitch, 30.0));
    assert!(approx_eq(rig.yaw, -60.0));

    world.resource_mut::<InputState>().look = Vec2::new(1000.0, -1000.0);
    tick_camera(&mut world);
    let rig = world.get::<CameraRig>(camera).unwrap();
    assert!(approx_eq(rig.pitch, -30.0));
    assert!(approx_eq(rig.yaw, 60.0));
}

#[test]
fn camera_rotation_follows_avatar_heading() {
    let mut world = make_world(1.0 / 60.0);
    let avatar = world
        .spawn(Transform::default().with_heading_degrees(90.0))
        .id();
    let camera = world
        .spawn((Transform::default(), CameraRig::following(avatar)))
        .id();

    tick_camera(&mut world);

    let forward = world.get::<Transform>(camera).unwrap().forward();
    assert!(approx_eq(forward.x, -1.0));
    assert!(approx_eq(forward.z, 0.0));
}

#[test]
fn camera_converges_on_target_plus_offset() {
    let mut world = make_world(1.0 / 60.0);
    let avatar = world
        .spawn(Transform::from_position(Vec3::new(4.0, 0.0, -2.0)))
        .id();
    let camera = world
        .spawn((Transform::default(), CameraRig::following(avatar)))
        .id();

    for _ in 0..600 {
        update_world_time(&mut world, 1.0 / 60.0);
        tick_camera(&mut world);
    }

    let position = world.get::<Transform>(camera).unwrap().position;
    assert!((position - Vec3::new(4.0, 1.5, -2.0)).length() < 1e-3);
}

#[test]
fn camera_without_target_is_left_untouched() {
    let mut world = make_world(1.0 / 60.0);
    let avatar = world.spawn(Transform::default()).id();
    let start = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
    let camera = world
        .spawn((start, CameraRig::following(avatar)))
        .id();
    let idle = world.spawn((start, CameraRig::default())).id();

    world.despawn(avatar);
    world.resource_mut::<InputState>().look = Vec2::new(5.0, 5.0);
    tick_camera(&mut world);

    assert_eq!(*world.get::<Transform>(camera).unwrap(), start);
    assert_eq!(world.get::<CameraRig>(camera).unwrap().pitch, 0.0);
    assert_eq!(*world.get::<Transform>(idle).unwrap(), start);
}
