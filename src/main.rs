//! Wheelchair simulation headless runner.
//!
//! Drives the controller through a scripted session without a window:
//! - **bevy_ecs** for the entity-component-system world
//! - **configparser** for INI tuning (`config.ini`)
//! - **serde_json** for the scene description (`assets/scene.json`)
//!
//! # Session
//!
//! 1. Load configuration and scene, spawn avatar, camera and props
//! 2. Push both wheels forward toward the props, then turn each way
//! 3. Press interact while something is focused
//! 4. Log every milestone, focus change, interaction and look-at
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --frames 900
//! ```

use bevy_ecs::observer::{Observer, On};
use clap::Parser;
use glam::Vec2;
use std::path::PathBuf;

use wheelchair_sim::components::transform::Transform;
use wheelchair_sim::events::input::InputAction;
use wheelchair_sim::events::interaction::{FocusChangedEvent, InteractEvent, LookedAtEvent};
use wheelchair_sim::game::Simulation;
use wheelchair_sim::resources::gameconfig::GameConfig;
use wheelchair_sim::resources::input::RawInput;
use wheelchair_sim::scene::SceneData;

/// Headless wheelchair controller simulation
#[derive(Parser)]
#[command(version, about = "Runs the wheelchair controller through a scripted session.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, default_value = "config.ini")]
    config: PathBuf,

    /// JSON scene description.
    #[arg(long, default_value = "assets/scene.json")]
    scene: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 900)]
    frames: u32,

    /// Frame delta in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for look jitter.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Write the default configuration and exit.
    /// Optionally provide a path (default: config.ini).
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<Option<PathBuf>>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write default config and quit
    if let Some(maybe_path) = cli.write_default_config {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("config.ini"));
        if let Err(e) = GameConfig::with_path(&path).save_to_file() {
            log::error!("{e}");
            std::process::exit(1);
        }
        println!("Default config written to {}", path.display());
        return;
    }

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; using defaults");
    }

    let scene = match SceneData::load_from_file(&cli.scene) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut sim = Simulation::new(config);
    sim.world_mut().spawn(Observer::new(report_focus));
    sim.world_mut().spawn(Observer::new(report_interaction));
    sim.world_mut().spawn(Observer::new(report_look_at));
    sim.world_mut().flush();

    sim.load_scene(&scene);
    sim.init();

    let mut rng = fastrand::Rng::with_seed(cli.seed);
    for frame in 0..cli.frames {
        scripted_input(frame, &mut rng, &mut sim.input());
        sim.per_frame(cli.dt);
    }

    if let Some(avatar) = sim.avatar() {
        if let Some(transform) = sim.world().get::<Transform>(avatar) {
            log::info!(
                "Final pose: position {:?}, heading {:.1}°",
                transform.position,
                transform.heading_degrees()
            );
        }
    }
    log::info!("Final prompt: {:?}", sim.prompt().text());
    sim.shutdown();
}

/// Feed one frame of the demo session into the input mailbox.
fn scripted_input(frame: u32, rng: &mut fastrand::Rng, input: &mut RawInput) {
    match frame {
        10 => {
            input.press(InputAction::LeftWheel);
            input.press(InputAction::RightWheel);
        }
        300 => input.release(InputAction::RightWheel),
        420 => {
            input.release(InputAction::LeftWheel);
            input.press(InputAction::RightWheel);
        }
        540 => input.press(InputAction::LeftWheel),
        600 | 700 => input.press(InputAction::Interact),
        610 | 710 => input.release(InputAction::Interact),
        660 => {
            input.release(InputAction::LeftWheel);
            input.release(InputAction::RightWheel);
        }
        _ => {}
    }

    if (10..660).contains(&frame) && frame % 4 == 0 {
        input.scroll(1.0);
    }

    let jitter = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * 0.4;
    input.look(jitter);
}

fn report_focus(trigger: On<FocusChangedEvent>) {
    let event = trigger.event();
    log::info!("Focus {:?} -> {:?}", event.previous, event.current);
}

fn report_interaction(trigger: On<InteractEvent>) {
    log::info!("Interaction dispatched to {:?}", trigger.event().entity);
}

fn report_look_at(trigger: On<LookedAtEvent>) {
    log::info!("Look-at dispatched to {:?}", trigger.event().entity);
}
