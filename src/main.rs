//! Gridwalker main entry point.
//!
//! A grid-snapping first-person walker written in Rust using:
//! - **raylib** for windowing, 3D drawing, input and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, initialize the raylib window, ECS world and audio thread
//! 2. Spawn the level (walls + player) from the JSON layout
//! 3. Every frame:
//!    - read input and apply mouse look
//!    - run as many fixed physics ticks as the accumulator owes
//!    - forward audio commands and render the world
//! 4. Clean up the audio thread on exit
//!
//! With `--headless` no window or audio device is opened; scripted moves are
//! run through the physics schedule and the result is logged.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level assets/levels/maze.json
//! cargo run --release -- --headless --moves R,U,U,L --seed 7
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use gridwalker::game;
use gridwalker::resources::audio::{setup_audio, shutdown_audio};
use gridwalker::resources::gameconfig::GameConfig;
use gridwalker::resources::input::InputState;
use gridwalker::systems::input::describe_bindings;
use gridwalker::systems::time::update_world_time;

const DEFAULT_LEVEL: &str = "assets/levels/maze.json";

/// Grid-snapping first-person walker
#[derive(Parser)]
#[command(version, about = "Walk a tile grid one cell at a time, first-person.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level layout (JSON).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LEVEL)]
    level: String,

    /// Seed for footstep selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window, driving the walker with --moves.
    #[arg(long)]
    headless: bool,

    /// Physics tick budget for a headless run.
    #[arg(long, default_value_t = 3000, requires = "headless")]
    ticks: u64,

    /// Comma-separated grid steps for a headless run (R, L, U, D).
    #[arg(long, default_value = "", requires = "headless")]
    moves: String,

    /// Write the effective configuration back to --config and exit.
    #[arg(long)]
    save_config: bool,
}

fn load_config(path: PathBuf) -> GameConfig {
    let mut config = GameConfig::with_path(path);
    if let Err(e) = config.load_from_file() {
        info!("{}; using defaults", e);
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}; using defaults", e);
        config = GameConfig::with_path(config.config_path.clone());
    }
    config
}

fn run_headless(cli: &Cli, config: GameConfig) -> i32 {
    let moves = match game::parse_moves(&cli.moves) {
        Ok(moves) => moves,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    if let Err(e) = gridwalker::components::levellayout::LevelLayoutData::load_from_file(&cli.level) {
        error!("Cannot read level {}: {}", cli.level, e);
        return 1;
    }

    let mut world = game::build_world(config, &cli.level, cli.seed);
    match game::run_headless(&mut world, &moves, cli.ticks) {
        Some(report) => {
            println!(
                "final position ({:.3}, {:.3}, {:.3}) after {} ticks, {} step(s), {} footstep(s)",
                report.position.x,
                report.position.y,
                report.position.z,
                report.ticks,
                report.steps_completed,
                report.footsteps
            );
            0
        }
        None => {
            error!("level {} spawned no walker", cli.level);
            1
        }
    }
}

fn run_windowed(cli: &Cli, config: GameConfig) {
    let (window_width, window_height) = config.window_size();
    let target_fps = config.target_fps;
    let fullscreen = config.fullscreen;

    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Gridwalker")
        .build();
    rl.set_target_fps(target_fps);
    // Escape releases the cursor instead of closing the window
    rl.set_exit_key(None);
    if fullscreen {
        rl.toggle_fullscreen();
    }

    let mut world = game::build_world(config, &cli.level, cli.seed);
    info!("{}", describe_bindings(world.resource::<InputState>()));

    // Init audio
    setup_audio(&mut world);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut frame = game::frame_schedule();
    let mut physics = game::physics_schedule();
    let mut present = game::present_schedule();

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        let due_ticks = update_world_time(&mut world, dt);

        frame.run(&mut world);
        for _ in 0..due_ticks {
            physics.run(&mut world);
        }
        present.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
    shutdown_audio(&mut world);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.clone());

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    if cli.headless {
        std::process::exit(run_headless(&cli, config));
    }
    run_windowed(&cli, config);
}
