//! Headless demo run of the orrery scene.
//!
//! Loads configuration (with CLI overrides), assembles the solar bodies and
//! the comet pool, and drives the frame loop through a short scripted flight:
//! the pilot enables fly mode, thrusts toward the hazard planet, boards the
//! craft once its model has loaded, and pauses the simulation near the end.
//!
//! Run with: `cargo run -p orrery-app -- --frames 600`

use clap::Parser;
use orrery_app::{Engine, NullRenderer, solar};
use orrery_config::{CliArgs, Config};
use tracing::info;
use winit::keyboard::KeyCode;

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "orrery-app", about = "Orrery scene demo")]
struct AppArgs {
    /// Number of frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[command(flatten)]
    config: CliArgs,
}

/// Scripted input: the demo stands in for a windowed event source.
fn scripted_input(engine: &mut Engine, frame: u64) {
    match frame {
        60 => engine.key_down(KeyCode::KeyC),
        61 => engine.key_up(KeyCode::KeyC),
        120 => engine.key_down(KeyCode::KeyW),
        // Host auto-repeat while W is held.
        121..=239 => engine.key_down(KeyCode::KeyW),
        240 => engine.key_up(KeyCode::KeyW),
        300 => {
            if engine.rig().craft_registered() {
                engine.key_down(KeyCode::KeyB);
            }
        }
        301 => engine.key_up(KeyCode::KeyB),
        360 => engine.sliders_mut().animation_speed(150.0),
        420 => engine.sliders_mut().pool_target(9.0),
        540 => engine.key_down(KeyCode::Space),
        541 => engine.key_up(KeyCode::Space),
        _ => {}
    }
}

fn main() {
    let args = AppArgs::parse();

    let config_dir = args
        .config
        .config
        .clone()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args.config);

    orrery_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    info!("Orrery scene demo");
    info!(
        "Camera: ({:.0}, {:.0}, {:.0}) | Comets: {} | Ambient: {:.1}",
        config.camera.position[0],
        config.camera.position[1],
        config.camera.position[2],
        config.comets.target_count,
        config.lighting.ambient_brightness,
    );

    let mut engine = Engine::new(&config);
    let bodies = solar::build(engine.scene_mut());
    let mut renderer = NullRenderer;

    for frame in 0..args.frames {
        scripted_input(&mut engine, frame);
        let result = engine.run_frame(
            &mut |scene, driver| solar::update(&bodies, scene, driver),
            &mut renderer,
        );
        if let Err(err) = result {
            // A frame fault halts scheduling; there is no recovery.
            eprintln!("frame {frame} aborted: {err}");
            std::process::exit(1);
        }
    }

    info!(
        "Done: {} frames | driver {:.3} | {} comets live ({} pending, {} stalled) | paused: {}",
        engine.frame_count(),
        engine.clock().driver_value(),
        engine.pool().len(),
        engine.pool().pending_len(),
        engine.pool().stalled(),
        engine.clock().is_paused(),
    );
}
