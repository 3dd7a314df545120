//! gallery: run the target gallery engine without a renderer.
//!
//! Usage:
//!   gallery --seconds 30
//!   gallery --config gallery.toml --seed 7 --realtime

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use gallery_app::control;
use gallery_app::game_loop;
use gallery_app::state::AppState;
use gallery_core::commands::InputCommand;
use gallery_core::config::SceneConfig;
use gallery_core::constants::DISPLAY_REFRESH_HZ;
use gallery_core::state::FrameSnapshot;
use gallery_sim::engine::EngineConfig;

const DEFAULT_SECONDS: f64 = 30.0;
/// Longest session the CLI will run (one day).
const MAX_SECONDS: f64 = 86_400.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args
        .iter()
        .any(|a| matches!(a.as_str(), "help" | "--help" | "-h"))
    {
        print_usage();
        return;
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            process::exit(1);
        }
    };
    let seconds = match parse_seconds(&args) {
        Ok(seconds) => seconds,
        Err(err) => {
            log::error!("{err}");
            process::exit(1);
        }
    };
    let realtime = args.iter().any(|a| a == "--realtime");

    let snapshot = if realtime {
        match run_realtime(config, seconds) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("{err}");
                process::exit(1);
            }
        }
    } else {
        let frame_ms = 1000.0 / f64::from(DISPLAY_REFRESH_HZ);
        let frames = (seconds * f64::from(DISPLAY_REFRESH_HZ)) as u32;
        game_loop::run_headless(config, frames, frame_ms)
    };

    match serde_json::to_string_pretty(&snapshot.counters) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("failed to encode counters: {err}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "gallery: headless target gallery\n\
         \n\
         Options:\n\
         \n\
           --config <path>  Scene config TOML (optional, defaults otherwise)\n\
           --seed <N>       RNG seed (default: 42)\n\
           --seconds <S>    Session length in seconds (default: 30)\n\
           --realtime       Run the threaded loop on the wall clock\n\
         \n\
         Set RUST_LOG=debug to see spawns, exits and hits.\n"
    );
}

fn build_config(args: &[String]) -> Result<EngineConfig, String> {
    let scene = match flag_value(args, "--config").map(PathBuf::from) {
        Some(path) => SceneConfig::load(&path)
            .map_err(|e| format!("Failed to load {}: {e}", path.display()))?,
        None => SceneConfig::default(),
    };
    let mut config = EngineConfig {
        scene,
        ..Default::default()
    };
    if let Some(raw) = flag_value(args, "--seed") {
        config.seed = raw
            .parse()
            .map_err(|e| format!("Invalid --seed {raw:?}: {e}"))?;
    }
    Ok(config)
}

/// Start the threaded loop, let it run for `seconds` and stop it.
fn run_realtime(config: EngineConfig, seconds: f64) -> Result<FrameSnapshot, control::AppError> {
    let state = AppState::new();
    control::start_loop(&state, config)?;
    control::send_input(&state, InputCommand::StartSession)?;

    std::thread::sleep(Duration::from_secs_f64(seconds));

    let snapshot = control::latest_snapshot(&state)?.unwrap_or_default();
    control::stop_loop(&state)?;
    Ok(snapshot)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// `--seconds`, defaulting when absent. Must be a finite number in
/// `0..=MAX_SECONDS`.
fn parse_seconds(args: &[String]) -> Result<f64, String> {
    let Some(raw) = flag_value(args, "--seconds") else {
        return Ok(DEFAULT_SECONDS);
    };
    let seconds: f64 = raw
        .parse()
        .map_err(|e| format!("Invalid --seconds {raw:?}: {e}"))?;
    if !seconds.is_finite() || !(0.0..=MAX_SECONDS).contains(&seconds) {
        return Err(format!(
            "Invalid --seconds {raw:?}: must be between 0 and {MAX_SECONDS}"
        ));
    }
    Ok(seconds)
}
