use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{info, warn};

mod app;
mod gui;
mod input;
mod text;

use app::App;
use input::InputSystem;
use unlucky::config::GameConfig;
use unlucky::resource::ResourceManager;
use unlucky::rng::GameRng;
use unlucky::save::SaveManager;
use unlucky::Game;

// Logical resolution; SDL scales it to the window
const GAME_WIDTH: u32 = 400;
const GAME_HEIGHT: u32 = 240;

/// Slot loaded on startup and written on quit
const DEFAULT_SLOT: u8 = 1;

/// Longest frame fed to the game, so a stall doesn't skip animations
const MAX_FRAME_TIME: f32 = 0.1;

/// Unlucky, a luck-based turn-based RPG
#[derive(Parser, Debug)]
#[command(name = "unlucky")]
#[command(author, version, about = "Unlucky - every hit is a coin flip", long_about = None)]
struct Args {
    /// Asset directory (items, moves, maps)
    #[arg(short = 'a', long = "assets")]
    assets: Option<PathBuf>,

    /// Seed for every random roll in the session
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Config file
    #[arg(short = 'c', long = "config", default_value = "assets/config.json")]
    config: PathBuf,

    /// Window scale, overrides the config and monitor detection
    #[arg(long = "scale")]
    scale: Option<u32>,

    /// Save directory
    #[arg(long = "save-dir")]
    save_dir: Option<PathBuf>,

    /// Start a new game even if a save exists
    #[arg(long = "new-game")]
    new_game: bool,
}

/// Largest window scale that fits the monitor, capped by the configured scale
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem, preferred: u32) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let max_scale_w = usable_w / GAME_WIDTH as i32;
            let max_scale_h = usable_h / GAME_HEIGHT as i32;
            let fits = max_scale_w.min(max_scale_h).max(1) as u32;

            preferred.min(fits)
        }
        Err(e) => {
            warn!("Could not detect monitor size ({}), using {}x scale", e, preferred);
            preferred
        }
    }
}

fn load_or_new_game(
    saves: &SaveManager,
    resources: ResourceManager,
    rng: GameRng,
    config: &GameConfig,
    new_game: bool,
) -> Game {
    if new_game || !saves.save_exists(DEFAULT_SLOT) {
        info!("Starting a new game");
        return Game::new(resources, rng, config.text_speed);
    }
    match saves.load_game(DEFAULT_SLOT) {
        Ok(save) => {
            info!("Loaded save slot {}", DEFAULT_SLOT);
            Game::from_save(resources, rng, save, config.text_speed)
        }
        Err(e) => {
            warn!("Could not load save slot {} ({}), starting a new game", DEFAULT_SLOT, e);
            Game::new(resources, rng, config.text_speed)
        }
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = GameConfig::load(&args.config).map_err(|e| e.to_string())?;
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.assets.is_some() {
        config.asset_dir = args.assets;
    }
    if args.save_dir.is_some() {
        config.save_dir = args.save_dir;
    }
    config.validate().map_err(|e| e.to_string())?;

    let asset_dir = config.asset_dir.clone().unwrap_or_else(|| PathBuf::from("assets"));
    let resources = ResourceManager::load(&asset_dir)
        .map_err(|e| format!("Failed to load assets from {}: {}", asset_dir.display(), e))?;

    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!("Session seed: {}", rng.seed());

    // Save system
    let save_dir = config.save_dir.clone().unwrap_or_else(SaveManager::default_dir);
    let mut saves =
        SaveManager::new(&save_dir).map_err(|e| format!("Failed to create save manager: {}", e))?;
    saves.set_save_slot(DEFAULT_SLOT);
    let autosave = config.autosave_interval();
    if let Some(interval) = autosave {
        saves.set_autosave_interval(interval);
    }

    let game = load_or_new_game(&saves, resources, rng, &config, args.new_game);
    let mut app = App::new(game, saves, autosave.is_some());

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window_scale = calculate_window_scale(&video_subsystem, config.scale);
    let window_width = GAME_WIDTH * window_scale;
    let window_height = GAME_HEIGHT * window_scale;
    info!("Window scale: {}x ({}x{})", window_scale, window_width, window_height);

    let window = video_subsystem
        .window("Unlucky", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas_builder = window.into_canvas();
    if config.vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let mut canvas = canvas_builder.build().map_err(|e| e.to_string())?;

    // Set logical size for automatic pixel-perfect scaling
    canvas.set_logical_size(GAME_WIDTH, GAME_HEIGHT).map_err(|e| e.to_string())?;

    video_subsystem.text_input().start();
    let mut event_pump = sdl_context.event_pump()?;
    let mut input = InputSystem::new();

    let mut last_frame = Instant::now();
    'running: loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_TIME);
        last_frame = now;

        input.context = app.input_context();
        for action in input.poll_events(&mut event_pump) {
            app.handle(action);
            if !app.is_running() {
                break 'running;
            }
        }

        app.update(dt);
        app.render(&mut canvas)?;

        if !config.vsync {
            // Cap framerate to ~60 FPS
            std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
        }
    }

    info!("Goodbye");
    Ok(())
}
