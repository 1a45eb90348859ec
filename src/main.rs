use std::time::{Duration, Instant};

use tracing_subscriber::filter::EnvFilter;

mod audio;
mod catalog;
mod config;
mod feeding;
mod game;
mod gui;
mod input_system;
mod interaction;
mod randomizer;
mod render;
mod scene;
mod scheduler;
mod settings;
mod text;
mod textures;
mod win_sequence;

use audio::SdlAudio;
use config::{default_data_dir, ConfigStore, FileStore};
use game::{LoopControl, SceneController};
use input_system::InputSystem;
use render::Renderer;
use scene::{GAME_HEIGHT, GAME_WIDTH};
use textures::TextureBank;

const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Logs to stderr; `RUST_LOG` overrides the default `info` level
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Calculate the best window scale based on monitor size
fn calculate_window_scale(video_subsystem: &sdl2::VideoSubsystem) -> u32 {
    match video_subsystem.desktop_display_mode(0) {
        Ok(display_mode) => {
            // Leave 10% margin for taskbars/decorations
            let usable_w = (display_mode.w as f32 * 0.9) as i32;
            let usable_h = (display_mode.h as f32 * 0.9) as i32;

            let scale = (usable_w / GAME_WIDTH as i32).min(usable_h / GAME_HEIGHT as i32);
            scale.clamp(2, 6) as u32
        }
        Err(e) => {
            tracing::warn!("Could not detect monitor size ({}), using 2x scale", e);
            2
        }
    }
}

/// Opens the configuration file store, falling back to `./saves`
fn open_store() -> Result<FileStore, String> {
    let dir = default_data_dir();
    FileStore::new(&dir)
        .or_else(|e| {
            tracing::warn!("Cannot use {}: {}; falling back to ./saves", dir.display(), e);
            FileStore::new("./saves")
        })
        .map_err(|e| format!("Failed to open configuration store: {}", e))
}

fn main() -> Result<(), String> {
    init_logging();

    // Touches are handled as touches; don't let SDL also turn them into clicks
    sdl2::hint::set("SDL_TOUCH_MOUSE_EVENTS", "0");

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window_scale = calculate_window_scale(&video_subsystem);
    let window_width = GAME_WIDTH * window_scale;
    let window_height = GAME_HEIGHT * window_scale;
    tracing::info!("Monitor scale: {}x (window: {}x{})", window_scale, window_width, window_height);

    let window = video_subsystem
        .window("Feed the Animals", window_width, window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // Set logical size for automatic pixel-perfect scaling
    canvas.set_logical_size(GAME_WIDTH, GAME_HEIGHT).map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut textures = TextureBank::load(&texture_creator);
    let mut event_pump = sdl_context.event_pump()?;

    // The game stays playable without sound
    let audio_subsystem = match sdl_context.audio() {
        Ok(subsystem) => Some(subsystem),
        Err(e) => {
            tracing::warn!("Audio unavailable: {}", e);
            None
        }
    };

    let mut game = SceneController::new(
        ConfigStore::new(open_store()?),
        SdlAudio::new(audio_subsystem),
        rand::thread_rng(),
    );
    game.load();
    tracing::info!("Showing {:?}", game.config().active_animals);

    let mut input = InputSystem::new();
    let renderer = Renderer::new();

    'running: loop {
        input.update_context(&game.ui_state());
        for action in input.poll_events(&mut event_pump) {
            if game.handle_action(action, Instant::now()) == LoopControl::Quit {
                break 'running;
            }
        }

        let now = Instant::now();
        game.update(now);

        renderer.render(&mut canvas, &mut textures, &game, now)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(FRAME_TIME);
    }

    tracing::info!("Goodbye");
    Ok(())
}
