use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use raylib::prelude::*;
use tracing::{Level, info, warn};

mod balloon;
mod config;
mod constants;
mod engine;
mod error;
mod ffmpeg;
mod fireworks;
mod panel;
mod state;
mod texture_loader;

use crate::balloon::engine::{BalloonEngine, EngineOptions};
use crate::balloon::motion::Viewport;
use crate::config::Config;
use crate::constants::*;
use crate::engine::Engine;
use crate::error::BalloonError;
use crate::ffmpeg::Ffmpeg;
use crate::texture_loader::collect_image_paths;

#[derive(Parser, Debug)]
#[command(name = "balloons", version, about = "Photos floating around the screen in balloons")]
struct Cli {
    /// Image files, or directories scanned for png/jpg/jpeg/bmp/gif.
    images: Vec<PathBuf>,

    /// Number of balloons.
    #[arg(long, default_value_t = BALLOON_COUNT)]
    count: usize,

    /// Disable firework bursts.
    #[arg(long)]
    no_fireworks: bool,

    /// Hide the toggle button and info panel.
    #[arg(long)]
    no_panel: bool,

    /// Record the animation to an MP4 (requires `ffmpeg` on PATH). Uses a fixed timestep.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Seed for a reproducible scene.
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = Config::default()
        .with_balloon_count(cli.count)
        .validate()
        .context("invalid balloon settings")?;

    let paths = collect_image_paths(&cli.images);
    if paths.is_empty() {
        warn!("no images given, balloons will use placeholder fills");
    }

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Balloons")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let viewport = Viewport::new(RENDER_WIDTH as f32, RENDER_HEIGHT as f32);
    let options = EngineOptions {
        fireworks: !cli.no_fireworks,
        panel: !cli.no_panel,
        seed: cli.seed,
    };
    let mut engine = BalloonEngine::new(config, viewport, options);
    engine
        .initialize(&mut rl, &thread, paths)
        .context("failed to build the balloon scene")?;
    let stop = engine.stop_handle();

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| BalloonError::texture(format!("failed to create render texture: {}", e)))?;

    let mut recorder = cli
        .record
        .as_deref()
        .map(|output| Ffmpeg::new(RENDER_WIDTH, RENDER_HEIGHT, FPS, output))
        .transpose()?;

    // --- Main Loop ---
    let mut frame: u64 = 0;
    while !rl.window_should_close() {
        // Recordings advance timers by a fixed step, live playback by the real frame time
        let dt = if recorder.is_some() { FRAME_TIME } else { rl.get_frame_time() };

        if !engine.render_frame(dt, &mut rl, &thread, &mut framebuffer) {
            break;
        }

        // Draw vertically flipped copy of the framebuffer letterboxed into the window
        {
            let mut d = rl.begin_drawing(&thread);
            let sw = d.get_screen_width() as f32;
            let sh = d.get_screen_height() as f32;

            d.clear_background(Color::BLACK);
            d.draw_texture_pro(
                &framebuffer,
                Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
                viewport.letterbox(sw, sh),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }

        if let Some(ffmpeg) = recorder.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| BalloonError::recording(format!("failed to read back frame {}: {}", frame, e)))?;
            ffmpeg.write(&image)?;
        }

        frame += 1;
        if cli.frames.is_some_and(|limit| frame >= limit) {
            stop.stop();
        }
    }

    // Closes the ffmpeg pipe and waits for the encoder
    drop(recorder);
    info!(frames = frame, "done");
    Ok(())
}
