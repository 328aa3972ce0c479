use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use monospan::prelude::*;

/// Span-buffer software renderer for 1-bit displays.
#[derive(Parser, Debug)]
#[command(name = "monospan", version, about)]
struct Args {
    /// Wavefront OBJ file to display. Defaults to a built-in icosahedron.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Visibility algorithm.
    #[arg(long, value_enum, default_value_t = RasterizerType::SpanBuffer)]
    rasterizer: RasterizerType,

    /// Integer window magnification.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Ordered-dither matrix size (power of two).
    #[arg(long, default_value_t = 8)]
    dither: usize,

    /// Disable backface culling.
    #[arg(long)]
    no_cull: bool,

    /// Disable the black outline at span ends.
    #[arg(long)]
    no_outline: bool,

    /// Render without a window and write the last frame to `--output`.
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// PNG path for headless output.
    #[arg(long, default_value = "out.png")]
    output: PathBuf,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            dither_size: self.dither,
            rasterizer: self.rasterizer,
            backface_culling: !self.no_cull,
            outline_edges: !self.no_outline,
            ..RenderConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut engine = Engine::new(args.render_config()).context("invalid render configuration")?;

    let model = match &args.model {
        Some(path) => Model::load(&ObjLoader, path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Model::new(Mesh::icosahedron()),
    };
    info!("model `{}`: {} triangles", model.name(), model.mesh().triangle_count());
    engine.add_model(model);
    engine.camera_mut().set_position(Vec3::new(0.0, 1.0, 5.0));
    engine.camera_mut().look_at(Vec3::ZERO);

    if args.headless {
        run_headless(&mut engine, &args)
    } else {
        run_windowed(&mut engine, &args)
    }
}

fn run_headless(engine: &mut Engine, args: &Args) -> Result<()> {
    let input = InputState::default();
    for frame in 0..args.frames.max(1) {
        engine.update(1.0 / FPS as f32, &input);
        let stats = engine.render_frame();
        info!("frame {frame}: {stats:?}");
    }
    engine
        .framebuffer()
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}

fn run_windowed(engine: &mut Engine, args: &Args) -> Result<()> {
    let config = engine.config().clone();
    let mut window = Window::new("monospan", config.width, config.height, args.scale)
        .map_err(anyhow::Error::msg)?;
    let mut limiter = FrameLimiter::new(&window);
    let mut shown_rasterizer = None;

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::KeyPressed(key) => engine.handle_key(key),
            }
        }

        if shown_rasterizer != Some(engine.rasterizer()) {
            shown_rasterizer = Some(engine.rasterizer());
            window
                .set_title(&format!("monospan ({})", engine.rasterizer()))
                .map_err(anyhow::Error::msg)?;
        }

        let delta_time = limiter.wait_and_get_delta(&window);
        let input = window.input_state();
        engine.update(delta_time, &input);
        engine.render_frame();
        window
            .present(engine.framebuffer())
            .map_err(anyhow::Error::msg)?;
    }

    Ok(())
}
