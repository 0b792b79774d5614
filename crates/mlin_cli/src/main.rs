use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mlin_core::{codec, raster, Channels, Color, PixelBuffer, Scene, Sphere, Style};
use mlin_math::Vec3;
use mlin_renderer::{Camera, RenderConfig};

/// Sphere ray tracer and 2D drawing toolkit
#[derive(Parser, Debug)]
#[command(name = "mlin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ray trace a sphere scene to an image
    Render(RenderArgs),
    /// Draw the rasterization test card
    Shapes(ShapesArgs),
    /// Print the dimensions of an image file
    Info {
        /// Image to inspect
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Channels per pixel (3 or 4)
    #[arg(long, default_value_t = 4)]
    channels: u8,
}

impl Target {
    fn allocate(&self) -> Result<PixelBuffer> {
        let channels = Channels::try_from(self.channels)?;
        PixelBuffer::new(self.width, self.height, channels)
            .with_context(|| format!("allocating {}x{} image", self.width, self.height))
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON scene file; the built-in three-sphere scene is used when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    #[command(flatten)]
    target: Target,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Trace rows on all cores
    #[arg(long)]
    parallel: bool,

    /// Ignore intersections behind the ray origin
    #[arg(long)]
    front_hits_only: bool,
}

#[derive(Args, Debug)]
struct ShapesArgs {
    #[command(flatten)]
    target: Target,

    /// Output image path
    #[arg(short, long, default_value = "shapes.png")]
    output: PathBuf,
}

/// The scene the tracer ships with: three spheres of increasing reflectivity.
fn demo_scene() -> Scene {
    vec![
        Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::rgb(255, 0, 0)).with_reflectivity(0.5),
        Sphere::new(Vec3::new(2.0, 0.0, 4.0), 1.0, Color::rgb(0, 0, 255)).with_reflectivity(0.3),
        Sphere::new(Vec3::new(-2.0, 0.0, 4.0), 1.0, Color::rgb(0, 255, 0)).with_reflectivity(0.7),
    ]
    .into()
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let scene = match &args.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => demo_scene(),
    };

    let mut buffer = args.target.allocate()?;
    let camera = Camera::default();
    let config = RenderConfig {
        allow_negative_t: !args.front_hits_only,
        ..RenderConfig::default()
    };

    log::info!(
        "Rendering {} spheres at {}x{}{}",
        scene.len(),
        buffer.width(),
        buffer.height(),
        if args.parallel { " (parallel)" } else { "" }
    );

    let stats = if args.parallel {
        mlin_renderer::render_parallel(&mut buffer, &scene, &camera, &config)
    } else {
        mlin_renderer::render(&mut buffer, &scene, &camera, &config)
    };
    log::info!("Traced {} pixels in {:.2?}", stats.pixels, stats.elapsed);

    save(&buffer, &args.output)
}

/// Lines, rectangles and circles in both styles on a light background.
fn draw_shapes(buffer: &mut PixelBuffer) {
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;

    buffer.clear(Color::rgb(240, 240, 240));

    // Diagonals under the frame
    raster::draw_line(buffer, 0, 0, w - 1, h - 1, Color::rgb(128, 128, 128));
    raster::draw_line(buffer, w - 1, 0, 0, h - 1, Color::rgb(128, 128, 128));
    raster::draw_rect(buffer, 0, 0, w, h, Color::BLACK, Style::Outlined);

    let r = w.min(h) / 8;
    raster::draw_rect(buffer, w / 8, h / 8, w / 4, h / 4, Color::rgb(255, 0, 0), Style::Filled);
    raster::draw_rect(buffer, w * 5 / 8, h / 8, w / 4, h / 4, Color::rgb(0, 0, 255), Style::Outlined);
    raster::draw_circle(buffer, w / 4, h * 3 / 4, r, Color::rgb(0, 160, 0), Style::Filled);
    raster::draw_circle(buffer, w * 3 / 4, h * 3 / 4, r, Color::rgb(160, 0, 160), Style::Outlined);
}

fn run_shapes(args: &ShapesArgs) -> Result<()> {
    let mut buffer = args.target.allocate()?;
    draw_shapes(&mut buffer);
    save(&buffer, &args.output)
}

fn run_info(path: &Path) -> Result<()> {
    let buffer = codec::load(path).with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "{}: {}x{}, {} channels",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels().count()
    );
    Ok(())
}

fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    codec::save(buffer, path).with_context(|| format!("saving {}", path.display()))?;
    log::info!("Saved {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => run_render(args),
        Command::Shapes(args) => run_shapes(args),
        Command::Info { path } => run_info(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_defaults() {
        let cli = Cli::parse_from(["mlin", "render"]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!((args.target.width, args.target.height, args.target.channels), (800, 600, 4));
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert!(!args.parallel);
        assert!(!args.front_hits_only);
    }

    #[test]
    fn test_bad_channel_count() {
        let target = Target {
            width: 4,
            height: 4,
            channels: 2,
        };
        assert!(target.allocate().is_err());
    }

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = demo_scene();
        assert_eq!(scene.len(), 3);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_render_and_info_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("render.png");
        let args = RenderArgs {
            scene: None,
            target: Target {
                width: 32,
                height: 24,
                channels: 4,
            },
            output: output.clone(),
            parallel: true,
            front_hits_only: false,
        };
        run_render(&args).unwrap();
        run_info(&output).unwrap();

        let loaded = codec::load(&output).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (32, 24));
    }

    #[test]
    fn test_shapes_draws_frame() {
        let mut buffer = PixelBuffer::new(64, 48, Channels::Rgb).unwrap();
        draw_shapes(&mut buffer);
        assert_eq!(buffer.get(0, 0), Color::BLACK);
        assert_eq!(buffer.get(63, 47), Color::BLACK);
        assert_eq!(buffer.get(8 + 1, 6 + 1), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_missing_scene_reports_path() {
        let args = RenderArgs {
            scene: Some(PathBuf::from("/nonexistent/scene.json")),
            target: Target {
                width: 4,
                height: 4,
                channels: 3,
            },
            output: PathBuf::from("unused.png"),
            parallel: false,
            front_hits_only: false,
        };
        let err = run_render(&args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scene.json"));
    }
}
