use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "trails", version)]
struct Cli {
    /// Log engine diagnostics to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the animation for a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Run the animation and write every tick as a numbered PNG.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// SVG path data to animate along.
    #[arg(long)]
    path_data: Option<String>,

    /// SVG document; its first path is used.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Text to animate along (requires --font).
    #[arg(long, requires = "font")]
    text: Option<String>,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Font file used with --text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Surface width in logical units.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Surface height in logical units.
    #[arg(long, default_value_t = 240.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Option string, e.g. "speed=4, color='#f00,#0f0'".
    #[arg(long, conflicts_with = "config")]
    options: Option<String>,

    /// JSON config file (kebab-case keys).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for palette color picks.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of update ticks to run.
    #[arg(long, default_value_t = 60)]
    ticks: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(scene: &SceneArgs) -> anyhow::Result<trails::TrailsConfig> {
    if let Some(path) = &scene.config {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        return Ok(trails::TrailsConfig::from_json_str(&json)?);
    }
    match &scene.options {
        Some(options) => Ok(trails::parse_options(options)?),
        None => Ok(trails::TrailsConfig::default()),
    }
}

fn build_engine(scene: &SceneArgs) -> anyhow::Result<trails::Trails<trails::PixmapSurface>> {
    let config = read_config(scene)?;
    let surface = trails::PixmapSurface::new(scene.width, scene.height, scene.dpr);

    let engine = if let Some(d) = &scene.source.path_data {
        trails::Trails::new(trails::OutlineSource::PathData(d.clone()), surface, config)?
    } else if let Some(path) = &scene.source.svg {
        let svg = std::fs::read_to_string(path)
            .with_context(|| format!("read svg '{}'", path.display()))?;
        trails::Trails::from_svg(&svg, surface, config)?
    } else if let Some(text) = &scene.source.text {
        let font = scene
            .font
            .clone()
            .context("--text requires --font")?;
        trails::Trails::from_text(text, &trails::FontSource::File(font), surface, config)?
    } else {
        anyhow::bail!("one of --path-data, --svg or --text is required");
    };

    Ok(match scene.seed {
        Some(seed) => engine.with_rng_seed(seed),
        None => engine,
    })
}

fn write_png(surface: &trails::PixmapSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface
        .to_rgba_image()
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut engine = build_engine(&args.scene)?;
    for _ in 0..args.scene.ticks {
        engine.update();
    }
    write_png(engine.surface(), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut engine = build_engine(&args.scene)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for tick in 0..args.scene.ticks {
        engine.update();
        let out = args.out_dir.join(format!("frame_{tick:05}.png"));
        write_png(engine.surface(), &out)?;
    }

    eprintln!(
        "wrote {} frames to {}",
        args.scene.ticks,
        args.out_dir.display()
    );
    Ok(())
}
