use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spriteclock::{
    ClockSource, CpuSurface, FixedClock, FrameRecords, FrameRGBA, HhMm, SequenceRecords,
    SpriteClockView, SystemClock, Track, ViewConfig, Viewport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spriteclock", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the view as it looks at one instant to a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Strip(StripArgs),
    /// Print a summary of the frame library and both tracks.
    Inspect(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Frame library JSON (list of frames, each a list of {color, geometry}).
    #[arg(long)]
    frames: PathBuf,

    /// Sequence JSON (up to two lists of frame indices: base, overlay).
    #[arg(long)]
    sequence: PathBuf,

    /// Optional view config JSON; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Time shown on the clock (HHMM); defaults to the local wall clock.
    #[arg(long)]
    time: Option<HhMm>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Milliseconds since the view started.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StripArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Length of the strip in milliseconds.
    #[arg(long)]
    duration_ms: u64,

    /// Directory receiving frame_00000.png, frame_00001.png, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Strip(args) => cmd_strip(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_to_string(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn load_view(input: &InputArgs) -> anyhow::Result<SpriteClockView> {
    let config = match &input.config {
        Some(path) => ViewConfig::from_json_str(&read_to_string(path, "config")?)?,
        None => ViewConfig::default(),
    };
    let frames = FrameRecords::from_json_str(&read_to_string(&input.frames, "frames")?)?;
    let sequences = SequenceRecords::from_json_str(&read_to_string(&input.sequence, "sequence")?)?;
    Ok(SpriteClockView::load(&frames, &sequences, config)?)
}

fn clock_source(time: Option<HhMm>) -> Box<dyn ClockSource> {
    match time {
        Some(t) => Box::new(FixedClock(t)),
        None => Box::new(SystemClock),
    }
}

fn render(
    view: &SpriteClockView,
    surface: &SurfaceArgs,
    clock: &dyn ClockSource,
) -> anyhow::Result<FrameRGBA> {
    let mut target = CpuSurface::new(surface.width, surface.height, view.config().background)?;
    let viewport = Viewport::new(f64::from(surface.width), f64::from(surface.height));
    let stats = view.render(&mut target, viewport, clock)?;
    tracing::debug!(?stats, "painted");
    Ok(target.finish())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut view = load_view(&args.input)?;
    view.advance_to(Duration::from_millis(args.at_ms));

    let clock = clock_source(args.surface.time);
    let frame = render(&view, &args.surface, clock.as_ref())?;
    write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let fps = u64::from(args.fps);
    let count = args
        .duration_ms
        .checked_mul(fps)
        .context("--duration-ms times --fps overflows")?
        / 1000;

    let mut view = load_view(&args.input)?;
    let clock = clock_source(args.surface.time);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut last: Option<FrameRGBA> = None;
    let mut rendered = 0u64;
    for i in 0..count {
        let at_ms = i
            .checked_mul(1000)
            .with_context(|| format!("timestamp of frame {i} overflows"))?
            / fps;
        let at = Duration::from_millis(at_ms);
        view.advance_to(at);

        let repaint = view.take_repaint();
        let frame = match last.take() {
            Some(prev) if !repaint => prev,
            _ => {
                rendered += 1;
                render(&view, &args.surface, clock.as_ref())?
            }
        };
        write_png(&args.out_dir.join(format!("frame_{i:05}.png")), &frame)?;
        last = Some(frame);
    }

    eprintln!(
        "wrote {count} frames ({rendered} repainted) to {}",
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_inspect(args: InputArgs) -> anyhow::Result<()> {
    let view = load_view(&args)?;
    let player = view.player();
    let animation = player.animation();

    let layers: usize = (0..animation.library.len())
        .filter_map(|i| animation.library.get(i))
        .map(|f| f.layers().len())
        .sum();
    println!(
        "frames: {} ({layers} layers)",
        animation.library.len()
    );

    for track in Track::ALL {
        let seq = animation.sequences.sequence(track);
        let period = view.config().track_period(track);
        let ticks = seq.len().max(1) as u32;
        let ending = match track {
            Track::Base => match seq.as_slice().last() {
                Some(idx) => format!("holds frame {idx}"),
                None => "never paints".to_owned(),
            },
            Track::Overlay => "vanishes".to_owned(),
        };
        println!(
            "{track}: {} entries, every {} ms, stops after {ticks} ticks ({} ms), then {ending}",
            seq.len(),
            period.as_millis(),
            (period * ticks).as_millis(),
        );
    }
    Ok(())
}
