use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "framestack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a single frame and write it as a PNG.
    Frame(FrameArgs),
    /// List the attachments active at a frame.
    Active(ActiveArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Source image (any format `image` can decode).
    #[arg(long)]
    image: PathBuf,

    /// Attachments JSON (array of `{ startFrame, endFrame, resource }`).
    #[arg(long)]
    attachments: Option<PathBuf>,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Viewport size as `WIDTHxHEIGHT`; defaults to the image size.
    #[arg(long)]
    size: Option<String>,

    /// Device pixels per viewport pixel.
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Which surface to read the result from.
    #[arg(long, value_enum, default_value_t = Target::Screen)]
    target: Target,
}

#[derive(Parser, Debug)]
struct ActiveArgs {
    /// Attachments JSON.
    #[arg(long)]
    attachments: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Screen,
    Offscreen,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Active(args) => cmd_active(args),
    }
}

fn read_attachments(path: &Path) -> anyhow::Result<Vec<framestack::Attachment>> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read attachments '{}'", path.display()))?;
    Ok(framestack::attachments_from_json_str(&s)
        .with_context(|| format!("parse attachments '{}'", path.display()))?)
}

fn parse_size(s: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("size '{s}' must be WIDTHxHEIGHT"))?;
    Ok((
        w.trim().parse().with_context(|| format!("bad width in '{s}'"))?,
        h.trim().parse().with_context(|| format!("bad height in '{s}'"))?,
    ))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let decoded = image::open(&args.image)
        .with_context(|| format!("decode image '{}'", args.image.display()))?
        .to_rgba8();
    let source = framestack::DrawableImage::from_rgba_image(decoded);

    let attachments = match &args.attachments {
        Some(p) => read_attachments(p)?,
        None => Vec::new(),
    };

    let (width, height) = match &args.size {
        Some(s) => parse_size(s)?,
        None => (source.width(), source.height()),
    };

    let opts = framestack::CompositorOpts::default().with_pixel_ratio(args.pixel_ratio);
    let mut compositor = framestack::Compositor::new(width, height, opts)?;

    let dest = match args.target {
        Target::Screen => framestack::Destination::Screen,
        Target::Offscreen => framestack::Destination::Offscreen,
    };
    let outcome = compositor.draw_to(
        &source,
        &attachments,
        framestack::FrameIndex(args.frame),
        dest,
    )?;

    let frame = compositor.read_back(outcome.destination);
    let img = frame.to_rgba_image()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} passes, presented: {})",
        args.out.display(),
        outcome.passes,
        outcome.presented
    );
    Ok(())
}

fn cmd_active(args: ActiveArgs) -> anyhow::Result<()> {
    let attachments = read_attachments(&args.attachments)?;
    let frame = framestack::FrameIndex(args.frame);
    for (i, a) in attachments.iter().enumerate() {
        if a.is_active(frame) {
            println!(
                "{i}\t{}\t{}..={}\t{}",
                a.track.kind(),
                a.start_frame,
                a.end_frame,
                a.track.routine_name()
            );
        }
    }
    Ok(())
}
