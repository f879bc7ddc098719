use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reel", version)]
struct Cli {
    /// Log evaluation spans and summaries to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and print its state as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and print one JSON line per frame.
    Frames(FramesArgs),
    /// Print the timed highlight segmentation of a scene.
    Segments(SegmentsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the scene duration.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluation chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SegmentsArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Segments(args) => cmd_segments(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<reel::Scene> {
    let file = reel::SceneFile::from_path(path)?;
    let scene = file
        .build()
        .with_context(|| format!("build scene '{}'", path.display()))?;
    Ok(scene)
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn std::io::Write>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = std::fs::File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let state = scene.eval_frame(reel::FrameIndex(args.frame))?;

    let mut w = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut w, &state).context("write frame state")?;
    writeln!(w)?;
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let end = args.end.unwrap_or(scene.duration());
    let range = reel::FrameRange::new(reel::FrameIndex(args.start), reel::FrameIndex(end))?;
    let threading = reel::EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let states = reel::eval_frames(&scene, range, &threading)?;

    let mut w = open_output(args.out.as_deref())?;
    for state in &states {
        serde_json::to_writer(&mut w, state).context("write frame state")?;
        writeln!(w)?;
    }
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {} frames to {}", states.len(), out.display());
    }
    Ok(())
}

fn cmd_segments(args: SegmentsArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let segments = scene.segments().with_context(|| {
        format!(
            "scene '{}' is not a text_highlight scene",
            args.in_path.display()
        )
    })?;

    let mut w = open_output(None)?;
    serde_json::to_writer_pretty(&mut w, segments).context("write segments")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
