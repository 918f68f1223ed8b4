use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clipline::{EditCommand, EngineOpts, Timeline, TimelineBoundary as _, TimelineEngine};

#[derive(Parser, Debug)]
#[command(name = "clipline", version)]
struct Cli {
    /// Log lane assignment and edit decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a payload and report whether it is valid.
    Validate(ValidateArgs),
    /// Decode a payload, assign missing audio lanes and write it back out.
    Normalize(NormalizeArgs),
    /// Apply a JSON list of edit commands to a payload.
    Edit(EditArgs),
    /// Print a bundled example payload.
    Example(ExampleArgs),
    /// Print the payload API description.
    ApiInfo,
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine options JSON (`clamp_audio_to_media`, `media_durations`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trust every audio duration even when the media length is known.
    #[arg(long, default_value_t = false)]
    no_clamp: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output payload path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON array of edit commands, e.g. `[{"op": "move", "id": "a3", ...}]`.
    #[arg(long)]
    edits: PathBuf,

    /// Output payload path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Parser, Debug)]
struct ExampleArgs {
    /// Which example to print.
    #[arg(value_enum, default_value_t = ExampleChoice::Demo)]
    which: ExampleChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExampleChoice {
    /// The widget's documented example (has a lane conflict).
    Widget,
    /// The interactive demo payload.
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Normalize(args) => cmd_normalize(args),
        Command::Edit(args) => cmd_edit(args),
        Command::Example(args) => cmd_example(args),
        Command::ApiInfo => print_json(&clipline::fixtures::api_info()),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn make_engine(args: &EngineArgs) -> anyhow::Result<TimelineEngine> {
    let mut opts = match &args.config {
        Some(path) => EngineOpts::from_path(path)?,
        None => EngineOpts::default(),
    };
    if args.no_clamp {
        opts.clamp_audio_to_media = false;
    }
    Ok(TimelineEngine::new(opts))
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let v = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON '{}'", path.display()))?;
    Ok(v)
}

fn load(engine: &TimelineEngine, path: &Path) -> anyhow::Result<Timeline> {
    let raw = read_json(path)?;
    let t = engine
        .decode(&raw)
        .with_context(|| format!("decode payload '{}'", path.display()))?;
    Ok(t)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let engine = make_engine(&args.engine)?;
    let t = load(&engine, &args.in_path)?;
    eprintln!(
        "ok: {} video clips, {} audio clips on {} lanes, ends at {}s",
        t.video().len(),
        t.audio().len(),
        t.lane_count(),
        t.end()
    );
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let engine = make_engine(&args.engine)?;
    let t = load(&engine, &args.in_path)?;
    write_output(&engine.encode(&t), args.out.as_deref())
}

fn cmd_edit(args: EditArgs) -> anyhow::Result<()> {
    let engine = make_engine(&args.engine)?;
    let t = load(&engine, &args.in_path)?;
    let cmds: Vec<EditCommand> = serde_json::from_value(read_json(&args.edits)?)
        .with_context(|| format!("parse edit commands '{}'", args.edits.display()))?;
    let edited = engine
        .apply_script(&t, &cmds)
        .context("apply edit commands")?;
    write_output(&engine.encode(&edited), args.out.as_deref())
}

fn cmd_example(args: ExampleArgs) -> anyhow::Result<()> {
    let v = match args.which {
        ExampleChoice::Widget => clipline::fixtures::widget_example(),
        ExampleChoice::Demo => clipline::fixtures::demo_example(),
    };
    print_json(&v)
}

fn print_json(v: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(v)?);
    Ok(())
}

fn write_output(v: &serde_json::Value, out: Option<&Path>) -> anyhow::Result<()> {
    let Some(out) = out else {
        return print_json(v);
    };
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(v)?;
    std::fs::write(out, text).with_context(|| format!("write payload '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
