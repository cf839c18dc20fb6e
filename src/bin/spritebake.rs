use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spritebake", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bake an image-sequence model into sprite assets.
    Bake(BakeArgs),
    /// Validate a bake manifest without writing anything.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct BakeArgs {
    /// Input bake manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the manifest's output asset root.
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// Log per-frame progress.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input bake manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Bake(args) => cmd_bake(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_bake(args: BakeArgs) -> anyhow::Result<()> {
    init_logging(args.verbose);

    let mut manifest = spritebake::BakeManifest::from_path(&args.in_path)
        .with_context(|| format!("load manifest '{}'", args.in_path.display()))?;
    if let Some(root) = args.out_root {
        manifest.options.output.asset_root = root;
    }
    manifest.validate()?;
    let views = manifest.resolve_views()?;

    let mut model = spritebake::ImageSequenceModel::new(manifest.model.clone());
    let mut camera = manifest.camera.clone();
    let mut extractor = spritebake::SequenceExtractor::new(manifest.model.root.clone());
    let mut shadow = spritebake::ShadowRig::default();
    let packing = &manifest.options.packing;
    let mut packer = spritebake::ShelfPacker::new(packing.padding, packing.max_size);
    let mut persistence = spritebake::FsPersistence;
    let mut progress = spritebake::TracingProgress::new();
    let clock = spritebake::SystemClock::new();

    let report = spritebake::bake(
        &mut model,
        &mut camera,
        &views,
        &manifest.options,
        spritebake::BakeServices {
            extractor: &mut extractor,
            shadow: &mut shadow,
            packer: &mut packer,
            persistence: &mut persistence,
            progress: &mut progress,
            materials: &spritebake::StandardMaterialBuilder::default(),
            templates: &spritebake::SpriteRendererBinder,
            clock: &clock,
        },
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encode bake report")?
    );
    match report.status {
        spritebake::BakeStatus::Failed(reason) => anyhow::bail!("bake failed: {reason}"),
        spritebake::BakeStatus::Cancelled => anyhow::bail!("bake cancelled"),
        spritebake::BakeStatus::Finished => Ok(()),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let manifest = spritebake::BakeManifest::from_path(&args.in_path)
        .with_context(|| format!("load manifest '{}'", args.in_path.display()))?;
    manifest.validate()?;
    let views = manifest.resolve_views()?;
    eprintln!(
        "ok: '{}' from {} views, {} frames each",
        manifest.model.name,
        views.len(),
        manifest.model.sampler.frame_count()
    );
    Ok(())
}
