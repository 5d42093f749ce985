use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "layercast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose an editor document onto its source image and write a PNG.
    Compose(ComposeArgs),
    /// Print the plain-language summary of a document's edits.
    Summary(SummaryArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Editor document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Full-resolution source image painted by the base layer.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for text layers, as `FAMILY=PATH` or just `PATH`. May be repeated.
    #[arg(long = "font")]
    fonts: Vec<String>,

    /// Canvas background (`#rrggbb`, `#rrggbbaa`, `rgb(..)` or a CSS name).
    #[arg(long, default_value = "white")]
    background: String,

    /// Worker threads for layer rendering (defaults to `LAYERCAST_THREADS`, then all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Always render layers, even for an unedited photo.
    #[arg(long)]
    no_fast_path: bool,

    /// Also print the edit summary.
    #[arg(long)]
    summary: bool,
}

#[derive(Parser, Debug)]
struct SummaryArgs {
    /// Editor document JSON.
    #[arg(long)]
    doc: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Summary(args) => cmd_summary(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<layercast::Scene> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read document '{}'", path.display()))?;
    let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
    let scene = layercast::Scene::from_json_str(&json, Some(assets_root))
        .with_context(|| format!("parse document '{}'", path.display()))?;
    Ok(scene)
}

fn load_fonts(entries: &[String]) -> anyhow::Result<layercast::FontBook> {
    let mut book = layercast::FontBook::new();
    for entry in entries {
        let (family, path) = match entry.split_once('=') {
            Some((family, path)) => (family.trim().to_owned(), PathBuf::from(path)),
            None => {
                let path = PathBuf::from(entry);
                let family = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("default")
                    .to_owned();
                (family, path)
            }
        };
        let bytes =
            std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))?;
        book.register(family, bytes);
    }
    Ok(book)
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.doc)?;

    let source = match &args.source {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("read source '{}'", path.display()))?;
            Some(layercast::decode_image(&bytes)?)
        }
        None => None,
    };

    let mut opts = layercast::ComposeOpts::from_env()?
        .with_background(layercast::parse_color(&args.background)?)
        .with_fast_path(!args.no_fast_path);
    if let Some(n) = args.threads {
        opts = opts.with_threads(n);
    }
    let fonts = load_fonts(&args.fonts)?;

    let composed = layercast::compose(&scene, source.as_ref(), &fonts, &opts)?;
    for w in &composed.warnings {
        eprintln!("warning: {w}");
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    composed
        .raster
        .to_rgba_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!(
        "wrote {} ({}x{}, scale factor {:.4})",
        args.out.display(),
        composed.raster.width,
        composed.raster.height,
        composed.scale_factor
    );
    if args.summary {
        println!("{}", layercast::describe_edits(&scene));
    }
    Ok(())
}

fn cmd_summary(args: SummaryArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.doc)?;
    println!("{}", layercast::describe_edits(&scene));
    Ok(())
}
