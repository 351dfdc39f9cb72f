use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized theme configuration as JSON.
    Normalize(NormalizeArgs),
    /// Print resolved dimensions and layout for a viewport as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Theme directory containing `config.json`.
    #[arg(long)]
    theme: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Theme directory containing `config.json`.
    #[arg(long)]
    theme: PathBuf,

    /// Viewport width in pixels.
    #[arg(long)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long)]
    height: f64,

    /// Content images, mounted into areas 0, 1, ... in order.
    #[arg(long = "content")]
    content: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn theme_dir(path: &Path) -> anyhow::Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("resolve theme directory '{}'", path.display()))?;
    anyhow::ensure!(dir.is_dir(), "'{}' is not a directory", dir.display());
    Ok(dir)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let dir = theme_dir(&args.theme)?;
    let resolver = cardframe::FsResolver::new(&dir);

    let raw = cardframe::AssetResolver::fetch_json(&resolver, cardframe::THEME_CONFIG_FILE)
        .map(|v| cardframe::RawThemeDescriptor::from_value(&v))
        .unwrap_or_default();
    let config = cardframe::normalize(&raw, "");
    let warnings: Vec<String> = cardframe::check_conventions(&config)
        .iter()
        .map(ToString::to_string)
        .collect();

    print_json(&serde_json::json!({
        "config": config,
        "warnings": warnings,
    }))
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let dir = theme_dir(&args.theme)?;
    let viewport = cardframe::checked_rect(cardframe::Rect::new(0.0, 0.0, args.width, args.height))?;

    let mut contents = Vec::with_capacity(args.content.len());
    for (idx, path) in args.content.iter().enumerate() {
        let abs = path
            .canonicalize()
            .with_context(|| format!("resolve content image '{}'", path.display()))?;
        let area = u32::try_from(idx).context("too many content images")?;
        contents.push(cardframe::ContentItem::image(
            area,
            format!("file://{}", abs.display()),
            None,
        ));
    }

    let mut controller = cardframe::PresentationController::new(
        cardframe::Container::new("cli", viewport),
        Arc::new(cardframe::FsResolver::new(&dir)),
        Arc::new(cardframe::InlineMarkdown::capability()),
        cardframe::ControllerOptions::default(),
    )?;
    controller.configure(&cardframe::ConfigureOptions {
        theme_path: String::new(),
        contents,
    });

    print_json(&serde_json::json!({
        "dimensions": controller.dimensions(),
        "assets": controller.assets(),
        "layout": controller.layout(),
    }))
}
