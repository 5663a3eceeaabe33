use anyhow::{Context, Result};
use clap::Parser;
use codemap::{ColorTable, Style};
use rayon::prelude::*;
use std::{fs, io::IsTerminal, path::PathBuf};
use tracing_subscriber::EnvFilter;

use crate::convert::{convert_file, Outcome, SkipReason};
mod convert;
mod manifest;
mod walk;

#[derive(Parser)]
#[command(
    name = "codemap",
    version,
    about = "Transform your source files in codemap images"
)]
struct Cli {
    /// Folder containing the source files
    #[arg(short, long, default_value = ".")]
    input: PathBuf,
    /// Folder where the images and images.json are stored
    #[arg(short, long, default_value = "./codemap")]
    output: PathBuf,
    /// Built-in style to color tokens with (see --list-styles)
    #[arg(short, long, default_value = "default")]
    style: String,
    /// TOML style file, used instead of --style
    #[arg(long)]
    style_file: Option<PathBuf>,
    /// Number of files rendered in parallel (defaults to the number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Print debug output
    #[arg(short, long)]
    debug: bool,
    /// List the built-in styles and exit
    #[arg(long)]
    list_styles: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.list_styles {
        for name in Style::builtin_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let style = load_style(&cli)?;
    let colors = ColorTable::from_style(&style)
        .with_context(|| format!("invalid style {:?}", style.name))?;

    let files = walk::list_files(&cli.input, &cli.output)
        .with_context(|| format!("cannot read input {}", cli.input.display()))?;
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("cannot create output {}", cli.output.display()))?;
    tracing::debug!(files = files.len(), style = %style.name, "starting");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs.unwrap_or(0))
        .build()?;
    let outcomes: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|file| {
                tracing::debug!(file = %file.display(), "processing file");
                convert_file(file, &cli.input, &cli.output, &colors)
            })
            .collect()
    });

    let mut images = Vec::new();
    let mut failed = 0;
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(Outcome::Written {
                image,
                width,
                height,
            }) => {
                tracing::debug!(file = %file.display(), width, height, "size");
                images.push(image);
            }
            Ok(Outcome::Skipped(SkipReason::NoLexer)) => {
                tracing::warn!(file = %file.display(), "cannot find lexer");
            }
            Ok(Outcome::Skipped(SkipReason::Empty)) => {
                tracing::info!(file = %file.display(), "image is empty");
            }
            Err(err) => {
                failed += 1;
                tracing::error!(file = %file.display(), "{err:#}");
            }
        }
    }

    let manifest = manifest::write(&cli.output, &images)?;
    tracing::info!(
        images = images.len(),
        manifest = %manifest.display(),
        "wrote codemaps"
    );

    if failed > 0 {
        anyhow::bail!("{failed} of {} files failed", files.len());
    }
    Ok(())
}

fn load_style(cli: &Cli) -> Result<Style> {
    let Some(path) = &cli.style_file else {
        return Ok(Style::by_name(&cli.style)?);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read style file {}", path.display()))?;
    let mut style: Style = toml::from_str(&text)
        .with_context(|| format!("cannot parse style file {}", path.display()))?;
    if style.name.is_empty() {
        style.name = path.display().to_string();
    }
    Ok(style)
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
