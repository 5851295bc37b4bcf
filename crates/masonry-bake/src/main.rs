//! `masonry-bake` entry point.
//!
//! Bakes `content.md` into `index.html` in the given directory (default:
//! the current directory). File names can be overridden in `bake.toml`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use masonry_bake::config::{BakeConfig, CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(about = "Bake a markdown content plan into the board page")]
struct Args {
    /// Directory holding the content plan and the page.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Config file (defaults to `bake.toml` in the directory, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report whether the page would change without writing it.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| Ok(BakeConfig::from_toml(&text)?))
            .with_context(|| format!("loading {}", path.display()))?,
        None => BakeConfig::load_or_default(&args.dir.join(CONFIG_FILE))?,
    };

    let plan = config.plan_path(&args.dir);
    let page = config.page_path(&args.dir);
    let outcome = masonry_bake::bake_files(&plan, &page, args.dry_run)
        .with_context(|| format!("baking {}", args.dir.display()))?;
    log::debug!(
        "Plan covered {} cards (changed: {})",
        outcome.cards,
        outcome.changed
    );
    Ok(())
}
