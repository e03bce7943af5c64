mod app;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr; redirect with 2> when the alternate screen is up.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: emberpane <profile.json | stacks.folded>");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let graph = emberpane_core::model::parse_auto(&data)
        .with_context(|| format!("parsing {}", path.display()))?;

    tracing::debug!(
        frames = graph.frames.len(),
        duration = graph.duration(),
        "loaded frame graph"
    );

    app::run(graph)
}
