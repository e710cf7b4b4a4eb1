use std::path::Path;

use console::style;
use miette::Result;
use tracing::debug;

use wireframe_renderer::context::{build_context, parse_data_pairs};
use wireframe_renderer::{HostConfig, RendererAdapter, Settings, ViewPaths};

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let file_settings = match &cli.config {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::default(),
    };
    let settings = apply_overrides(file_settings, &cli);

    let host = HostConfig::from_env()?;
    let view_paths = ViewPaths::wireframe(Path::new(&cli.root));
    debug!(root = %cli.root, "resolved view paths");

    let mut adapter = RendererAdapter::new(host, view_paths);
    adapter.initialize(&settings)?;

    let context = build_context(&parse_data_pairs(&cli.data));
    let output = adapter.render(&cli.view_type, &cli.view, &context)?;

    print!("{output}");
    if let Some(dir) = adapter.cache_dir() {
        eprintln!(
            "{} rendered {} ({})",
            style("✓").green().bold(),
            style(&cli.view).cyan(),
            style(dir.display()).dim()
        );
    }

    Ok(())
}

/// Layer command-line flags over settings loaded from the config file.
fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(cache) = &cli.cache {
        settings = settings.with_cache(cache);
    }
    if let Some(ext) = &cli.ext {
        settings = settings.with_ext(ext);
    }
    if cli.namespaces {
        settings = settings.with_namespaces(true);
    }
    settings
}
