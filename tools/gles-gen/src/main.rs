//! gles-gen CLI
//!
//! Without templates, generates the shader bindings from the shader manifest.
//! With one or more `*.in` templates, generates OpenGL ES stubs into them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "gles-gen")]
#[command(about = "Generate GLES shader bindings or OpenGL ES stubs", long_about = None)]
struct Cli {
    /// Directory the other paths are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Shader manifest (used when no templates are given)
    #[arg(long, default_value = "gles/shaders.toml")]
    shaders: PathBuf,

    /// Entry point declarations (used with templates)
    #[arg(long, default_value = "entry_points")]
    entry_points: PathBuf,

    /// Fail if generated files are out of date instead of writing them
    #[arg(long)]
    check: bool,

    /// `*.in` templates to fill with stubs
    templates: Vec<PathBuf>,
}

fn main() -> Result<()> {
    // Quiet by default: a successful run prints nothing.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if cli.templates.is_empty() {
        let manifest = cli.root.join(&cli.shaders);
        if cli.check {
            ensure_fresh(gles_gen::check_shaders(&manifest)?)
        } else {
            gles_gen::generate_shaders(&manifest)
                .with_context(|| format!("Failed to generate shaders from {}", manifest.display()))
        }
    } else {
        let entry_points = cli.root.join(&cli.entry_points);
        let templates: Vec<PathBuf> = cli.templates.iter().map(|t| cli.root.join(t)).collect();
        if cli.check {
            ensure_fresh(gles_gen::check_stubs(&entry_points, &templates)?)
        } else {
            gles_gen::generate_stubs(&entry_points, &templates).with_context(|| {
                format!("Failed to generate stubs from {}", entry_points.display())
            })
        }
    }
}

fn ensure_fresh(stale: Vec<PathBuf>) -> Result<()> {
    if stale.is_empty() {
        return Ok(());
    }
    let list = stale
        .iter()
        .map(|path| format!("  {}", path.display()))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::bail!("Generated files are out of date:\n{list}\nRun gles-gen without --check to regenerate.");
}
