//! Code generation commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum CodegenCommand {
    /// Regenerate gles/shaders.{h,cc} and khronos/gles2_stub.c
    Generate,

    /// Check that the generated sources are in sync with their inputs
    Check,
}

/// Inputs of both generators, relative to the project root.
struct Inputs {
    shader_manifest: PathBuf,
    entry_points: PathBuf,
    stub_templates: Vec<PathBuf>,
}

impl Inputs {
    fn new(root: &Path) -> Self {
        Self {
            shader_manifest: root.join("gles/shaders.toml"),
            entry_points: root.join("khronos/entry_points"),
            stub_templates: vec![root.join("khronos/gles2_stub.c.in")],
        }
    }
}

pub fn execute(root: &Path, command: CodegenCommand) -> Result<()> {
    let inputs = Inputs::new(root);
    match command {
        CodegenCommand::Generate => generate(&inputs),
        CodegenCommand::Check => check(&inputs),
    }
}

fn generate(inputs: &Inputs) -> Result<()> {
    println!("Generating shader bindings...");
    gles_gen::generate_shaders(&inputs.shader_manifest).with_context(|| {
        format!(
            "Failed to generate shader bindings from {}",
            inputs.shader_manifest.display()
        )
    })?;

    println!("Generating GLES stubs...");
    gles_gen::generate_stubs(&inputs.entry_points, &inputs.stub_templates).with_context(|| {
        format!(
            "Failed to generate stubs from {}",
            inputs.entry_points.display()
        )
    })?;

    println!("✓ Done!");
    Ok(())
}

fn check(inputs: &Inputs) -> Result<()> {
    println!("Checking generated sources are in sync...");

    let mut stale = gles_gen::check_shaders(&inputs.shader_manifest)?;
    stale.extend(gles_gen::check_stubs(
        &inputs.entry_points,
        &inputs.stub_templates,
    )?);

    if stale.is_empty() {
        println!("\n✓ All generated sources are in sync!");
        return Ok(());
    }

    for path in &stale {
        println!("✗ Out of sync: {}", path.display());
    }
    anyhow::bail!("Generated sources are out of sync. Run 'cargo xtask codegen generate' to regenerate.")
}
