//! CLI for the docs-mirror tool.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use docs_mirror::diff::{self, DiffSummary};
use docs_mirror::prelude::*;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docs-mirror")]
#[command(author, version, about = "Mirror upstream documentation sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check out, patch, build and assemble every project
    Run {
        /// Project list (JSON, or YAML by extension)
        #[arg(short, long, default_value = "fastly.json")]
        config: PathBuf,

        /// Directory holding the repository checkouts
        #[arg(long, default_value = "repos")]
        repos: PathBuf,

        /// Directory receiving the assembled sites
        #[arg(long, default_value = "build")]
        build: PathBuf,

        /// Only process these projects (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Use existing checkouts without fetching
        #[arg(long)]
        no_sync: bool,
    },

    /// Apply one project's patch steps to its existing checkout
    Patch {
        /// Project name from the config
        name: String,

        #[arg(short, long, default_value = "fastly.json")]
        config: PathBuf,

        #[arg(long, default_value = "repos")]
        repos: PathBuf,

        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
    },

    /// Regenerate the landing page
    Index {
        #[arg(short, long, default_value = "fastly.json")]
        config: PathBuf,

        #[arg(long, default_value = "build")]
        build: PathBuf,
    },

    /// Show available patch operations
    Patchers,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            repos,
            build,
            only,
            no_sync,
        } => cmd_run(config, repos, build, only, no_sync),
        Commands::Patch {
            name,
            config,
            repos,
            dry_run,
        } => cmd_patch(name, config, repos, dry_run),
        Commands::Index { config, build } => cmd_index(config, build),
        Commands::Patchers => cmd_patchers(),
    }
}

fn load(config: &Path) -> Result<MirrorConfig> {
    MirrorConfig::load(config)
        .with_context(|| format!("Failed to load config {}", config.display()))
}

fn cmd_run(
    config: PathBuf,
    repos: PathBuf,
    build: PathBuf,
    only: Vec<String>,
    no_sync: bool,
) -> Result<()> {
    let full = load(&config)?;
    let selected = full.select(&only)?;

    let mut pipeline = Pipeline::new(repos, build);
    if no_sync {
        pipeline = pipeline.skip_sync();
    }

    for (name, project) in selected.iter() {
        let outcome = pipeline
            .run_project(name, project)
            .with_context(|| format!("Project {} failed", name))?;
        outcome.patches.write_patched(&mut io::stdout())?;
    }

    // The landing page always lists every configured project.
    docs_mirror::site::write_index(&full, pipeline.build_dir())
        .context("Failed to write landing page")?;
    Ok(())
}

fn cmd_patch(name: String, config: PathBuf, repos: PathBuf, dry_run: bool) -> Result<()> {
    let config = load(&config)?;
    let project = config
        .get(&name)
        .ok_or_else(|| anyhow!("Unknown project: {}", name))?;

    let pipeline = Pipeline::new(repos, "build");
    let report = pipeline
        .patch(&name, project, dry_run)
        .with_context(|| format!("Patching {} failed", name))?;

    if dry_run {
        println!("{}", diff::render_all(&report.changes, true));
        println!("\n{}", DiffSummary::from_changes(&report.changes));
    } else {
        report.write_patched(&mut io::stdout())?;
        println!("{} file(s) patched", report.written.len());
    }
    Ok(())
}

fn cmd_index(config: PathBuf, build: PathBuf) -> Result<()> {
    let config = load(&config)?;
    docs_mirror::site::write_index(&config, &build).context("Failed to write landing page")?;
    Ok(())
}

fn cmd_patchers() -> Result<()> {
    let registry = PatchRegistry::new();
    println!("Available patchers:");
    for (name, aliases) in registry.names() {
        if aliases.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {} (aliases: {})", name, aliases.join(", "));
        }
    }
    Ok(())
}
