//! Seeded generative line drawing.
//!
//! Reads `tracegen.toml` (or defaults), grows a trunk and its secondary lines
//! on a shared lattice, and writes the result as SVG.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracegen::core::invariants::validate_lines;
use tracegen::io::config::{GeneratorConfig, load_config, write_config};
use tracegen::io::manifest::{SessionManifest, load_manifest, write_manifest};
use tracegen::io::svg::write_svg;
use tracegen::logging;
use tracegen::session::{Generation, generate};
use tracing::info;

const DEFAULT_CONFIG: &str = "tracegen.toml";
const DEFAULT_OUTPUT: &str = "output.svg";

#[derive(Parser)]
#[command(
    name = "tracegen",
    version,
    about = "Seeded generative line drawing on a lattice"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grow a drawing and write it as SVG.
    Generate {
        /// Config file; defaults are used if it does not exist.
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Seed override (takes precedence over the config's seed).
        #[arg(short, long)]
        seed: Option<u64>,
        /// SVG output path.
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        /// Also write a JSON manifest of every line.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
    /// Write the default config file.
    Init {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Load and validate a config file.
    Check {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Regenerate a manifest's drawing and confirm every path matches.
    Replay {
        /// Manifest written by `generate --manifest`.
        manifest: PathBuf,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            config,
            seed,
            out,
            manifest,
        } => cmd_generate(&config, seed, &out, manifest.as_deref()),
        Command::Init { config, force } => cmd_init(&config, force),
        Command::Check { config } => cmd_check(&config),
        Command::Replay { manifest } => cmd_replay(&manifest),
    }
}

fn cmd_generate(
    config_path: &Path,
    seed: Option<u64>,
    out: &Path,
    manifest_path: Option<&Path>,
) -> Result<()> {
    let cfg = load_config(config_path)?;
    let generation = generate_checked(&cfg, seed)?;

    write_svg(out, &generation.lines, &cfg.canvas, &cfg.render)
        .with_context(|| format!("write {}", out.display()))?;
    if let Some(path) = manifest_path {
        write_manifest(path, &SessionManifest::new(&generation, &cfg))
            .with_context(|| format!("write {}", path.display()))?;
    }
    info!(
        seed = generation.seed,
        lines = generation.lines.len(),
        out = %out.display(),
        "drawing written"
    );

    println!("wrote {}", out.display());
    println!("seed: {}", generation.seed);
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if !force && config_path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &GeneratorConfig::default())?;
    println!("wrote {}", config_path.display());
    Ok(())
}

fn cmd_check(config_path: &Path) -> Result<()> {
    let cfg = load_config(config_path)?;
    println!(
        "ok: {}x{} canvas, step {}, {} secondaries",
        cfg.canvas.width, cfg.canvas.height, cfg.canvas.step, cfg.secondary.count
    );
    Ok(())
}

fn cmd_replay(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let generation = generate_checked(&manifest.config, Some(manifest.seed))?;
    if let Some(index) = manifest.first_mismatch(&generation) {
        bail!(
            "replay of seed {} diverges at line {}",
            manifest.seed,
            index
        );
    }
    println!(
        "replay ok: seed {}, {} lines",
        manifest.seed,
        manifest.lines.len()
    );
    Ok(())
}

/// Run a session and reject any drawing that breaks a lattice invariant.
fn generate_checked(cfg: &GeneratorConfig, seed: Option<u64>) -> Result<Generation> {
    let generation = generate(cfg.clone(), seed)?;
    let errors = validate_lines(&generation.lines, cfg.bounds(), cfg.canvas.step);
    if !errors.is_empty() {
        bail!(
            "invariant violations (seed {}):\n- {}",
            generation.seed,
            errors.join("\n- ")
        );
    }
    Ok(generation)
}
