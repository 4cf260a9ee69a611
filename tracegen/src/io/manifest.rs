//! Session manifest: everything needed to reproduce and audit a drawing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::line::{Line, Termination};
use crate::core::types::Point;
use crate::io::config::GeneratorConfig;
use crate::session::Generation;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionManifest {
    pub seed: u64,
    pub trunk_length: u32,
    /// Effective config; its `seed` field is cleared in favour of `seed`.
    pub config: GeneratorConfig,
    pub lines: Vec<LineRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineRecord {
    pub kind: String,
    pub termination: Option<Termination>,
    pub steps_taken: u32,
    pub max_steps: u32,
    pub start: Point,
    pub end: Point,
    pub path: Vec<Point>,
}

impl LineRecord {
    pub fn from_line(line: &Line) -> Self {
        Self {
            kind: line.kind().label().to_string(),
            termination: line.termination(),
            steps_taken: line.steps_taken(),
            max_steps: line.max_steps(),
            start: line.path().first().copied().unwrap_or(Point::ORIGIN),
            end: line.position(),
            path: line.path().to_vec(),
        }
    }
}

impl SessionManifest {
    pub fn new(generation: &Generation, config: &GeneratorConfig) -> Self {
        Self {
            seed: generation.seed,
            trunk_length: generation.trunk_length,
            config: GeneratorConfig {
                seed: None,
                ..config.clone()
            },
            lines: generation.lines.iter().map(LineRecord::from_line).collect(),
        }
    }

    /// First line index whose path differs from `generation`, if any.
    pub fn first_mismatch(&self, generation: &Generation) -> Option<usize> {
        let replayed: Vec<LineRecord> = generation.lines.iter().map(LineRecord::from_line).collect();
        if let Some(index) = self
            .lines
            .iter()
            .zip(&replayed)
            .position(|(recorded, replayed)| recorded != replayed)
        {
            return Some(index);
        }
        if self.lines.len() != replayed.len() {
            return Some(self.lines.len().min(replayed.len()));
        }
        None
    }
}

pub fn write_manifest(path: &Path, manifest: &SessionManifest) -> Result<()> {
    debug!(path = %path.display(), seed = manifest.seed, lines = manifest.lines.len(), "writing manifest");
    let mut buf = serde_json::to_string_pretty(manifest).context("serialize manifest")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

pub fn load_manifest(path: &Path) -> Result<SessionManifest> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
    let manifest: SessionManifest = serde_json::from_str(&contents)
        .with_context(|| format!("parse manifest {}", path.display()))?;
    Ok(manifest)
}
