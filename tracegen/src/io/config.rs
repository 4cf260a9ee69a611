//! Generator configuration stored as TOML (default `tracegen.toml`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::{Bounds, GrowthRules};

/// Generator configuration (TOML).
///
/// Every section is optional; missing fields fall back to a 600x600 canvas
/// with a 5-unit lattice and 15 secondary lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed. A fresh one is drawn (and reported) when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub canvas: CanvasConfig,
    pub growth: GrowthConfig,
    pub trunk: TrunkConfig,
    pub secondary: SecondaryConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: i64,
    pub height: i64,
    /// Lattice step; every move is a multiple of it.
    pub step: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrowthConfig {
    /// Probability a free-phase draw requests a branch.
    pub p_branch: f64,
    /// Probability a free-phase draw starts an orthogonal block.
    pub p_orth: f64,
    /// Leading diagonal-only steps per line.
    pub start_phase: u32,
    pub orth_block_len: u32,
    /// Remaining budget needed before a branch request is honoured.
    pub min_branch_remaining: u32,
    pub branch_bonus: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrunkConfig {
    /// Stop the trunk once either coordinate reaches this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_at: Option<i64>,
    pub max_steps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecondaryConfig {
    pub count: u32,
    /// Steps subtracted from the trunk length to form each budget.
    pub budget_margin: u32,
    /// Extra random margin in `0..=margin_jitter`, drawn per line.
    pub margin_jitter: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub background: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub marker_radius: f64,
    pub marker_stroke_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            step: 5,
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            p_branch: 0.01,
            p_orth: 0.01,
            start_phase: 10,
            orth_block_len: 5,
            min_branch_remaining: 10,
            branch_bonus: 5,
        }
    }
}

impl Default for TrunkConfig {
    fn default() -> Self {
        Self {
            stop_at: Some(300),
            max_steps: 100_000,
        }
    }
}

impl Default for SecondaryConfig {
    fn default() -> Self {
        Self {
            count: 15,
            budget_margin: 5,
            margin_jitter: 0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            stroke: "black".to_string(),
            stroke_width: 2.0,
            marker_radius: 5.0,
            marker_stroke_width: 1.0,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas.width <= 0 || self.canvas.height <= 0 {
            return Err(anyhow!("canvas width and height must be > 0"));
        }
        if self.canvas.step <= 0 {
            return Err(anyhow!("canvas.step must be > 0"));
        }
        for (name, value) in [
            ("growth.p_branch", self.growth.p_branch),
            ("growth.p_orth", self.growth.p_orth),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{name} must be within [0, 1], got {value}"));
            }
        }
        if self.growth.p_branch + self.growth.p_orth > 1.0 {
            return Err(anyhow!("growth.p_branch + growth.p_orth must not exceed 1"));
        }
        if self.growth.start_phase == 0 {
            return Err(anyhow!("growth.start_phase must be > 0"));
        }
        if self.growth.orth_block_len == 0 {
            return Err(anyhow!("growth.orth_block_len must be > 0"));
        }
        if self.trunk.max_steps == 0 {
            return Err(anyhow!("trunk.max_steps must be > 0"));
        }
        if let Some(stop_at) = self.trunk.stop_at
            && stop_at < 0
        {
            return Err(anyhow!("trunk.stop_at must be >= 0"));
        }
        for (name, value) in [
            ("render.stroke_width", self.render.stroke_width),
            ("render.marker_radius", self.render.marker_radius),
            ("render.marker_stroke_width", self.render.marker_stroke_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{name} must be a finite value >= 0"));
            }
        }
        if self.render.background.trim().is_empty() || self.render.stroke.trim().is_empty() {
            return Err(anyhow!("render colours must be non-empty"));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas.width, self.canvas.height)
    }

    pub fn growth_rules(&self) -> GrowthRules {
        GrowthRules {
            step: self.canvas.step,
            bounds: self.bounds(),
            start_phase: self.growth.start_phase,
            orth_block_len: self.growth.orth_block_len,
            min_branch_remaining: self.growth.min_branch_remaining,
            branch_bonus: self.growth.branch_bonus,
            p_branch: self.growth.p_branch,
            p_orth: self.growth.p_orth,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GeneratorConfig::default()`.
pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    if !path.exists() {
        let cfg = GeneratorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GeneratorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GeneratorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
