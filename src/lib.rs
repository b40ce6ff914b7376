pub mod batch;

use std::path::{Path, PathBuf};

use anyhow::Context;
use creature_battle_core::sim::{BattleConfig, BattleInfo, BattleLogic};
use serde::Deserialize;
use tracing::info;

use crate::batch::{run_batch, write_csv, write_json, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub battle_path: PathBuf,
    pub sims: usize,
    pub seed: u64,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    /// Protocol log of the first battle.
    pub log_path: Option<PathBuf>,
}

/// Battle description plus engine settings, as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct BattleFile {
    #[serde(flatten)]
    pub info: BattleInfo,
    #[serde(default)]
    pub config: BattleConfig,
}

pub fn load_battle(path: &Path) -> anyhow::Result<BattleFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read battle file at {}", path.display()))?;
    let parsed: BattleFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    BattleLogic::new(&parsed.info, parsed.config.clone())
        .with_context(|| format!("Invalid battle in {}", path.display()))?;
    Ok(parsed)
}

pub fn run(opts: CliOptions) -> anyhow::Result<Summary> {
    if opts.sims == 0 {
        anyhow::bail!("--sims must be > 0");
    }
    let battle = load_battle(&opts.battle_path)?;
    let reports = run_batch(&battle.info, &battle.config, opts.sims, opts.seed, opts.log_path.is_some())?;
    let summary = Summary::from_reports(&reports);
    match opts.format {
        OutputFormat::Csv => write_csv(&reports, &opts.output_path)?,
        OutputFormat::Json => write_json(&summary, &reports, &opts.output_path)?,
    }
    if let (Some(path), Some(first)) = (&opts.log_path, reports.first()) {
        let value = serde_json::json!({
            "seed": first.seed,
            "p1": battle.info.sides[0].name,
            "p2": battle.info.sides[1].name,
            "log": first.log,
        });
        std::fs::write(path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("Failed to write log to {}", path.display()))?;
    }
    info!(
        battles = summary.battles,
        wins_0 = summary.wins[0],
        wins_1 = summary.wins[1],
        draws = summary.draws,
        output = %opts.output_path.display(),
        "batch finished"
    );
    Ok(summary)
}
