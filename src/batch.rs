use std::path::Path;

use anyhow::Context;
use creature_battle_core::engine::{simulate_battle, BattleReport};
use creature_battle_core::sim::{BattleConfig, BattleInfo, BattleOutcome};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

/// Per-battle seeds drawn from one master seed, so a run is reproducible
/// regardless of how rayon schedules it.
pub fn battle_seeds(seed: u64, sims: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..sims).map(|_| rng.gen()).collect()
}

/// Runs `sims` independent battles in parallel. Only the first battle keeps
/// its protocol log when `keep_first_log` is set.
pub fn run_batch(
    info: &BattleInfo,
    config: &BattleConfig,
    sims: usize,
    seed: u64,
    keep_first_log: bool,
) -> anyhow::Result<Vec<BattleReport>> {
    battle_seeds(seed, sims)
        .par_iter()
        .enumerate()
        .map(|(index, battle_seed)| {
            let config = BattleConfig {
                seed: *battle_seed,
                ..config.clone()
            };
            simulate_battle(info, config, keep_first_log && index == 0)
                .with_context(|| format!("battle {index} (seed {battle_seed}) failed to load"))
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub battles: usize,
    pub wins: [usize; 2],
    pub draws: usize,
    pub fled: usize,
    pub caught: usize,
    pub average_turns: f64,
    /// Side 0 win rate, counting draws as half.
    pub win_rate: f64,
}

impl Summary {
    pub fn from_reports(reports: &[BattleReport]) -> Self {
        let mut summary = Summary {
            battles: reports.len(),
            ..Summary::default()
        };
        let mut turns = 0u64;
        for report in reports {
            turns += report.turns as u64;
            match report.outcome {
                BattleOutcome::Won(bank) => summary.wins[bank] += 1,
                BattleOutcome::Draw => summary.draws += 1,
                BattleOutcome::Fled => summary.fled += 1,
                BattleOutcome::Caught(_) => summary.caught += 1,
            }
        }
        if !reports.is_empty() {
            let total = reports.len() as f64;
            summary.average_turns = turns as f64 / total;
            summary.win_rate = (summary.wins[0] as f64 + 0.5 * summary.draws as f64) / total;
        }
        summary
    }
}

fn outcome_label(outcome: BattleOutcome) -> String {
    match outcome {
        BattleOutcome::Won(bank) => format!("won_{bank}"),
        BattleOutcome::Draw => "draw".to_string(),
        BattleOutcome::Fled => "fled".to_string(),
        BattleOutcome::Caught(_) => "caught".to_string(),
    }
}

fn survivors(report: &BattleReport, bank: usize) -> usize {
    report.parties[bank]
        .iter()
        .filter(|member| member.hp != Some(0))
        .count()
}

pub fn write_csv(reports: &[BattleReport], path: &Path) -> anyhow::Result<()> {
    let mut out = String::from("seed,outcome,turns,survivors_0,survivors_1");
    for report in reports {
        out.push_str(&format!(
            "\n{},{},{},{},{}",
            report.seed,
            outcome_label(report.outcome),
            report.turns,
            survivors(report, 0),
            survivors(report, 1)
        ));
    }
    out.push('\n');
    std::fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn write_json(summary: &Summary, reports: &[BattleReport], path: &Path) -> anyhow::Result<()> {
    let value = serde_json::json!({
        "summary": summary,
        "battles": reports,
    });
    let raw = serde_json::to_string_pretty(&value)?;
    std::fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_stable() {
        assert_eq!(battle_seeds(7, 4), battle_seeds(7, 4));
        assert_ne!(battle_seeds(7, 4), battle_seeds(8, 4));
        assert_eq!(battle_seeds(7, 0).len(), 0);
    }

    #[test]
    fn empty_summary() {
        let summary = Summary::from_reports(&[]);
        assert_eq!(summary.battles, 0);
        assert_eq!(summary.win_rate, 0.0);
    }
}
