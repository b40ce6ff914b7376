use std::fs;

use creature_battle_runner::batch::{run_batch, Summary};
use creature_battle_runner::{load_battle, run, CliOptions, OutputFormat};
use tempfile::tempdir;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/battles/sample.json");

fn options(dir: &std::path::Path, format: OutputFormat) -> CliOptions {
    CliOptions {
        battle_path: SAMPLE.into(),
        sims: 8,
        seed: 3,
        output_path: dir.join("out"),
        format,
        log_path: None,
    }
}

#[test]
fn sample_battle_loads() {
    let battle = load_battle(SAMPLE.as_ref()).unwrap();
    assert_eq!(battle.info.sides[0].party.len(), 3);
    assert_eq!(battle.config.max_turns, 200);
    assert!(battle.config.allow_flee);
}

#[test]
fn unknown_species_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"sides":[{"name":"a","party":[{"species":"missingno","moves":["tackle"]}]},
                     {"name":"b","party":[{"species":"pidgey","moves":["tackle"]}]}]}"#,
    )
    .unwrap();
    let err = load_battle(&path).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("bad.json"), "{chain}");
    assert!(chain.contains("missingno"), "{chain}");
}

#[test]
fn csv_has_one_row_per_battle() {
    let dir = tempdir().unwrap();
    let opts = options(dir.path(), OutputFormat::Csv);
    let summary = run(opts.clone()).unwrap();
    assert_eq!(summary.battles, 8);
    assert_eq!(
        summary.wins[0] + summary.wins[1] + summary.draws + summary.fled + summary.caught,
        8
    );
    let csv = fs::read_to_string(&opts.output_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("seed,outcome,turns,survivors_0,survivors_1"));
    assert_eq!(lines.count(), 8);
}

#[test]
fn json_output_and_log() {
    let dir = tempdir().unwrap();
    let mut opts = options(dir.path(), OutputFormat::Json);
    opts.log_path = Some(dir.path().join("log.json"));
    run(opts.clone()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&opts.output_path).unwrap()).unwrap();
    assert_eq!(value["summary"]["battles"], 8);
    assert_eq!(value["battles"].as_array().map(Vec::len), Some(8));

    let log: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("log.json")).unwrap()).unwrap();
    assert_eq!(log["p1"], "Red");
    let lines = log["log"].as_array().unwrap();
    assert!(lines.iter().any(|line| *line == "|turn|1"));
}

#[test]
fn batches_are_reproducible() {
    let battle = load_battle(SAMPLE.as_ref()).unwrap();
    let a = run_batch(&battle.info, &battle.config, 6, 11, false).unwrap();
    let b = run_batch(&battle.info, &battle.config, 6, 11, false).unwrap();
    let outcomes = |reports: &[creature_battle_core::engine::BattleReport]| {
        reports.iter().map(|r| (r.seed, r.outcome, r.turns)).collect::<Vec<_>>()
    };
    assert_eq!(outcomes(&a), outcomes(&b));
    assert_eq!(Summary::from_reports(&a), Summary::from_reports(&b));
}

#[test]
fn zero_sims_is_rejected() {
    let dir = tempdir().unwrap();
    let mut opts = options(dir.path(), OutputFormat::Csv);
    opts.sims = 0;
    assert!(run(opts).is_err());
}
