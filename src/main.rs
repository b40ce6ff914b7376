use std::env;
use std::path::PathBuf;

use creature_battle_runner::{run, CliOptions, OutputFormat};
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: creature-battle-runner [--battle battle.json] [--sims N] [--seed SEED] [--output results.csv] \
[--format csv|json] [--log first_battle.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut battle_path = PathBuf::from("battles/sample.json");
    let mut sims = 100usize;
    let mut seed = 0u64;
    let mut output_path = PathBuf::from("results.csv");
    let mut format = OutputFormat::Csv;
    let mut log_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--battle" => {
                battle_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--battle requires a path (e.g. --battle battles/sample.json)")
                })?;
            }
            "--sims" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims requires a number"))?;
                sims = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--output" => {
                output_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output results.csv)")
                })?;
            }
            "--format" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--format requires csv or json"))?;
                format = match val.to_ascii_lowercase().as_str() {
                    "csv" => OutputFormat::Csv,
                    "json" => OutputFormat::Json,
                    other => anyhow::bail!("Unknown format {other} (use csv or json)"),
                };
            }
            "--log" => {
                log_path = Some(
                    args.next()
                        .map(PathBuf::from)
                        .ok_or_else(|| anyhow::anyhow!("--log requires a path"))?,
                );
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        battle_path,
        sims,
        seed,
        output_path,
        format,
        log_path,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let opts = parse_args()?;
    let summary = run(opts)?;
    println!(
        "{} battles: side 0 won {}, side 1 won {}, {} draws (win rate {:.4})",
        summary.battles, summary.wins[0], summary.wins[1], summary.draws, summary.win_rate
    );
    Ok(())
}
