use std::path::PathBuf;

use clap::Parser;
use pairs_core::{Coord, Difficulty, Seconds};
use serde::Serialize;

mod player;
mod presenter;
mod runner;
mod settings;

use player::Strategy;
use presenter::LogPresenter;
use runner::{RoundReport, Summary};
use settings::SimSettings;

/// Plays memory rounds headless on a virtual clock and reports how they went.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with session settings, overridden by any flag below
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board preset: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    /// Round time in seconds
    #[arg(short, long)]
    time: Option<Seconds>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many rounds to play
    #[arg(short = 'n', long)]
    rounds: Option<u32>,

    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Virtual milliseconds between picks
    #[arg(long)]
    think_ms: Option<u64>,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> anyhow::Result<SimSettings> {
        let mut settings = match &self.config {
            Some(path) => SimSettings::load(path)?,
            None => SimSettings::default(),
        };

        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty;
        }
        settings.rows = self.rows.or(settings.rows);
        settings.cols = self.cols.or(settings.cols);
        settings.total_time = self.time.or(settings.total_time);
        settings.seed = self.seed.or(settings.seed);
        if let Some(rounds) = self.rounds {
            settings.rounds = rounds;
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(think_ms) = self.think_ms {
            settings.think_ms = think_ms;
        }
        Ok(settings)
    }
}

#[derive(Serialize)]
struct Output<'a> {
    rounds: &'a [RoundReport],
    summary: Summary,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = args.settings()?;
    log::debug!("settings: {:?}", settings);

    let mut presenter = LogPresenter::new(settings.catalog()?);
    let reports = runner::run_session(&settings, &mut presenter)?;
    let summary = Summary::from_reports(&reports);
    log::debug!("{} notifications presented", presenter.notices());

    if args.json {
        let output = Output {
            rounds: &reports,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for report in &reports {
        println!(
            "round {}: {:?} after {} moves, {}/{} pairs, {}s left",
            report.round,
            report.finish,
            report.moves,
            report.matches_found,
            report.pairs_needed,
            report.remaining_time
        );
    }
    println!(
        "{} rounds: {} won, {} timed out, {} abandoned",
        summary.rounds, summary.won, summary.timed_out, summary.abandoned
    );
    if let (Some(best), Some(average)) = (summary.best_moves, summary.average_moves) {
        println!("best {} moves, average {:.1}", best, average);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "pairs-sim",
            "-d",
            "medium",
            "--time",
            "30",
            "-n",
            "4",
            "--strategy",
            "random",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.total_time, Some(30));
        assert_eq!(settings.rounds, 4);
        assert_eq!(settings.strategy, Strategy::Random);
        assert_eq!(settings.round_config().unwrap().pairs_needed(), 6);
    }
}
