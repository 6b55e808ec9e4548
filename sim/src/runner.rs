use std::time::Duration;

use anyhow::Context;
use pairs_core::*;
use serde::Serialize;

use crate::player::Player;
use crate::presenter::render_board;
use crate::settings::SimSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    Won,
    TimedOut,
    /// Player ran out of cards to pick before the round ended.
    Abandoned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub config: RoundConfig,
    pub finish: Finish,
    pub moves: u32,
    pub matches_found: usize,
    pub pairs_needed: usize,
    pub remaining_time: Seconds,
    /// Cards still face down when the round ended.
    pub hidden_cards: usize,
    pub elapsed_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub rounds: usize,
    pub won: usize,
    pub timed_out: usize,
    pub abandoned: usize,
    pub best_moves: Option<u32>,
    pub average_moves: Option<f64>,
}

impl Summary {
    pub fn from_reports(reports: &[RoundReport]) -> Self {
        let count = |finish: Finish| reports.iter().filter(|r| r.finish == finish).count();
        let winning_moves: Vec<u32> = reports
            .iter()
            .filter(|r| r.finish == Finish::Won)
            .map(|r| r.moves)
            .collect();
        let average_moves = (!winning_moves.is_empty()).then(|| {
            winning_moves.iter().map(|&m| f64::from(m)).sum::<f64>() / winning_moves.len() as f64
        });

        Self {
            rounds: reports.len(),
            won: count(Finish::Won),
            timed_out: count(Finish::TimedOut),
            abandoned: count(Finish::Abandoned),
            best_moves: winning_moves.iter().copied().min(),
            average_moves,
        }
    }
}

/// Plays a started round to the end, letting `think` of virtual time pass before every pick.
pub fn play_round<B: DeckBuilder>(
    controller: &mut RoundController<VirtualClock, B>,
    player: &mut dyn Player,
    presenter: &mut dyn Presenter,
    think: Duration,
) -> anyhow::Result<RoundReport> {
    player.reset();
    let mut abandoned = false;

    loop {
        controller.flush(presenter);
        if controller.phase().is_finished() {
            break;
        }

        controller.scheduler_mut().advance(think);
        controller.run_due();
        if controller.phase().is_finished() || controller.is_locked() {
            continue;
        }

        let faces = controller.board().faces();
        player.observe(&faces);
        let Some(index) = player.choose(&faces, controller.state().selected_first) else {
            abandoned = true;
            break;
        };
        controller.select_card(index);
        player.observe(&controller.board().faces());
    }
    controller.flush(presenter);

    let snapshot = controller.snapshot();
    snapshot
        .validate()
        .with_context(|| format!("round {} ended inconsistent", snapshot.round))?;

    let finish = match snapshot.phase {
        RoundPhase::Won => Finish::Won,
        RoundPhase::TimedOut => Finish::TimedOut,
        _ => {
            debug_assert!(abandoned);
            Finish::Abandoned
        }
    };

    Ok(RoundReport {
        round: snapshot.round,
        config: snapshot.config,
        finish,
        moves: snapshot.state.moves,
        matches_found: snapshot.state.matches_found,
        pairs_needed: snapshot.config.pairs_needed(),
        remaining_time: snapshot.state.remaining_time,
        hidden_cards: snapshot.hidden_count(),
        elapsed_ms: snapshot.elapsed_ms,
    })
}

/// Plays `settings.rounds` rounds on one controller, restarting it between rounds.
pub fn run_session(
    settings: &SimSettings,
    presenter: &mut dyn Presenter,
) -> anyhow::Result<Vec<RoundReport>> {
    anyhow::ensure!(settings.rounds > 0, "at least one round is required");

    let config = settings.round_config()?;
    let catalog = settings.catalog()?;
    let deck_builder = match settings.seed {
        Some(seed) => RandomDeckBuilder::new(seed),
        None => RandomDeckBuilder::from_entropy(),
    };
    let mut controller = RoundController::new(config, catalog, deck_builder, VirtualClock::new())
        .context("setting up the round")?;
    let mut player = settings.strategy.player(settings.seed);
    let think = settings.think_time();

    let mut reports = Vec::with_capacity(settings.rounds as usize);
    for round in 0..settings.rounds {
        if round == 0 {
            controller.start();
        } else {
            controller.restart().context("restarting the round")?;
        }

        let report = play_round(&mut controller, player.as_mut(), presenter, think)?;
        log::debug!(
            "Final board:\n{}",
            render_board(controller.board(), controller.catalog())
        );
        reports.push(report);
    }

    let (clock, _) = controller.teardown();
    log::trace!("{} tasks left after teardown", clock.pending());
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PerfectMemory, Strategy};

    #[test]
    fn perfect_player_wins_every_easy_round() {
        let settings = SimSettings {
            seed: Some(42),
            rounds: 3,
            ..Default::default()
        };

        let reports = run_session(&settings, &mut NullPresenter).unwrap();

        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.round, i as u32 + 1);
            assert_eq!(report.finish, Finish::Won);
            assert_eq!(report.matches_found, 3);
            assert!(report.moves >= 3);
            assert!(report.remaining_time > 0);
            assert_eq!(report.hidden_cards, 0);
        }

        let summary = Summary::from_reports(&reports);
        assert_eq!(summary.won, 3);
        assert_eq!(summary.timed_out, 0);
        assert!(summary.best_moves.is_some());
    }

    #[test]
    fn slow_random_player_times_out() {
        let settings = SimSettings {
            seed: Some(3),
            total_time: Some(2),
            strategy: Strategy::Random,
            think_ms: 800,
            ..Default::default()
        };

        let reports = run_session(&settings, &mut NullPresenter).unwrap();

        let report = reports[0];
        assert_eq!(report.finish, Finish::TimedOut);
        assert_eq!(report.remaining_time, 0);
        assert!(report.matches_found < report.pairs_needed);
        assert!(report.elapsed_ms >= 2000);
        assert_eq!(report.hidden_cards, 0);
    }

    #[test]
    fn play_round_reports_a_fixed_deck_win() {
        let deck = [0, 1, 1, 0].map(Symbol::new).to_vec();
        let mut controller = RoundController::new(
            RoundConfig::new(2, 2, 10).unwrap(),
            Catalog::fruits(),
            FixedDeckBuilder::new(deck),
            VirtualClock::new(),
        )
        .unwrap();
        controller.start();

        let report = play_round(
            &mut controller,
            &mut PerfectMemory::default(),
            &mut NullPresenter,
            Duration::from_millis(800),
        )
        .unwrap();

        // 0/1 mismatch, 2 finds 1, then 3 finds 0
        assert_eq!(report.finish, Finish::Won);
        assert_eq!(report.moves, 3);
        assert_eq!(report.pairs_needed, 2);
        assert_eq!(report.elapsed_ms, controller.elapsed().as_millis() as u64);
    }

    #[test]
    fn abandoned_round_reports_cards_left_face_down() {
        struct Quitter;

        impl Player for Quitter {
            fn observe(&mut self, _faces: &[CardFace]) {}

            fn choose(&mut self, _faces: &[CardFace], _first: Option<usize>) -> Option<usize> {
                None
            }

            fn reset(&mut self) {}
        }

        let mut controller = RoundController::new(
            Difficulty::Easy.config(),
            Catalog::fruits(),
            RandomDeckBuilder::new(4),
            VirtualClock::new(),
        )
        .unwrap();
        controller.start();

        let report = play_round(
            &mut controller,
            &mut Quitter,
            &mut NullPresenter,
            Duration::from_millis(100),
        )
        .unwrap();

        assert_eq!(report.finish, Finish::Abandoned);
        assert_eq!(report.hidden_cards, 6);
        assert_eq!(report.moves, 0);
    }

    #[test]
    fn rejects_zero_rounds() {
        let settings = SimSettings {
            rounds: 0,
            ..Default::default()
        };
        assert!(run_session(&settings, &mut NullPresenter).is_err());
    }
}
