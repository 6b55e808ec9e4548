use alloc::vec::Vec;
use core::mem;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    AwaitingFirst,
    AwaitingSecond,
    /// Both cards of a mismatched pair are shown until the auto-hide fires.
    Revealing,
    Won,
    TimedOut,
}

impl RoundPhase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_in_progress(self) -> bool {
        matches!(
            self,
            Self::AwaitingFirst | Self::AwaitingSecond | Self::Revealing
        )
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::TimedOut)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub moves: u32,
    pub matches_found: usize,
    pub remaining_time: Seconds,
    pub selected_first: Option<usize>,
    pub locked: bool,
}

impl RoundState {
    fn fresh(config: &RoundConfig) -> Self {
        Self {
            remaining_time: config.total_time,
            ..Default::default()
        }
    }
}

/// Turn, match and countdown logic of one game, replayed fresh on every restart.
///
/// The controller never waits on anything itself. Its countdown tick and the auto-hide after a
/// mismatch are tasks handed to the [`Scheduler`]; the host delivers them back through
/// [`RoundController::fire`] (or [`RoundController::run_due`]) and collects the resulting
/// [`RoundEvent`]s with [`RoundController::flush`].
#[derive(Clone, Debug)]
pub struct RoundController<S, B = RandomDeckBuilder> {
    config: RoundConfig,
    catalog: Catalog,
    deck_builder: B,
    scheduler: S,
    board: Board,
    state: RoundState,
    phase: RoundPhase,
    round: u32,
    started_at: Duration,
    tick_task: Option<TaskHandle>,
    hide_task: Option<TaskHandle>,
    mismatch: Option<[usize; 2]>,
    events: Vec<RoundEvent>,
}

impl<S: Scheduler, B: DeckBuilder> RoundController<S, B> {
    pub fn new(
        config: RoundConfig,
        catalog: Catalog,
        mut deck_builder: B,
        scheduler: S,
    ) -> Result<Self> {
        config.validate()?;
        let board = deal(&config, &catalog, &mut deck_builder)?;
        let started_at = scheduler.now();

        Ok(Self {
            state: RoundState::fresh(&config),
            config,
            catalog,
            deck_builder,
            scheduler,
            board,
            phase: RoundPhase::Idle,
            round: 0,
            started_at,
            tick_task: None,
            hide_task: None,
            mismatch: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Rounds started so far, counting restarts.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn moves(&self) -> u32 {
        self.state.moves
    }

    pub fn matches_found(&self) -> usize {
        self.state.matches_found
    }

    pub fn pairs_needed(&self) -> usize {
        self.config.pairs_needed()
    }

    pub fn remaining_time(&self) -> Seconds {
        self.state.remaining_time
    }

    pub fn is_locked(&self) -> bool {
        self.state.locked
    }

    pub fn face(&self, index: usize) -> Option<CardFace> {
        self.board.face(index)
    }

    /// Scheduler time spent in the current round.
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now().saturating_sub(self.started_at)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begins the countdown. Only an idle round can be started.
    pub fn start(&mut self) -> bool {
        if !self.phase.is_idle() {
            return false;
        }

        self.round += 1;
        self.phase = RoundPhase::AwaitingFirst;
        self.started_at = self.scheduler.now();
        self.tick_task = Some(self.scheduler.schedule(TICK_INTERVAL, RoundTask::Tick));

        log::debug!(
            "Round {} started: {}x{} board, {}s",
            self.round,
            self.config.rows,
            self.config.cols,
            self.config.total_time
        );
        self.events.push(RoundEvent::RoundStarted {
            round: self.round,
            pairs_needed: self.pairs_needed(),
        });
        for card in self.board.cards() {
            self.events.push(RoundEvent::CardChanged {
                index: card.position,
                face: card.face(),
            });
        }
        self.events.push(RoundEvent::TimeUpdated(self.state.remaining_time));
        self.events.push(RoundEvent::MovesUpdated(self.state.moves));
        true
    }

    pub fn select_card(&mut self, index: usize) -> SelectOutcome {
        if self.state.locked || !self.phase.is_in_progress() {
            return SelectOutcome::Ignored;
        }

        let Some(card) = self.board.card_mut(index) else {
            return SelectOutcome::Ignored;
        };
        if !card.is_selectable() {
            return SelectOutcome::Ignored;
        }

        card.flipped = true;
        let symbol = card.symbol;
        let face = card.face();
        log::trace!("select card {}: {:?}", index, symbol);
        self.events.push(RoundEvent::CardChanged { index, face });

        let Some(first) = self.state.selected_first else {
            self.state.selected_first = Some(index);
            self.phase = RoundPhase::AwaitingSecond;
            return SelectOutcome::FirstRevealed;
        };

        self.state.moves += 1;
        self.events.push(RoundEvent::MovesUpdated(self.state.moves));

        let first_symbol = self.board.card(first).map(|card| card.symbol);
        if first_symbol == Some(symbol) {
            self.mark_matched(first, index);
            if self.state.matches_found == self.pairs_needed() {
                self.finish(RoundPhase::Won);
                log::info!(
                    "Round {} won in {} moves with {}s left",
                    self.round,
                    self.state.moves,
                    self.state.remaining_time
                );
                self.events.push(RoundEvent::RoundWon {
                    moves: self.state.moves,
                    remaining_time: self.state.remaining_time,
                });
                SelectOutcome::Won
            } else {
                self.phase = RoundPhase::AwaitingFirst;
                SelectOutcome::Matched
            }
        } else {
            self.state.locked = true;
            self.phase = RoundPhase::Revealing;
            self.mismatch = Some([first, index]);
            self.hide_task = Some(self.scheduler.schedule(REVEAL_DELAY, RoundTask::HideMismatch));
            self.events.push(RoundEvent::PairMismatch {
                first,
                second: index,
            });
            SelectOutcome::Mismatch {
                first,
                second: index,
            }
        }
    }

    /// Counts down one second of the round clock.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.phase.is_in_progress() {
            return TickOutcome::Ignored;
        }

        self.state.remaining_time = self.state.remaining_time.saturating_sub(1);
        log::trace!("tick: {}s left", self.state.remaining_time);
        self.events.push(RoundEvent::TimeUpdated(self.state.remaining_time));

        if self.state.remaining_time > 0 {
            return TickOutcome::Counted(self.state.remaining_time);
        }

        self.finish(RoundPhase::TimedOut);
        self.board.reveal_all();
        for card in self.board.cards().iter().filter(|card| !card.matched) {
            self.events.push(RoundEvent::CardChanged {
                index: card.position,
                face: card.face(),
            });
        }
        log::info!(
            "Round {} timed out with {}/{} pairs found",
            self.round,
            self.state.matches_found,
            self.pairs_needed()
        );
        self.events.push(RoundEvent::TimeExpired);
        TickOutcome::Expired
    }

    /// Runs a task the scheduler reported as due. Returns `false` for a task this round no longer
    /// waits on, such as one cancelled by a restart.
    pub fn fire(&mut self, handle: TaskHandle, task: RoundTask) -> bool {
        match task {
            RoundTask::Tick if self.tick_task == Some(handle) => {
                self.tick_task = None;
                self.tick();
                if self.phase.is_in_progress() {
                    self.tick_task = Some(self.scheduler.schedule(TICK_INTERVAL, RoundTask::Tick));
                }
                true
            }
            RoundTask::HideMismatch if self.hide_task == Some(handle) => {
                self.hide_task = None;
                self.hide_mismatch()
            }
            _ => {
                log::trace!("ignoring stale {:?} task {:?}", task, handle);
                false
            }
        }
    }

    /// Fires every task that is due on the scheduler, returning how many were handled.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        while let Some((handle, task)) = self.scheduler.pop_due() {
            if self.fire(handle, task) {
                fired += 1;
            }
        }
        fired
    }

    /// Deals a new deck and starts over with a full clock.
    pub fn restart(&mut self) -> Result<()> {
        let board = deal(&self.config, &self.catalog, &mut self.deck_builder)?;

        self.cancel_tasks();
        self.board = board;
        self.state = RoundState::fresh(&self.config);
        self.phase = RoundPhase::Idle;
        log::debug!("Round {} abandoned, restarting", self.round);
        self.start();
        Ok(())
    }

    /// Ends the round for good, cancelling whatever is still scheduled.
    pub fn teardown(mut self) -> (S, B) {
        self.cancel_tasks();
        log::debug!("Round {} torn down", self.round);
        (self.scheduler, self.deck_builder)
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        mem::take(&mut self.events)
    }

    /// Hands every buffered event to `presenter`, oldest first.
    pub fn flush<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        for event in self.events.drain(..) {
            presenter.present(&event);
        }
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round: self.round,
            config: self.config,
            phase: self.phase,
            state: self.state,
            faces: self.board.faces(),
            elapsed_ms: self.elapsed().as_millis() as u64,
        }
    }

    fn mark_matched(&mut self, first: usize, second: usize) {
        for index in [first, second] {
            if let Some(card) = self.board.card_mut(index) {
                card.matched = true;
                let face = card.face();
                self.events.push(RoundEvent::CardChanged { index, face });
            }
        }
        self.state.matches_found += 1;
        self.state.selected_first = None;
        self.events.push(RoundEvent::PairMatched { first, second });
    }

    fn hide_mismatch(&mut self) -> bool {
        let Some(pair) = self.mismatch.take() else {
            return false;
        };

        for index in pair {
            if let Some(card) = self.board.card_mut(index) {
                card.flipped = false;
                let face = card.face();
                self.events.push(RoundEvent::CardChanged { index, face });
            }
        }
        self.state.selected_first = None;
        self.state.locked = false;
        if self.phase == RoundPhase::Revealing {
            self.phase = RoundPhase::AwaitingFirst;
        }
        true
    }

    fn finish(&mut self, phase: RoundPhase) {
        self.phase = phase;
        self.cancel_tasks();
        self.state.selected_first = None;
        self.state.locked = false;
    }

    fn cancel_tasks(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.hide_task.take() {
            self.scheduler.cancel(handle);
        }
        self.mismatch = None;
    }
}

fn deal<B: DeckBuilder + ?Sized>(
    config: &RoundConfig,
    catalog: &Catalog,
    deck_builder: &mut B,
) -> Result<Board> {
    let deck = deck_builder.build(config.pairs_needed(), catalog)?;
    if deck.len() != config.total_cards() {
        return Err(GameError::InvalidConfiguration("deck does not fit the board"));
    }
    Ok(Board::from_deck(config.size(), deck))
}
