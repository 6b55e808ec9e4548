use serde::{Deserialize, Serialize};

use crate::*;

/// State change emitted by a [`RoundController`], in the order it happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    RoundStarted { round: u32, pairs_needed: usize },
    CardChanged { index: usize, face: CardFace },
    MovesUpdated(u32),
    TimeUpdated(Seconds),
    PairMatched { first: usize, second: usize },
    PairMismatch { first: usize, second: usize },
    RoundWon { moves: u32, remaining_time: Seconds },
    TimeExpired,
}

/// Presentation layer fed by [`RoundController::flush`]. Holds no game logic.
pub trait Presenter {
    fn render_card(&mut self, index: usize, face: CardFace);

    fn render_timer(&mut self, remaining_time: Seconds);

    fn render_moves(&mut self, moves: u32);

    fn notify(&mut self, event: &RoundEvent);

    fn present(&mut self, event: &RoundEvent) {
        match *event {
            RoundEvent::CardChanged { index, face } => self.render_card(index, face),
            RoundEvent::MovesUpdated(moves) => self.render_moves(moves),
            RoundEvent::TimeUpdated(remaining_time) => self.render_timer(remaining_time),
            _ => self.notify(event),
        }
    }
}

/// Presenter that drops everything, for hosts that only read snapshots.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_card(&mut self, _index: usize, _face: CardFace) {}

    fn render_timer(&mut self, _remaining_time: Seconds) {}

    fn render_moves(&mut self, _moves: u32) {}

    fn notify(&mut self, _event: &RoundEvent) {}
}
