use crate::*;
use alloc::vec::Vec;
pub use random::*;

mod random;

pub trait DeckBuilder {
    /// Produces `2 * pairs_needed` symbols drawn from `catalog`, in play order.
    fn build(&mut self, pairs_needed: usize, catalog: &Catalog) -> Result<Vec<Symbol>>;
}

/// Deck in a caller-chosen order, used to replay a known layout.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedDeckBuilder {
    deck: Vec<Symbol>,
}

impl FixedDeckBuilder {
    pub fn new(deck: Vec<Symbol>) -> Self {
        Self { deck }
    }
}

impl DeckBuilder for FixedDeckBuilder {
    fn build(&mut self, pairs_needed: usize, catalog: &Catalog) -> Result<Vec<Symbol>> {
        if self.deck.len() != pairs_needed * 2 {
            return Err(GameError::InvalidConfiguration(
                "fixed deck does not match board size",
            ));
        }
        if self.deck.iter().any(|symbol| usize::from(symbol.id()) >= catalog.len()) {
            return Err(GameError::InvalidConfiguration(
                "fixed deck uses a symbol outside the catalog",
            ));
        }
        if symbol_counts(&self.deck).values().any(|count| count % 2 != 0) {
            return Err(GameError::InvalidConfiguration(
                "fixed deck has a symbol without a partner",
            ));
        }
        Ok(self.deck.clone())
    }
}
