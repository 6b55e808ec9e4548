use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed(Symbol),
    Matched(Symbol),
}

impl CardFace {
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Self::Hidden => None,
            Self::Revealed(symbol) | Self::Matched(symbol) => Some(symbol),
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub position: usize,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    pub const fn new(symbol: Symbol, position: usize) -> Self {
        Self {
            symbol,
            position,
            flipped: false,
            matched: false,
        }
    }

    pub const fn is_selectable(&self) -> bool {
        !self.flipped && !self.matched
    }

    pub const fn face(&self) -> CardFace {
        if self.matched {
            CardFace::Matched(self.symbol)
        } else if self.flipped {
            CardFace::Revealed(self.symbol)
        } else {
            CardFace::Hidden
        }
    }
}
