use super::*;
use alloc::collections::BTreeMap;
use rand::prelude::*;
use rand::rngs::SmallRng;

/// Builds a shuffled deck of `pairs_needed` pairs drawn from `catalog`.
///
/// When the catalog is smaller than `pairs_needed` it is doubled until it is large enough, so the
/// same symbol can then be chosen more than once and appear four or more times in the deck.
pub fn build_deck<R: Rng + ?Sized>(
    pairs_needed: usize,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Vec<Symbol>> {
    if pairs_needed == 0 {
        return Err(GameError::InvalidConfiguration("a deck needs at least one pair"));
    }
    let mut symbols: Vec<Symbol> = catalog.symbols().collect();
    if symbols.is_empty() {
        return Err(GameError::InvalidConfiguration("catalog has no symbols"));
    }
    if symbols.len() < pairs_needed {
        log::warn!(
            "Catalog repeated to fill the board, requested {} pairs but only has {} symbols",
            pairs_needed,
            symbols.len()
        );
        while symbols.len() < pairs_needed {
            symbols.extend_from_within(..);
        }
    }
    symbols.shuffle(rng);
    symbols.truncate(pairs_needed);

    let mut deck = Vec::with_capacity(pairs_needed * 2);
    deck.extend_from_slice(&symbols);
    deck.extend_from_slice(&symbols);
    deck.shuffle(rng);

    log::debug!("Built deck of {} cards", deck.len());
    Ok(deck)
}

/// Occurrences of each symbol in `deck`.
pub fn symbol_counts(deck: &[Symbol]) -> BTreeMap<Symbol, usize> {
    let mut counts = BTreeMap::new();
    for &symbol in deck {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    counts
}

/// Deck builder backed by an injected seedable random source.
///
/// Every build continues the same random stream, so a session started from one seed is
/// reproducible across restarts.
#[derive(Clone, Debug)]
pub struct RandomDeckBuilder {
    rng: SmallRng,
}

impl RandomDeckBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl DeckBuilder for RandomDeckBuilder {
    fn build(&mut self, pairs_needed: usize, catalog: &Catalog) -> Result<Vec<Symbol>> {
        build_deck(pairs_needed, catalog, &mut self.rng)
    }
}
