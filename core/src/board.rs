use alloc::vec::Vec;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Cards of one round laid out row by row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    size: Coord2,
    cards: Vec<Card>,
}

impl Board {
    pub(crate) fn from_deck(size: Coord2, deck: Vec<Symbol>) -> Self {
        debug_assert_eq!(deck.len(), usize::from(mult(size.0, size.1)));
        let cards = deck
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(symbol, position))
            .collect();
        Self { size, cards }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn face(&self, index: usize) -> Option<CardFace> {
        self.card(index).map(Card::face)
    }

    pub fn faces(&self) -> Vec<CardFace> {
        self.cards.iter().map(Card::face).collect()
    }

    /// Faces arranged as a `rows × cols` grid.
    pub fn layout(&self) -> Array2<CardFace> {
        let (rows, cols) = self.size;
        Array2::from_shape_fn((usize::from(rows), usize::from(cols)), |(row, col)| {
            self.cards[row * usize::from(cols) + col].face()
        })
    }

    pub(crate) fn reveal_all(&mut self) {
        for card in self.cards.iter_mut().filter(|card| !card.matched) {
            card.flipped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn board() -> Board {
        let (a, b, c) = (Symbol::new(0), Symbol::new(1), Symbol::new(2));
        Board::from_deck((2, 3), vec![a, b, c, c, b, a])
    }

    #[test]
    fn layout_is_row_major() {
        let mut board = board();
        board.card_mut(4).unwrap().flipped = true;

        let layout = board.layout();

        assert_eq!(layout.dim(), (2, 3));
        assert_eq!(layout[(1, 1)], CardFace::Revealed(Symbol::new(1)));
        assert_eq!(layout[(0, 0)], CardFace::Hidden);
        assert_eq!(board.face(4), Some(CardFace::Revealed(Symbol::new(1))));
        assert_eq!(board.face(6), None);
    }

    #[test]
    fn layout_matches_size_for_every_preset() {
        let catalog = Catalog::fruits();
        let mut builder = RandomDeckBuilder::new(1);

        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            let deck = builder.build(config.pairs_needed(), &catalog).unwrap();
            let board = Board::from_deck(config.size(), deck);

            let layout = board.layout();
            assert_eq!(layout.dim(), (usize::from(config.rows), usize::from(config.cols)));
            assert_eq!(layout.len(), board.len());
            assert!(layout.iter().all(|face| face.is_hidden()));
        }
    }

    #[test]
    fn reveal_all_keeps_matched_faces() {
        let mut board = board();
        board.card_mut(0).unwrap().matched = true;
        board.card_mut(5).unwrap().matched = true;

        board.reveal_all();

        assert_eq!(board.face(0), Some(CardFace::Matched(Symbol::new(0))));
        assert!(board.faces().iter().all(|face| !face.is_hidden()));
    }
}
