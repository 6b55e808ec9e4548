use std::collections::BTreeMap;

use pairs_core::{CardFace, Symbol};
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::Deserialize;

/// Scripted stand-in for a human. Only ever sees card faces.
pub trait Player {
    /// Remembers whatever is currently face up.
    fn observe(&mut self, faces: &[CardFace]);

    fn choose(&mut self, faces: &[CardFace], selected_first: Option<usize>) -> Option<usize>;

    /// Forgets the previous board.
    fn reset(&mut self);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Remembers every revealed card and completes known pairs
    #[default]
    Perfect,
    /// Flips face-down cards at random
    Random,
}

impl Strategy {
    pub fn player(self, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            Self::Perfect => Box::new(PerfectMemory::default()),
            Self::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}

fn hidden(faces: &[CardFace]) -> impl Iterator<Item = usize> + '_ {
    faces
        .iter()
        .enumerate()
        .filter(|(_, face)| face.is_hidden())
        .map(|(index, _)| index)
}

#[derive(Clone, Debug, Default)]
pub struct PerfectMemory {
    seen: BTreeMap<usize, Symbol>,
}

impl PerfectMemory {
    fn partner_of(&self, index: usize, faces: &[CardFace]) -> Option<usize> {
        let symbol = self.seen.get(&index)?;
        self.seen
            .iter()
            .find(|&(&other, other_symbol)| {
                other != index && other_symbol == symbol && faces[other].is_hidden()
            })
            .map(|(&other, _)| other)
    }

    fn known_pair(&self, faces: &[CardFace]) -> Option<usize> {
        self.seen
            .keys()
            .copied()
            .filter(|&index| faces[index].is_hidden())
            .find(|&index| self.partner_of(index, faces).is_some())
    }

    fn first_unknown(&self, faces: &[CardFace], skip: Option<usize>) -> Option<usize> {
        hidden(faces).find(|index| Some(*index) != skip && !self.seen.contains_key(index))
    }
}

impl Player for PerfectMemory {
    fn observe(&mut self, faces: &[CardFace]) {
        for (index, face) in faces.iter().enumerate() {
            match *face {
                CardFace::Revealed(symbol) => {
                    self.seen.insert(index, symbol);
                }
                CardFace::Matched(_) => {
                    self.seen.remove(&index);
                }
                CardFace::Hidden => {}
            }
        }
    }

    fn choose(&mut self, faces: &[CardFace], selected_first: Option<usize>) -> Option<usize> {
        match selected_first {
            Some(first) => self
                .partner_of(first, faces)
                .or_else(|| self.first_unknown(faces, Some(first)))
                .or_else(|| hidden(faces).find(|&index| index != first)),
            None => self
                .known_pair(faces)
                .or_else(|| self.first_unknown(faces, None))
                .or_else(|| hidden(faces).next()),
        }
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}

#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl Player for RandomPlayer {
    fn observe(&mut self, _faces: &[CardFace]) {}

    fn choose(&mut self, faces: &[CardFace], selected_first: Option<usize>) -> Option<usize> {
        let candidates: Vec<usize> = hidden(faces)
            .filter(|&index| Some(index) != selected_first)
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(id: u16) -> Symbol {
        Symbol::new(id)
    }

    #[test]
    fn perfect_memory_completes_a_remembered_pair() {
        let mut player = PerfectMemory::default();
        player.observe(&[
            CardFace::Revealed(sym(0)),
            CardFace::Revealed(sym(1)),
            CardFace::Hidden,
            CardFace::Hidden,
        ]);
        let faces = [CardFace::Hidden; 4];
        player.observe(&[
            CardFace::Hidden,
            CardFace::Hidden,
            CardFace::Revealed(sym(1)),
            CardFace::Hidden,
        ]);

        assert_eq!(player.choose(&faces, None), Some(1));
        assert_eq!(player.choose(&faces, Some(2)), Some(1));
    }

    #[test]
    fn perfect_memory_explores_unknown_cards_first() {
        let mut player = PerfectMemory::default();
        let faces = [
            CardFace::Matched(sym(0)),
            CardFace::Hidden,
            CardFace::Hidden,
            CardFace::Matched(sym(0)),
        ];
        player.observe(&faces);

        assert_eq!(player.choose(&faces, None), Some(1));
        assert_eq!(player.choose(&faces, Some(1)), Some(2));
    }

    #[test]
    fn random_player_never_picks_visible_cards() {
        let mut player = RandomPlayer::new(Some(9));
        let faces = [
            CardFace::Matched(sym(0)),
            CardFace::Hidden,
            CardFace::Revealed(sym(1)),
            CardFace::Matched(sym(0)),
        ];

        for _ in 0..20 {
            assert_eq!(player.choose(&faces, Some(2)), Some(1));
        }
        assert_eq!(player.choose(&faces, Some(1)), None);
    }
}
