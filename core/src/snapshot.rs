use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Point-in-time copy of a round, safe to hand to hosts that log or export games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub config: RoundConfig,
    pub phase: RoundPhase,
    pub state: RoundState,
    pub faces: Vec<CardFace>,
    pub elapsed_ms: u64,
}

impl RoundSnapshot {
    pub fn hidden_count(&self) -> usize {
        self.faces.iter().filter(|face| face.is_hidden()).count()
    }

    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        if self.faces.len() != self.config.total_cards() {
            return Err(GameError::InvalidConfiguration(
                "snapshot faces do not match board size",
            ));
        }
        if self.state.matches_found > self.config.pairs_needed() {
            return Err(GameError::InvalidConfiguration(
                "snapshot has more matches than pairs",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn snapshot_survives_json() {
        let mut controller = RoundController::new(
            Difficulty::Easy.config(),
            Catalog::fruits(),
            RandomDeckBuilder::new(3),
            VirtualClock::new(),
        )
        .unwrap();
        controller.start();
        controller.select_card(0);

        let snapshot = controller.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: RoundSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.hidden_count(), 5);
        assert_eq!(parsed.phase, RoundPhase::AwaitingSecond);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn validate_rejects_face_count_mismatch() {
        let snapshot = RoundSnapshot {
            round: 1,
            config: Difficulty::Easy.config(),
            phase: RoundPhase::AwaitingFirst,
            state: RoundState::default(),
            faces: vec![CardFace::Hidden; 4],
            elapsed_ms: 0,
        };

        assert_eq!(
            snapshot.validate(),
            Err(GameError::InvalidConfiguration(
                "snapshot faces do not match board size"
            ))
        );
    }
}
