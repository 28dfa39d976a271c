use serde::{Deserialize, Serialize};

pub const HOLES: usize = 18;
pub const MIN_HOLE_SCORE: i64 = 1;
pub const MAX_HOLE_SCORE: i64 = 15;

/// One slot per hole; slot 0 is hole 1. A slot is `Some` only for a score
/// in the plausible range.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoleScores(pub [Option<u8>; HOLES]);

impl HoleScores {
    #[must_use]
    pub fn hole(&self, hole: usize) -> Option<u8> {
        hole.checked_sub(1).and_then(|idx| self.0.get(idx).copied().flatten())
    }

    #[must_use]
    pub fn front9(&self) -> &[Option<u8>] {
        &self.0[..9]
    }

    #[must_use]
    pub fn back9(&self) -> &[Option<u8>] {
        &self.0[9..]
    }

    #[must_use]
    pub fn has_front9(&self) -> bool {
        self.front9().iter().any(Option::is_some)
    }

    #[must_use]
    pub fn has_back9(&self) -> bool {
        self.back9().iter().any(Option::is_some)
    }

    #[must_use]
    pub fn holes_scored(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerScore {
    pub player_name: String,
    pub scores: HoleScores,
}
