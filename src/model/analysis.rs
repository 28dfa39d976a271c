use crate::model::Round;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringStatus {
    Ok,
    FrontOnly,
    BackOnly,
    None,
    Unparseable,
}

impl ScoringStatus {
    #[must_use]
    pub fn from_counts(front9_player_count: usize, back9_player_count: usize) -> Self {
        match (front9_player_count > 0, back9_player_count > 0) {
            (false, false) => Self::None,
            (true, false) => Self::FrontOnly,
            (false, true) => Self::BackOnly,
            (true, true) => Self::Ok,
        }
    }

    #[must_use]
    pub fn is_flagged(self) -> bool {
        self != Self::Ok
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::FrontOnly => "FRONT_ONLY",
            Self::BackOnly => "BACK_ONLY",
            Self::None => "NONE",
            Self::Unparseable => "UNPARSEABLE",
        }
    }
}

impl fmt::Display for ScoringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundAnalysis {
    pub round: Round,
    pub status: ScoringStatus,
    pub detail: String,
    pub front9_player_count: usize,
    pub back9_player_count: usize,
    pub total_players: usize,
}

impl RoundAnalysis {
    #[must_use]
    pub fn from_counts(
        round: Round,
        front9_player_count: usize,
        back9_player_count: usize,
        total_players: usize,
    ) -> Self {
        let status = ScoringStatus::from_counts(front9_player_count, back9_player_count);
        let detail = match status {
            ScoringStatus::Ok => format!(
                "Complete scoring detected: F9={front9_player_count}, B9={back9_player_count} of {total_players} players"
            ),
            ScoringStatus::FrontOnly => format!(
                "Only front 9 scores found ({front9_player_count}/{total_players} players)"
            ),
            ScoringStatus::BackOnly => format!(
                "Only back 9 scores found ({back9_player_count}/{total_players} players)"
            ),
            ScoringStatus::None if total_players == 0 => {
                "No scores found: tee sheet lists no players (0 scored players)".to_string()
            }
            ScoringStatus::None => format!(
                "No scores found on either nine (0 of {total_players} players scored)"
            ),
            ScoringStatus::Unparseable => String::new(),
        };
        Self {
            round,
            status,
            detail,
            front9_player_count,
            back9_player_count,
            total_players,
        }
    }

    #[must_use]
    pub fn unparseable(round: Round, reason: impl Into<String>) -> Self {
        Self {
            round,
            status: ScoringStatus::Unparseable,
            detail: reason.into(),
            front9_player_count: 0,
            back9_player_count: 0,
            total_players: 0,
        }
    }
}
