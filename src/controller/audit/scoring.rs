use crate::controller::audit::tee_sheet::{TeeSheet, parse_tee_sheet};
use crate::controller::golf_genius::client::RemoteFetcher;
use crate::controller::golf_genius::endpoints::{tee_sheet_path, tee_sheet_query};
use crate::error::AuditError;
use crate::model::{Round, RoundAnalysis};
use log::warn;
use serde_json::Value;

/// Counts players with at least one scored hole on each nine and classifies
/// the round. Any player on the front and any player on the back makes the
/// round OK; they need not be the same player.
#[must_use]
pub fn classify_tee_sheet(round: Round, sheet: &TeeSheet) -> RoundAnalysis {
    let front9_player_count = sheet.players.iter().filter(|p| p.scores.has_front9()).count();
    let back9_player_count = sheet.players.iter().filter(|p| p.scores.has_back9()).count();
    let mut analysis = RoundAnalysis::from_counts(
        round,
        front9_player_count,
        back9_player_count,
        sheet.players.len(),
    );
    if sheet.skipped_groups > 0 {
        analysis.detail.push_str(&format!(
            "; {} pairing group(s) without players skipped",
            sheet.skipped_groups
        ));
    }
    analysis
}

#[must_use]
pub fn analyze_payload(round: Round, payload: &Value) -> RoundAnalysis {
    match parse_tee_sheet(payload) {
        Ok(sheet) => classify_tee_sheet(round, &sheet),
        Err(err) => {
            warn!("  Round {} tee sheet unparseable: {err}", round.id);
            RoundAnalysis::unparseable(round, format!("Unparseable tee sheet: {err}"))
        }
    }
}

pub struct ScoringAnalyzer<'a> {
    fetcher: &'a dyn RemoteFetcher,
}

impl<'a> ScoringAnalyzer<'a> {
    #[must_use]
    pub fn new(fetcher: &'a dyn RemoteFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches the round's tee sheet and classifies it. A tee sheet that
    /// can't be fetched or read still yields an analysis, marked UNPARSEABLE.
    ///
    /// # Errors
    ///
    /// Will return `Err` only on an authentication failure
    pub async fn analyze(&self, round: &Round) -> Result<RoundAnalysis, AuditError> {
        let path = tee_sheet_path(&round.event_id, &round.id);
        match self.fetcher.fetch(&path, &tee_sheet_query()).await {
            Ok(payload) => Ok(analyze_payload(round.clone(), &payload)),
            Err(err @ AuditError::Auth(_)) => Err(err),
            Err(err) => {
                warn!("  Unable to retrieve tee sheet for round {}: {err}", round.id);
                Ok(RoundAnalysis::unparseable(
                    round.clone(),
                    format!("Unable to retrieve scoring data: {err}"),
                ))
            }
        }
    }
}
