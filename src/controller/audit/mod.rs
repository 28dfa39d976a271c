pub mod date_filter;
pub mod scoring;
pub mod tee_sheet;

use crate::config::AuditConfig;
use crate::controller::golf_genius::{Collector, FailedUnit, PageWarning, RemoteFetcher};
use crate::error::AuditError;
use crate::model::{Round, RoundAnalysis, ScoringStatus};
use chrono::NaiveDate;
use date_filter::{filter_by_range, validate_date_range};
use log::info;
use scoring::ScoringAnalyzer;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    pub season_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    pub request: AuditRequest,
    pub events_collected: usize,
    pub rounds_collected: usize,
    pub rounds_in_range: usize,
    /// One entry per analysed round, in round-date order.
    pub analyses: Vec<RoundAnalysis>,
    pub failed_events: Vec<FailedUnit>,
    pub skipped_items: Vec<FailedUnit>,
    pub page_warnings: Vec<PageWarning>,
    pub unparseable_dates: Vec<Round>,
    pub cancelled: bool,
    pub rounds_not_analyzed: usize,
}

impl AuditReport {
    fn new(request: AuditRequest) -> Self {
        Self {
            request,
            events_collected: 0,
            rounds_collected: 0,
            rounds_in_range: 0,
            analyses: Vec::new(),
            failed_events: Vec::new(),
            skipped_items: Vec::new(),
            page_warnings: Vec::new(),
            unparseable_dates: Vec::new(),
            cancelled: false,
            rounds_not_analyzed: 0,
        }
    }

    pub fn flagged(&self) -> impl Iterator<Item = &RoundAnalysis> {
        self.analyses.iter().filter(|a| a.status.is_flagged())
    }

    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.flagged().count()
    }

    #[must_use]
    pub fn count_with_status(&self, status: ScoringStatus) -> usize {
        self.analyses.iter().filter(|a| a.status == status).count()
    }

    /// Units that could not be looked at properly: failed events, unreadable
    /// listing items, truncated listings, undatable rounds and unreadable tee
    /// sheets.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.failed_events.len()
            + self.skipped_items.len()
            + self.page_warnings.len()
            + self.unparseable_dates.len()
            + self.count_with_status(ScoringStatus::Unparseable)
    }
}

/// Collects the season's rounds, keeps those dated within the request's
/// range and classifies each one. `cancel` is checked between rounds; a
/// cancelled run returns what was analysed so far.
///
/// # Errors
///
/// Will return `Err` if the date range is inverted or the remote rejects the
/// credential
pub async fn run_audit(
    fetcher: &dyn RemoteFetcher,
    config: &AuditConfig,
    request: &AuditRequest,
    cancel: &CancellationToken,
) -> Result<AuditReport, AuditError> {
    validate_date_range(request.start, request.end)?;
    let mut report = AuditReport::new(request.clone());

    let collection = Collector::new(fetcher, config)
        .collect_rounds(&request.season_id)
        .await?;
    report.events_collected = collection.events.len();
    report.rounds_collected = collection.rounds.len();
    report.failed_events = collection.failed_events;
    report.skipped_items = collection.skipped_items;
    report.page_warnings = collection.page_warnings;

    let outcome = filter_by_range(collection.rounds, request.start, request.end)?;
    report.unparseable_dates = outcome.unparseable;
    let mut rounds = outcome.retained;
    rounds.sort_by_key(|round| round.date);
    report.rounds_in_range = rounds.len();
    info!(
        "Filtered to {} rounds between {} and {}",
        rounds.len(),
        request.start,
        request.end
    );

    let analyzer = ScoringAnalyzer::new(fetcher);
    let total = rounds.len();
    for (i, round) in rounds.iter().enumerate() {
        if cancel.is_cancelled() {
            report.cancelled = true;
            report.rounds_not_analyzed = total - i;
            info!("Audit cancelled; {} rounds not analysed", total - i);
            break;
        }
        info!("Analyzing round {}/{total}: {}", i + 1, round.name);
        let analysis = analyzer.analyze(round).await?;
        if analysis.status.is_flagged() {
            info!("  -> FLAGGED {}: {}", analysis.status, analysis.detail);
        } else {
            info!("  -> OK: {}", analysis.detail);
        }
        report.analyses.push(analysis);
    }

    Ok(report)
}
