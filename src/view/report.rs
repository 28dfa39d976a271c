use crate::controller::audit::AuditReport;
use crate::controller::golf_genius::endpoints::scorecard_url;
use crate::model::{RoundAnalysis, ScoringStatus, Season};
use std::fmt::Write;

const RULE_WIDTH: usize = 96;
const NAME_WIDTH: usize = 20;

#[must_use]
pub fn short_round_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}

#[must_use]
pub fn render_seasons(seasons: &[Season]) -> String {
    let mut out = String::new();
    if seasons.is_empty() {
        out.push_str("No seasons found.\n");
        return out;
    }
    out.push_str("Available seasons:\n");
    for season in seasons {
        let _ = writeln!(out, "  {:<12} {season}", season.id);
    }
    out
}

fn render_row(out: &mut String, analysis: &RoundAnalysis) {
    let round = &analysis.round;
    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<12} {:<20} {:<12} {}",
        round.event_id,
        round.id,
        round.date_display(),
        short_round_name(&round.name),
        analysis.status,
        analysis.detail
    );
    let _ = writeln!(out, "{:>13}{}", "", scorecard_url(&round.event_id, &round.id));
}

/// Console table of the audit. OK rounds are listed only with `include_ok`;
/// skipped units are always summarised so nothing goes missing unnoticed.
#[must_use]
pub fn render_report(report: &AuditReport, include_ok: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(
        out,
        "Season {} | {} to {}",
        report.request.season_id, report.request.start, report.request.end
    );
    let _ = writeln!(
        out,
        "Events: {} | Rounds collected: {} | In range: {} | Analysed: {}",
        report.events_collected,
        report.rounds_collected,
        report.rounds_in_range,
        report.analyses.len()
    );

    let rows: Vec<&RoundAnalysis> = if include_ok {
        report.analyses.iter().collect()
    } else {
        report.flagged().collect()
    };

    if rows.is_empty() {
        out.push_str("\nNo scoring issues detected!\n");
    } else {
        let _ = writeln!(out, "\n{rule}");
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<12} {:<20} {:<12} Issue",
            "Event ID", "Round ID", "Date", "Round Name", "Status"
        );
        let _ = writeln!(out, "{rule}");
        for analysis in rows {
            render_row(&mut out, analysis);
        }
        let _ = writeln!(out, "{rule}");
    }

    let _ = writeln!(
        out,
        "\nFlagged rounds: {} (front only {}, back only {}, none {}, unparseable {})",
        report.flagged_count(),
        report.count_with_status(ScoringStatus::FrontOnly),
        report.count_with_status(ScoringStatus::BackOnly),
        report.count_with_status(ScoringStatus::None),
        report.count_with_status(ScoringStatus::Unparseable),
    );
    let _ = writeln!(
        out,
        "Skipped units: {} (failed events {}, unreadable items {}, truncated listings {}, unparseable dates {}, unparseable tee sheets {})",
        report.skipped_count(),
        report.failed_events.len(),
        report.skipped_items.len(),
        report.page_warnings.len(),
        report.unparseable_dates.len(),
        report.count_with_status(ScoringStatus::Unparseable),
    );

    for failed in &report.failed_events {
        let _ = writeln!(out, "  failed event {} ({}): {}", failed.id, failed.name, failed.reason);
    }
    for warning in &report.page_warnings {
        let _ = writeln!(
            out,
            "  listing {} stopped at page {}: {}",
            warning.resource, warning.page, warning.reason
        );
    }
    for round in &report.unparseable_dates {
        let _ = writeln!(
            out,
            "  UNPARSEABLE_DATE event {} round {} ({}): {:?}",
            round.event_id,
            round.id,
            round.name,
            round.raw_date.as_deref().unwrap_or("(missing)")
        );
    }
    if report.cancelled {
        let _ = writeln!(
            out,
            "Run cancelled: {} rounds were not analysed.",
            report.rounds_not_analyzed
        );
    }
    out
}
