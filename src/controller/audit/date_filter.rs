use crate::error::AuditError;
use crate::model::{Round, parse_date};
use chrono::NaiveDate;
use log::{debug, warn};

/// # Errors
///
/// Will return `Err` if the text matches none of the accepted formats
pub fn parse_date_arg(text: &str) -> Result<NaiveDate, AuditError> {
    parse_date(text).ok_or_else(|| {
        AuditError::InvalidDate(format!(
            "{text:?} (expected YYYY-MM-DD, MM/DD/YYYY or DD/MM/YYYY)"
        ))
    })
}

/// # Errors
///
/// Will return `Err` if `start` is after `end`
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AuditError> {
    if start > end {
        return Err(AuditError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilterOutcome {
    pub retained: Vec<Round>,
    /// Rounds without a readable date; never silently dropped.
    pub unparseable: Vec<Round>,
    pub out_of_range: usize,
}

/// Keeps rounds dated within `start..=end`, preserving their order.
///
/// # Errors
///
/// Will return `Err` if `start` is after `end`
pub fn filter_by_range(
    rounds: Vec<Round>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DateFilterOutcome, AuditError> {
    validate_date_range(start, end)?;

    let mut outcome = DateFilterOutcome::default();
    for round in rounds {
        match round.date {
            Some(date) if (start..=end).contains(&date) => outcome.retained.push(round),
            Some(date) => {
                debug!("Round {} on {date} is outside {start}..={end}", round.id);
                outcome.out_of_range += 1;
            }
            None => {
                warn!(
                    "UNPARSEABLE_DATE: round {} in event {} has date {:?}",
                    round.id,
                    round.event_id,
                    round.raw_date.as_deref().unwrap_or("(missing)")
                );
                outcome.unparseable.push(round);
            }
        }
    }
    Ok(outcome)
}
