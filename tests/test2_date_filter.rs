use chrono::NaiveDate;
use rusty_golf_audit::AuditError;
use rusty_golf_audit::controller::audit::date_filter::{
    filter_by_range, parse_date_arg, validate_date_range,
};
use rusty_golf_audit::model::{Round, parse_date};
use serde_json::json;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

fn round(id: &str, date: &str) -> Round {
    Round::from_api_response(&json!({ "id": id, "name": id, "date": date }), "ev1")
        .expect("round has an id")
}

#[test]
fn test2_three_formats_agree() {
    let expected = Some(ymd(2024, 3, 15));
    assert_eq!(parse_date("2024-03-15"), expected);
    assert_eq!(parse_date("03/15/2024"), expected);
    assert_eq!(parse_date("15/03/2024"), expected);
}

#[test]
fn test2_us_format_wins_when_ambiguous() {
    assert_eq!(parse_date("03/04/2024"), Some(ymd(2024, 3, 4)));
}

#[test]
fn test2_leading_date_of_a_timestamp() {
    assert_eq!(parse_date("2024-06-01T08:30:00-05:00"), Some(ymd(2024, 6, 1)));
    assert_eq!(parse_date("2024-06-01 08:30"), Some(ymd(2024, 6, 1)));
    assert_eq!(parse_date("  06/01/2024  "), Some(ymd(2024, 6, 1)));
}

#[test]
fn test2_rejects_garbage() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("TBD"), None);
    assert_eq!(parse_date("2024-13-45"), None);
    assert_eq!(parse_date("15.03.2024"), None);
    assert_eq!(parse_date("2024-03-15x"), None);
    assert!(matches!(parse_date_arg("March 15"), Err(AuditError::InvalidDate(_))));
}

#[test]
fn test2_inverted_range_is_an_error() {
    let err = validate_date_range(ymd(2024, 5, 1), ymd(2024, 4, 1)).unwrap_err();
    assert_eq!(
        err,
        AuditError::InvalidRange {
            start: "2024-05-01".into(),
            end: "2024-04-01".into(),
        }
    );
    assert!(validate_date_range(ymd(2024, 5, 1), ymd(2024, 5, 1)).is_ok());
    assert!(filter_by_range(Vec::new(), ymd(2024, 5, 1), ymd(2024, 4, 1)).is_err());
}

#[test]
fn test2_bounds_are_inclusive() {
    let rounds = vec![
        round("before", "2024-03-31"),
        round("first", "2024-04-01"),
        round("middle", "04/15/2024"),
        round("last", "30/04/2024"),
        round("after", "2024-05-01"),
    ];

    let outcome = filter_by_range(rounds, ymd(2024, 4, 1), ymd(2024, 4, 30)).expect("valid range");

    let kept: Vec<&str> = outcome.retained.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(kept, vec!["first", "middle", "last"]);
    assert_eq!(outcome.out_of_range, 2);
    assert!(outcome.unparseable.is_empty());
}

#[test]
fn test2_undated_rounds_are_reported_not_dropped() {
    let rounds = vec![
        round("dated", "2024-04-10"),
        round("garbled", "sometime in april"),
        Round::from_api_response(&json!({ "id": 7, "name": "No date" }), "ev1").expect("round"),
    ];

    let outcome = filter_by_range(rounds, ymd(2024, 4, 1), ymd(2024, 4, 30)).expect("valid range");

    assert_eq!(outcome.retained.len(), 1);
    assert_eq!(outcome.unparseable.len(), 2);
    assert_eq!(outcome.unparseable[0].raw_date.as_deref(), Some("sometime in april"));
    assert_eq!(outcome.unparseable[1].id, "7");
    assert_eq!(outcome.unparseable[1].raw_date, None);
    assert_eq!(outcome.unparseable[1].date_display(), "No Date");
}

#[test]
fn test2_round_date_falls_back_through_fields() {
    let round = Round::from_api_response(
        &json!({ "id": "r1", "date": "", "round_date": "TBD", "tee_time": "2024-04-02T07:00:00" }),
        "ev1",
    )
    .expect("round");
    assert_eq!(round.date, Some(ymd(2024, 4, 2)));
    assert_eq!(round.raw_date.as_deref(), Some("2024-04-02T07:00:00"));
}
