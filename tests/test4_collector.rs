mod common;

use common::{MockFetcher, event_json, round_json};
use rusty_golf_audit::controller::golf_genius::Collector;
use rusty_golf_audit::model::Event;
use rusty_golf_audit::{AuditConfig, AuditError};
use serde_json::json;
use std::error::Error;

const SEASON: &str = "s2024";

fn config() -> AuditConfig {
    AuditConfig {
        page_size: 50,
        ..AuditConfig::default()
    }
}

#[tokio::test]
async fn test4_one_failing_event_does_not_hide_its_siblings() -> Result<(), Box<dyn Error>> {
    let mock = MockFetcher::new();
    mock.on_events_page(
        SEASON,
        1,
        Ok(json!([event_json("e1", "Tuesday League"), event_json("e2", "Thursday League")])),
    )
    .on_rounds(
        "e1",
        Err(AuditError::Transient("HTTP 502: still failing after 3 attempts".into())),
    )
    .on_rounds(
        "e2",
        Ok(json!([
            round_json("r1", "Week 1", "2024-04-04"),
            round_json("r2", "Week 2", "2024-04-11"),
        ])),
    );

    let config = config();
    let collection = Collector::new(&mock, &config).collect_rounds(SEASON).await?;

    assert_eq!(collection.season_id, SEASON);
    assert_eq!(collection.events.len(), 2);
    assert_eq!(collection.rounds.len(), 2);
    assert!(collection.rounds.iter().all(|r| r.event_id == "e2"));
    assert_eq!(collection.failed_events.len(), 1);
    assert_eq!(collection.failed_events[0].id, "e1");
    assert_eq!(collection.failed_events[0].name, "Tuesday League");
    assert!(collection.failed_events[0].reason.contains("502"));
    Ok(())
}

#[tokio::test]
async fn test4_auth_failure_aborts_the_walk() {
    let mock = MockFetcher::new();
    mock.on_events_page(
        SEASON,
        1,
        Ok(json!([event_json("e1", "A"), event_json("e2", "B")])),
    )
    .on_rounds("e1", Err(AuditError::Auth("HTTP 403".into())))
    .on_rounds("e2", Ok(json!([])));

    let config = config();
    let result = Collector::new(&mock, &config).collect_rounds(SEASON).await;

    assert!(matches!(result, Err(AuditError::Auth(_))));
    assert_eq!(mock.call_count("events/e2"), 0);
}

#[tokio::test]
async fn test4_duplicate_and_unreadable_listing_items() -> Result<(), Box<dyn Error>> {
    let mock = MockFetcher::new();
    mock.on_events_page(
        SEASON,
        1,
        Ok(json!([
            event_json("e1", "A"),
            event_json("e1", "A again"),
            { "event": { "name": "No id" } },
        ])),
    )
    .on_rounds(
        "e1",
        Ok(json!({ "rounds": [
            round_json("r1", "Week 1", "2024-04-04"),
            { "round": { "name": "Missing id" } },
        ] })),
    );

    let config = config();
    let collection = Collector::new(&mock, &config).collect_rounds(SEASON).await?;

    assert_eq!(collection.events.len(), 1);
    assert_eq!(collection.events[0].name, "A");
    assert_eq!(collection.rounds.len(), 1);
    assert_eq!(collection.skipped_items.len(), 2);
    assert_eq!(mock.call_count("events/e1/rounds"), 1);
    Ok(())
}

#[tokio::test]
async fn test4_event_listing_failure_is_a_warning() -> Result<(), Box<dyn Error>> {
    let mock = MockFetcher::new();
    mock.on_events_page(SEASON, 1, Err(AuditError::Request("HTTP 404: Not Found".into())));

    let config = config();
    let collection = Collector::new(&mock, &config).collect_rounds(SEASON).await?;

    assert!(collection.events.is_empty());
    assert_eq!(collection.page_warnings.len(), 1);
    assert_eq!(collection.page_warnings[0].page, 1);
    Ok(())
}

#[tokio::test]
async fn test4_seasons_listing_shapes() -> Result<(), Box<dyn Error>> {
    let wrapped = MockFetcher::new();
    wrapped.on_ok(
        "seasons",
        &[],
        json!([
            { "season": { "id": 101, "name": "Summer", "year": 2024 } },
            { "season": { "name": "No id" } },
        ]),
    );
    let config = config();
    let seasons = Collector::new(&wrapped, &config).fetch_seasons().await?;
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].id, "101");
    assert_eq!(seasons[0].to_string(), "Summer (2024)");

    let keyed = MockFetcher::new();
    keyed.on_ok("seasons", &[], json!({ "seasons": [ { "id": "s1", "name": "Winter" } ] }));
    assert_eq!(Collector::new(&keyed, &config).fetch_seasons().await?.len(), 1);

    let broken = MockFetcher::new();
    broken.on_ok("seasons", &[], json!(42));
    let result = Collector::new(&broken, &config).fetch_seasons().await;
    assert!(matches!(result, Err(AuditError::MalformedResponse(_))));
    Ok(())
}

#[tokio::test]
async fn test4_non_object_entries_become_skipped_units() -> Result<(), Box<dyn Error>> {
    let mock = MockFetcher::new();
    mock.on_events_page(SEASON, 1, Ok(json!([event_json("e1", "League"), null, 17])))
        .on_rounds(
            "e1",
            Ok(json!([round_json("r1", "Week 1", "2024-04-04"), "oops"])),
        );

    let config = config();
    let collection = Collector::new(&mock, &config).collect_rounds(SEASON).await?;

    assert_eq!(collection.events.len(), 1);
    assert_eq!(collection.rounds.len(), 1);
    assert_eq!(collection.skipped_items.len(), 3);
    assert!(collection.skipped_items[0].reason.contains("unreadable event entry null"));
    assert!(collection.skipped_items[1].reason.contains("17"));
    assert_eq!(collection.skipped_items[2].id, "e1/?");
    assert!(collection.skipped_items[2].reason.contains("\"oops\""));
    Ok(())
}

#[test]
fn test4_event_season_fallbacks() {
    let explicit = Event::from_api_response(&json!({ "id": 5, "season_id": 9 }), "s1").expect("event");
    assert_eq!(explicit.season_id, "9");

    let nested = Event::from_api_response(&json!({ "id": 5, "season": { "id": "s7" } }), "s1")
        .expect("event");
    assert_eq!(nested.season_id, "s7");

    let missing = Event::from_api_response(&json!({ "id": 5 }), "s1").expect("event");
    assert_eq!(missing.season_id, "s1");
    assert_eq!(missing.id, "5");
}
