use crate::config::AuditConfig;
use crate::controller::golf_genius::client::{QueryParams, RemoteFetcher};
use crate::controller::golf_genius::endpoints::{
    EVENT_LIST, EVENTS_PATH, EventFilters, ROUND_LIST, SEASON_LIST, SEASONS_PATH, events_query,
    rounds_path,
};
use crate::controller::golf_genius::paginator::{PageWarning, Paginator};
use crate::error::AuditError;
use crate::model::{Event, Round, Season, truncate_for_log, unwrap_list};
use ahash::RandomState;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A unit (event, or an unreadable item inside a listing) that was skipped.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FailedUnit {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Everything one season walk produced, failures included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundCollection {
    pub season_id: String,
    pub events: Vec<Event>,
    pub rounds: Vec<Round>,
    pub failed_events: Vec<FailedUnit>,
    pub skipped_items: Vec<FailedUnit>,
    pub page_warnings: Vec<PageWarning>,
}

pub struct Collector<'a> {
    fetcher: &'a dyn RemoteFetcher,
    paginator: Paginator<'a>,
    filters: EventFilters,
}

impl<'a> Collector<'a> {
    #[must_use]
    pub fn new(fetcher: &'a dyn RemoteFetcher, config: &AuditConfig) -> Self {
        Self {
            fetcher,
            paginator: Paginator::from_config(fetcher, config),
            filters: EventFilters::from(config),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the seasons listing can't be fetched or read
    pub async fn fetch_seasons(&self) -> Result<Vec<Season>, AuditError> {
        let payload = self.fetcher.fetch(SEASONS_PATH, &QueryParams::new()).await?;
        let list = unwrap_list(payload, SEASON_LIST.singular, SEASON_LIST.plural).ok_or_else(
            || AuditError::MalformedResponse("unexpected seasons response format".into()),
        )?;
        for entry in &list.rejected {
            warn!("Skipping unreadable season entry {}", entry_preview(entry));
        }

        let mut seasons = Vec::with_capacity(list.items.len());
        for item in &list.items {
            match Season::from_api_response(item) {
                Ok(season) => seasons.push(season),
                Err(err) => warn!("Skipping season: {err}"),
            }
        }
        Ok(seasons)
    }

    /// # Errors
    ///
    /// Will return `Err` if the rounds listing fails or can't be read
    pub async fn fetch_rounds(&self, event: &Event) -> Result<(Vec<Round>, Vec<FailedUnit>), AuditError> {
        let payload = self
            .fetcher
            .fetch(&rounds_path(&event.id), &QueryParams::new())
            .await?;
        let list = unwrap_list(payload, ROUND_LIST.singular, ROUND_LIST.plural).ok_or_else(|| {
            AuditError::MalformedResponse(format!("unexpected rounds response for event {}", event.id))
        })?;

        let mut rounds = Vec::with_capacity(list.items.len());
        let mut skipped: Vec<FailedUnit> = list
            .rejected
            .iter()
            .map(|entry| {
                warn!("  Skipping unreadable round entry in event {}", event.id);
                unreadable_entry(format!("{}/?", event.id), &event.name, "round", entry)
            })
            .collect();
        for item in &list.items {
            match Round::from_api_response(item, &event.id) {
                Ok(round) => rounds.push(round),
                Err(err) => {
                    warn!("  Skipping round in event {}: {err}", event.id);
                    skipped.push(FailedUnit {
                        id: format!("{}/?", event.id),
                        name: event.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok((rounds, skipped))
    }

    /// Walks the season's events and their rounds. A failing event is
    /// recorded and skipped; only an authentication failure ends the walk.
    ///
    /// # Errors
    ///
    /// Will return `Err` on an authentication failure
    pub async fn collect_rounds(&self, season_id: &str) -> Result<RoundCollection, AuditError> {
        let mut collection = RoundCollection {
            season_id: season_id.to_string(),
            ..RoundCollection::default()
        };

        info!("Fetching events for season {season_id}...");
        let listing = self
            .paginator
            .paginate(EVENTS_PATH, &events_query(season_id, &self.filters), EVENT_LIST)
            .await?;
        collection.page_warnings.extend(listing.warning);
        collection.skipped_items.extend(
            listing
                .rejected
                .iter()
                .map(|entry| unreadable_entry("?".into(), "", "event", entry)),
        );

        let mut seen: HashSet<String, RandomState> = HashSet::default();
        for item in &listing.items {
            match Event::from_api_response(item, season_id) {
                Ok(event) if seen.insert(event.id.clone()) => collection.events.push(event),
                Ok(event) => warn!("Event {} listed twice; keeping the first", event.id),
                Err(err) => {
                    warn!("Skipping event: {err}");
                    collection.skipped_items.push(FailedUnit {
                        id: "?".into(),
                        name: String::new(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        info!("Found {} events", collection.events.len());

        let total = collection.events.len();
        for (i, event) in collection.events.iter().enumerate() {
            info!("Processing event {}/{total}: {}", i + 1, event.name);
            match self.fetch_rounds(event).await {
                Ok((rounds, skipped)) => {
                    collection.rounds.extend(rounds);
                    collection.skipped_items.extend(skipped);
                }
                Err(err @ AuditError::Auth(_)) => return Err(err),
                Err(err) => {
                    warn!("  Failed to fetch rounds for event {}: {err}", event.name);
                    collection.failed_events.push(FailedUnit {
                        id: event.id.clone(),
                        name: event.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!("Found {} total rounds", collection.rounds.len());
        Ok(collection)
    }
}

fn entry_preview(entry: &Value) -> String {
    truncate_for_log(&entry.to_string(), 80)
}

fn unreadable_entry(id: String, name: &str, kind: &str, entry: &Value) -> FailedUnit {
    FailedUnit {
        id,
        name: name.to_string(),
        reason: format!("unreadable {kind} entry {}", entry_preview(entry)),
    }
}
