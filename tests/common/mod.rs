#![allow(dead_code)]

use async_trait::async_trait;
use rusty_golf_audit::AuditError;
use rusty_golf_audit::controller::golf_genius::{QueryParams, RemoteFetcher};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted stand-in for the Golf Genius api. Responses are queued per
/// request key (`path?k=v&..`); the last queued response for a key repeats.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, AuditError>>>>,
    calls: Mutex<Vec<String>>,
}

pub fn request_key(path: &str, query: &QueryParams) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{path}?{}", pairs.join("&"))
}

fn query_of(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, path: &str, query: &[(&str, &str)], response: Result<Value, AuditError>) -> &Self {
        let key = request_key(path, &query_of(query));
        self.responses
            .lock()
            .expect("mock lock")
            .entry(key)
            .or_default()
            .push_back(response);
        self
    }

    pub fn on_ok(&self, path: &str, query: &[(&str, &str)], body: Value) -> &Self {
        self.on(path, query, Ok(body))
    }

    /// Events listing page for `season` with no extra filters.
    pub fn on_events_page(&self, season: &str, page: u32, response: Result<Value, AuditError>) -> &Self {
        let page = page.to_string();
        self.on("events", &[("page", page.as_str()), ("season", season)], response)
    }

    pub fn on_rounds(&self, event_id: &str, response: Result<Value, AuditError>) -> &Self {
        self.on(&format!("events/{event_id}/rounds"), &[], response)
    }

    pub fn on_tee_sheet(&self, event_id: &str, round_id: &str, response: Result<Value, AuditError>) -> &Self {
        self.on(
            &format!("events/{event_id}/rounds/{round_id}/tee_sheet"),
            &[("include_all_custom_fields", "true")],
            response,
        )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock lock").clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl RemoteFetcher for MockFetcher {
    async fn fetch(&self, path: &str, query: &QueryParams) -> Result<Value, AuditError> {
        let key = request_key(path, query);
        self.calls.lock().expect("mock lock").push(key.clone());

        let mut responses = self.responses.lock().expect("mock lock");
        match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("queue has entries"),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(AuditError::Request(format!("HTTP 404: {key}")))),
            None => Err(AuditError::Request(format!("HTTP 404: no mock for {key}"))),
        }
    }
}

pub fn event_json(id: &str, name: &str) -> Value {
    json!({ "event": { "id": id, "name": name } })
}

pub fn events_page(ids: std::ops::Range<usize>) -> Value {
    Value::Array(
        ids.map(|i| event_json(&format!("ev{i}"), &format!("Event {i}")))
            .collect(),
    )
}

pub fn round_json(id: &str, name: &str, date: &str) -> Value {
    json!({ "round": { "id": id, "name": name, "date": date } })
}

pub fn split_player(name: &str, front: [Option<i64>; 9], back: [Option<i64>; 9]) -> Value {
    json!({ "name": name, "front": front, "back": back })
}

pub fn flat_player(name: &str, scores: [Option<i64>; 18]) -> Value {
    json!({ "name": name, "score_array": scores })
}

pub fn tee_sheet(players: Vec<Value>) -> Value {
    json!([{ "pairing_group": { "players": players } }])
}

pub const FULL_NINE: [Option<i64>; 9] = [
    Some(4),
    Some(4),
    Some(5),
    Some(3),
    Some(4),
    Some(3),
    Some(4),
    Some(5),
    Some(4),
];
pub const EMPTY_NINE: [Option<i64>; 9] = [None; 9];
