use crate::error::AuditError;
use crate::model::{
    HOLES, HoleScores, MAX_HOLE_SCORE, MIN_HOLE_SCORE, PlayerScore, string_field,
    truncate_for_log,
};
use log::warn;
use serde_json::Value;

const GROUP_LIST_KEYS: [&str; 4] = ["tee_sheet", "pairing_groups", "data", "groups"];
const PLAYER_KEYS: [&str; 4] = ["players", "player", "pairing", "members"];
const FLAT_SCORE_KEYS: [&str; 5] = ["score_array", "scores", "score", "holes", "hole_scores"];
const SPLIT_SCORE_KEYS: [(&str, &str); 3] = [
    ("front", "back"),
    ("front_nine", "back_nine"),
    ("front9", "back9"),
];
const HOLE_VALUE_KEYS: [&str; 3] = ["score", "gross", "value"];
const NINE: usize = 9;

/// How a player's hole scores arrived. Detected once, then normalised into
/// [`HoleScores`]; nothing past ingestion looks at the shape again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreCardShape<'a> {
    Split { front: &'a [Value], back: &'a [Value] },
    Flat(&'a [Value]),
    Missing,
}

impl<'a> ScoreCardShape<'a> {
    #[must_use]
    pub fn detect(player: &'a Value) -> Self {
        if let Some(split) = split_arrays(player) {
            return split;
        }
        if let Some(split) = player.get("scores").and_then(split_arrays) {
            return split;
        }
        FLAT_SCORE_KEYS
            .iter()
            .find_map(|key| player.get(*key).and_then(Value::as_array))
            .map_or(Self::Missing, |scores| Self::Flat(scores.as_slice()))
    }

    /// Hole number (1-based) paired with the raw entry for that hole.
    fn holes(self) -> Vec<(usize, &'a Value)> {
        match self {
            Self::Split { front, back } => front
                .iter()
                .take(NINE)
                .enumerate()
                .map(|(i, v)| (i + 1, v))
                .chain(back.iter().take(NINE).enumerate().map(|(i, v)| (NINE + i + 1, v)))
                .collect(),
            Self::Flat(scores) => scores
                .iter()
                .take(HOLES)
                .enumerate()
                .map(|(i, v)| (i + 1, v))
                .collect(),
            Self::Missing => Vec::new(),
        }
    }

    fn extra_entries(self) -> usize {
        match self {
            Self::Split { front, back } => {
                front.len().saturating_sub(NINE) + back.len().saturating_sub(NINE)
            }
            Self::Flat(scores) => scores.len().saturating_sub(HOLES),
            Self::Missing => 0,
        }
    }
}

fn split_arrays(value: &Value) -> Option<ScoreCardShape<'_>> {
    const EMPTY: &[Value] = &[];
    SPLIT_SCORE_KEYS.iter().find_map(|(front_key, back_key)| {
        let front = value.get(*front_key).and_then(Value::as_array);
        let back = value.get(*back_key).and_then(Value::as_array);
        if front.is_none() && back.is_none() {
            return None;
        }
        Some(ScoreCardShape::Split {
            front: front.map_or(EMPTY, Vec::as_slice),
            back: back.map_or(EMPTY, Vec::as_slice),
        })
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoleEntry {
    Empty,
    Score(u8),
    /// Present but not a plausible score; kept out of the completeness count.
    Anomaly(String),
}

#[must_use]
pub fn read_hole_entry(value: &Value) -> HoleEntry {
    match value {
        Value::Null => HoleEntry::Empty,
        Value::String(s) if s.trim().is_empty() => HoleEntry::Empty,
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => score_in_range(n, value),
            Err(_) => HoleEntry::Anomaly(value.to_string()),
        },
        Value::Number(n) => {
            let whole = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 1e9)
                    .map(|f| f as i64)
            });
            match whole {
                Some(n) => score_in_range(n, value),
                None => HoleEntry::Anomaly(value.to_string()),
            }
        }
        Value::Object(map) if map.is_empty() => HoleEntry::Empty,
        Value::Object(_) => HOLE_VALUE_KEYS
            .iter()
            .find_map(|key| value.get(*key))
            .map_or_else(|| HoleEntry::Anomaly(value.to_string()), read_hole_entry),
        Value::Bool(_) | Value::Array(_) => HoleEntry::Anomaly(value.to_string()),
    }
}

fn score_in_range(n: i64, raw: &Value) -> HoleEntry {
    // 0 is the remote's "nothing entered" placeholder
    if n == 0 {
        return HoleEntry::Empty;
    }
    if (MIN_HOLE_SCORE..=MAX_HOLE_SCORE).contains(&n) {
        u8::try_from(n).map_or_else(|_| HoleEntry::Anomaly(raw.to_string()), HoleEntry::Score)
    } else {
        HoleEntry::Anomaly(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAnomaly {
    pub player_name: String,
    pub hole: usize,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeeSheet {
    pub players: Vec<PlayerScore>,
    pub anomalies: Vec<ScoreAnomaly>,
    /// Pairing groups that carried no players collection.
    pub skipped_groups: usize,
}

/// Normalises one player entry into the canonical 18-slot card.
pub fn normalize_player(player: &Value, anomalies: &mut Vec<ScoreAnomaly>) -> PlayerScore {
    let player_name = player_name(player);
    let shape = ScoreCardShape::detect(player);
    if shape.extra_entries() > 0 {
        warn!(
            "{player_name}: ignoring {} score entries beyond hole 18",
            shape.extra_entries()
        );
    }

    let mut scores = HoleScores::default();
    for (hole, raw) in shape.holes() {
        match read_hole_entry(raw) {
            HoleEntry::Empty => {}
            HoleEntry::Score(score) => scores.0[hole - 1] = Some(score),
            HoleEntry::Anomaly(raw) => {
                warn!("{player_name}: implausible score {raw} on hole {hole}, not counted");
                anomalies.push(ScoreAnomaly {
                    player_name: player_name.clone(),
                    hole,
                    raw,
                });
            }
        }
    }

    PlayerScore {
        player_name,
        scores,
    }
}

fn player_name(player: &Value) -> String {
    if let Some(name) = string_field(player, &["name", "player_name"]) {
        return name;
    }
    let first = string_field(player, &["first_name"]).unwrap_or_default();
    let last = string_field(player, &["last_name"]).unwrap_or_default();
    let full = format!("{first} {last}").trim().to_string();
    if full.is_empty() {
        "Unknown player".to_string()
    } else {
        full
    }
}

fn pairing_groups(payload: &Value) -> Result<&[Value], AuditError> {
    match payload {
        Value::Array(groups) => Ok(groups.as_slice()),
        Value::Object(map) if map.is_empty() => Ok(&[] as &[Value]),
        Value::Object(_) => Ok(GROUP_LIST_KEYS
            .iter()
            .find_map(|key| payload.get(*key).and_then(Value::as_array))
            .map_or_else(|| std::slice::from_ref(payload), Vec::as_slice)),
        _ => Err(AuditError::MalformedResponse(
            "tee sheet is neither a list nor an object".into(),
        )),
    }
}

/// `None` when the group carries no recognisable players collection.
fn group_players(group: &Value) -> Option<Vec<&Value>> {
    let group = group.get("pairing_group").unwrap_or(group);
    if !group.is_object() {
        return None;
    }
    for key in PLAYER_KEYS {
        match group.get(key) {
            Some(Value::Array(players)) => return Some(players.iter().collect()),
            Some(player @ Value::Object(_)) => return Some(vec![player]),
            _ => {}
        }
    }
    if group.get("name").is_some() || group.get("scores").is_some() {
        return Some(vec![group]);
    }
    None
}

/// # Errors
///
/// Will return `Err` if the payload has no pairing-group list, or none of
/// its groups carries players
pub fn parse_tee_sheet(payload: &Value) -> Result<TeeSheet, AuditError> {
    let groups = pairing_groups(payload)?;
    let mut sheet = TeeSheet::default();
    if groups.is_empty() {
        return Ok(sheet);
    }

    for (i, group) in groups.iter().enumerate() {
        let Some(players) = group_players(group) else {
            warn!(
                "Pairing group {} of {} has no players collection: {}",
                i + 1,
                groups.len(),
                truncate_for_log(&group.to_string(), 80)
            );
            sheet.skipped_groups += 1;
            continue;
        };
        for player in players.into_iter().filter(|p| p.is_object()) {
            sheet.players.push(normalize_player(player, &mut sheet.anomalies));
        }
    }

    if sheet.skipped_groups == groups.len() {
        return Err(AuditError::MalformedResponse(format!(
            "no players array in any of {} pairing groups",
            groups.len()
        )));
    }
    Ok(sheet)
}
