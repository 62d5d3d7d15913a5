// Season rows: the raw per-player, per-season records and their loaders.
//
// Accepts a JSON array of objects or a CSV table with a header row. Both
// formats are reduced to the same loose record and normalized once here, so
// the aggregation code only ever sees clean integers.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::normalize::{
    parse_field_or_zero, parse_optional_number, text_of, DidNotPlay,
};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One player's line for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRow {
    /// Opaque identifier, stable across seasons for the same player.
    pub player_id: String,
    /// Display name, if the source had one.
    pub player_name: Option<String>,
    /// Season label (e.g. "2019" or "2019-20").
    pub year: Option<String>,
    pub goals: i64,
    pub assists: i64,
    /// Explicit points; `None` when absent or not a number.
    pub points: Option<i64>,
    /// The `did_not_play` marker; `None` when the field was absent.
    pub did_not_play: Option<DidNotPlay>,
}

impl SeasonRow {
    /// Name to show for this row: the source name, or `#<player_id>`.
    pub fn display_name(&self) -> String {
        match &self.player_name {
            Some(name) => name.clone(),
            None => format!("#{}", self.player_id),
        }
    }

    /// Points this season is worth: the explicit value when it is non-zero,
    /// otherwise goals plus assists.
    pub fn effective_points(&self) -> i64 {
        match self.points {
            Some(p) if p != 0 => p,
            _ => self.goals.saturating_add(self.assists),
        }
    }

    /// Whether the row counts toward career totals: the marker is absent or
    /// coerces to exactly 0.
    ///
    /// The top-seasons view uses its own predicate,
    /// [`SeasonRow::eligible_for_top_seasons`].
    pub fn qualifies_for_totals(&self) -> bool {
        match &self.did_not_play {
            None => true,
            Some(dnp) => dnp.is_numeric_zero(),
        }
    }

    /// Whether the row may appear in the individual-season ranking: the
    /// marker is absent, falsy, or coerces to exactly 0.
    pub fn eligible_for_top_seasons(&self) -> bool {
        match &self.did_not_play {
            None => true,
            Some(dnp) => !dnp.truthy || dnp.is_numeric_zero(),
        }
    }

    /// Normalize one loose record. Returns `None` (after logging) for
    /// records without a usable player id.
    pub fn from_value(value: &Value) -> Option<SeasonRow> {
        let raw = match RawSeasonRow::deserialize(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed season row: {}", e);
                return None;
            }
        };
        raw.normalize()
    }
}

/// Source format of a score file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    Csv,
}

impl DataFormat {
    /// Guess the format from a file name or URL: `.csv` is CSV, everything
    /// else is JSON.
    pub fn infer(location: &str) -> DataFormat {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        if path.ends_with(".csv") {
            DataFormat::Csv
        } else {
            DataFormat::Json
        }
    }

    /// Parse a complete score file in this format.
    pub fn parse(self, bytes: &[u8]) -> Result<Vec<SeasonRow>, SeasonError> {
        match self {
            DataFormat::Json => parse_json(bytes),
            DataFormat::Csv => parse_csv(bytes),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SeasonError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of season rows, found {found}")]
    NotAnArray { found: &'static str },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Raw serde struct (private)
// ---------------------------------------------------------------------------

/// A season record exactly as loose as the source file. Every field is an
/// arbitrary JSON value; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawSeasonRow {
    #[serde(default, alias = "playerId")]
    player_id: Option<Value>,
    #[serde(default, alias = "playerName")]
    playername: Option<Value>,
    #[serde(default)]
    player: Option<Value>,
    #[serde(default, alias = "season")]
    year: Option<Value>,
    #[serde(default)]
    goals: Option<Value>,
    #[serde(default)]
    assists: Option<Value>,
    #[serde(default)]
    points: Option<Value>,
    #[serde(default, alias = "didNotPlay")]
    did_not_play: Option<Value>,
}

impl RawSeasonRow {
    fn normalize(self) -> Option<SeasonRow> {
        let Some(player_id) = self.player_id.as_ref().and_then(text_of) else {
            warn!("skipping season row without a player_id");
            return None;
        };

        let player_name = self
            .playername
            .as_ref()
            .and_then(text_of)
            .or_else(|| self.player.as_ref().and_then(text_of));

        Some(SeasonRow {
            player_id,
            player_name,
            year: self.year.as_ref().and_then(text_of),
            goals: parse_field_or_zero(self.goals.as_ref()),
            assists: parse_field_or_zero(self.assists.as_ref()),
            points: parse_optional_number(self.points.as_ref()),
            did_not_play: self.did_not_play.as_ref().map(DidNotPlay::from_value),
        })
    }
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse a JSON document holding an array of season records.
///
/// Elements that are not objects, or that lack a player id, are skipped with
/// a warning.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<SeasonRow>, SeasonError> {
    let doc: Value = serde_json::from_slice(bytes)?;
    let items = match doc {
        Value::Array(items) => items,
        other => {
            return Err(SeasonError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        if !item.is_object() {
            warn!("skipping element {}: expected an object, found {}", idx, json_kind(item));
            continue;
        }
        if let Some(row) = SeasonRow::from_value(item) {
            rows.push(row);
        }
    }
    debug!("parsed {} of {} JSON season rows", rows.len(), items.len());
    Ok(rows)
}

/// Parse a CSV table with a header row. Cells are kept as strings and go
/// through the same normalization as JSON values; empty cells count as
/// absent for names and as 0 for numbers.
pub fn parse_csv<R: Read>(rdr: R) -> Result<Vec<SeasonRow>, SeasonError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let object: Map<String, Value> = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, cell)| (h.to_string(), Value::String(cell.to_string())))
                    .collect();
                if let Some(row) = SeasonRow::from_value(&Value::Object(object)) {
                    rows.push(row);
                }
            }
            Err(e) => {
                warn!("skipping malformed CSV row: {}", e);
            }
        }
    }
    debug!("parsed {} CSV season rows", rows.len());
    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
