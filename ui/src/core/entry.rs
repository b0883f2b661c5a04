//! Typed schema for mood records read from the `moods` collection.

use dioxus::logger::tracing::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::session::SessionId;

/// One submitted mood. Any fields beyond `sessionID` and `mood` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoodEntry {
    /// Record key assigned by the store.
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub mood: String,
}

impl MoodEntry {
    pub fn new(
        id: impl Into<String>,
        session_id: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            mood: mood.into(),
        }
    }

    /// Decode a single record stored under key `id`.
    pub fn from_record(id: &str, value: &Value) -> Result<Self, serde_json::Error> {
        let mut entry = MoodEntry::deserialize(value)?;
        entry.id = id.to_string();
        Ok(entry)
    }

    pub fn belongs_to(&self, session: &SessionId) -> bool {
        self.session_id == session.as_str()
    }
}

/// Decode a keyed record set, keeping only well-formed entries of `session`.
/// Malformed records are skipped with a warning.
pub fn entries_from_records(records: &Map<String, Value>, session: &SessionId) -> Vec<MoodEntry> {
    records
        .iter()
        .filter_map(|(id, value)| match MoodEntry::from_record(id, value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping malformed mood record {id}: {err}");
                None
            }
        })
        .filter(|entry| entry.belongs_to(session))
        .collect()
}
