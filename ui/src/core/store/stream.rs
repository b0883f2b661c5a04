//! Realtime database REST streaming: query URL construction, event decoding
//! and the local mirror of the streamed result.
//!
//! The stream is a Server-Sent Events feed. Each `put` or `patch` carries a
//! JSON body `{"path": "/...", "data": ...}` relative to the queried
//! location; `keep-alive` has no payload; `cancel` and `auth_revoked` end the
//! stream.

use dioxus::logger::tracing::warn;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use super::{MoodQuery, StoreError};
use crate::core::config::DatabaseConfig;
use crate::core::entry::{entries_from_records, MoodEntry};

/// Server-Sent Event names the stream emits.
pub const STREAM_EVENTS: [&str; 5] = ["put", "patch", "keep-alive", "cancel", "auth_revoked"];

/// `GET {base}/{collection}.json?orderBy="field"&equalTo="value"[&auth=...]`
pub fn stream_url(database: &DatabaseConfig, query: &MoodQuery) -> Result<Url, StoreError> {
    let base = database.base_url();
    let mut url = base
        .join(&format!("{}.json", query.collection))
        .map_err(|err| StoreError::Unavailable(format!("bad collection path: {err}")))?;

    let quoted = |raw: &str| Value::String(raw.to_string()).to_string();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        // Keep parameters of the base url, e.g. the emulator's `ns`.
        for (key, value) in base.query_pairs() {
            pairs.append_pair(&key, &value);
        }
        pairs.append_pair("orderBy", &quoted(query.field));
        pairs.append_pair("equalTo", &quoted(query.session.as_str()));
        if let Some(auth) = database.auth() {
            pairs.append_pair("auth", auth);
        }
    }

    Ok(url)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamPayload {
    pub path: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put(StreamPayload),
    Patch(StreamPayload),
    KeepAlive,
    Cancel(String),
    AuthRevoked,
}

impl StreamEvent {
    /// Decode one event. Unknown event names yield `Ok(None)`.
    pub fn parse(event_type: &str, data: &str) -> Result<Option<Self>, StoreError> {
        let payload = || {
            serde_json::from_str::<StreamPayload>(data)
                .map_err(|err| StoreError::Malformed(format!("{event_type}: {err}")))
        };

        let event = match event_type {
            "put" => Self::Put(payload()?),
            "patch" => Self::Patch(payload()?),
            "keep-alive" => Self::KeepAlive,
            "cancel" => Self::Cancel(cancel_reason(data)),
            "auth_revoked" => Self::AuthRevoked,
            other => {
                warn!("ignoring unknown stream event `{other}`");
                return Ok(None);
            }
        };
        Ok(Some(event))
    }
}

fn cancel_reason(data: &str) -> String {
    let trimmed = data.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(reason)) => reason,
        Ok(Value::Null) | Err(_) if trimmed.is_empty() || trimmed == "null" => {
            "permission denied".to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Local mirror of the streamed query result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotCache {
    root: Value,
}

impl SnapshotCache {
    /// Apply one event. Returns `Ok(true)` when a new snapshot should be
    /// published and an error when the stream has ended.
    pub fn apply(&mut self, event: StreamEvent) -> Result<bool, StoreError> {
        match event {
            StreamEvent::Put(StreamPayload { path, data }) => {
                write_at(&mut self.root, &segments(&path), data);
                Ok(true)
            }
            StreamEvent::Patch(StreamPayload { path, data }) => {
                let Value::Object(children) = data else {
                    return Err(StoreError::Malformed(format!(
                        "patch at {path} is not an object"
                    )));
                };
                let base = segments(&path);
                for (key, value) in children {
                    let mut target = base.clone();
                    target.push(key.as_str());
                    write_at(&mut self.root, &target, value);
                }
                Ok(true)
            }
            StreamEvent::KeepAlive => Ok(false),
            StreamEvent::Cancel(reason) => Err(StoreError::Cancelled(reason)),
            StreamEvent::AuthRevoked => Err(StoreError::AuthRevoked),
        }
    }

    pub fn entries(&self, query: &MoodQuery) -> Vec<MoodEntry> {
        match &self.root {
            Value::Null => Vec::new(),
            Value::Object(records) => entries_from_records(records, &query.session),
            other => {
                warn!("query result is not a record set: {other}");
                Vec::new()
            }
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Set `data` at `path` below `node`; `null` deletes. Emptied objects are
/// pruned the way the database drops them.
fn write_at(node: &mut Value, path: &[&str], data: Value) {
    let Some((head, rest)) = path.split_first() else {
        *node = data;
        return;
    };

    if !node.is_object() {
        if data.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        if data.is_null() {
            map.remove(*head);
        } else {
            map.insert((*head).to_string(), data);
        }
        return;
    }

    let child = map.entry((*head).to_string()).or_insert(Value::Null);
    write_at(child, rest, data);
    let emptied = child.is_null() || child.as_object().is_some_and(Map::is_empty);
    if emptied {
        map.remove(*head);
    }
}
