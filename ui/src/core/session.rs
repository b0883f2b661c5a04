//! Session identity resolution from the result page route.

use std::fmt;

/// A validated, trimmed session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// Validate a raw route segment. Only blank values are refused; the id
    /// is matched as a field value, so any other text may name a session.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Routing information as seen by the result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteState {
    /// The router has not resolved the current location yet.
    Pending,
    /// The route is resolved; the session segment may still be absent.
    Ready(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing can be decided until the route is ready.
    Indeterminate,
    Valid(SessionId),
    Invalid,
}

/// One synchronous check per route-ready event.
pub fn resolve(route: &RouteState) -> Resolution {
    match route {
        RouteState::Pending => Resolution::Indeterminate,
        RouteState::Ready(None) => Resolution::Invalid,
        RouteState::Ready(Some(raw)) => match SessionId::parse(raw) {
            Some(id) => Resolution::Valid(id),
            None => Resolution::Invalid,
        },
    }
}
