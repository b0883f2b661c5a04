//! Read-only live access to the `moods` collection.
//!
//! A store pushes complete snapshots of the entries matching a [`MoodQuery`]
//! into a [`SnapshotSink`] until the returned [`SubscriptionHandle`] is
//! released. Releasing happens explicitly through
//! [`SubscriptionHandle::unsubscribe`] or implicitly on drop.

use std::fmt;
use std::rc::Rc;

use dioxus::logger::tracing::info;
use thiserror::Error;

use super::config::AppConfig;
use super::entry::MoodEntry;
use super::session::SessionId;

mod memory;
pub use memory::MemoryStore;

pub mod stream;

#[cfg(target_arch = "wasm32")]
mod firebase;
#[cfg(target_arch = "wasm32")]
pub use firebase::FirebaseStore;

pub const MOODS_COLLECTION: &str = "moods";
pub const SESSION_FIELD: &str = "sessionID";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Connection or transport failure. The payload is the cause as reported.
    #[error("{0}")]
    Transport(String),
    #[error("the database cancelled the query: {0}")]
    Cancelled(String),
    #[error("the database credential was revoked")]
    AuthRevoked,
    #[error("malformed stream payload: {0}")]
    Malformed(String),
    #[error("live updates are unavailable: {0}")]
    Unavailable(String),
}

/// Equality filter on the session field of the moods collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodQuery {
    pub collection: &'static str,
    pub field: &'static str,
    pub session: SessionId,
}

impl MoodQuery {
    pub fn for_session(session: SessionId) -> Self {
        Self {
            collection: MOODS_COLLECTION,
            field: SESSION_FIELD,
            session,
        }
    }

    pub fn matches(&self, entry: &MoodEntry) -> bool {
        entry.belongs_to(&self.session)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Every entry currently matching the query.
    Snapshot(Vec<MoodEntry>),
    Failed(StoreError),
}

/// Callback receiving store events on the UI thread.
#[derive(Clone)]
pub struct SnapshotSink(Rc<dyn Fn(StoreEvent)>);

impl SnapshotSink {
    pub fn new(deliver: impl Fn(StoreEvent) + 'static) -> Self {
        Self(Rc::new(deliver))
    }

    pub fn deliver(&self, event: StoreEvent) {
        (self.0)(event)
    }
}

impl fmt::Debug for SnapshotSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SnapshotSink")
    }
}

/// Exclusive ownership of one live listener.
pub struct SubscriptionHandle {
    id: u64,
    detach: Option<Box<dyn FnOnce()>>,
}

impl SubscriptionHandle {
    pub fn new(id: u64, detach: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            detach: Some(Box::new(detach)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Detach the listener. No event is delivered through its sink afterwards.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

pub trait MoodStore {
    /// Open a live subscription. The current snapshot is delivered as soon as
    /// the store has it, then again after every change of the matching set.
    fn subscribe(
        &self,
        query: MoodQuery,
        sink: SnapshotSink,
    ) -> Result<SubscriptionHandle, StoreError>;
}

/// Store shared through Dioxus context.
#[derive(Clone)]
pub struct SharedStore(pub Rc<dyn MoodStore>);

impl SharedStore {
    pub fn new(store: impl MoodStore + 'static) -> Self {
        Self(Rc::new(store))
    }

    pub fn subscribe(
        &self,
        query: MoodQuery,
        sink: SnapshotSink,
    ) -> Result<SubscriptionHandle, StoreError> {
        self.0.subscribe(query, sink)
    }
}

/// Pick the store for this build: the realtime database when configured (web
/// only), otherwise the seeded in-memory demo store.
pub fn connect(config: &AppConfig) -> SharedStore {
    match config.database.as_ref() {
        #[cfg(target_arch = "wasm32")]
        Some(database) => {
            info!("streaming moods from {}", database.base_url());
            SharedStore::new(FirebaseStore::new(database.clone()))
        }
        #[cfg(not(target_arch = "wasm32"))]
        Some(database) => {
            dioxus::logger::tracing::warn!(
                "live database streaming needs the web build; ignoring {} and using demo data",
                database.base_url()
            );
            SharedStore::new(MemoryStore::demo())
        }
        None => {
            info!("no database configured, serving demo data");
            SharedStore::new(MemoryStore::demo())
        }
    }
}
