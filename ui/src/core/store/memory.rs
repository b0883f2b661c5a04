use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use dioxus::logger::tracing::debug;

use super::{MoodQuery, MoodStore, SnapshotSink, StoreError, StoreEvent, SubscriptionHandle};
use crate::core::entry::MoodEntry;
use crate::core::session::SessionId;

/// In-process mood collection with the same push semantics as the realtime
/// database: subscribers get the current snapshot at once and a fresh one
/// after every matching insert.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    records: Vec<MoodEntry>,
    listeners: BTreeMap<u64, Listener>,
    next_listener: u64,
    next_record: u64,
}

struct Listener {
    query: MoodQuery,
    sink: SnapshotSink,
}

impl Inner {
    fn snapshot(&self, query: &MoodQuery) -> Vec<MoodEntry> {
        self.records
            .iter()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a `demo` session, used when no database is configured.
    pub fn demo() -> Self {
        let store = Self::new();
        for mood in [
            "Happy", "Happy", "Calm", "Focused", "Happy", "Tired", "Excited", "Calm", "Stressed",
            "Content",
        ] {
            store.insert("demo", mood);
        }
        store
    }

    /// Add an entry under a generated key and return the key.
    pub fn insert(&self, session_id: &str, mood: &str) -> String {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_record += 1;
            format!("mem-{:04}", inner.next_record)
        };
        self.push(MoodEntry::new(id.clone(), session_id, mood));
        id
    }

    pub fn push(&self, entry: MoodEntry) {
        let deliveries: Vec<(SnapshotSink, Vec<MoodEntry>)> = {
            let mut inner = self.inner.borrow_mut();
            inner.records.push(entry.clone());
            inner
                .listeners
                .values()
                .filter(|listener| listener.query.matches(&entry))
                .map(|listener| (listener.sink.clone(), inner.snapshot(&listener.query)))
                .collect()
        };

        // Sinks run without the borrow held so they may call back into the store.
        for (sink, snapshot) in deliveries {
            sink.deliver(StoreEvent::Snapshot(snapshot));
        }
    }

    /// Report `error` to every subscriber of `session`, as a dropped
    /// connection would.
    pub fn fail(&self, session: &SessionId, error: StoreError) {
        let sinks: Vec<SnapshotSink> = self
            .inner
            .borrow()
            .listeners
            .values()
            .filter(|listener| &listener.query.session == session)
            .map(|listener| listener.sink.clone())
            .collect();

        for sink in sinks {
            sink.deliver(StoreEvent::Failed(error.clone()));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl MoodStore for MemoryStore {
    fn subscribe(
        &self,
        query: MoodQuery,
        sink: SnapshotSink,
    ) -> Result<SubscriptionHandle, StoreError> {
        let (id, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_listener += 1;
            let id = inner.next_listener;
            let snapshot = inner.snapshot(&query);
            inner.listeners.insert(
                id,
                Listener {
                    query,
                    sink: sink.clone(),
                },
            );
            (id, snapshot)
        };
        debug!("memory store listener {id} attached");

        sink.deliver(StoreEvent::Snapshot(snapshot));

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        Ok(SubscriptionHandle::new(id, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.remove(&id);
                debug!("memory store listener {id} detached");
            }
        }))
    }
}
