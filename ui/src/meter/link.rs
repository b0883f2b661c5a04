use std::cell::RefCell;

use dioxus::logger::tracing::debug;

use crate::core::store::{MoodQuery, SharedStore, SnapshotSink, StoreError, SubscriptionHandle};

use super::machine::{MeterAction, MeterMachine};

/// The one live subscription a mounted meter owns.
///
/// At most one handle is attached; opening a new one detaches the old one
/// first, and dropping the link detaches whatever is left.
pub struct MeterLink {
    store: SharedStore,
    handle: RefCell<Option<SubscriptionHandle>>,
}

impl MeterLink {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            handle: RefCell::new(None),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.handle.borrow().is_some()
    }

    /// Carry out what the machine asked for. `sink_for` builds the sink for a
    /// new subscription generation.
    pub fn perform(
        &self,
        machine: &mut MeterMachine,
        action: MeterAction,
        sink_for: impl FnOnce(u64) -> SnapshotSink,
    ) {
        match action {
            MeterAction::Nothing => {}
            MeterAction::Release => self.release(),
            MeterAction::Subscribe { query, generation } => {
                match self.open(query, sink_for(generation)) {
                    Ok(()) => machine.opened(generation),
                    Err(err) => machine.open_failed(generation, &err),
                }
            }
        }
    }

    pub fn open(&self, query: MoodQuery, sink: SnapshotSink) -> Result<(), StoreError> {
        self.release();
        let handle = self.store.subscribe(query, sink)?;
        self.handle.borrow_mut().replace(handle);
        Ok(())
    }

    /// Detach the current handle, if any. The borrow ends before detaching so
    /// a store may call back synchronously.
    pub fn release(&self) {
        let taken = self.handle.borrow_mut().take();
        if let Some(handle) = taken {
            debug!("releasing mood subscription {}", handle.id());
            handle.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::RouteState;
    use crate::core::store::{MemoryStore, StoreEvent};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(u64, StoreEvent)>>>;

    fn recording(log: &Log) -> impl Fn(u64) -> SnapshotSink + '_ {
        move |generation| {
            let log = log.clone();
            SnapshotSink::new(move |event| log.borrow_mut().push((generation, event)))
        }
    }

    fn route(link: &MeterLink, machine: &mut MeterMachine, raw: Option<&str>, log: &Log) {
        let action = machine.route(&RouteState::Ready(raw.map(str::to_string)));
        link.perform(machine, action, recording(log));
    }

    fn moods(event: &StoreEvent) -> Vec<String> {
        match event {
            StoreEvent::Snapshot(entries) => entries.iter().map(|e| e.mood.clone()).collect(),
            StoreEvent::Failed(err) => panic!("unexpected failure {err}"),
        }
    }

    #[test]
    fn session_change_detaches_before_subscribing_again() {
        let store = MemoryStore::new();
        store.insert("first", "Sad");
        store.insert("second", "Calm");
        let link = MeterLink::new(SharedStore::new(store.clone()));
        let mut machine = MeterMachine::new();
        let log: Log = Rc::default();

        route(&link, &mut machine, Some("first"), &log);
        assert_eq!(store.listener_count(), 1);

        route(&link, &mut machine, Some("second"), &log);
        assert_eq!(store.listener_count(), 1);

        log.borrow_mut().clear();
        store.insert("first", "Elated");
        assert!(log.borrow().is_empty(), "old session still delivers");

        store.insert("second", "Happy");
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, machine.generation());
        assert_eq!(moods(&log[0].1), vec!["Calm", "Happy"]);
    }

    #[test]
    fn dropping_the_link_detaches() {
        let store = MemoryStore::demo();
        let link = MeterLink::new(SharedStore::new(store.clone()));
        let mut machine = MeterMachine::new();
        let log: Log = Rc::default();

        route(&link, &mut machine, Some("demo"), &log);
        assert!(link.is_attached());
        assert_eq!(store.listener_count(), 1);

        drop(link);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn invalid_route_releases_the_live_handle() {
        let store = MemoryStore::demo();
        let link = MeterLink::new(SharedStore::new(store.clone()));
        let mut machine = MeterMachine::new();
        let log: Log = Rc::default();

        route(&link, &mut machine, Some("demo"), &log);
        route(&link, &mut machine, None, &log);
        assert!(!link.is_attached());
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn teardown_releases() {
        let store = MemoryStore::demo();
        let link = MeterLink::new(SharedStore::new(store.clone()));
        let mut machine = MeterMachine::new();
        let log: Log = Rc::default();

        route(&link, &mut machine, Some("demo"), &log);
        let action = machine.teardown();
        link.perform(&mut machine, action, recording(&log));
        assert_eq!(store.listener_count(), 0);
    }
}
