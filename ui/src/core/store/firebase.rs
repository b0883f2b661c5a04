use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::logger::tracing::{debug, error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventSource, MessageEvent};

use super::stream::{stream_url, SnapshotCache, StreamEvent, STREAM_EVENTS};
use super::{MoodQuery, MoodStore, SnapshotSink, StoreError, StoreEvent, SubscriptionHandle};
use crate::core::config::DatabaseConfig;
use crate::core::platform::js_error_message;

/// Realtime database store backed by the REST streaming endpoint, one
/// browser `EventSource` per subscription.
pub struct FirebaseStore {
    database: DatabaseConfig,
    next_id: Cell<u64>,
}

impl FirebaseStore {
    pub fn new(database: DatabaseConfig) -> Self {
        Self {
            database,
            next_id: Cell::new(0),
        }
    }
}

type MessageCallback = Closure<dyn FnMut(MessageEvent)>;

impl MoodStore for FirebaseStore {
    fn subscribe(
        &self,
        query: MoodQuery,
        sink: SnapshotSink,
    ) -> Result<SubscriptionHandle, StoreError> {
        let url = stream_url(&self.database, &query)?;
        let source = EventSource::new(url.as_str())
            .map_err(|err| StoreError::Unavailable(js_error_message(&err)))?;

        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let cache = Rc::new(RefCell::new(SnapshotCache::default()));
        let mut listeners: Vec<(&'static str, MessageCallback)> = Vec::new();

        for kind in STREAM_EVENTS {
            let cache = cache.clone();
            let sink = sink.clone();
            let query = query.clone();
            let callback = Closure::<dyn FnMut(MessageEvent)>::new(move |evt: MessageEvent| {
                let data = evt.data().as_string().unwrap_or_default();
                on_message(kind, &data, &cache, &query, &sink);
            });

            if let Err(err) =
                source.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            {
                source.close();
                return Err(StoreError::Unavailable(js_error_message(&err)));
            }
            listeners.push((kind, callback));
        }

        let on_error = {
            let sink = sink.clone();
            let source = source.clone();
            Closure::<dyn FnMut(Event)>::new(move |_evt: Event| {
                let cause = if source.ready_state() == EventSource::CLOSED {
                    "the stream was closed by the server"
                } else {
                    "network connection lost"
                };
                error!("mood stream {id} failed: {cause}");
                sink.deliver(StoreEvent::Failed(StoreError::Transport(cause.to_string())));
            })
        };
        source.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        debug!("mood stream {id} opened for session {}", query.session);

        Ok(SubscriptionHandle::new(id, move || {
            source.set_onerror(None);
            for (kind, callback) in &listeners {
                let _ = source
                    .remove_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
            }
            source.close();
            drop(listeners);
            drop(on_error);
            debug!("mood stream {id} closed");
        }))
    }
}

fn on_message(
    kind: &str,
    data: &str,
    cache: &RefCell<SnapshotCache>,
    query: &MoodQuery,
    sink: &SnapshotSink,
) {
    let event = match StreamEvent::parse(kind, data) {
        Ok(Some(event)) => event,
        Ok(None) => return,
        Err(err) => {
            warn!("dropping undecodable `{kind}` event: {err}");
            sink.deliver(StoreEvent::Failed(err));
            return;
        }
    };

    let applied = cache.borrow_mut().apply(event);
    match applied {
        Ok(true) => {
            let entries = cache.borrow().entries(query);
            sink.deliver(StoreEvent::Snapshot(entries));
        }
        Ok(false) => {}
        Err(err) => {
            error!("mood stream ended: {err}");
            sink.deliver(StoreEvent::Failed(err));
        }
    }
}
