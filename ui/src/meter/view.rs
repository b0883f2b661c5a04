use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::core::session::RouteState;
use crate::core::store::{SharedStore, SnapshotSink, StoreEvent};

use super::grid::MoodGrid;
use super::link::MeterLink;
use super::machine::{MeterMachine, Notice};
use super::notice_text;

type SenderSlot = Rc<RefCell<Option<UnboundedSender<MeterEvent>>>>;

/// Live mood meter for the session named by the route.
///
/// `session_id` is the raw route segment (`None` when the route has none).
/// Requires a [`SharedStore`] in context.
#[component]
pub fn MoodMeterView(#[props(!optional)] session_id: Option<String>) -> Element {
    let store = use_context::<SharedStore>();
    let machine = use_signal(MeterMachine::new);
    let link: Rc<MeterLink> = use_hook(|| Rc::new(MeterLink::new(store)));
    let sender_slot: SenderSlot = use_hook(|| Rc::new(RefCell::new(None)));

    let coroutine = {
        let link = link.clone();
        let sender_slot = sender_slot.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<MeterEvent>| {
            let link = link.clone();
            let sender_slot = sender_slot.clone();
            let mut machine_signal = machine;

            async move {
                machine_signal.with_mut(|m| m.mount());

                while let Some(event) = rx.next().await {
                    let action = match event {
                        MeterEvent::Route(route) => machine_signal.with_mut(|m| m.route(&route)),
                        MeterEvent::Store { generation, event } => {
                            machine_signal.with_mut(|m| m.deliver(generation, event))
                        }
                    };
                    let sender = sender_slot.borrow().clone();
                    machine_signal.with_mut(|m| {
                        link.perform(m, action, |generation| forward(sender, generation))
                    });
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(coroutine.tx());

    // Re-resolve whenever the route segment changes.
    use_effect(use_reactive((&session_id,), move |(session_id,)| {
        coroutine.send(MeterEvent::Route(RouteState::Ready(session_id)));
    }));

    {
        let link = link.clone();
        use_drop(move || {
            debug!("mood meter unmounted");
            link.release();
        });
    }

    let (grid, notice, session_label) = {
        let snapshot = machine.read();
        (
            snapshot.grid().cloned(),
            snapshot.notice(),
            snapshot
                .session()
                .map(ToString::to_string)
                .unwrap_or_default(),
        )
    };

    if let Some(grid) = grid {
        return rsx! {
            MoodGrid { grid, session_label }
        };
    }

    let notice = notice.unwrap_or(Notice::Loading);
    let class = match notice {
        Notice::InvalidSession | Notice::NoData | Notice::Failed(_) => {
            "mood-meter__message mood-meter__message--error"
        }
        Notice::Loading => "mood-meter__message",
    };
    let text = notice_text(&notice);

    rsx! {
        div { class: "mood-meter__notice",
            p { class: "{class}", role: "status", "{text}" }
        }
    }
}

#[derive(Debug, Clone)]
enum MeterEvent {
    Route(RouteState),
    Store { generation: u64, event: StoreEvent },
}

/// Sink tagging each store event with its subscription generation.
fn forward(sender: Option<UnboundedSender<MeterEvent>>, generation: u64) -> SnapshotSink {
    SnapshotSink::new(move |event| match &sender {
        Some(sender) => {
            let _ = sender.unbounded_send(MeterEvent::Store { generation, event });
        }
        None => debug!("meter event loop gone, dropping store event"),
    })
}
