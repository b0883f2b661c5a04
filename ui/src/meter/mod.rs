//! The session mood meter: lifecycle state machine, live view and grid.

mod grid;
mod link;
pub mod machine;
mod view;

pub use grid::MoodGrid;
pub use link::MeterLink;
pub use machine::{MeterAction, MeterMachine, MeterPhase, Notice};
pub use view::MoodMeterView;

use crate::t;

/// Localized text for a notice shown in place of the grid.
pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::Loading => t!("meter-loading"),
        Notice::InvalidSession => t!("meter-invalid-session"),
        Notice::NoData => t!("meter-no-data"),
        Notice::Failed(cause) => t!("meter-error", cause = cause.as_str()),
    }
}
