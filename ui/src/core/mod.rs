//! Platform-agnostic building blocks: the emotion layout, the entry schema and
//! its aggregation, session resolution, the store seam, configuration and the
//! LINE login gate.

pub mod config;
pub mod emotions;
pub mod entry;
pub mod liff;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod session;
pub mod store;
pub mod tally;
