//! # mf-goal
//!
//! Monthly goal records and their shared-container persistence for Monthly Focus.
//!
//! The widget never owns its data: the host application writes the full goal
//! list into a shared key-value container, and the widget reads it back,
//! shows the goals of the current month, and flips a goal's completion flag
//! when the user taps it.
//!
//! ## Key components
//!
//! - [`Goal`] — one monthly objective with a completion flag
//! - [`GoalStore`] — the load/filter/toggle/persist cycle over a [`KeyValueStore`]
//! - [`KeyValueStore`] — the shared container ([`MemoryStore`], [`DirectoryStore`])
//! - [`RefreshNotifier`] — asks the host to regenerate cached snapshots
//! - [`Clock`] — where "now" comes from
//! - [`FocusConfig`] — TOML configuration

pub mod clock;
pub mod config;
pub mod error;
pub mod goal;
pub mod kv;
pub mod refresh;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{FocusConfig, ReloadAt};
pub use error::GoalError;
pub use goal::{decode_goals, encode_goals, Goal, YearMonth};
pub use kv::{DirectoryStore, KeyValueStore, MemoryStore};
pub use refresh::{
    LogNotifier, RefreshDispatcher, RefreshNotifier, RefreshSignal, SignalFileNotifier,
};
pub use store::{GoalStore, DEFAULT_GOALS_KEY};
