//! # mf-widget
//!
//! The Monthly Focus home-screen widget: what the host scheduler asks for
//! ([`TimelineProvider`]) and what it shows ([`WidgetView`]).
//!
//! The host calls the provider for a placeholder while loading, a snapshot
//! for previews, and a timeline for the live widget. Each entry carries the
//! goals of the current month; the view renders at most four of them with a
//! toggle control each, or a placeholder message when there are none.

pub mod timeline;
pub mod view;

pub use timeline::{GoalEntry, ReloadPolicy, Timeline, TimelineProvider};
pub use view::{GoalRow, WidgetFamily, WidgetView};
