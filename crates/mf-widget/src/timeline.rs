// timeline.rs — TimelineProvider: entries the host scheduler displays.
//
// The host asks for three things:
//   placeholder — shown while real data loads; never touches storage
//   snapshot    — a single entry for previews and the widget gallery
//   timeline    — entries plus a policy telling the host when to ask again
//
// Every entry is built from one reading of the clock, so its date and the
// month its goals were filtered by always agree.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use mf_goal::{Clock, Goal, GoalStore, KeyValueStore, RefreshNotifier, ReloadAt, YearMonth};

/// One rendered moment of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    /// When this entry becomes current.
    pub date: NaiveDateTime,
    /// Goals of the month `date` falls in.
    pub goals: Vec<Goal>,
}

/// When the host should request the next timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// After the last entry has been shown.
    AtEnd,
    /// At a specific instant.
    After { date: NaiveDateTime },
}

/// Entries plus the reload policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<GoalEntry>,
    pub policy: ReloadPolicy,
}

/// Builds widget entries from a [`GoalStore`].
pub struct TimelineProvider<S, N, C> {
    store: GoalStore<S, N, C>,
    reload: ReloadAt,
}

impl<S: KeyValueStore, N: RefreshNotifier, C: Clock> TimelineProvider<S, N, C> {
    pub fn new(store: GoalStore<S, N, C>) -> Self {
        Self {
            store,
            reload: ReloadAt::default(),
        }
    }

    pub fn with_reload(mut self, reload: ReloadAt) -> Self {
        self.reload = reload;
        self
    }

    /// The underlying store, for toggling from the view.
    pub fn store(&self) -> &GoalStore<S, N, C> {
        &self.store
    }

    /// An empty entry dated now.
    pub fn placeholder(&self) -> GoalEntry {
        GoalEntry {
            date: self.store.clock().now(),
            goals: Vec::new(),
        }
    }

    /// An entry dated now with the current month's goals.
    pub fn snapshot(&self) -> GoalEntry {
        let now = self.store.clock().now();
        GoalEntry {
            date: now,
            goals: self.store.load_month(YearMonth::of(now.date())),
        }
    }

    /// A single-entry timeline with the configured reload policy.
    pub fn timeline(&self) -> Timeline {
        let entry = self.snapshot();
        let policy = match self.reload {
            ReloadAt::AtEnd => ReloadPolicy::AtEnd,
            ReloadAt::NextMonth => next_month_start(entry.date)
                .map(|date| ReloadPolicy::After { date })
                .unwrap_or(ReloadPolicy::AtEnd),
        };
        tracing::debug!(
            goals = entry.goals.len(),
            ?policy,
            "timeline generated"
        );
        Timeline {
            entries: vec![entry],
            policy,
        }
    }
}

/// Midnight on the first day of the month after `now`.
fn next_month_start(now: NaiveDateTime) -> Option<NaiveDateTime> {
    YearMonth::of(now.date())
        .next()
        .first_day()?
        .and_hms_opt(0, 0, 0)
}
