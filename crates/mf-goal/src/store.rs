// store.rs — GoalStore: the load/filter/toggle/persist cycle.
//
// The persisted list is the only source of truth. Every call reads the key
// afresh, and a toggle rewrites the whole list, not just the touched goal.
// There is no locking: concurrent writers race and the last write wins.
//
// The widget-facing operations never fail. Missing data, undecodable data,
// and unknown ids all degrade to "no goals" or "nothing happened". The
// `try_*` operations expose the same logic with the failure kept.

use crate::clock::{Clock, SystemClock};
use crate::error::GoalError;
use crate::goal::{decode_goals, encode_goals, Goal, YearMonth};
use crate::kv::KeyValueStore;
use crate::refresh::RefreshNotifier;

/// Storage key the host application writes the goal list under.
pub const DEFAULT_GOALS_KEY: &str = "monthlyGoals";

/// Reads and toggles goals in a shared container.
pub struct GoalStore<S, N, C = SystemClock> {
    kv: S,
    notifier: N,
    clock: C,
    key: String,
}

impl<S: KeyValueStore, N: RefreshNotifier> GoalStore<S, N, SystemClock> {
    /// A store over `kv` using the default key and the system clock.
    pub fn new(kv: S, notifier: N) -> Self {
        Self {
            kv,
            notifier,
            clock: SystemClock,
            key: DEFAULT_GOALS_KEY.to_string(),
        }
    }
}

impl<S: KeyValueStore, N: RefreshNotifier, C: Clock> GoalStore<S, N, C> {
    /// Replace the clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> GoalStore<S, N, C2> {
        GoalStore {
            kv: self.kv,
            notifier: self.notifier,
            clock,
            key: self.key,
        }
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The calendar month "now" falls in.
    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(self.clock.now().date())
    }

    /// Goals of the current month, in stored order.
    ///
    /// Absent or undecodable data yields an empty list; the failure is logged.
    pub fn load_current_month_goals(&self) -> Vec<Goal> {
        self.load_month(self.current_month())
    }

    /// Goals targeting `month`, in stored order, with failures swallowed.
    pub fn load_month(&self, month: YearMonth) -> Vec<Goal> {
        match self.try_load_month(month) {
            Ok(goals) => goals,
            Err(GoalError::NoData { .. }) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to load goals: {}", e);
                Vec::new()
            }
        }
    }

    /// Flip the completion flag of the first goal with `id` and persist the
    /// full list.
    ///
    /// Missing data, undecodable data, and unknown ids leave storage
    /// untouched. A refresh is requested only after a successful write.
    pub fn toggle_goal(&self, id: &str) {
        match self.try_toggle_goal(id) {
            Ok(_) => {}
            Err(GoalError::NoData { .. }) => {
                tracing::debug!(key = %self.key, goal_id = id, "toggle skipped: no goal data");
            }
            Err(GoalError::NotFound(_)) => {
                tracing::debug!(goal_id = id, "toggle skipped: goal not found");
            }
            Err(e) => {
                tracing::warn!(goal_id = id, "failed to update goal: {}", e);
            }
        }
    }

    /// Like [`load_current_month_goals`](Self::load_current_month_goals), but
    /// keeps the failure.
    pub fn try_load_current_month_goals(&self) -> Result<Vec<Goal>, GoalError> {
        self.try_load_month(self.current_month())
    }

    /// Goals targeting `month`, in stored order.
    pub fn try_load_month(&self, month: YearMonth) -> Result<Vec<Goal>, GoalError> {
        Ok(self
            .try_load_all()?
            .into_iter()
            .filter(|g| g.is_in(month))
            .collect())
    }

    /// The full stored list, unfiltered.
    pub fn try_load_all(&self) -> Result<Vec<Goal>, GoalError> {
        let bytes = self.kv.get(&self.key)?.ok_or_else(|| GoalError::NoData {
            key: self.key.clone(),
        })?;
        decode_goals(&bytes)
    }

    /// Like [`toggle_goal`](Self::toggle_goal), but returns the updated goal
    /// or the reason nothing changed.
    pub fn try_toggle_goal(&self, id: &str) -> Result<Goal, GoalError> {
        let mut goals = self.try_load_all()?;

        // Duplicate ids are not rejected; the first match is the one toggled.
        let index = goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| GoalError::NotFound(id.to_string()))?;
        goals[index] = goals[index].toggled();

        let bytes = encode_goals(&goals)?;
        self.kv.set(&self.key, &bytes)?;
        tracing::info!(
            goal_id = id,
            completed = goals[index].is_completed,
            "goal toggled"
        );

        if let Err(e) = self.notifier.request_refresh() {
            tracing::warn!("refresh request failed: {}", e);
        }

        Ok(goals.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::kv::MemoryStore;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingNotifier {
        requests: AtomicUsize,
    }

    impl RecordingNotifier {
        fn count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl RefreshNotifier for RecordingNotifier {
        fn request_refresh(&self) -> Result<(), GoalError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, GoalError> {
            Err(GoalError::Storage {
                key: key.to_string(),
                source: std::io::Error::other("container unavailable"),
            })
        }

        fn set(&self, key: &str, _value: &[u8]) -> Result<(), GoalError> {
            self.get(key).map(|_| ())
        }
    }

    fn jan_2024() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    fn store_with<'a>(
        kv: &'a MemoryStore,
        notifier: &'a RecordingNotifier,
    ) -> GoalStore<&'a MemoryStore, &'a RecordingNotifier, FixedClock> {
        GoalStore::new(kv, notifier).with_clock(jan_2024())
    }

    fn seed(goals: &[Goal]) -> MemoryStore {
        MemoryStore::with_value(DEFAULT_GOALS_KEY, encode_goals(goals).unwrap())
    }

    fn stored(kv: &MemoryStore) -> Vec<Goal> {
        decode_goals(&kv.get(DEFAULT_GOALS_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn loads_single_current_month_goal() {
        let kv = MemoryStore::with_value(
            DEFAULT_GOALS_KEY,
            br#"[{"id":"1","title":"Exercise","isCompleted":false,"year":2024,"month":1}]"#
                .to_vec(),
        );
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        let goals = store.load_current_month_goals();
        assert_eq!(goals, vec![Goal::new("1", "Exercise", 2024, 1)]);
    }

    #[test]
    fn previous_month_goal_is_excluded() {
        let kv = seed(&[Goal::new("1", "Exercise", 2023, 12)]);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        assert!(store.load_current_month_goals().is_empty());
    }

    #[test]
    fn filters_to_current_month_preserving_order() {
        let kv = seed(&[
            Goal::new("a", "Read", 2024, 1),
            Goal::new("b", "Old", 2023, 1),
            Goal::new("c", "Next", 2024, 2),
            Goal::new("d", "Run", 2024, 1).toggled(),
            Goal::new("e", "Rolled over", 2023, 13),
        ]);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        let ids: Vec<String> = store
            .load_current_month_goals()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["a", "d", "e"]);
    }

    #[test]
    fn absent_data_loads_empty() {
        let kv = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        assert!(store.load_current_month_goals().is_empty());
        assert!(matches!(
            store.try_load_current_month_goals(),
            Err(GoalError::NoData { .. })
        ));
    }

    #[test]
    fn malformed_data_loads_empty() {
        let kv = MemoryStore::with_value(DEFAULT_GOALS_KEY, b"{not json".to_vec());
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        assert!(store.load_current_month_goals().is_empty());
        assert!(matches!(
            store.try_load_current_month_goals(),
            Err(GoalError::Decode(_))
        ));
    }

    #[test]
    fn storage_failure_loads_empty_and_toggle_is_noop() {
        let notifier = RecordingNotifier::default();
        let store = GoalStore::new(BrokenStore, &notifier).with_clock(jan_2024());

        assert!(store.load_current_month_goals().is_empty());
        store.toggle_goal("1");
        assert!(matches!(
            store.try_toggle_goal("1"),
            Err(GoalError::Storage { .. })
        ));
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn toggle_flips_goal_and_persists() {
        let kv = seed(&[Goal::new("1", "Exercise", 2024, 1)]);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("1");

        assert!(stored(&kv)[0].is_completed);
        assert_eq!(notifier.count(), 1);

        store.toggle_goal("1");
        assert!(!stored(&kv)[0].is_completed);
        assert_eq!(notifier.count(), 2);
    }

    #[test]
    fn toggle_leaves_other_goals_and_order_untouched() {
        let goals = vec![
            Goal::new("1", "Exercise", 2024, 1),
            Goal::new("2", "Read", 2023, 6).toggled(),
            Goal::new("3", "Meditate", 2024, 1),
        ];
        let kv = seed(&goals);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        let updated = store.try_toggle_goal("2").unwrap();
        assert!(!updated.is_completed);

        let after = stored(&kv);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], goals[0]);
        assert_eq!(after[1], goals[1].toggled());
        assert_eq!(after[2], goals[2]);
    }

    #[test]
    fn toggle_reaches_goals_outside_current_month() {
        let kv = seed(&[Goal::new("old", "Last year", 2023, 12)]);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("old");
        assert!(stored(&kv)[0].is_completed);
    }

    #[test]
    fn toggle_unknown_id_leaves_storage_unchanged() {
        let kv = seed(&[Goal::new("1", "Exercise", 2024, 1)]);
        let before = kv.get(DEFAULT_GOALS_KEY).unwrap();
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("missing");

        assert_eq!(kv.get(DEFAULT_GOALS_KEY).unwrap(), before);
        assert_eq!(notifier.count(), 0);
        assert!(matches!(
            store.try_toggle_goal("missing"),
            Err(GoalError::NotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn toggle_without_data_writes_nothing() {
        let kv = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("1");

        assert!(kv.get(DEFAULT_GOALS_KEY).unwrap().is_none());
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn toggle_on_malformed_data_leaves_bytes_alone() {
        let kv = MemoryStore::with_value(DEFAULT_GOALS_KEY, b"[{\"id\":1}]".to_vec());
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("1");

        assert_eq!(
            kv.get(DEFAULT_GOALS_KEY).unwrap().unwrap(),
            b"[{\"id\":1}]".to_vec()
        );
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn oversized_month_does_not_hide_the_rest_of_the_list() {
        let kv = MemoryStore::with_value(
            DEFAULT_GOALS_KEY,
            br#"[{"id":"1","title":"Exercise","isCompleted":false,"year":2024,"month":1},{"id":"2","title":"Far","isCompleted":false,"year":2024,"month":4294967297}]"#
                .to_vec(),
        );
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        let goals = store.load_current_month_goals();
        assert_eq!(goals, vec![Goal::new("1", "Exercise", 2024, 1)]);

        store.toggle_goal("1");
        let after = stored(&kv);
        assert!(after[0].is_completed);
        assert_eq!(after[1].month, 4_294_967_297);
        assert_eq!(notifier.count(), 1);
    }

    #[test]
    fn duplicate_ids_toggle_first_match_only() {
        let kv = seed(&[
            Goal::new("dup", "First", 2024, 1),
            Goal::new("dup", "Second", 2024, 1),
        ]);
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);

        store.toggle_goal("dup");

        let after = stored(&kv);
        assert!(after[0].is_completed);
        assert!(!after[1].is_completed);
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let kv = MemoryStore::with_value(
            "otherGoals",
            encode_goals(&[Goal::new("1", "Exercise", 2024, 1)]).unwrap(),
        );
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier).with_key("otherGoals");

        assert_eq!(store.key(), "otherGoals");
        assert_eq!(store.load_current_month_goals().len(), 1);
        store.toggle_goal("1");
        assert!(kv.get(DEFAULT_GOALS_KEY).unwrap().is_none());
    }

    #[test]
    fn current_month_follows_clock() {
        let kv = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let store = store_with(&kv, &notifier);
        assert_eq!(store.current_month(), YearMonth { year: 2024, month: 1 });
    }
}
