// refresh.rs — Asking the host to regenerate cached widget snapshots.
//
// After a toggle is persisted, any snapshot the host has already rendered is
// stale. The widget can't repaint itself; it can only ask the host's display
// scheduler to reload every timeline. The request is fire-and-forget: sinks
// report failures, and callers log them and move on.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Receives "please reload all timelines" requests.
pub trait RefreshNotifier: Send + Sync {
    fn request_refresh(&self) -> Result<(), GoalError>;
}

impl<T: RefreshNotifier + ?Sized> RefreshNotifier for &T {
    fn request_refresh(&self) -> Result<(), GoalError> {
        (**self).request_refresh()
    }
}

impl<T: RefreshNotifier + ?Sized> RefreshNotifier for Box<T> {
    fn request_refresh(&self) -> Result<(), GoalError> {
        (**self).request_refresh()
    }
}

/// Only records the request in the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl RefreshNotifier for LogNotifier {
    fn request_refresh(&self) -> Result<(), GoalError> {
        tracing::info!("timeline reload requested");
        Ok(())
    }
}

/// One line of the refresh signal file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefreshSignal {
    ReloadAllTimelines { requested_at: DateTime<Utc> },
}

impl RefreshSignal {
    pub fn reload_all_timelines() -> Self {
        RefreshSignal::ReloadAllTimelines {
            requested_at: Utc::now(),
        }
    }
}

/// Appends a JSON line per request to a file the host watches.
pub struct SignalFileNotifier {
    path: PathBuf,
}

impl SignalFileNotifier {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RefreshNotifier for SignalFileNotifier {
    fn request_refresh(&self) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(&RefreshSignal::reload_all_timelines())
            .map_err(|e| GoalError::Notification(e.to_string()))?;
        writeln!(file, "{}", json).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Fans a refresh request out to several notifiers.
///
/// A failing notifier is logged and skipped; the rest still run. The
/// dispatcher itself never fails.
#[derive(Default)]
pub struct RefreshDispatcher {
    notifiers: Vec<Box<dyn RefreshNotifier>>,
}

impl RefreshDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notifier(&mut self, notifier: Box<dyn RefreshNotifier>) {
        self.notifiers.push(notifier);
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl RefreshNotifier for RefreshDispatcher {
    fn request_refresh(&self) -> Result<(), GoalError> {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.request_refresh() {
                tracing::warn!("refresh notifier error: {}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    struct Counting(Arc<AtomicUsize>);

    impl RefreshNotifier for Counting {
        fn request_refresh(&self) -> Result<(), GoalError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Failing;

    impl RefreshNotifier for Failing {
        fn request_refresh(&self) -> Result<(), GoalError> {
            Err(GoalError::Notification("host unreachable".into()))
        }
    }

    #[test]
    fn signal_file_appends_one_line_per_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals/refresh.jsonl");
        let notifier = SignalFileNotifier::new(&path);

        notifier.request_refresh().unwrap();
        notifier.request_refresh().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let signal: RefreshSignal = serde_json::from_str(lines[0]).unwrap();
        assert!(matches!(signal, RefreshSignal::ReloadAllTimelines { .. }));
        assert!(lines[1].contains("\"reload_all_timelines\""));
    }

    #[test]
    fn dispatcher_reaches_every_notifier_despite_failures() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = RefreshDispatcher::new();
        dispatcher.add_notifier(Box::new(Counting(count.clone())));
        dispatcher.add_notifier(Box::new(Failing));
        dispatcher.add_notifier(Box::new(Counting(count.clone())));
        assert_eq!(dispatcher.len(), 3);

        dispatcher.request_refresh().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_dispatcher_is_fine() {
        let dispatcher = RefreshDispatcher::new();
        assert!(dispatcher.is_empty());
        assert!(dispatcher.request_refresh().is_ok());
    }
}
