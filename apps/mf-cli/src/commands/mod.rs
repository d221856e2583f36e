pub mod goals;
pub mod widget;

use mf_goal::{
    DirectoryStore, FocusConfig, GoalStore, LogNotifier, RefreshDispatcher, SignalFileNotifier,
};

/// Open the shared container named by `config`.
///
/// Toggles are announced both in the log and in the signal file.
pub fn open_store(
    config: &FocusConfig,
) -> anyhow::Result<GoalStore<DirectoryStore, RefreshDispatcher>> {
    let kv = DirectoryStore::open(config.container_dir())?;

    let mut notifier = RefreshDispatcher::new();
    notifier.add_notifier(Box::new(LogNotifier));
    notifier.add_notifier(Box::new(SignalFileNotifier::new(config.signal_file())));

    Ok(GoalStore::new(kv, notifier).with_key(config.storage.key.as_str()))
}
