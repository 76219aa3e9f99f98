// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::fs::path_utils::relative_str;
use crate::watch::change_queue::PathChangeHandler;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and hands
/// every changed path, relative to `root`, to `handler`.
///
/// The handler runs on notify's thread.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    handler: Arc<dyn PathChangeHandler>,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());
    let callback_root = root.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                debug!(?event, "received notify event");
                for path in &event.paths {
                    match relative_str(&callback_root, path) {
                        Some(rel) if !rel.is_empty() => handler.on_path_changed(&rel),
                        Some(_) => {}
                        None => warn!(
                            "could not relativize path {:?} against root {:?}",
                            path, callback_root
                        ),
                    }
                }
            }
            Err(err) => warn!(error = %err, "file watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    Ok(WatcherHandle { _inner: watcher })
}
