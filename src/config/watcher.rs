//! Filter configuration watcher for hot reload.
//!
//! # Design Decisions
//! - Watches the parent directory, not the file: editors that save by renaming
//!   a temp file over the config replace the inode, and a file watch dies with it
//! - Only events naming the config file trigger a reload
//! - Documents are only parsed here; validation happens when the caller builds
//!   a new filter factory from them

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_document;
use crate::config::schema::ConfigDocument;

/// Watches one filter configuration file and forwards re-parsed documents.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ConfigDocument>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its document channel.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ConfigDocument>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Dropping the returned handle stops the watch.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let directory = watch_directory(&self.path);
        let file_name = self.path.file_name().map(|name| name.to_os_string());
        let path = self.path;
        let tx = self.update_tx;

        let handler = move |res: notify::Result<Event>| match res {
            Ok(event) if touches_file(&event, file_name.as_ref()) => {
                tracing::debug!(path = ?path, kind = ?event.kind, "Filter config changed");
                match load_document(&path) {
                    Ok(doc) => {
                        let _ = tx.send(doc);
                    }
                    Err(e) => {
                        tracing::error!(path = ?path, error = %e, "Failed to reload filter config");
                    }
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = ?e, "Filter config watch error"),
        };

        let config = Config::default().with_poll_interval(Duration::from_secs(2));
        let mut watcher = RecommendedWatcher::new(handler, config)?;
        watcher.watch(&directory, RecursiveMode::NonRecursive)?;

        tracing::info!(directory = ?directory, "Filter config watcher started");
        Ok(watcher)
    }
}

/// Directory holding `path`; `.` for a bare file name.
fn watch_directory(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True if `event` creates, rewrites or renames onto the watched file.
fn touches_file(event: &Event, file_name: Option<&OsString>) -> bool {
    let Some(file_name) = file_name else {
        return false;
    };
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind, RenameMode};
    use std::fs;
    use tokio::time::timeout;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn directory_of_bare_name_is_cwd() {
        assert_eq!(watch_directory(Path::new("filter.json")), PathBuf::from("."));
        assert_eq!(
            watch_directory(Path::new("/etc/mongo/filter.json")),
            PathBuf::from("/etc/mongo")
        );
    }

    #[test]
    fn only_config_file_events_count() {
        let name = Some(OsString::from("filter.json"));
        let rename = EventKind::Modify(ModifyKind::Name(RenameMode::To));

        assert!(touches_file(&event(rename, "/cfg/filter.json"), name.as_ref()));
        assert!(touches_file(
            &event(EventKind::Create(CreateKind::File), "/cfg/filter.json"),
            name.as_ref()
        ));
        assert!(!touches_file(&event(rename, "/cfg/.filter.json.swp"), name.as_ref()));
        assert!(!touches_file(
            &event(EventKind::Remove(RemoveKind::File), "/cfg/filter.json"),
            name.as_ref()
        ));
        assert!(!touches_file(&event(rename, "/cfg/filter.json"), None));
    }

    async fn next_with_prefix(
        rx: &mut mpsc::UnboundedReceiver<ConfigDocument>,
        prefix: &str,
    ) -> bool {
        let wait = async {
            while let Some(doc) = rx.recv().await {
                if doc["stat_prefix"] == prefix {
                    return true;
                }
            }
            false
        };
        timeout(Duration::from_secs(10), wait).await.unwrap_or(false)
    }

    #[tokio::test]
    async fn reloads_after_rename_over_config() {
        let dir = std::env::temp_dir().join(format!("filter-watch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let config = dir.join("filter.json");
        fs::write(&config, r#"{"stat_prefix": "a"}"#).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&config);
        let _handle = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Save by rename, as most editors do.
        let temp = dir.join("filter.json.tmp");
        fs::write(&temp, r#"{"stat_prefix": "b"}"#).unwrap();
        fs::rename(&temp, &config).unwrap();
        assert!(next_with_prefix(&mut rx, "b").await);

        // The watch must survive the inode swap.
        fs::write(&config, r#"{"stat_prefix": "c"}"#).unwrap();
        assert!(next_with_prefix(&mut rx, "c").await);

        fs::remove_dir_all(&dir).unwrap_or_default();
    }
}
