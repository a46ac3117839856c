//! Directory synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     watcher.rs registers the OS watcher (events buffer from here on)
//!     → scanner.rs walks the tree, upserting every regular file
//!
//! watching:
//!     notify event
//!     → watcher.rs classify_event (Create / Write / Remove / Rename)
//!     → re-read file or evict endpoint
//!     → ContentRegistry
//! ```
//!
//! # States
//! ```text
//! Idle → Scanning → Watching → Stopped
//! ```
//!
//! # Design Decisions
//! - This loop is the only registry writer
//! - File read failures are logged; the registry keeps its previous state
//! - Watcher errors are logged and never end the loop
//! - A rename only evicts the old endpoint. The new name appears when the
//!   destination's own notification arrives; if that notification is lost
//!   the file stays missing until it is written again

pub mod scanner;
pub mod watcher;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::Event;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

use crate::registry::{endpoint_for_path, ContentRegistry};
use self::scanner::scan_directory;
use self::watcher::{classify_event, ChangeKind, FsWatcher};

/// Lifecycle of the sync loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Scanning,
    Watching,
    Stopped,
}

/// Errors that end directory synchronization.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to walk {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("directory sync cancelled")]
    Cancelled,
}

/// Keeps a `ContentRegistry` in step with a directory.
pub struct DirectorySync {
    root: PathBuf,
    registry: Arc<ContentRegistry>,
    watcher: Option<FsWatcher>,
    state: watch::Sender<SyncState>,
}

impl DirectorySync {
    pub fn new(root: impl Into<PathBuf>, registry: Arc<ContentRegistry>) -> Self {
        let (state, _) = watch::channel(SyncState::Idle);
        Self {
            root: root.into(),
            registry,
            watcher: None,
            state,
        }
    }

    /// Observe state transitions.
    pub fn subscribe_state(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register the watcher, then load every existing file.
    ///
    /// Changes made while the scan runs are queued and applied once `run`
    /// starts consuming events. Returns the number of files loaded.
    pub fn start(&mut self) -> Result<usize, SyncError> {
        if self.watcher.is_none() {
            self.watcher = Some(self.open_watcher()?);
        }
        self.scan()
    }

    /// Apply filesystem changes until `shutdown` fires or the event stream closes.
    ///
    /// Calls `start` first if it has not run yet. Returns `SyncError::Cancelled`
    /// on shutdown and `Ok(())` when the stream closes.
    pub async fn run(mut self, shutdown: broadcast::Receiver<()>) -> Result<(), SyncError> {
        let mut watcher = match self.watcher.take() {
            Some(watcher) => watcher,
            None => {
                let watcher = self.open_watcher()?;
                self.scan()?;
                watcher
            }
        };

        self.event_loop(&mut watcher.rx, shutdown).await
    }

    fn open_watcher(&self) -> Result<FsWatcher, SyncError> {
        FsWatcher::new(&self.root).map_err(|source| SyncError::Watch {
            path: self.root.clone(),
            source,
        })
    }

    fn scan(&self) -> Result<usize, SyncError> {
        self.state.send_replace(SyncState::Scanning);
        let loaded = scan_directory(&self.root, &self.registry)?;
        tracing::info!(path = %self.root.display(), files = loaded, "Initial scan complete");
        Ok(loaded)
    }

    async fn event_loop(
        &self,
        rx: &mut mpsc::UnboundedReceiver<notify::Result<Event>>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), SyncError> {
        self.state.send_replace(SyncState::Watching);
        tracing::info!(path = %self.root.display(), "Directory sync watching for changes");

        let result = loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Directory sync received shutdown signal, exiting loop");
                    break Err(SyncError::Cancelled);
                }
                event = rx.recv() => match event {
                    Some(Ok(event)) => self.apply_event(&event).await,
                    Some(Err(err)) => tracing::error!(error = %err, "Watcher error"),
                    None => {
                        tracing::info!("Watcher event stream closed");
                        break Ok(());
                    }
                },
            }
        };

        self.state.send_replace(SyncState::Stopped);
        result
    }

    async fn apply_event(&self, event: &Event) {
        for (kind, path) in classify_event(event) {
            self.apply_change(kind, &path).await;
        }
    }

    async fn apply_change(&self, kind: ChangeKind, path: &Path) {
        if let Ok(meta) = tokio::fs::metadata(path).await {
            if meta.is_dir() {
                return;
            }
        }

        let Some(endpoint) = endpoint_for_path(path) else {
            tracing::warn!(path = %path.display(), "Ignoring change to file with non UTF-8 name");
            return;
        };

        match kind {
            ChangeKind::Create | ChangeKind::Write => match tokio::fs::read(path).await {
                Ok(content) => {
                    self.registry.upsert(endpoint.clone(), content);
                    tracing::debug!(path = %path.display(), endpoint = %endpoint, change = ?kind, "File updated");
                }
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "Error reading file");
                }
            },
            ChangeKind::Remove | ChangeKind::Rename => {
                self.registry.evict(&endpoint);
                tracing::debug!(path = %path.display(), endpoint = %endpoint, change = ?kind, "File removed");
            }
        }
    }
}
