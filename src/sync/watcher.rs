//! Filesystem notification source.
//!
//! Wraps a `notify` watcher whose callback forwards into a tokio channel, and
//! maps backend event kinds onto the four changes the sync loop understands.

use std::path::{Path, PathBuf};

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

/// Change applied to the registry for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Write,
    Remove,
    Rename,
}

/// Non-recursive watcher on a single directory.
pub struct FsWatcher {
    // Keep watcher alive
    _watcher: RecommendedWatcher,
    pub(crate) rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl FsWatcher {
    /// Start watching `root`. Events are buffered until they are read.
    pub fn new(root: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::NonRecursive)?;

        tracing::debug!(path = %root.display(), "Watching directory");
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }
}

/// Translate a backend event into per-path changes.
///
/// The source side of a rename is a `Rename`; the destination side is a
/// `Create`. Backends that cannot tell the two apart report `RenameMode::Any`,
/// in which case whichever path still exists is treated as the destination.
pub fn classify_event(event: &Event) -> Vec<(ChangeKind, PathBuf)> {
    let kind = match &event.kind {
        EventKind::Create(_) => ChangeKind::Create,
        EventKind::Remove(_) => ChangeKind::Remove,
        EventKind::Modify(ModifyKind::Name(mode)) => return classify_rename(*mode, &event.paths),
        EventKind::Modify(ModifyKind::Metadata(_)) => return Vec::new(),
        EventKind::Modify(_) => ChangeKind::Write,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => return Vec::new(),
    };
    event.paths.iter().map(|path| (kind, path.clone())).collect()
}

fn classify_rename(mode: RenameMode, paths: &[PathBuf]) -> Vec<(ChangeKind, PathBuf)> {
    match mode {
        RenameMode::From => tag(ChangeKind::Rename, paths),
        RenameMode::To => tag(ChangeKind::Create, paths),
        RenameMode::Both => {
            let mut changes = Vec::with_capacity(2);
            if let Some(from) = paths.first() {
                changes.push((ChangeKind::Rename, from.clone()));
            }
            if let Some(to) = paths.get(1) {
                changes.push((ChangeKind::Create, to.clone()));
            }
            changes
        }
        RenameMode::Any | RenameMode::Other => paths
            .iter()
            .map(|path| {
                let kind = if path.exists() {
                    ChangeKind::Create
                } else {
                    ChangeKind::Rename
                };
                (kind, path.clone())
            })
            .collect(),
    }
}

fn tag(kind: ChangeKind, paths: &[PathBuf]) -> Vec<(ChangeKind, PathBuf)> {
    paths.iter().map(|path| (kind, path.clone())).collect()
}
