//! Directory sync against a real filesystem watcher.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use subs_server::lifecycle::Shutdown;
use subs_server::registry::ContentRegistry;
use subs_server::sync::{DirectorySync, SyncError, SyncState};
use tokio::task::JoinHandle;

mod common;

const WAIT: Duration = Duration::from_secs(5);

struct Running {
    registry: Arc<ContentRegistry>,
    shutdown: Shutdown,
    task: JoinHandle<Result<(), SyncError>>,
}

async fn start(dir: &std::path::Path) -> Running {
    let registry = Arc::new(ContentRegistry::new());
    let mut sync = DirectorySync::new(dir, registry.clone());
    sync.start().unwrap();

    let mut state = sync.subscribe_state();
    let shutdown = Shutdown::new();
    let task = tokio::spawn(sync.run(shutdown.subscribe()));
    tokio::time::timeout(WAIT, state.wait_for(|s| *s == SyncState::Watching))
        .await
        .unwrap()
        .unwrap();

    Running {
        registry,
        shutdown,
        task,
    }
}

fn holds(registry: &ContentRegistry, endpoint: &str, content: &str) -> bool {
    registry.get(endpoint).as_deref() == Some(content.as_bytes())
}

#[tokio::test]
async fn test_initial_scan_loads_nested_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("foo.txt"), "vless://abc").unwrap();
    fs::write(dir.path().join("bar"), "ss://x").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("deep.txt"), "trojan://t").unwrap();

    let running = start(dir.path()).await;

    let mut endpoints = running.registry.list_endpoints();
    endpoints.sort();
    assert_eq!(endpoints, vec!["bar", "deep", "foo"]);
    assert!(holds(&running.registry, "foo", "vless://abc"));
    assert!(holds(&running.registry, "deep", "trojan://t"));

    running.shutdown.trigger();
}

#[tokio::test]
async fn test_create_modify_remove() {
    let dir = tempfile::tempdir().unwrap();
    let running = start(dir.path()).await;
    let registry = running.registry.clone();
    let path = dir.path().join("live.txt");

    fs::write(&path, "vless://one").unwrap();
    assert!(common::eventually(WAIT, || holds(&registry, "live", "vless://one")).await);

    fs::write(&path, "vless://two").unwrap();
    assert!(common::eventually(WAIT, || holds(&registry, "live", "vless://two")).await);

    fs::remove_file(&path).unwrap();
    assert!(common::eventually(WAIT, || registry.get("live").is_none()).await);

    running.shutdown.trigger();
}

#[tokio::test]
async fn test_rename_moves_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("old.txt"), "ss://moved").unwrap();
    let running = start(dir.path()).await;
    let registry = running.registry.clone();

    fs::rename(dir.path().join("old.txt"), dir.path().join("new.txt")).unwrap();

    assert!(common::eventually(WAIT, || holds(&registry, "new", "ss://moved")).await);
    assert!(common::eventually(WAIT, || registry.get("old").is_none()).await);

    running.shutdown.trigger();
}

#[tokio::test]
async fn test_new_subdirectory_is_not_served() {
    let dir = tempfile::tempdir().unwrap();
    let running = start(dir.path()).await;
    let registry = running.registry.clone();

    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("marker"), "vless://m").unwrap();
    assert!(common::eventually(WAIT, || holds(&registry, "marker", "vless://m")).await);

    assert!(registry.get("sub").is_none());

    running.shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_reports_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let running = start(dir.path()).await;

    running.shutdown.trigger();
    let result = tokio::time::timeout(WAIT, running.task).await.unwrap().unwrap();
    assert!(matches!(result, Err(SyncError::Cancelled)));
}

#[tokio::test]
async fn test_missing_root_fails_to_start() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(ContentRegistry::new());
    let mut sync = DirectorySync::new(dir.path().join("absent"), registry);
    assert!(sync.start().is_err());
}
