// tests/monitor_cycle.rs
// Full check cycles against a scripted snapshot source and a recording
// notifier, with real file-backed state in a temp dir.

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use benchwatch::monitor::{Monitor, SnapshotSource};
use benchwatch::notify::Notifier;
use benchwatch::store::SnapshotStore;
use benchwatch::{ChangeEntry, RankedEntry, Section, SectionLists, Snapshot};

struct ScriptedSource {
    snapshots: Mutex<Vec<Snapshot>>,
}

impl ScriptedSource {
    fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots),
        }
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn fetch(&self) -> Result<(Snapshot, Option<Vec<u8>>)> {
        let mut guard = self.snapshots.lock().unwrap();
        if guard.is_empty() {
            bail!("render timed out");
        }
        Ok((guard.remove(0), None))
    }
}

#[derive(Default, Clone)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String, i8)>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        title: &str,
        message: &str,
        priority: i8,
        _image: Option<&[u8]>,
    ) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string(), priority));
        Ok(())
    }
}

fn snapshot(entries: &[(&str, u8)]) -> Snapshot {
    let mut lists = SectionLists::default();
    lists.set(
        Section::Intelligence,
        entries
            .iter()
            .enumerate()
            .map(|(i, (name, score))| RankedEntry {
                rank: i as u32 + 1,
                name: name.to_string(),
                score: *score,
            })
            .collect(),
    );
    Snapshot::new("https://example.test/", lists)
}

fn temp_store(dir: &tempfile::TempDir) -> SnapshotStore {
    SnapshotStore::new(
        dir.path().join("benchmark_data.json"),
        dir.path().join("benchmark_history.json"),
    )
}

#[tokio::test]
async fn first_run_persists_without_notifying() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let source = ScriptedSource::new(vec![snapshot(&[("GPT-X", 85)])]);
    let monitor = Monitor::new(
        Box::new(source),
        Box::new(RecordingNotifier::default()),
        store.clone(),
    );

    let report = monitor.check().await.unwrap();
    assert!(report.first_run);
    assert!(!report.changed());
    assert!(store.load_current().await.is_some());
    assert_eq!(store.load_history().await.len(), 1);
}

#[tokio::test]
async fn second_run_detects_addition_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let source = ScriptedSource::new(vec![
        snapshot(&[("GPT-X", 85)]),
        snapshot(&[("GPT-X", 85), ("Claude-Y", 80)]),
    ]);
    let notifier = RecordingNotifier::default();
    let monitor = Monitor::new(
        Box::new(source),
        Box::new(notifier.clone()),
        store.clone(),
    );

    monitor.check().await.unwrap();
    let report = monitor.check().await.unwrap();

    assert!(!report.first_run);
    assert_eq!(
        report.changes,
        vec![ChangeEntry::Added {
            section: Section::Intelligence,
            name: "Claude-Y".into(),
            rank: 2,
            score: 80,
        }]
    );

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (title, message, priority) = &sent[0];
    assert_eq!(title, "🚨 Benchmark Changes!");
    assert!(message.contains("Claude-Y"));
    assert_eq!(*priority, 1);

    drop(sent);
    assert_eq!(store.load_history().await.len(), 2);
}

#[tokio::test]
async fn empty_snapshot_fails_cycle_and_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let empty = Snapshot::new("https://example.test/", SectionLists::default());
    let source = ScriptedSource::new(vec![empty]);
    let monitor = Monitor::new(
        Box::new(source),
        Box::new(RecordingNotifier::default()),
        store.clone(),
    );

    assert!(monitor.check().await.is_err());
    assert!(store.load_current().await.is_none());
    assert!(store.load_history().await.is_empty());
}

#[tokio::test]
async fn transient_capture_failure_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let source = ScriptedSource::new(vec![snapshot(&[("GPT-X", 85)])]);
    let monitor = Monitor::new(
        Box::new(source),
        Box::new(RecordingNotifier::default()),
        store.clone(),
    );

    monitor.check().await.unwrap();
    let before = store.load_current().await.unwrap();

    // Source script exhausted: next fetch errors like a render timeout
    assert!(monitor.check().await.is_err());
    assert_eq!(store.load_current().await.unwrap(), before);
    assert_eq!(store.load_history().await.len(), 1);
}
