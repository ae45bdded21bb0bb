// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod capture;
pub mod config;
pub mod diff;
pub mod extract;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::diff::{diff_snapshots, ChangeEntry};
pub use crate::extract::classify::{ClassifyPolicy, HeuristicPolicy, LineClass};
pub use crate::model::{History, RankedEntry, Section, SectionLists, Snapshot};
pub use crate::monitor::{CheckReport, Monitor, SnapshotSource};
pub use crate::notify::{Notifier, PushoverNotifier};
