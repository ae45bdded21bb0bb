//! Check-cycle orchestration: scrape → diff → notify → persist, plus the
//! continuous polling loop.
//!
//! Cycles are strictly sequential; the loop awaits each cycle to completion
//! before sleeping, so two cycles can never overlap. A failed cycle is
//! logged and the process survives to the next tick.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::capture::{scrape_snapshot, ChromeCapture};
use crate::config::Config;
use crate::diff::{diff_snapshots, ChangeEntry};
use crate::extract::classify::ClassifyPolicy;
use crate::model::Snapshot;
use crate::notify::{alert_message, Notifier};
use crate::store::SnapshotStore;

/// Produces one snapshot per check cycle. The production implementation
/// drives headless Chrome; tests script their own.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// One full scrape. The optional bytes are a PNG screenshot for the
    /// notification attachment.
    async fn fetch(&self) -> Result<(Snapshot, Option<Vec<u8>>)>;
}

/// Chrome-backed source: launches a fresh browser per cycle and runs the
/// blocking scrape off the async runtime.
pub struct ChromeSource {
    url: String,
    policy: Arc<dyn ClassifyPolicy>,
}

impl ChromeSource {
    pub fn new(url: impl Into<String>, policy: Arc<dyn ClassifyPolicy>) -> Self {
        Self {
            url: url.into(),
            policy,
        }
    }
}

#[async_trait]
impl SnapshotSource for ChromeSource {
    async fn fetch(&self) -> Result<(Snapshot, Option<Vec<u8>>)> {
        let url = self.url.clone();
        let policy = Arc::clone(&self.policy);
        tokio::task::spawn_blocking(move || {
            let mut capture = ChromeCapture::launch()?;
            scrape_snapshot(&mut capture, policy.as_ref(), &url)
        })
        .await
        .context("scrape task panicked")?
    }
}

/// Outcome of one successful check cycle.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub changes: Vec<ChangeEntry>,
    pub first_run: bool,
}

impl CheckReport {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

pub struct Monitor {
    source: Box<dyn SnapshotSource>,
    notifier: Box<dyn Notifier>,
    store: SnapshotStore,
}

impl Monitor {
    pub fn new(
        source: Box<dyn SnapshotSource>,
        notifier: Box<dyn Notifier>,
        store: SnapshotStore,
    ) -> Self {
        Self {
            source,
            notifier,
            store,
        }
    }

    pub fn from_config(
        config: &Config,
        policy: Arc<dyn ClassifyPolicy>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self::new(
            Box::new(ChromeSource::new(config.base_url.clone(), policy)),
            notifier,
            SnapshotStore::new(&config.data_path, &config.history_path),
        )
    }

    /// Run one check cycle. Transient capture failures and empty
    /// extractions surface as errors: nothing is persisted or compared and
    /// the caller decides whether to retry on the next tick.
    pub async fn check(&self) -> Result<CheckReport> {
        info!("checking at {}", Utc::now().format("%Y-%m-%d %H:%M:%S"));

        let (snapshot, screenshot) = self.source.fetch().await?;
        if snapshot.total_entries() == 0 {
            bail!("no entries extracted from any section");
        }

        let previous = self.store.load_current().await;
        let first_run = previous.is_none();
        let changes = diff_snapshots(previous.as_ref(), Some(&snapshot));

        if !changes.is_empty() {
            info!(count = changes.len(), "changes detected");
            for change in &changes {
                info!("  {change}");
            }
            let message = alert_message(&changes);
            if let Err(e) = self
                .notifier
                .send("🚨 Benchmark Changes!", &message, 1, screenshot.as_deref())
                .await
            {
                // Transport failure never fails the cycle
                error!("notification failed: {e:#}");
            }
        } else if first_run {
            info!("first run, saving initial state");
        } else {
            info!("no changes");
        }

        if let Err(e) = self.store.save(&snapshot).await {
            // The in-memory result above already drove the notification;
            // only the next cycle's comparison may now be stale.
            error!("persist failed: {e:#}");
        }

        Ok(CheckReport { changes, first_run })
    }

    /// Continuous mode: one cycle per interval tick, starting immediately.
    pub async fn run_continuous(&self, interval_minutes: u64) {
        let mut ticker = time::interval(time::Duration::from_secs(interval_minutes * 60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match self.check().await {
                Ok(report) if report.changed() => {
                    info!(changes = report.changes.len(), "cycle finished with changes");
                }
                Ok(_) => {}
                Err(e) => warn!("check cycle failed: {e:#}"),
            }
        }
    }
}
