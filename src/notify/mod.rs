pub mod pushover;

use anyhow::Result;
use async_trait::async_trait;

use crate::diff::ChangeEntry;

pub use pushover::PushoverNotifier;

/// Transport-imposed message cap; longer messages are cut before sending.
pub const MESSAGE_LIMIT: usize = 1024;

/// How many change entries make it into the alert body before the rest are
/// folded into a "+N more..." suffix.
pub const MAX_LISTED_CHANGES: usize = 10;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification. `image` is an optional PNG attachment.
    async fn send(
        &self,
        title: &str,
        message: &str,
        priority: i8,
        image: Option<&[u8]>,
    ) -> Result<()>;
}

/// Render the change list into an alert body, preserving the diff engine's
/// emission order for truncation.
pub fn alert_message(changes: &[ChangeEntry]) -> String {
    let mut msg = changes
        .iter()
        .take(MAX_LISTED_CHANGES)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    if changes.len() > MAX_LISTED_CHANGES {
        msg.push_str(&format!("\n+{} more...", changes.len() - MAX_LISTED_CHANGES));
    }
    msg
}
