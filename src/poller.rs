//! Fixed-interval status polling for encodings and manifest generation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use vodforge_api::models::{Status, Task};
use vodforge_api::{BitmovinClient, EncodingId, ManifestId};

/// Anything whose task status can be queried.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Human readable name used in logs and errors, e.g. `Encoding enc-1`.
    fn label(&self) -> String;

    async fn fetch_status(&self) -> vodforge_api::Result<Task>;
}

/// A remote task the platform tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTarget {
    Encoding(EncodingId),
    DashManifest(ManifestId),
    HlsManifest(ManifestId),
}

/// [`TaskTarget`] bound to a client.
pub struct RemoteTask<'a> {
    client: &'a BitmovinClient,
    target: TaskTarget,
}

impl<'a> RemoteTask<'a> {
    pub fn new(client: &'a BitmovinClient, target: TaskTarget) -> Self {
        Self { client, target }
    }

    pub fn target(&self) -> &TaskTarget {
        &self.target
    }
}

#[async_trait]
impl StatusSource for RemoteTask<'_> {
    fn label(&self) -> String {
        match &self.target {
            TaskTarget::Encoding(id) => format!("Encoding {}", id),
            TaskTarget::DashManifest(id) => format!("DASH manifest {}", id),
            TaskTarget::HlsManifest(id) => format!("HLS manifest {}", id),
        }
    }

    async fn fetch_status(&self) -> vodforge_api::Result<Task> {
        match &self.target {
            TaskTarget::Encoding(id) => self.client.encoding_status(id).await,
            TaskTarget::DashManifest(id) => self.client.dash_manifest_status(id).await,
            TaskTarget::HlsManifest(id) => self.client.hls_manifest_status(id).await,
        }
    }
}

/// A task reached a failing terminal state.
#[derive(Debug, thiserror::Error)]
#[error("{label} finished with status {status}{}", format_messages(.messages))]
pub struct TaskFailed {
    pub label: String,
    pub status: Status,
    /// Texts of the ERROR messages the platform reported
    pub messages: Vec<String>,
}

fn format_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep, query, repeat until the task is terminal.
    ///
    /// Returns the final task on FINISHED. Failing states yield a
    /// [`TaskFailed`] that callers can downcast from the returned error.
    pub async fn wait_for<S>(&self, source: &S) -> Result<Task>
    where
        S: StatusSource + ?Sized,
    {
        let label = source.label();

        loop {
            tokio::time::sleep(self.interval).await;

            let task = source
                .fetch_status()
                .await
                .with_context(|| format!("Failed to fetch status of {}", label))?;

            tracing::info!(
                "{} status: {} (progress: {}%)",
                label,
                task.status,
                task.progress.unwrap_or(0)
            );

            if !task.status.is_terminal() {
                continue;
            }

            if task.status.is_failure() {
                let messages = task.error_messages();
                for message in &messages {
                    tracing::error!("{}: {}", label, message);
                }
                return Err(TaskFailed {
                    label,
                    status: task.status,
                    messages,
                }
                .into());
            }

            tracing::info!("{} finished", label);
            return Ok(task);
        }
    }
}
