//! Task status reported for encodings and manifests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an encoding or manifest generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Created,
    Queued,
    Running,
    Finished,
    Error,
    Canceled,
    TransferError,
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Whether polling can stop.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Finished | Self::Error | Self::Canceled | Self::TransferError
        )
    }

    /// Terminal states other than [`Status::Finished`].
    pub fn is_failure(self) -> bool {
        self.is_terminal() && self != Self::Finished
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
            Self::Canceled => "CANCELED",
            Self::TransferError => "TRANSFER_ERROR",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
    #[serde(other)]
    Other,
}

/// A message attached to a task by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Status snapshot returned by the status endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub status: Status,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub eta: Option<f64>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Texts of all messages of type [`MessageType::Error`], in order.
    pub fn error_messages(&self) -> Vec<String> {
        self.messages
            .iter()
            .filter(|m| m.message_type == MessageType::Error)
            .map(|m| m.text.clone())
            .collect()
    }
}
