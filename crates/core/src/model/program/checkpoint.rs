use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::program::metrics::ProgramMetrics;

/// Every program has exactly five checkpoints, numbered from 1.
pub const CHECKPOINT_COUNT: u8 = 5;

const DEFAULT_NAMES: [&str; CHECKPOINT_COUNT as usize] = [
    "Program Approval",
    "Implementation Kickoff",
    "Mid-Program Review",
    "Program Completion",
    "Impact Report",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckpointError {
    #[error("checkpoint {0} does not exist (expected 1-5)")]
    OutOfRange(u8),

    #[error("checkpoint {number} is locked until checkpoint {} is completed", .number - 1)]
    Gated { number: u8 },

    #[error("checkpoint {number} is already {}", .status.label())]
    NotPending { number: u8, status: CheckpointStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointStatus {
    Pending,
    Ready,
    Acknowledged,
    Completed,
}

impl CheckpointStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CheckpointStatus::Pending => "pending",
            CheckpointStatus::Ready => "ready",
            CheckpointStatus::Acknowledged => "acknowledged",
            CheckpointStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub number: u8,
    pub name: String,
    pub status: CheckpointStatus,
    #[serde(default)]
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub metrics_snapshot: Option<ProgramMetrics>,
}

impl Checkpoint {
    /// A fresh pending checkpoint with its default name.
    #[must_use]
    pub fn pending(number: u8) -> Option<Self> {
        Some(Self {
            number,
            name: default_checkpoint_name(number)?.to_string(),
            status: CheckpointStatus::Pending,
            triggered_at: None,
            acknowledged_at: None,
            completed_at: None,
            notes: None,
            admin_notes: None,
            metrics_snapshot: None,
        })
    }
}

/// Payload of the notes update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointNotes {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

#[must_use]
pub fn default_checkpoint_name(number: u8) -> Option<&'static str> {
    let index = usize::from(number.checked_sub(1)?);
    DEFAULT_NAMES.get(index).copied()
}

/// Gating rule: checkpoint 1 is always open; checkpoint N needs N-1 to be
/// present in `checkpoints` and completed.
#[must_use]
pub fn can_trigger(checkpoints: &[Checkpoint], number: u8) -> bool {
    match number {
        1 => true,
        n if (2..=CHECKPOINT_COUNT).contains(&n) => checkpoints
            .iter()
            .any(|c| c.number == n - 1 && c.status == CheckpointStatus::Completed),
        _ => false,
    }
}

/// Whether the trigger button is rendered for `checkpoint`.
#[must_use]
pub fn shows_trigger_action(checkpoints: &[Checkpoint], checkpoint: &Checkpoint) -> bool {
    checkpoint.status == CheckpointStatus::Pending && can_trigger(checkpoints, checkpoint.number)
}

/// Full pre-flight check before a trigger request is sent.
///
/// # Errors
///
/// `OutOfRange` for numbers outside 1..=5, `Gated` when the previous
/// checkpoint is not completed, `NotPending` when the target has already
/// been triggered.
pub fn check_trigger(checkpoints: &[Checkpoint], number: u8) -> Result<(), CheckpointError> {
    if !(1..=CHECKPOINT_COUNT).contains(&number) {
        return Err(CheckpointError::OutOfRange(number));
    }
    if !can_trigger(checkpoints, number) {
        return Err(CheckpointError::Gated { number });
    }
    match checkpoints.iter().find(|c| c.number == number) {
        Some(c) if c.status != CheckpointStatus::Pending => Err(CheckpointError::NotPending {
            number,
            status: c.status,
        }),
        _ => Ok(()),
    }
}
