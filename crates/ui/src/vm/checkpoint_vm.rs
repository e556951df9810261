use csr_core::model::program::{Checkpoint, CheckpointStatus, shows_trigger_action};

use crate::vm::time_fmt::format_optional;

/// One checkpoint card. The trigger flags are re-derived from the full list
/// on every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckpointRowVm {
    pub number: u8,
    pub name: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub triggered_at: String,
    pub acknowledged_at: String,
    pub completed_at: String,
    pub notes: String,
    pub admin_notes: String,
    /// Pending checkpoints render a trigger button...
    pub show_trigger: bool,
    /// ...enabled only once the previous checkpoint is completed.
    pub can_trigger: bool,
    pub locked_hint: Option<String>,
}

fn status_view(status: CheckpointStatus) -> (&'static str, &'static str) {
    match status {
        CheckpointStatus::Pending => ("Pending", "badge badge--muted"),
        CheckpointStatus::Ready => ("Ready for partner", "badge badge--info"),
        CheckpointStatus::Acknowledged => ("Acknowledged", "badge badge--warn"),
        CheckpointStatus::Completed => ("Completed", "badge badge--ok"),
    }
}

#[must_use]
pub fn map_checkpoint_rows(checkpoints: &[Checkpoint]) -> Vec<CheckpointRowVm> {
    let mut sorted: Vec<&Checkpoint> = checkpoints.iter().collect();
    sorted.sort_by_key(|c| c.number);
    sorted
        .into_iter()
        .map(|checkpoint| {
            let (status_label, status_class) = status_view(checkpoint.status);
            let show_trigger = checkpoint.status == CheckpointStatus::Pending;
            let enabled = shows_trigger_action(checkpoints, checkpoint);
            let locked_hint = (show_trigger && !enabled).then(|| {
                format!(
                    "Complete checkpoint {} first",
                    checkpoint.number.saturating_sub(1)
                )
            });
            CheckpointRowVm {
                number: checkpoint.number,
                name: checkpoint.name.clone(),
                status_label,
                status_class,
                triggered_at: format_optional(checkpoint.triggered_at),
                acknowledged_at: format_optional(checkpoint.acknowledged_at),
                completed_at: format_optional(checkpoint.completed_at),
                notes: checkpoint.notes.clone().unwrap_or_default(),
                admin_notes: checkpoint.admin_notes.clone().unwrap_or_default(),
                show_trigger,
                can_trigger: enabled,
                locked_hint,
            }
        })
        .collect()
}
