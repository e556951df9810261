mod certificate_vm;
mod checkpoint_vm;
mod game_vm;
mod metrics_vm;
mod program_vm;
mod report_vm;
mod school_vm;
mod time_fmt;

pub use certificate_vm::{CertificateRowVm, map_certificate_rows, selection_label};
pub use checkpoint_vm::{CheckpointRowVm, map_checkpoint_rows};
pub use game_vm::{
    GameCardVm, MediaVm, ResultVm, map_game_cards, map_media, map_result, progress_percent,
};
pub use metrics_vm::{MetricTileVm, map_metric_tiles, refreshed_label};
pub use program_vm::{
    ProgramHeaderVm, ProgramRowVm, map_program_header, map_program_rows, scope_summary,
    status_class,
};
pub use report_vm::{ReportRowVm, map_report_rows};
pub use school_vm::{AssignedSchoolVm, CatalogueSchoolVm, map_assigned_schools, map_catalogue_schools};
pub use time_fmt::{format_date, format_datetime, format_optional};
