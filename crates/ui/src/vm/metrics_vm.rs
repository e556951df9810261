use csr_core::model::program::ProgramMetrics;

use crate::vm::time_fmt::format_optional;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricTileVm {
    pub label: &'static str,
    pub value: String,
}

#[must_use]
pub fn map_metric_tiles(metrics: &ProgramMetrics) -> Vec<MetricTileVm> {
    let tile = |label, value: String| MetricTileVm { label, value };
    vec![
        tile("Schools", metrics.schools.to_string()),
        tile("Students enrolled", metrics.students_enrolled.to_string()),
        tile(
            "Students reached",
            format!("{} ({}%)", metrics.students_reached, metrics.reach_percent()),
        ),
        tile("Sessions completed", metrics.sessions_completed.to_string()),
        tile("Average score", format!("{:.1}", metrics.average_score)),
        tile("Certificates delivered", metrics.certificates_delivered.to_string()),
        tile("Kits delivered", metrics.kits_delivered.to_string()),
    ]
}

#[must_use]
pub fn refreshed_label(metrics: &ProgramMetrics) -> String {
    match metrics.last_refreshed_at {
        Some(_) => format!("Last refreshed {}", format_optional(metrics.last_refreshed_at)),
        None => "Never refreshed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_is_shown_with_percentage() {
        let metrics = ProgramMetrics {
            students_enrolled: 200,
            students_reached: 50,
            average_score: 72.5,
            ..ProgramMetrics::default()
        };
        let tiles = map_metric_tiles(&metrics);
        let reached = tiles.iter().find(|t| t.label == "Students reached").unwrap();
        assert_eq!(reached.value, "50 (25%)");
        let average = tiles.iter().find(|t| t.label == "Average score").unwrap();
        assert_eq!(average.value, "72.5");
        assert_eq!(refreshed_label(&metrics), "Never refreshed");
    }
}
