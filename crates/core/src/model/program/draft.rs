//! Program create/edit form.
//!
//! The form keeps raw text exactly as typed; `validate` turns it into a
//! `ProgramInput` or reports every invalid field at once.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::PartnerId;
use crate::model::program::program::{Program, ProgramDuration, ProgramScope};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgramField {
    Name,
    Partner,
    Description,
    States,
    TargetStudents,
    StartDate,
    EndDate,
}

impl ProgramField {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProgramField::Name => "Program name",
            ProgramField::Partner => "Partner",
            ProgramField::Description => "Description",
            ProgramField::States => "States",
            ProgramField::TargetStudents => "Target students",
            ProgramField::StartDate => "Start date",
            ProgramField::EndDate => "End date",
        }
    }
}

/// Per-field messages from a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct ProgramFieldErrors(BTreeMap<ProgramField, &'static str>);

impl ProgramFieldErrors {
    #[must_use]
    pub fn get(&self, field: ProgramField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProgramField, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn insert(&mut self, field: ProgramField, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

impl fmt::Display for ProgramField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInput {
    pub name: String,
    pub partner_id: PartnerId,
    pub description: String,
    pub scope: ProgramScope,
    pub duration: ProgramDuration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramDraft {
    pub name: String,
    /// Selected partner id; empty until one is picked.
    pub partner_id: String,
    pub description: String,
    pub states: Vec<String>,
    pub districts: Vec<String>,
    pub school_categories: Vec<String>,
    pub target_students: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub start_date: String,
    pub end_date: String,
}

impl ProgramDraft {
    /// Pre-fills the edit form.
    #[must_use]
    pub fn from_program(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            partner_id: program.partner.id.to_string(),
            description: program.description.clone(),
            states: program.scope.states.clone(),
            districts: program.scope.districts.clone(),
            school_categories: program.scope.school_categories.clone(),
            target_students: program.scope.target_students.to_string(),
            start_date: program.duration.start_date.format(DATE_FORMAT).to_string(),
            end_date: program.duration.end_date.format(DATE_FORMAT).to_string(),
        }
    }

    /// # Errors
    ///
    /// Returns every invalid field with a message suitable for display next
    /// to the input.
    pub fn validate(&self) -> Result<ProgramInput, ProgramFieldErrors> {
        let mut errors = ProgramFieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(ProgramField::Name, "Program name is required");
        }
        let partner = self.partner_id.trim();
        if partner.is_empty() {
            errors.insert(ProgramField::Partner, "Select a partner");
        }
        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(ProgramField::Description, "Description is required");
        }

        let states = clean_list(&self.states);
        if states.is_empty() {
            errors.insert(ProgramField::States, "Select at least one state");
        }

        let target = self.target_students.trim();
        let target_students = if target.is_empty() {
            errors.insert(ProgramField::TargetStudents, "Target students is required");
            None
        } else {
            match target.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    errors.insert(
                        ProgramField::TargetStudents,
                        "Target students must be greater than 0",
                    );
                    None
                }
            }
        };

        let start = parse_date(&self.start_date, ProgramField::StartDate, &mut errors);
        let end = parse_date(&self.end_date, ProgramField::EndDate, &mut errors);
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.insert(ProgramField::EndDate, "End date must be after start date");
            }
        }

        match (target_students, start, end) {
            (Some(target_students), Some(start_date), Some(end_date)) if errors.is_empty() => {
                Ok(ProgramInput {
                    name: name.to_string(),
                    partner_id: PartnerId::new(partner),
                    description: description.to_string(),
                    scope: ProgramScope {
                        states,
                        districts: clean_list(&self.districts),
                        school_categories: clean_list(&self.school_categories),
                        target_students,
                    },
                    duration: ProgramDuration {
                        start_date,
                        end_date,
                    },
                })
            }
            _ => Err(errors),
        }
    }
}

/// Splits a comma-separated text input into trimmed, non-empty values.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(
    raw: &str,
    field: ProgramField,
    errors: &mut ProgramFieldErrors,
) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.insert(
            field,
            match field {
                ProgramField::StartDate => "Start date is required",
                _ => "End date is required",
            },
        );
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(field, "Enter a valid date (YYYY-MM-DD)");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProgramDraft {
        ProgramDraft {
            name: "  Digital Literacy  ".into(),
            partner_id: "acme".into(),
            description: "Tablets for rural schools".into(),
            states: vec!["Karnataka".into(), " ".into()],
            districts: split_list("Mysuru, Mandya,"),
            school_categories: vec![],
            target_students: "1200".into(),
            start_date: "2025-06-01".into(),
            end_date: "2026-03-31".into(),
        }
    }

    #[test]
    fn valid_draft_produces_trimmed_input() {
        let input = valid().validate().unwrap();
        assert_eq!(input.name, "Digital Literacy");
        assert_eq!(input.scope.states, vec!["Karnataka".to_string()]);
        assert_eq!(input.scope.districts, vec!["Mysuru".to_string(), "Mandya".to_string()]);
        assert_eq!(input.scope.target_students, 1200);
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = ProgramDraft::default().validate().unwrap_err();
        for field in [
            ProgramField::Name,
            ProgramField::Partner,
            ProgramField::Description,
            ProgramField::States,
            ProgramField::TargetStudents,
            ProgramField::StartDate,
            ProgramField::EndDate,
        ] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn zero_or_garbage_target_is_rejected() {
        for raw in ["0", "-5", "lots"] {
            let draft = ProgramDraft {
                target_students: raw.into(),
                ..valid()
            };
            let errors = draft.validate().unwrap_err();
            assert_eq!(
                errors.get(ProgramField::TargetStudents),
                Some("Target students must be greater than 0")
            );
        }
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let draft = ProgramDraft {
            end_date: "2025-06-01".into(),
            ..valid()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(ProgramField::EndDate),
            Some("End date must be after start date")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn malformed_date_is_reported() {
        let draft = ProgramDraft {
            start_date: "01/06/2025".into(),
            ..valid()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(ProgramField::StartDate),
            Some("Enter a valid date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn draft_round_trips_through_program() {
        let input = valid().validate().unwrap();
        let program = Program {
            id: crate::model::ProgramId::new("p1"),
            name: input.name.clone(),
            partner: crate::model::program::PartnerRef {
                id: input.partner_id.clone(),
                name: "Acme".into(),
            },
            description: input.description.clone(),
            scope: input.scope.clone(),
            duration: input.duration,
            status: crate::model::program::ProgramStatus::Draft,
            metrics: None,
            checkpoints: vec![],
            created_at: crate::time::fixed_now(),
            updated_at: crate::time::fixed_now(),
        };
        assert_eq!(ProgramDraft::from_program(&program).validate().unwrap(), input);
    }
}
