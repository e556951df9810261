//! Shared error types for the services crate.

use backend::ApiError;
use csr_core::game::{LibraryError, SessionError};
use csr_core::model::program::{CheckpointError, ProgramFieldErrors};
use thiserror::Error;

/// Errors emitted by `ProgramAdminService` and `ReportDownloads`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdminError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Refused locally; no request was sent.
    #[error(transparent)]
    Gated(#[from] CheckpointError),

    #[error(transparent)]
    Validation(#[from] ProgramFieldErrors),

    #[error("no certificates selected")]
    NothingSelected,

    #[error("could not save file: {0}")]
    Io(#[from] std::io::Error),
}

impl AdminError {
    /// One line for a toast or an error panel.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Api(e) => e.message(),
            AdminError::Gated(e) => capitalize(&e.to_string()),
            AdminError::Validation(_) => "Please fix the highlighted fields".into(),
            AdminError::NothingSelected => "Select at least one certificate first".into(),
            AdminError::Io(e) => format!("Could not save the file: {e}"),
        }
    }

    /// True when the resource is gone; pages show a not-found state instead
    /// of a retry button.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::Api(ApiError::NotFound(_)))
    }
}

/// Errors emitted by `GameLibraryService` and `GamePlay`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("no game named `{0}`")]
    UnknownGame(String),

    #[error("this action is not available in a {0} game")]
    WrongTemplate(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("game library {path}: {source}")]
    Library {
        path: String,
        #[source]
        source: LibraryError,
    },

    #[error("could not read game library {path}: {source}")]
    LibraryFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_message_is_sentence_cased() {
        let err = AdminError::from(CheckpointError::Gated { number: 2 });
        assert_eq!(
            err.user_message(),
            "Checkpoint 2 is locked until checkpoint 1 is completed"
        );
    }

    #[test]
    fn api_errors_use_backend_message() {
        let err = AdminError::from(ApiError::Rejected("Report is already published".into()));
        assert_eq!(err.user_message(), "Report is already published");
        assert!(!err.is_not_found());
        assert!(AdminError::from(ApiError::NotFound("gone".into())).is_not_found());
    }
}
