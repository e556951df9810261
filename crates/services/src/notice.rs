use crate::error::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient toast produced by an admin mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(error: &AdminError) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: error.user_message(),
        }
    }

    /// Success text on `Ok`, the error's user message on `Err`.
    #[must_use]
    pub fn from_outcome<T>(outcome: &Result<T, AdminError>, success: impl Into<String>) -> Self {
        match outcome {
            Ok(_) => Self::success(success),
            Err(e) => Self::error(e),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::ApiError;

    #[test]
    fn outcome_picks_message() {
        let ok: Result<(), AdminError> = Ok(());
        assert_eq!(Notice::from_outcome(&ok, "Program archived"), Notice::success("Program archived"));

        let err: Result<(), AdminError> = Err(ApiError::Rejected("Nope".into()).into());
        let notice = Notice::from_outcome(&err, "Program archived");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Nope");
    }
}
