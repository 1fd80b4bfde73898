//! Transient user-facing notifications.

use crate::error::PdfRoomsError;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Operation succeeded.
    Success,
    /// Operation failed; the notice is the only escalation.
    Error,
}

/// A transient notification shown to the user and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// Detail line.
    pub body: String,
    /// Severity.
    pub kind: NoticeKind,
}

impl Notice {
    /// Create a success notice.
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Success,
        }
    }

    /// Create an error notice.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: NoticeKind::Error,
        }
    }

    /// Build an error notice from a failed operation.
    pub fn from_error(err: &PdfRoomsError) -> Self {
        let title = match err {
            PdfRoomsError::Auth(_) => "Sign-in Failed",
            PdfRoomsError::Permission(_) => "Not Allowed",
            PdfRoomsError::Validation(_) => "Missing Information",
            PdfRoomsError::NotFound(_) => "Not Found",
            _ => "Something Went Wrong",
        };
        Self::error(title, err.to_string())
    }
}
