use thiserror::Error;

use crate::domain::FormField;

/// Shown in place of a server message when a failed response carries nothing
/// we can read.
pub const GENERIC_ERROR_MESSAGE: &str = "Search failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    Required,
    PatternMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}: {}", .field.name(), field_message(*.field, *.kind))]
pub struct ValidationError {
    pub field: FormField,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: FormField, kind: ValidationKind) -> Self {
        Self { field, kind }
    }

    /// Text displayed under the offending field.
    pub fn message(&self) -> &'static str {
        field_message(self.field, self.kind)
    }
}

fn field_message(field: FormField, kind: ValidationKind) -> &'static str {
    match (field, kind) {
        (FormField::Email, ValidationKind::Required) => "Email is required.",
        (FormField::Number, ValidationKind::PatternMismatch) => "Number should be exactly 6 digits.",
        (_, ValidationKind::Required) => "This field is required.",
        (_, ValidationKind::PatternMismatch) => "This field has an invalid format.",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with an `{ "error": ... }` body.
    #[error("{0}")]
    ServerMessage(String),
    /// The request failed and no readable error body came back.
    #[error("unreadable search response: {0}")]
    Unparseable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search request superseded")]
    Cancelled,
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SearchError {
    /// What the single error slot of the form displays for this failure.
    /// Cancellation never becomes visible.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Transport(TransportError::ServerMessage(message)) => Some(message.clone()),
            Self::Transport(TransportError::Unparseable(_)) => {
                Some(GENERIC_ERROR_MESSAGE.to_string())
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
