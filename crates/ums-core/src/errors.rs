//! Error types shared by the console services and controllers.
//!
//! Every failure is classified into a small closed set of [`ErrorKind`]s so a
//! caller can decide between retrying and aborting. The text shown to an end
//! user stays generic and operation-specific, see [`failure_message`].

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

/// Classification of a [`ConsoleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Transport,
    Server,
    Cancelled,
}

impl ErrorKind {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Transport | ErrorKind::Server)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// Request rejected locally or by the backend because of invalid input.
    #[error("{0}")]
    Validation(String),

    /// Field-scoped validation failures computed locally.
    #[error("{0}")]
    Fields(FieldErrors),

    /// An index or id did not resolve to a persisted entity.
    #[error("Invalid {entity} selected")]
    InvalidSelection { entity: &'static str },

    /// The backend refused the request as invalid (400/422).
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Network failure, timeout or undecodable response.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request was aborted because its owner went away.
    #[error("Request cancelled")]
    Cancelled,
}

impl ConsoleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::Validation(_)
            | ConsoleError::Fields(_)
            | ConsoleError::InvalidSelection { .. }
            | ConsoleError::Rejected { .. } => ErrorKind::Validation,
            ConsoleError::NotFound(_) => ErrorKind::NotFound,
            ConsoleError::Conflict(_) => ErrorKind::Conflict,
            ConsoleError::Transport(_) => ErrorKind::Transport,
            ConsoleError::Server { .. } => ErrorKind::Server,
            ConsoleError::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Maps an HTTP status and backend message onto the closed error set.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => ConsoleError::Rejected { status, message },
            404 => ConsoleError::NotFound(message),
            409 => ConsoleError::Conflict(message),
            _ => ConsoleError::Server { status, message },
        }
    }
}

/// The user action an error message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Create,
    Update,
    Delete,
    Save,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Fetch => "fetch",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Save => "save",
        };
        f.write_str(verb)
    }
}

/// Builds the generic message shown to the end user for a failed operation.
///
/// Errors raised locally keep their own text. Anything that came back from
/// the backend, a rejection included, is reduced to the generic message.
pub fn failure_message(action: Action, entity: &str, error: &ConsoleError) -> String {
    match error {
        ConsoleError::InvalidSelection { .. }
        | ConsoleError::Fields(_)
        | ConsoleError::Validation(_) => error.to_string(),
        _ => format!("Failed to {action} {entity}. Please try again."),
    }
}

/// Field name to messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(field, messages)| {
            messages.iter().map(move |m| (field.as_str(), m.as_str()))
        })
    }

    /// Returns `Ok(())` when empty, otherwise the errors wrapped in a [`ConsoleError`].
    pub fn into_result(self) -> Result<(), ConsoleError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConsoleError::Fields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

impl From<ValidationErrors> for ConsoleError {
    fn from(errors: ValidationErrors) -> Self {
        ConsoleError::Fields(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ConsoleError::from_status(404, "missing").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ConsoleError::from_status(409, "taken").kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ConsoleError::from_status(422, "bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ConsoleError::from_status(503, "down").kind(),
            ErrorKind::Server
        );
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ConsoleError::Transport("reset".into()).is_retryable());
        assert!(ConsoleError::from_status(500, "boom").is_retryable());
        assert!(!ConsoleError::Conflict("dup".into()).is_retryable());
        assert!(!ConsoleError::Cancelled.is_retryable());
    }

    #[test]
    fn test_failure_message_is_generic() {
        let err = ConsoleError::from_status(500, "stack trace here");
        assert_eq!(
            failure_message(Action::Create, "faculty", &err),
            "Failed to create faculty. Please try again."
        );
    }

    #[test]
    fn test_backend_rejection_is_generic() {
        let err = ConsoleError::from_status(422, "duplicate key value violates \"faculties_pkey\"");
        assert!(matches!(err, ConsoleError::Rejected { status: 422, .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            failure_message(Action::Create, "faculty", &err),
            "Failed to create faculty. Please try again."
        );

        let local = ConsoleError::Validation("Code must be 2 to 4 uppercase letters".into());
        assert_eq!(
            failure_message(Action::Create, "faculty", &local),
            "Code must be 2 to 4 uppercase letters"
        );
    }

    #[test]
    fn test_invalid_selection_message() {
        let err = ConsoleError::InvalidSelection { entity: "school" };
        assert_eq!(err.to_string(), "Invalid school selected");
        assert_eq!(
            failure_message(Action::Update, "school", &err),
            "Invalid school selected"
        );
    }

    #[test]
    fn test_field_errors() {
        let mut errors = FieldErrors::new();
        assert!(errors.clone().into_result().is_ok());
        errors.add("name", "Role name is required");
        errors.add("permissions", "At least one permission must be selected");
        assert_eq!(errors.get("name"), Some("Role name is required"));
        assert!(errors.contains("permissions"));
        assert!(!errors.contains("description"));
        assert!(matches!(
            errors.into_result(),
            Err(ConsoleError::Fields(_))
        ));
    }
}
