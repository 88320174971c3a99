//! Domain-level error types.
//!
//! These errors are transport agnostic. The backend adapter maps HTTP
//! failures into them and page views turn them into notification messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::notification::{NotificationMessage, Severity};

/// Message shown when the backend cannot be reached at all.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão com o servidor.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed validation before any network call was made.
    InvalidRequest,
    /// The backend rejected the credentials.
    Unauthorized,
    /// The backend reported that the resource does not exist.
    NotFound,
    /// The backend could not be reached or timed out.
    ServiceUnavailable,
    /// The backend failed or answered with something unusable.
    InternalError,
}

impl ErrorCode {
    /// Message used when a failure carries no text of its own.
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Dados inválidos.",
            Self::Unauthorized => "Erro ao autenticar.",
            Self::NotFound => "Registro não encontrado.",
            Self::ServiceUnavailable => CONNECTION_ERROR_MESSAGE,
            Self::InternalError => "Erro na requisição",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `lines` is never empty and no line is blank once trimmed. Blank input
///   is replaced by [`ErrorCode::fallback_message`].
///
/// # Examples
/// ```
/// use frontend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("CPF não encontrado");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.lines(), ["CPF não encontrado"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    lines: Vec<String>,
}

impl Error {
    /// Create an error with a single message line.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::with_lines(code, vec![message.into()])
    }

    /// Create an error from several message lines, preserving their order.
    pub fn with_lines(code: ErrorCode, lines: Vec<String>) -> Self {
        let mut lines: Vec<String> = lines
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            lines.push(code.fallback_message().to_owned());
        }
        Self { code, lines }
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message lines in display order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines, as an alert would show them.
    pub fn message(&self) -> String {
        self.lines.join("\n")
    }

    /// Convert the error into the notification a page would publish.
    ///
    /// Validation failures are warnings; everything else is an error.
    pub fn to_notification(&self) -> NotificationMessage {
        let severity = match self.code {
            ErrorCode::InvalidRequest => Severity::Warning,
            _ => Severity::Error,
        };
        NotificationMessage::new(severity, self.lines.clone())
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {}
