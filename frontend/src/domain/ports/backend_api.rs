//! Driven port for the dispensing REST backend.
//!
//! Every decision (credential checks, approvals, persistence) happens on the
//! backend. The domain owns the request and response shapes; adapters own
//! transport, status mapping and JSON decoding.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{
    Acknowledgement, AuthenticatedSubject, CitizenRequest, Cpf, DashboardSummary, Error,
    ErrorCode, LoginCredentials, Medication, NewMedication, NewRequest, ReviewDecision,
    ReviewItem, UserAccount, UserDraft, CONNECTION_ERROR_MESSAGE,
};

define_port_error! {
    /// Errors surfaced while calling the backend.
    pub enum BackendError {
        /// The backend answered with a non-2xx status. `lines` holds its
        /// `mensagem` payload, empty when the body carried none.
        Rejected { status: u16, lines: Vec<String> } =>
            "backend rejected request with status {status}: {lines:?}",
        /// The request never produced a response.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "backend timeout: {message}",
        /// A 2xx response body could not be decoded.
        Decode { message: String } =>
            "backend response could not be decoded: {message}",
    }
}

impl BackendError {
    /// Map into a domain error, using `fallback` when the backend sent no
    /// message of its own.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::BackendError;
    ///
    /// let err = BackendError::rejected(404_u16, vec!["CPF não encontrado".to_owned()]);
    /// assert_eq!(err.to_domain("Erro na requisição").lines(), ["CPF não encontrado"]);
    /// ```
    pub fn to_domain(&self, fallback: &str) -> Error {
        match self {
            Self::Rejected { status, lines } => {
                let code = match status {
                    401 | 403 => ErrorCode::Unauthorized,
                    404 => ErrorCode::NotFound,
                    _ => ErrorCode::InternalError,
                };
                if lines.iter().all(|line| line.trim().is_empty()) {
                    Error::new(code, fallback)
                } else {
                    Error::with_lines(code, lines.clone())
                }
            }
            Self::Transport { .. } | Self::Timeout { .. } => {
                Error::service_unavailable(CONNECTION_ERROR_MESSAGE)
            }
            Self::Decode { .. } => Error::internal(fallback),
        }
    }
}

impl From<BackendError> for Error {
    fn from(value: BackendError) -> Self {
        value.to_domain(ErrorCode::InternalError.fallback_message())
    }
}

/// Port for every backend endpoint the front-end consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Whether the subject already has a password (`GET /api/loginAcesso/{cpf}`).
    async fn password_status(&self, cpf: &Cpf) -> Result<bool, BackendError>;

    /// Authenticate credentials (`POST /api/loginAcesso`).
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Vec<AuthenticatedSubject>, BackendError>;

    /// Store a first-access password (`PUT /api/alterarSenha`).
    async fn change_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Acknowledgement, BackendError>;

    /// Active catalog medications.
    async fn list_medications(&self) -> Result<Vec<Medication>, BackendError>;

    /// Add a medication to the catalog.
    async fn create_medication(
        &self,
        medication: &NewMedication,
    ) -> Result<Acknowledgement, BackendError>;

    /// Delete (or deactivate, when in use) a medication.
    async fn delete_medication(&self, id: i64) -> Result<Acknowledgement, BackendError>;

    /// Every user account.
    async fn list_users(&self) -> Result<Vec<UserAccount>, BackendError>;

    /// Create or update a user account.
    async fn save_user(&self, draft: &UserDraft) -> Result<Acknowledgement, BackendError>;

    /// Request counts by status.
    async fn dashboard_summary(&self) -> Result<DashboardSummary, BackendError>;

    /// Requests waiting for, or already given, a review.
    async fn review_queue(&self) -> Result<Vec<ReviewItem>, BackendError>;

    /// Record an analyst decision.
    async fn evaluate_request(
        &self,
        protocol: i64,
        decision: ReviewDecision,
    ) -> Result<Acknowledgement, BackendError>;

    /// Requests filed by one citizen.
    async fn citizen_requests(&self, cpf: &str) -> Result<Vec<CitizenRequest>, BackendError>;

    /// File a new dispensing request.
    async fn submit_request(&self, request: &NewRequest) -> Result<Acknowledgement, BackendError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(404, ErrorCode::NotFound)]
    #[case(401, ErrorCode::Unauthorized)]
    #[case(400, ErrorCode::InternalError)]
    #[case(500, ErrorCode::InternalError)]
    fn rejected_status_maps_to_code(#[case] status: u16, #[case] expected: ErrorCode) {
        let err = BackendError::rejected(status, vec!["falhou".to_owned()]).to_domain("x");
        assert_eq!(err.code(), expected);
        assert_eq!(err.lines(), ["falhou"]);
    }

    #[rstest]
    fn rejected_without_message_uses_fallback() {
        let err = BackendError::rejected(500_u16, Vec::<String>::new())
            .to_domain("Erro ao salvar senha.");
        assert_eq!(err.lines(), ["Erro ao salvar senha."]);
    }

    #[rstest]
    #[case(BackendError::transport("connection refused"))]
    #[case(BackendError::timeout("deadline elapsed"))]
    fn connectivity_failures_use_generic_message(#[case] error: BackendError) {
        let err = error.to_domain("ignored");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.lines(), [CONNECTION_ERROR_MESSAGE]);
    }
}
