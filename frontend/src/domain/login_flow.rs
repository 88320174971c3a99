//! Login view flow: identify by CPF, create a first password if needed,
//! then authenticate and populate the session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::ports::BackendApi;
use super::{
    Acknowledgement, Cpf, Error, Identity, LoginCredentials, PasswordSetup, RoleCode,
    SessionStore,
};

/// Message shown when the backend returns a subject without a role.
pub const MISSING_ROLE_MESSAGE: &str = "Nenhum papel atribuido ao usuario";

/// Where the login view is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoginStep {
    /// Waiting for a CPF.
    #[default]
    AwaitingCpf,
    /// CPF known to the backend.
    Identified {
        /// CPF digits.
        cpf: Cpf,
        /// Whether a password exists; when not, one must be created first.
        has_password: bool,
    },
    /// Session populated.
    Authenticated,
}

/// Login flow service.
pub struct LoginFlow {
    session: Arc<SessionStore>,
    backend: Arc<dyn BackendApi>,
    step: Mutex<LoginStep>,
}

impl LoginFlow {
    /// Create a flow at [`LoginStep::AwaitingCpf`].
    pub fn new(session: Arc<SessionStore>, backend: Arc<dyn BackendApi>) -> Self {
        Self {
            session,
            backend,
            step: Mutex::new(LoginStep::AwaitingCpf),
        }
    }

    /// Enter the login view. Any existing session is cleared.
    ///
    /// # Errors
    ///
    /// Returns the storage error if persisted entries could not be removed.
    pub fn enter(&self) -> Result<(), Error> {
        *self.lock() = LoginStep::AwaitingCpf;
        self.session.clear()
    }

    /// Current step.
    pub fn step(&self) -> LoginStep {
        self.lock().clone()
    }

    /// Look the CPF up. Non-digits are stripped before the call.
    ///
    /// Returns whether the subject already has a password.
    ///
    /// # Errors
    ///
    /// Returns a validation error for input without digits, or the backend's
    /// message (for instance "CPF não encontrado") verbatim.
    pub async fn check_cpf(&self, raw_cpf: &str) -> Result<bool, Error> {
        let cpf = Cpf::parse(raw_cpf)?;
        let lookup = self
            .backend
            .password_status(&cpf)
            .await
            .map_err(|error| error.to_domain("Erro na requisição"));
        let has_password = match lookup {
            Ok(has_password) => has_password,
            Err(error) => {
                *self.lock() = LoginStep::AwaitingCpf;
                return Err(error);
            }
        };
        debug!(has_password, "cpf identified");
        *self.lock() = LoginStep::Identified { cpf, has_password };
        Ok(has_password)
    }

    /// Create the first password for the identified CPF.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no CPF was identified, the password is
    /// shorter than four characters or the confirmation differs; otherwise
    /// the backend error.
    pub async fn set_password(
        &self,
        password: &str,
        confirmation: &str,
    ) -> Result<Acknowledgement, Error> {
        let cpf = self.identified_cpf()?;
        let setup = PasswordSetup::try_new(cpf.clone(), password, confirmation)?;
        let ack = self
            .backend
            .change_password(setup.credentials())
            .await
            .map_err(|error| error.to_domain("Erro ao salvar senha."))?;
        debug!("first password stored");
        *self.lock() = LoginStep::Identified {
            cpf,
            has_password: true,
        };
        Ok(ack)
    }

    /// Authenticate the identified CPF and populate the session with the
    /// first subject the backend returns.
    ///
    /// # Errors
    ///
    /// Returns the backend's message on rejection and
    /// [`MISSING_ROLE_MESSAGE`] when the subject has no role; the session is
    /// left logged out in both cases.
    pub async fn authenticate(&self, password: &str) -> Result<Identity, Error> {
        let cpf = self.identified_cpf()?;
        let credentials = LoginCredentials::try_new(cpf, password)?;
        let subjects = self
            .backend
            .login(&credentials)
            .await
            .map_err(|error| error.to_domain("Erro ao autenticar."))?;
        let subject = subjects
            .into_iter()
            .next()
            .ok_or_else(|| Error::unauthorized("Falha ao autenticar."))?;

        let role = RoleCode::from_code(&subject.role_code);
        if role.is_unset() {
            return Err(Error::unauthorized(MISSING_ROLE_MESSAGE));
        }
        self.session.set_identity(&subject.cpf, &subject.name, role)?;
        *self.lock() = LoginStep::Authenticated;
        info!(role = role.code(), "user authenticated");
        Ok(self.session.identity())
    }

    fn identified_cpf(&self) -> Result<Cpf, Error> {
        match &*self.lock() {
            LoginStep::Identified { cpf, .. } => Ok(cpf.clone()),
            LoginStep::AwaitingCpf | LoginStep::Authenticated => Err(Error::invalid_request(
                "Nenhum usuário validado. Por favor, verifique o CPF.",
            )),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoginStep> {
        self.step.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
