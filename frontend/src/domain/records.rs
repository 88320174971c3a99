//! Backend-owned records as the front-end displays and forwards them.
//!
//! The backend validates and persists all of these; the client only checks
//! the required-field rules a form enforces before submitting.

use std::fmt;

use super::{Cpf, Error, RoleCode};

/// Subject returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSubject {
    /// CPF echoed by the backend.
    pub cpf: String,
    /// Display name.
    pub name: String,
    /// Raw role code; may be blank for accounts without a role.
    pub role_code: String,
}

/// Catalog medication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medication {
    /// Backend identifier.
    pub id: i64,
    /// Medication name.
    pub name: String,
    /// Dosage description.
    pub dosage: String,
}

/// Medication about to be added to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedication {
    name: String,
    dosage: String,
}

impl NewMedication {
    /// Both fields are required.
    pub fn try_new(name: &str, dosage: &str) -> Result<Self, Error> {
        let name = name.trim();
        let dosage = dosage.trim();
        if name.is_empty() || dosage.is_empty() {
            return Err(Error::invalid_request("Preencha todos os campos"));
        }
        Ok(Self {
            name: name.to_owned(),
            dosage: dosage.to_owned(),
        })
    }

    /// Medication name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Dosage description.
    pub fn dosage(&self) -> &str {
        self.dosage.as_str()
    }
}

/// User account as listed on the management page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// CPF.
    pub cpf: String,
    /// Full name.
    pub name: String,
    /// E-mail address, possibly blank.
    pub email: String,
    /// Role granted to the account.
    pub role: RoleCode,
    /// Role name as rendered by the backend.
    pub role_name: String,
    /// Whether the account is active.
    pub active: bool,
}

/// User creation or update form.
///
/// Saving an existing CPF updates the account without touching its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    cpf: Cpf,
    name: String,
    email: String,
    role: RoleCode,
}

impl UserDraft {
    /// CPF and name are required; the role must be set.
    pub fn try_new(cpf: &str, name: &str, email: &str, role: RoleCode) -> Result<Self, Error> {
        let name = name.trim();
        let cpf = Cpf::parse(cpf).map_err(|_| Error::invalid_request("Preencha CPF e Nome"))?;
        if name.is_empty() {
            return Err(Error::invalid_request("Preencha CPF e Nome"));
        }
        if role.is_unset() {
            return Err(Error::invalid_request("Selecione um perfil."));
        }
        Ok(Self {
            cpf,
            name: name.to_owned(),
            email: email.trim().to_owned(),
            role,
        })
    }

    /// Prefill a draft from an existing account for editing.
    pub fn from_account(account: &UserAccount) -> Result<Self, Error> {
        Self::try_new(&account.cpf, &account.name, &account.email, account.role)
    }

    /// CPF digits.
    pub const fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    /// Full name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// E-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Role to grant.
    pub const fn role(&self) -> RoleCode {
        self.role
    }
}

/// Request counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    /// All requests.
    pub total: u64,
    /// Requests awaiting review.
    pub in_review: u64,
    /// Approved requests.
    pub approved: u64,
    /// Denied requests.
    pub denied: u64,
}

/// Status of a dispensing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    /// Awaiting review.
    InReview,
    /// Approved by an analyst.
    Approved,
    /// Denied by an analyst.
    Denied,
    /// Any other backend status, kept verbatim.
    Other(String),
}

impl RequestStatus {
    /// Parse the backend status text.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "EM ANALISE" => Self::InReview,
            "DEFERIDO" => Self::Approved,
            "INDEFERIDO" => Self::Denied,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Status text as the backend spells it.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::InReview => "EM ANALISE",
            Self::Approved => "DEFERIDO",
            Self::Denied => "INDEFERIDO",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Request as seen in the analyst review queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// Protocol number.
    pub protocol: i64,
    /// Citizen name.
    pub citizen: String,
    /// Medication name.
    pub medication: String,
    /// Filing date, already formatted by the backend.
    pub date: String,
    /// Current status.
    pub status: RequestStatus,
}

/// Request as seen in the citizen's own history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitizenRequest {
    /// Protocol number.
    pub protocol: i64,
    /// Medication name.
    pub medication: String,
    /// Filing date, already formatted by the backend.
    pub date: String,
    /// Current status.
    pub status: RequestStatus,
}

/// Analyst decision on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Grant the request.
    Approve,
    /// Deny the request.
    Deny,
}

impl ReviewDecision {
    /// Status the decision moves the request to.
    pub const fn status(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Deny => RequestStatus::Denied,
        }
    }

    /// Confirmation shown after the backend accepts the decision.
    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::Approve => "Solicitação Aprovada com sucesso!",
            Self::Deny => "Solicitação Negada com sucesso!",
        }
    }
}

/// New dispensing request filed by a citizen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequest {
    /// Citizen filing the request.
    pub cpf: String,
    /// Requested medication.
    pub medication_id: i64,
    /// Free-text note.
    pub note: String,
}

/// Success payload returned by backend mutations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Acknowledgement {
    /// Message lines, possibly empty.
    pub lines: Vec<String>,
    /// Protocol of a newly created request, when the backend returns one.
    pub protocol: Option<i64>,
}
