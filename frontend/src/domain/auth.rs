//! Authentication primitives such as login credentials.
//!
//! Constructors validate raw form input before the login flow talks to the
//! backend, so validation failures never cost a network round trip.

use std::fmt;

use zeroize::Zeroizing;

use super::Error;

/// Minimum accepted length for a new password.
pub const PASSWORD_MIN_LEN: usize = 4;

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// CPF contained no digits.
    EmptyCpf,
    /// Password was blank.
    EmptyPassword,
    /// New password or its confirmation is shorter than the minimum.
    PasswordTooShort { min: usize },
    /// New password and confirmation differ.
    PasswordMismatch,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCpf => write!(f, "Informe o CPF."),
            Self::EmptyPassword => write!(f, "Informe a senha."),
            Self::PasswordTooShort { min } => {
                write!(f, "A senha deve ter no mínimo {min} caracteres.")
            }
            Self::PasswordMismatch => write!(f, "As senhas digitadas não coincidem."),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// CPF reduced to its digits.
///
/// # Examples
/// ```
/// use frontend::domain::Cpf;
///
/// let cpf = Cpf::parse("123.456.789-09").unwrap();
/// assert_eq!(cpf.as_str(), "12345678909");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Strip every non-digit character; reject input with no digits.
    pub fn parse(raw: &str) -> Result<Self, LoginValidationError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(LoginValidationError::EmptyCpf);
        }
        Ok(Self(digits))
    }

    /// Borrow the digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `password` is non-empty but keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    cpf: Cpf,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from a parsed CPF and a raw password.
    pub fn try_new(cpf: Cpf, password: &str) -> Result<Self, LoginValidationError> {
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            cpf,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// CPF the credentials belong to.
    pub const fn cpf(&self) -> &Cpf {
        &self.cpf
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// First-access password creation: password plus its confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordSetup {
    credentials: LoginCredentials,
}

impl PasswordSetup {
    /// Validate a new password against its confirmation.
    ///
    /// Both values must have at least [`PASSWORD_MIN_LEN`] characters and
    /// match exactly.
    pub fn try_new(
        cpf: Cpf,
        password: &str,
        confirmation: &str,
    ) -> Result<Self, LoginValidationError> {
        if password.chars().count() < PASSWORD_MIN_LEN
            || confirmation.chars().count() < PASSWORD_MIN_LEN
        {
            return Err(LoginValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        if password != confirmation {
            return Err(LoginValidationError::PasswordMismatch);
        }
        Ok(Self {
            credentials: LoginCredentials::try_new(cpf, password)?,
        })
    }

    /// Credentials to store and then log in with.
    pub const fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }
}
