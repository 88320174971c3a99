//! Line-oriented navigation events.
//!
//! Each input line is one event: a path starting with `/`, or a command word
//! followed by whitespace-separated arguments.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// One user interaction the shell reacts to.
#[derive(Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Go to a path.
    Navigate(String),
    /// Follow the back affordance.
    Back,
    /// End the session.
    Logout,
    /// Identify by CPF and authenticate.
    Login {
        /// CPF as typed.
        cpf: String,
        /// Password; empty when the account has none yet.
        password: Zeroizing<String>,
    },
    /// Create the first password for the identified CPF, then log in.
    SetPassword {
        /// New password.
        password: Zeroizing<String>,
        /// Its confirmation.
        confirmation: Zeroizing<String>,
    },
    /// Reload the mounted page if its refresh interval elapsed.
    Tick,
}

impl fmt::Debug for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(path) => f.debug_tuple("Navigate").field(path).finish(),
            Self::Back => f.write_str("Back"),
            Self::Logout => f.write_str("Logout"),
            Self::Login { cpf, .. } => f
                .debug_struct("Login")
                .field("cpf", cpf)
                .finish_non_exhaustive(),
            Self::SetPassword { .. } => f.debug_struct("SetPassword").finish_non_exhaustive(),
            Self::Tick => f.write_str("Tick"),
        }
    }
}

/// Input lines the driver cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    /// The line was blank.
    #[error("empty input")]
    Empty,
    /// The command word is not known.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The command is missing arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl NavigationEvent {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`EventParseError`] for blank lines, unknown commands and
    /// missing arguments.
    ///
    /// # Examples
    /// ```
    /// use frontend::inbound::NavigationEvent;
    ///
    /// assert_eq!(
    ///     NavigationEvent::parse("/Tela2Funcionario").unwrap(),
    ///     NavigationEvent::Navigate("/Tela2Funcionario".to_owned())
    /// );
    /// assert_eq!(NavigationEvent::parse(" back ").unwrap(), NavigationEvent::Back);
    /// ```
    pub fn parse(line: &str) -> Result<Self, EventParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(EventParseError::Empty);
        }
        if trimmed.starts_with('/') {
            return Ok(Self::Navigate(trimmed.to_owned()));
        }

        let mut words = trimmed.split_whitespace();
        let command = words.next().unwrap_or_default();
        match command {
            "back" => Ok(Self::Back),
            "logout" => Ok(Self::Logout),
            "tick" => Ok(Self::Tick),
            "login" => {
                let cpf = words
                    .next()
                    .ok_or(EventParseError::Usage("login <cpf> [senha]"))?;
                Ok(Self::Login {
                    cpf: cpf.to_owned(),
                    password: Zeroizing::new(words.next().unwrap_or_default().to_owned()),
                })
            }
            "password" => {
                let usage = EventParseError::Usage("password <senha> <confirmacao>");
                let password = words.next().ok_or_else(|| usage.clone())?;
                let confirmation = words.next().ok_or(usage)?;
                Ok(Self::SetPassword {
                    password: Zeroizing::new(password.to_owned()),
                    confirmation: Zeroizing::new(confirmation.to_owned()),
                })
            }
            other => Err(EventParseError::UnknownCommand(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/rota-inexistente", NavigationEvent::Navigate("/rota-inexistente".to_owned()))]
    #[case("back", NavigationEvent::Back)]
    #[case("  logout\n", NavigationEvent::Logout)]
    #[case("tick", NavigationEvent::Tick)]
    fn simple_events_parse(#[case] line: &str, #[case] expected: NavigationEvent) {
        assert_eq!(NavigationEvent::parse(line), Ok(expected));
    }

    #[rstest]
    fn login_keeps_cpf_as_typed() {
        let event = NavigationEvent::parse("login 123.456.789-09 s3nh4").expect("parses");
        let NavigationEvent::Login { cpf, password } = event else {
            panic!("expected login");
        };
        assert_eq!(cpf, "123.456.789-09");
        assert_eq!(password.as_str(), "s3nh4");
    }

    #[rstest]
    #[case("", EventParseError::Empty)]
    #[case("login", EventParseError::Usage("login <cpf> [senha]"))]
    #[case("password abcd", EventParseError::Usage("password <senha> <confirmacao>"))]
    #[case("voltar", EventParseError::UnknownCommand("voltar".to_owned()))]
    fn bad_lines_are_rejected(#[case] line: &str, #[case] expected: EventParseError) {
        assert_eq!(NavigationEvent::parse(line), Err(expected));
    }

    #[rstest]
    fn debug_output_hides_passwords() {
        let event = NavigationEvent::parse("password segredo segredo").expect("parses");
        assert!(!format!("{event:?}").contains("segredo"));
    }
}
