//! Role codes granted by the backend.

use std::fmt;

/// Role governing which navigation entries a subject can reach.
///
/// The backend encodes roles as single letters: `A` (analyst), `G`
/// (manager), `C` (citizen). Older accounts still carry `F`, which is treated
/// as a citizen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoleCode {
    /// Health analyst reviewing requests.
    Analyst,
    /// Manager with catalog, user and dashboard access.
    Manager,
    /// Citizen filing and tracking requests.
    Citizen,
    /// No role; the logged-out state.
    #[default]
    Unset,
}

impl RoleCode {
    /// Parse a wire code. Blank or unrecognised codes yield [`RoleCode::Unset`].
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::RoleCode;
    ///
    /// assert_eq!(RoleCode::from_code("G"), RoleCode::Manager);
    /// assert_eq!(RoleCode::from_code("F"), RoleCode::Citizen);
    /// assert_eq!(RoleCode::from_code("Z"), RoleCode::Unset);
    /// ```
    pub fn from_code(code: &str) -> Self {
        Self::parse(code).unwrap_or_default()
    }

    /// Strict parse that distinguishes an unknown code from a blank one.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "" => Some(Self::Unset),
            "A" => Some(Self::Analyst),
            "G" => Some(Self::Manager),
            "C" | "F" => Some(Self::Citizen),
            _ => None,
        }
    }

    /// Wire code persisted and sent to the backend.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Analyst => "A",
            Self::Manager => "G",
            Self::Citizen => "C",
            Self::Unset => "",
        }
    }

    /// Human-readable role name shown in the shell header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Analyst => "Analista de Saúde",
            Self::Manager => "Gestor",
            Self::Citizen => "Cidadão",
            Self::Unset => "Usuário",
        }
    }

    /// Whether this is the logged-out role.
    pub const fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
