use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Identidad (principal) del usuario autenticado, tal como la entrega el
/// proveedor de identidad. Es opaca para esta capa.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
  pub fn new(principal: impl Into<String>) -> Self {
    Identity(principal.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Identity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Perfil del usuario que llama. No se lista globalmente.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: String,
}

/// Rol del usuario que llama frente al backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Admin,
  User,
  /// Sin sesión o sin rol asignado.
  Guest,
}

impl FromStr for UserRole {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "admin" => Ok(UserRole::Admin),
      "user" => Ok(UserRole::User),
      "guest" => Ok(UserRole::Guest),
      other => Err(format!("unknown role: {other}")),
    }
  }
}

impl fmt::Display for UserRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UserRole::Admin => write!(f, "admin"),
      UserRole::User => write!(f, "user"),
      UserRole::Guest => write!(f, "guest"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_parsing_is_case_insensitive() {
    assert_eq!(" Admin ".parse::<UserRole>(), Ok(UserRole::Admin));
    assert_eq!("USER".parse::<UserRole>(), Ok(UserRole::User));
    assert!("owner".parse::<UserRole>().is_err());
  }

  #[test]
  fn role_display_matches_wire_name() {
    for role in [UserRole::Admin, UserRole::User, UserRole::Guest] {
      assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
    }
  }
}
