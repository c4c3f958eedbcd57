//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role (the sole authorization axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Supplier,
    Admin,
}

impl Role {
    /// Get the wire-format string for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Supplier => "supplier",
            Self::Admin => "admin",
        }
    }

    /// Admins pass every capability check
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRole(pub String);

impl fmt::Display for InvalidRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for InvalidRole {}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "supplier" => Ok(Self::Supplier),
            "admin" => Ok(Self::Admin),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
