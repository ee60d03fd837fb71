//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a dashboard user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator with full access.
    Admin,
    /// Regular user.
    #[default]
    User,
    /// Moderator with elevated permissions.
    Moderator,
}

impl UserRole {
    /// Returns all available roles.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Admin, Self::User, Self::Moderator]
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" | "mod" => Ok(Self::Moderator),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
