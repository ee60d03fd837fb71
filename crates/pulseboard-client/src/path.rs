//! Logical resource paths.

use pulseboard_core::{DashboardError, MetricId, UserId};
use std::fmt;
use std::str::FromStr;

/// A parsed resource path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourcePath {
    /// `/users`
    Users,
    /// `/users/{id}`
    User(UserId),
    /// `/metrics`
    Metrics,
    /// `/metrics/{id}`
    Metric(MetricId),
}

impl ResourcePath {
    /// The collection this path belongs to (`"users"` or `"metrics"`).
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Users | Self::User(_) => "users",
            Self::Metrics | Self::Metric(_) => "metrics",
        }
    }

    /// Returns true for item paths.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Self::User(_) | Self::Metric(_))
    }

    /// Path of the collection containing this resource.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/{}", self.collection())
    }
}

impl FromStr for ResourcePath {
    type Err = DashboardError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let without_query = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = without_query.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["users"] => Ok(Self::Users),
            ["users", id] => Ok(Self::User(UserId::new(*id))),
            ["metrics"] => Ok(Self::Metrics),
            ["metrics", id] => Ok(Self::Metric(MetricId::new(*id))),
            _ => Err(DashboardError::Api(format!("Unknown resource: {}", path))),
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "/users"),
            Self::User(id) => write!(f, "/users/{}", id),
            Self::Metrics => write!(f, "/metrics"),
            Self::Metric(id) => write!(f, "/metrics/{}", id),
        }
    }
}
