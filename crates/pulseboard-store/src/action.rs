//! State transitions.

use pulseboard_core::{Metric, User, UserId};

/// Every state change the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetError(Option<String>),
    /// Replaces the user collection wholesale.
    SetUsers(Vec<User>),
    /// Replaces the metric collection wholesale.
    SetMetrics(Vec<Metric>),
    /// Selects a user by id, or clears the selection.
    SelectUser(Option<UserId>),
    /// Appends a user. Ignored if the id is already present.
    AddUser(User),
    /// Replaces the user with the same id. Ignored if absent.
    UpdateUser(User),
    /// Removes a user by id. Ignored if absent.
    DeleteUser(UserId),
}

impl Action {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::SetUsers(_) => "set_users",
            Self::SetMetrics(_) => "set_metrics",
            Self::SelectUser(_) => "select_user",
            Self::AddUser(_) => "add_user",
            Self::UpdateUser(_) => "update_user",
            Self::DeleteUser(_) => "delete_user",
        }
    }
}
