//! Application state snapshot and selectors.

use pulseboard_core::{Metric, MetricId, User, UserId, UserRole};
use std::sync::Arc;

/// Immutable snapshot of the dashboard state.
///
/// Collections are reference counted: a transition that leaves a collection
/// untouched shares it with the previous snapshot, and a transition that
/// edits one copies it first. The selected user is held by id only and
/// resolved against `users` on every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub(crate) users: Arc<Vec<User>>,
    pub(crate) metrics: Arc<Vec<Metric>>,
    pub(crate) selected_user_id: Option<UserId>,
    pub(crate) is_loading: bool,
    pub(crate) error: Option<String>,
}

impl DashboardState {
    /// Users in display order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Metrics in display order.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    #[must_use]
    pub const fn selected_user_id(&self) -> Option<&UserId> {
        self.selected_user_id.as_ref()
    }

    /// The selected user, resolved from the collection.
    #[must_use]
    pub fn selected_user(&self) -> Option<&User> {
        self.selected_user_id.as_ref().and_then(|id| self.user(id))
    }

    /// True while at least one intent is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed intent, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    #[must_use]
    pub fn metric(&self, id: &MetricId) -> Option<&Metric> {
        self.metrics.iter().find(|m| &m.id == id)
    }

    /// Users whose account is active.
    pub fn active_users(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_active)
    }

    /// Users holding `role`.
    pub fn users_with_role(&self, role: UserRole) -> impl Iterator<Item = &User> {
        self.users.iter().filter(move |u| u.role == role)
    }

    /// Returns true if both snapshots share the same user collection.
    #[must_use]
    pub fn shares_users_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.users, &other.users)
    }

    /// Returns true if both snapshots share the same metric collection.
    #[must_use]
    pub fn shares_metrics_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.metrics, &other.metrics)
    }
}
