//! The pure state reducer.

use crate::{Action, DashboardState};
use pulseboard_core::User;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Computes the next state from the current one and an action.
///
/// Never suspends and never fails. Actions that would break an invariant
/// (a duplicate id, a selection naming an absent user) leave the affected
/// part of the state as it was. A replacement collection keeps only the
/// first user carrying each id.
#[must_use]
pub fn reduce(state: &DashboardState, action: Action) -> DashboardState {
    let mut next = state.clone();

    match action {
        Action::SetLoading(is_loading) => next.is_loading = is_loading,
        Action::SetError(error) => next.error = error,
        Action::SetUsers(users) => {
            next.users = Arc::new(dedup_by_id(users));
            if next.selected_user().is_none() {
                next.selected_user_id = None;
            }
        }
        Action::SetMetrics(metrics) => next.metrics = Arc::new(metrics),
        Action::SelectUser(id) => {
            next.selected_user_id = id.filter(|id| state.user(id).is_some());
        }
        Action::AddUser(user) => {
            if state.user(&user.id).is_none() {
                Arc::make_mut(&mut next.users).push(user);
            }
        }
        Action::UpdateUser(user) => {
            if let Some(index) = state.users.iter().position(|u| u.id == user.id) {
                Arc::make_mut(&mut next.users)[index] = user;
            }
        }
        Action::DeleteUser(id) => {
            if let Some(index) = state.users.iter().position(|u| u.id == id) {
                Arc::make_mut(&mut next.users).remove(index);
                if next.selected_user_id.as_ref() == Some(&id) {
                    next.selected_user_id = None;
                }
            }
        }
    }

    next
}

fn dedup_by_id(users: Vec<User>) -> Vec<User> {
    let total = users.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<User> = users.into_iter().filter(|u| seen.insert(u.id.clone())).collect();

    if unique.len() < total {
        warn!("Dropped {} users with duplicate ids", total - unique.len());
    }
    unique
}
