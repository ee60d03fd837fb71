//! A scripted dashboard session.

use pulseboard_core::{DashboardResult, NewUser, UserPatch, UserRole};
use pulseboard_store::{DashboardState, DashboardStore};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Logs every snapshot the store publishes until aborted.
pub fn spawn_snapshot_logger(store: &Arc<DashboardStore>) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            debug!(
                users = state.users().len(),
                metrics = state.metrics().len(),
                selected = ?state.selected_user_id(),
                loading = state.is_loading(),
                error = ?state.error(),
                "Snapshot"
            );
        }
    })
}

/// Loads the dashboard and runs one user through its whole lifecycle.
pub async fn run_session(store: &DashboardStore) -> DashboardResult<()> {
    tokio::join!(store.load_users(), store.load_metrics());
    log_summary(&store.snapshot());

    if let Some(message) = store.snapshot().error() {
        warn!("Initial load reported: {}", message);
    }

    let user = store
        .add_user(NewUser::new("Jane Doe", "jane.doe@example.com", UserRole::User, true))
        .await?;
    info!("Created {} ({})", user.name, user.id);

    store.select_user(Some(&user));

    let updated = store
        .update_user(&user.id, UserPatch::new().role(UserRole::Moderator).is_active(false))
        .await?;
    if let Some(selected) = store.snapshot().selected_user() {
        info!(
            "Selected {} is now {} and {}",
            selected.name,
            updated.role,
            if selected.is_active { "active" } else { "inactive" }
        );
    }

    store.delete_user(&user.id).await?;
    info!("Selection after delete: {:?}", store.snapshot().selected_user_id());

    // deleting twice must fail and leave the collection alone
    if let Err(e) = store.delete_user(&user.id).await {
        info!("Second delete rejected: {}", e);
    }

    Ok(())
}

/// Logs a one-line overview of a snapshot.
pub fn log_summary(state: &DashboardState) {
    info!(
        "{} users ({} active, {} admins), {} metrics",
        state.users().len(),
        state.active_users().count(),
        state.users_with_role(UserRole::Admin).count(),
        state.metrics().len()
    );
    for metric in state.metrics() {
        info!("  {}: {} {} ({:+.1}%, {})", metric.name, metric.value, metric.unit, metric.change, metric.trend);
    }
}
