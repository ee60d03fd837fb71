//! The dashboard store and its intents.

use crate::{reduce, Action, DashboardState, KeyedLocks};
use futures::FutureExt;
use pulseboard_client::{DataClient, DataClientExt};
use pulseboard_core::{
    ApiResponse, DashboardError, DashboardResult, DeleteAck, Metric, NewUser, User, UserId,
    UserPatch, GENERIC_FAILURE_MESSAGE,
};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

const USERS_PATH: &str = "/users";
const METRICS_PATH: &str = "/metrics";

/// Reducer-driven state container over a [`DataClient`].
///
/// Every intent follows the same protocol: mark an operation in flight and
/// clear the error, call the client, apply the collection transition on
/// success or record the failure message otherwise, then mark the
/// operation finished. Mutating intents also return the failure to their
/// caller; load intents only record it.
///
/// Updates and deletes that name the same user run one after another in
/// call order. Everything else interleaves freely.
pub struct DashboardStore {
    client: Arc<dyn DataClient>,
    state: watch::Sender<DashboardState>,
    in_flight: AtomicUsize,
    user_locks: KeyedLocks<UserId>,
}

impl DashboardStore {
    /// Creates a store with the initial state.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            client,
            state,
            in_flight: AtomicUsize::new(0),
            user_locks: KeyedLocks::new(),
        }
    }

    /// Returns the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver always holds the latest snapshot; a slow observer may
    /// skip intermediate ones.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Feeds one action through the reducer and publishes the result.
    pub fn dispatch(&self, action: Action) {
        debug!("Dispatch {}", action.kind());
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    /// Fetches all users and replaces the collection.
    pub async fn load_users(&self) {
        let _op = self.begin_operation();

        match self.call(self.client.fetch_as::<Vec<User>>(USERS_PATH)).await {
            Ok(users) => {
                info!("Loaded {} users", users.len());
                self.dispatch(Action::SetUsers(users));
            }
            Err(e) => {
                self.record_failure("load_users", e);
            }
        }
    }

    /// Fetches all metrics and replaces the collection.
    pub async fn load_metrics(&self) {
        let _op = self.begin_operation();

        match self.call(self.client.fetch_as::<Vec<Metric>>(METRICS_PATH)).await {
            Ok(metrics) => {
                info!("Loaded {} metrics", metrics.len());
                self.dispatch(Action::SetMetrics(metrics));
            }
            Err(e) => {
                self.record_failure("load_metrics", e);
            }
        }
    }

    /// Selects a user, or clears the selection with `None`.
    pub fn select_user(&self, user: Option<&User>) {
        self.dispatch(Action::SelectUser(user.map(|u| u.id.clone())));
    }

    /// Creates a user through the client and appends it.
    ///
    /// Fails with [`DashboardError::Conflict`] if the client hands back an
    /// id that is already in the collection. The id is only known once the
    /// client has answered, so on a conflict the client keeps the record it
    /// created while the collection here stays unchanged.
    pub async fn add_user(&self, new_user: NewUser) -> DashboardResult<User> {
        let _op = self.begin_operation();

        let result = self
            .call(self.client.create_as::<NewUser, User>(USERS_PATH, &new_user))
            .await
            .and_then(|user| {
                if self.state.borrow().user(&user.id).is_some() {
                    Err(DashboardError::conflict(format!("User with id {} already exists", user.id)))
                } else {
                    Ok(user)
                }
            });

        match result {
            Ok(user) => {
                info!("Added user {}", user.id);
                self.dispatch(Action::AddUser(user.clone()));
                Ok(user)
            }
            Err(e) => Err(self.record_failure("add_user", e)),
        }
    }

    /// Applies a partial update to a user and stores the merged result.
    pub async fn update_user(&self, id: &UserId, patch: UserPatch) -> DashboardResult<User> {
        let _op = self.begin_operation();
        let _lock = self.user_locks.lock(id).await;

        let path = format!("{}/{}", USERS_PATH, id);
        match self.call(self.client.update_as::<UserPatch, User>(&path, &patch)).await {
            Ok(user) => {
                info!("Updated user {}", user.id);
                self.dispatch(Action::UpdateUser(user.clone()));
                Ok(user)
            }
            Err(e) => Err(self.record_failure("update_user", e)),
        }
    }

    /// Deletes a user and removes it from the collection.
    pub async fn delete_user(&self, id: &UserId) -> DashboardResult<()> {
        let _op = self.begin_operation();
        let _lock = self.user_locks.lock(id).await;

        let path = format!("{}/{}", USERS_PATH, id);
        match self.call(self.client.delete_as::<DeleteAck>(&path)).await {
            Ok(_) => {
                info!("Deleted user {}", id);
                self.dispatch(Action::DeleteUser(id.clone()));
                Ok(())
            }
            Err(e) => Err(self.record_failure("delete_user", e)),
        }
    }

    /// Awaits a client call, turning a failure envelope or a panic into an
    /// error carrying the message to record.
    async fn call<T, F>(&self, request: F) -> DashboardResult<T>
    where
        F: Future<Output = ApiResponse<T>>,
    {
        match AssertUnwindSafe(request).catch_unwind().await {
            Ok(response) => response.into_result(),
            Err(_) => {
                error!("{} data client panicked", self.client.name());
                Err(DashboardError::Api(GENERIC_FAILURE_MESSAGE.to_string()))
            }
        }
    }

    /// Records the failure in the error slot and hands it back.
    fn record_failure(&self, intent: &str, error: DashboardError) -> DashboardError {
        let message = error.to_string();
        warn!("{} failed: {}", intent, message);
        self.dispatch(Action::SetError(Some(message)));
        error
    }

    fn begin_operation(&self) -> InFlight<'_> {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            let cleared = reduce(state, Action::SetError(None));
            *state = reduce(&cleared, Action::SetLoading(true));
        });
        InFlight { store: self }
    }

    fn end_operation(&self) {
        self.state.send_if_modified(|state| {
            if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                *state = reduce(state, Action::SetLoading(false));
                true
            } else {
                false
            }
        });
    }
}

/// Marks one outstanding operation; the loading flag drops with the last.
struct InFlight<'a> {
    store: &'a DashboardStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.end_operation();
    }
}
