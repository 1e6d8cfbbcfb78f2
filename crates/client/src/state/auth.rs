//! Auth slice.
//!
//! Beyond the usual fetch machinery this slice owns session lifecycle:
//! restoring a persisted session on startup, logging in by email (with
//! auto-provisioning), demo logins, and the split between the synchronous
//! `logout` (memory only) and the async `logout_user` (clears persisted
//! state too). Auth-changing transitions publish [`AuthEvent`]s carrying
//! the post-update snapshot for the persistence mirror.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use lunchbox_core::{Email, UserId};

use crate::db::ObjectStore;
use crate::error::AppError;
use crate::models::{AuthSnapshot, User};
use crate::services::AuthPersistence;
use crate::state::events::AuthEvent;

/// Capacity of the auth event channel; events are tiny and the mirror
/// consumes them promptly, lag only drops mirror writes.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// In-memory auth state.
#[derive(Debug, Default)]
pub struct AuthState {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_authenticated: bool,
    /// Set once session restoration has settled, success or not; the app
    /// never blocks on initialization indefinitely.
    pub is_initialized: bool,
}

/// The auth slice.
pub struct AuthSlice {
    state: AuthState,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for AuthSlice {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: AuthState::default(),
            events,
        }
    }
}

impl AuthSlice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for views.
    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Subscribe to auth transitions (used by the persistence mirror).
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// Restore a persisted session, if one exists.
    ///
    /// Marks the slice initialized whatever the outcome, and restores the
    /// session only when the loaded snapshot is fully authenticated (a
    /// user and the flag both present).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cancelled` if the token fired; loading itself
    /// never fails (the facade reduces failures to "no session").
    pub async fn initialize(
        &mut self,
        persistence: &AuthPersistence,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.state.loading = true;

        let snapshot = persistence.load().await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        self.state.is_initialized = true;
        if snapshot.is_active() {
            self.state.is_authenticated = snapshot.is_authenticated;
            self.state.current_user = snapshot.current_user;
        }
        Ok(())
    }

    /// Replace the in-memory user list with the store's contents.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` on a failed read (also surfaced via
    /// `state().error`), `AppError::Cancelled` if the token fired.
    pub async fn fetch_users(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.state.loading = true;
        self.state.error = None;

        let result = store.users().list().await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(users) => {
                self.state.users = users;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Log in by email, auto-provisioning an unseen address.
    ///
    /// Users are matched by a linear scan over the collection. A miss
    /// creates a record with a generated id, a derived display name
    /// ("Admin User" or the email's local part) and the given admin flag,
    /// and persists it before the session starts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` on read/write failure (also surfaced via
    /// `state().error`), `AppError::Cancelled` if the token fired.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn login_with_credentials(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        email: &Email,
        is_admin: bool,
    ) -> Result<User, AppError> {
        self.state.loading = true;
        self.state.error = None;

        let result = find_or_provision(store, email, is_admin).await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(user) => {
                self.state.current_user = Some(user.clone());
                self.state.is_authenticated = true;
                self.publish(AuthEvent::LoginSucceeded(self.snapshot()));
                Ok(user)
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Demo login: pick a pre-seeded user by id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no user has this id,
    /// `AppError::Store` on read failure, `AppError::Cancelled` if the
    /// token fired.
    pub async fn simulate_login(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        user_id: &UserId,
    ) -> Result<User, AppError> {
        let result = store.users().list().await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        let user = result?
            .into_iter()
            .find(|u| u.id == *user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))?;

        self.state.current_user = Some(user.clone());
        self.state.is_authenticated = true;
        self.publish(AuthEvent::DemoLoginSucceeded(self.snapshot()));
        Ok(user)
    }

    /// Synchronous logout: clears the in-memory session only.
    ///
    /// Deliberately publishes no event; persisted state is untouched.
    /// Use [`logout_user`](Self::logout_user) to end the session durably.
    pub fn logout(&mut self) {
        self.state.current_user = None;
        self.state.is_authenticated = false;
    }

    /// Async logout: clears persisted session state, then the in-memory
    /// session, ending in the same state as [`logout`](Self::logout).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cancelled` if the token fired; clearing itself
    /// is best-effort and never fails.
    pub async fn logout_user(
        &mut self,
        persistence: &AuthPersistence,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        persistence.clear().await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        self.logout();
        self.publish(AuthEvent::LogoutSucceeded(self.snapshot()));
        Ok(())
    }

    /// Set the current user directly (e.g. after registration flows).
    pub fn set_current_user(&mut self, user: User) {
        self.state.current_user = Some(user);
        self.state.is_authenticated = true;
        self.publish(AuthEvent::CurrentUserSet(self.snapshot()));
    }

    /// Clear the surfaced error string.
    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            current_user: self.state.current_user.clone(),
            is_authenticated: self.state.is_authenticated,
        }
    }

    fn publish(&self, event: AuthEvent) {
        // No subscriber just means nothing mirrors; that is fine.
        let _ = self.events.send(event);
    }
}

/// Linear scan for the email, provisioning and persisting a new user on miss.
async fn find_or_provision(
    store: &ObjectStore,
    email: &Email,
    is_admin: bool,
) -> Result<User, crate::db::StoreError> {
    let users = store.users().list().await?;
    if let Some(user) = users.into_iter().find(|u| u.email == *email) {
        return Ok(user);
    }

    let name = if is_admin {
        "Admin User".to_owned()
    } else {
        email.local_part().to_owned()
    };
    let user = User {
        id: UserId::generate(),
        name,
        email: email.clone(),
        is_admin,
    };
    store.users().put(&user).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_provisions_unseen_email() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = AuthSlice::new();

        let email = Email::parse("jane.smith@company.com").expect("valid email");
        let user = slice
            .login_with_credentials(&store, &cancel, &email, false)
            .await
            .expect("login");

        assert_eq!(user.name, "jane.smith");
        assert!(!user.is_admin);
        assert!(slice.state().is_authenticated);

        // The provisioned record is durable.
        let users = store.users().list().await.expect("list");
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_login_reuses_existing_user() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = AuthSlice::new();

        let email = Email::parse("admin@gmail.com").expect("valid email");
        let first = slice
            .login_with_credentials(&store, &cancel, &email, true)
            .await
            .expect("first login");
        assert_eq!(first.name, "Admin User");

        slice.logout();
        let second = slice
            .login_with_credentials(&store, &cancel, &email, true)
            .await
            .expect("second login");

        assert_eq!(first.id, second.id);
        let users = store.users().list().await.expect("list");
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_simulate_login_miss_is_not_found() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = AuthSlice::new();

        let result = slice
            .simulate_login(&store, &cancel, &UserId::new("ghost"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(!slice.state().is_authenticated);
    }

    #[tokio::test]
    async fn test_initialize_ignores_inactive_snapshot() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let persistence = AuthPersistence::new(store);
        let cancel = CancellationToken::new();
        let mut slice = AuthSlice::new();

        // Nothing persisted: initialized, not authenticated.
        slice
            .initialize(&persistence, &cancel)
            .await
            .expect("initialize");

        assert!(slice.state().is_initialized);
        assert!(!slice.state().is_authenticated);
        assert!(slice.state().current_user.is_none());
    }
}
