//! Auth event channel and persistence mirror.
//!
//! The auth slice publishes a typed event after each auth-changing
//! reduction; the mirror subscriber copies the event's post-update
//! snapshot into the persistence facade. The mirror runs as its own
//! task, is never awaited by the publishing path, and its failures are
//! isolated from it.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::AuthSnapshot;
use crate::services::AuthPersistence;

/// Auth transitions that get mirrored into persistence.
///
/// Each carries the auth snapshot as it stood after the reduction, so the
/// mirror needs no access to slice state. The synchronous in-memory
/// `logout` action is deliberately absent from this list.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginSucceeded(AuthSnapshot),
    DemoLoginSucceeded(AuthSnapshot),
    LogoutSucceeded(AuthSnapshot),
    CurrentUserSet(AuthSnapshot),
}

impl AuthEvent {
    /// The post-update snapshot this event carries.
    #[must_use]
    pub const fn snapshot(&self) -> &AuthSnapshot {
        match self {
            Self::LoginSucceeded(s)
            | Self::DemoLoginSucceeded(s)
            | Self::LogoutSucceeded(s)
            | Self::CurrentUserSet(s) => s,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::LoginSucceeded(_) => "login",
            Self::DemoLoginSucceeded(_) => "demo-login",
            Self::LogoutSucceeded(_) => "logout",
            Self::CurrentUserSet(_) => "set-current-user",
        }
    }
}

/// Consume auth events and mirror each snapshot into persistence.
///
/// Runs until every sender is dropped. A lagged receiver skips the missed
/// events with a warning; the next event carries the latest snapshot
/// anyway.
pub async fn run_auth_mirror(
    persistence: AuthPersistence,
    mut events: broadcast::Receiver<AuthEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                debug!(kind = event.kind(), "mirroring auth state");
                persistence.save(event.snapshot().clone()).await;
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "auth mirror lagged, skipping missed events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Spawn the mirror as a fire-and-forget task.
pub fn spawn_auth_mirror(
    persistence: AuthPersistence,
    events: broadcast::Receiver<AuthEvent>,
) -> JoinHandle<()> {
    tokio::spawn(run_auth_mirror(persistence, events))
}
