//! Mirrors provider auth callbacks into locally observable session state.

use crate::domain::member::User;
use crate::error::Result;
use crate::remote::{AuthBackend, AuthEvent};
use tokio::sync::{broadcast, watch};
use tracing::warn;

/// Locally mirrored authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Tracks the signed-in user by replaying provider auth events.
///
/// The provider remains the authority; this type only mirrors what it
/// reports, first by asking for the current session at construction and then
/// by applying each event it delivers.
pub struct SessionTracker {
    state: watch::Sender<AuthState>,
}

impl SessionTracker {
    /// Seeds the tracker from the provider's current session.
    pub async fn init(auth: &dyn AuthBackend) -> Result<Self> {
        let user = auth.current_user().await?;
        let (state, _) = watch::channel(AuthState { user });
        Ok(Self { state })
    }

    /// The current snapshot.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Watches for state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Applies one provider event.
    pub fn apply(&self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => {
                self.state.send_replace(AuthState {
                    user: Some(session.user),
                });
            }
            AuthEvent::SignedOut => {
                self.state.send_replace(AuthState::default());
            }
        }
    }

    /// Forwards provider events into the tracked state until the provider
    /// drops its end of the channel.
    pub async fn drive(&self, mut events: broadcast::Receiver<AuthEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => self.apply(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "auth event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
