use tracing::{debug, warn};

use crate::domain::alive_state::AliveState;
use crate::services::remote_service::{RemoteError, RemoteIssueService};

/// Liveness of a single connector operation.
///
/// Each operation gets its own context, so no state is shared between calls.
/// Every state change is kept so the host can inspect how the call went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    state: AliveState,
    transitions: Vec<AliveState>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: AliveState::Disconnected,
            transitions: vec![AliveState::Disconnected],
        }
    }

    pub fn state(&self) -> AliveState {
        self.state
    }

    pub fn transitions(&self) -> &[AliveState] {
        &self.transitions
    }

    pub(crate) fn set_state(&mut self, state: AliveState) {
        debug!(from = %self.state, to = %state, "liveness state changed");
        self.state = state;
        self.transitions.push(state);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// An authenticated session against the remote tracker.
///
/// A session only exists after a successful login, so its token is always
/// valid for the operation that opened it.
pub struct Session<'a, S: RemoteIssueService> {
    service: &'a S,
    token: String,
}

impl<'a, S: RemoteIssueService> Session<'a, S> {
    pub fn connect(service: &'a S, user: &str, password: &str) -> Result<Self, RemoteError> {
        let token = service.login(user, password)?;
        debug!(user, "connected to remote tracker");
        Ok(Self { service, token })
    }

    pub fn authentication_token(&self) -> &str {
        &self.token
    }

    pub fn remote_service(&self) -> &'a S {
        self.service
    }

    pub fn disconnect(self) {
        if let Err(err) = self.service.logout(&self.token) {
            warn!(error = %err, "failed to close remote session");
        }
    }
}
