//! Issue-domain operations on top of a remote tracker.
//!
//! Every operation opens its own session, performs its remote calls and closes
//! the session again. Liveness is tracked on the [`SessionContext`] passed in
//! by the caller, which always ends up `Disconnected`.

use thiserror::Error;
use tracing::{error, info};

use crate::domain::alive_state::AliveState;
use crate::domain::issue::{ChangeSet, Issue, IssueField};
use crate::services::field_converters::{CLOSED_STATUS_CODE, ConversionError, FIX_VERSIONS_FIELD};
use crate::services::issue_translator::{TranslationError, build_field_changes, build_remote_issue};
use crate::services::release_report::format_release_report;
use crate::services::remote_service::{RemoteError, RemoteIssueService};
use crate::services::remote_types::{RemoteComment, RemoteComponent, RemoteFieldValue};
use crate::services::session::{Session, SessionContext};

/// Upper bound on the issues a single search may return.
pub const MAX_SEARCH_RESULTS: usize = 1000;

#[derive(Error, Debug)]
pub enum ConnectorError {
    #[error("{operation} failed: remote call failed: {source}")]
    Execution {
        operation: &'static str,
        #[source]
        source: RemoteError,
    },
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
    #[error("{0} is not implemented by the Jira connector")]
    NotImplemented(&'static str),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl From<TranslationError> for ConnectorError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::UnknownComponent(name) => ConnectorError::NotFound {
                kind: "component",
                name,
            },
        }
    }
}

fn remote_failure(operation: &'static str, source: RemoteError) -> ConnectorError {
    error!(operation, error = %source, "Jira remote call failed");
    ConnectorError::Execution { operation, source }
}

/// Puts the context back to `Disconnected` however the operation ends.
struct DisconnectGuard<'c> {
    context: &'c mut SessionContext,
}

impl Drop for DisconnectGuard<'_> {
    fn drop(&mut self) {
        self.context.set_state(AliveState::Disconnected);
    }
}

pub struct JiraConnector<S: RemoteIssueService> {
    service: S,
    user: String,
    password: String,
    project_key: String,
}

impl<S: RemoteIssueService> JiraConnector<S> {
    pub fn new(
        service: S,
        user: impl Into<String>,
        password: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            service,
            user: user.into(),
            password: password.into(),
            project_key: project_key.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn remote_service(&self) -> &S {
        &self.service
    }

    /// Creates the issue and returns the key the tracker assigned to it.
    pub fn create_issue(
        &self,
        context: &mut SessionContext,
        issue: &Issue,
    ) -> Result<String, ConnectorError> {
        const OPERATION: &str = "create issue";
        self.with_session(context, OPERATION, |session| {
            let known_components = if issue.components.is_empty() {
                Vec::new()
            } else {
                self.project_components(session, OPERATION)?
            };
            let remote_issue = build_remote_issue(issue, &self.project_key, &known_components)?;

            let created = session
                .remote_service()
                .create_issue(session.authentication_token(), &remote_issue)
                .map_err(|source| {
                    error!(
                        summary = issue.summary.as_deref().unwrap_or_default(),
                        "could not create issue"
                    );
                    remote_failure(OPERATION, source)
                })?;
            let key = created
                .key
                .ok_or_else(|| remote_failure(OPERATION, RemoteError::Parse))?;
            info!(key = %key, "successfully created issue");
            Ok(key)
        })
    }

    pub fn add_comment(
        &self,
        context: &mut SessionContext,
        issue_key: &str,
        comment: &str,
    ) -> Result<(), ConnectorError> {
        const OPERATION: &str = "add comment";
        self.with_session(context, OPERATION, |session| {
            let comment = RemoteComment {
                body: comment.to_string(),
            };
            session
                .remote_service()
                .add_comment(session.authentication_token(), issue_key, &comment)
                .map_err(|source| remote_failure(OPERATION, source))
        })
    }

    /// Applies `changes` to the issue. The comment is accepted for the domain
    /// contract but not sent: the remote update has no comment field.
    pub fn update_issue(
        &self,
        context: &mut SessionContext,
        issue_key: &str,
        _comment: Option<&str>,
        changes: &ChangeSet,
    ) -> Result<(), ConnectorError> {
        const OPERATION: &str = "update issue";
        self.with_session(context, OPERATION, |session| {
            let touches_components = changes
                .get(&IssueField::Components)
                .is_some_and(|value| value.is_some());
            let known_components = if touches_components {
                self.project_components(session, OPERATION)?
            } else {
                Vec::new()
            };
            let remote_fields = build_field_changes(changes, &known_components)?;

            session
                .remote_service()
                .update_issue(session.authentication_token(), issue_key, &remote_fields)
                .map_err(|source| remote_failure(OPERATION, source))
        })
    }

    /// Moves every issue fixed in `release_from_id` to the version with id
    /// `release_to_id`.
    pub fn move_issues_from_release_to_release(
        &self,
        context: &mut SessionContext,
        release_from_id: &str,
        release_to_id: &str,
    ) -> Result<(), ConnectorError> {
        const OPERATION: &str = "move issues between releases";
        self.with_session(context, OPERATION, |session| {
            let service = session.remote_service();
            let token = session.authentication_token();

            let target = service
                .get_versions(token, &self.project_key)
                .map_err(|source| remote_failure(OPERATION, source))?
                .into_iter()
                .find(|version| version.id == release_to_id)
                .ok_or_else(|| {
                    error!(release_to_id, "target release not found");
                    ConnectorError::NotFound {
                        kind: "release",
                        name: release_to_id.to_string(),
                    }
                })?;

            let issues = service
                .search_issues(token, &release_issues_jql(release_from_id), MAX_SEARCH_RESULTS)
                .map_err(|source| remote_failure(OPERATION, source))?;

            let changes = [RemoteFieldValue {
                id: FIX_VERSIONS_FIELD.to_string(),
                values: vec![target.id.clone()],
            }];
            for key in issues.iter().filter_map(|issue| issue.key.as_deref()) {
                service
                    .update_issue(token, key, &changes)
                    .map_err(|source| remote_failure(OPERATION, source))?;
            }
            info!(
                moved = issues.len(),
                from = release_from_id,
                to = release_to_id,
                "moved issues between releases"
            );
            Ok(())
        })
    }

    /// Releases the project version named `release_name`.
    ///
    /// An unknown name is logged and returned as `NotFound` rather than
    /// ignored, matching how unknown components and move targets are
    /// reported. No release call is made in that case.
    pub fn close_release(
        &self,
        context: &mut SessionContext,
        release_name: &str,
    ) -> Result<(), ConnectorError> {
        const OPERATION: &str = "close release";
        self.with_session(context, OPERATION, |session| {
            let service = session.remote_service();
            let token = session.authentication_token();

            let versions = service
                .get_versions(token, &self.project_key)
                .map_err(|source| remote_failure(OPERATION, source))?;
            let Some(version) = versions
                .iter()
                .find(|version| version.name.as_deref() == Some(release_name))
            else {
                error!(release_name, "release not found");
                return Err(ConnectorError::NotFound {
                    kind: "release",
                    name: release_name.to_string(),
                });
            };

            service
                .release_version(token, &self.project_key, version)
                .map_err(|source| remote_failure(OPERATION, source))
        })
    }

    /// Lists the closed issues of a release, grouped by issue type.
    pub fn generate_release_report(
        &self,
        context: &mut SessionContext,
        release_id: &str,
    ) -> Result<Vec<String>, ConnectorError> {
        const OPERATION: &str = "generate release report";
        let report = self.with_session(context, OPERATION, |session| {
            let jql = format!(
                "{}and status in ({CLOSED_STATUS_CODE})",
                release_issues_jql(release_id)
            );
            let issues = session
                .remote_service()
                .search_issues(session.authentication_token(), &jql, MAX_SEARCH_RESULTS)
                .map_err(|source| remote_failure(OPERATION, source))?;
            Ok(format_release_report(&issues)?)
        })?;

        for line in &report {
            info!("{line}");
        }
        Ok(report)
    }

    pub fn add_component(&self, _component: &str) -> Result<(), ConnectorError> {
        Err(ConnectorError::NotImplemented("add component"))
    }

    pub fn remove_component(&self, _component: &str) -> Result<(), ConnectorError> {
        Err(ConnectorError::NotImplemented("remove component"))
    }

    fn project_components(
        &self,
        session: &Session<'_, S>,
        operation: &'static str,
    ) -> Result<Vec<RemoteComponent>, ConnectorError> {
        session
            .remote_service()
            .get_components(session.authentication_token(), &self.project_key)
            .map_err(|source| remote_failure(operation, source))
    }

    fn with_session<T>(
        &self,
        context: &mut SessionContext,
        operation: &'static str,
        call: impl FnOnce(&Session<'_, S>) -> Result<T, ConnectorError>,
    ) -> Result<T, ConnectorError> {
        let guard = DisconnectGuard { context };
        guard.context.set_state(AliveState::Connecting);

        let session = Session::connect(&self.service, &self.user, &self.password).map_err(|source| {
            error!(
                operation,
                user = %self.user,
                "could not connect to server, maybe wrong user name or password"
            );
            ConnectorError::Execution {
                operation: "connect",
                source,
            }
        })?;
        guard.context.set_state(AliveState::Online);

        let result = call(&session);
        session.disconnect();
        result
    }
}

/// Query for the issues whose fix version is `release_id`.
fn release_issues_jql(release_id: &str) -> String {
    let escaped = release_id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("fixVersion in (\"{escaped}\") ")
}
