use thiserror::Error;

use crate::services::remote_types::{
    RemoteComment, RemoteComponent, RemoteFieldValue, RemoteIssue, RemoteVersion,
};

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("resource not found")]
    NotFound,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("{0}")]
    Other(String),
}

/// The call surface of a remote issue tracker.
///
/// Every call except [`RemoteIssueService::login`] takes the authentication
/// token returned by the login of the same operation.
pub trait RemoteIssueService {
    fn login(&self, user: &str, password: &str) -> Result<String, RemoteError>;

    fn logout(&self, token: &str) -> Result<(), RemoteError>;

    /// Creates the issue and returns it with the remote id and key filled in.
    fn create_issue(&self, token: &str, issue: &RemoteIssue) -> Result<RemoteIssue, RemoteError>;

    fn add_comment(
        &self,
        token: &str,
        issue_key: &str,
        comment: &RemoteComment,
    ) -> Result<(), RemoteError>;

    fn update_issue(
        &self,
        token: &str,
        issue_key: &str,
        changes: &[RemoteFieldValue],
    ) -> Result<(), RemoteError>;

    fn get_versions(&self, token: &str, project_key: &str) -> Result<Vec<RemoteVersion>, RemoteError>;

    fn release_version(
        &self,
        token: &str,
        project_key: &str,
        version: &RemoteVersion,
    ) -> Result<(), RemoteError>;

    fn get_components(
        &self,
        token: &str,
        project_key: &str,
    ) -> Result<Vec<RemoteComponent>, RemoteError>;

    /// Runs a query-language search returning at most `max_results` issues.
    fn search_issues(
        &self,
        token: &str,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<RemoteIssue>, RemoteError>;
}
