//! Issue-domain connector for Jira.
//!
//! [`services::jira_connector::JiraConnector`] maps issue operations (create,
//! comment, update, move between releases, close a release, release report)
//! onto a [`services::remote_service::RemoteIssueService`], of which
//! [`services::jira_api::JiraApiClient`] is the Jira REST implementation.

pub mod domain;
pub mod services;

#[cfg(test)]
mod test_support;
