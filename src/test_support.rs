use std::cell::{Cell, RefCell};

use crate::services::remote_service::{RemoteError, RemoteIssueService};
use crate::services::remote_types::{
    RemoteComment, RemoteComponent, RemoteFieldValue, RemoteIssue, RemoteVersion,
};

// An in-memory tracker that records every call it receives. Logins succeed
// only with the password "secret" and hand out a new token each time.
pub struct FakeJira {
    versions: Vec<RemoteVersion>,
    components: Vec<RemoteComponent>,
    search_results: Vec<RemoteIssue>,
    failing_call: Option<&'static str>,
    logins: Cell<usize>,
    calls: RefCell<Vec<String>>,
    pub created: RefCell<Vec<RemoteIssue>>,
    pub comments: RefCell<Vec<(String, RemoteComment)>>,
    pub updates: RefCell<Vec<(String, Vec<RemoteFieldValue>)>>,
    pub released: RefCell<Vec<RemoteVersion>>,
}

impl FakeJira {
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            components: Vec::new(),
            search_results: Vec::new(),
            failing_call: None,
            logins: Cell::new(0),
            calls: RefCell::new(Vec::new()),
            created: RefCell::new(Vec::new()),
            comments: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
            released: RefCell::new(Vec::new()),
        }
    }

    pub fn with_versions(mut self, versions: Vec<RemoteVersion>) -> Self {
        self.versions = versions;
        self
    }

    pub fn with_components(mut self, components: Vec<RemoteComponent>) -> Self {
        self.components = components;
        self
    }

    pub fn with_search_results(mut self, issues: Vec<RemoteIssue>) -> Self {
        self.search_results = issues;
        self
    }

    /// Makes the named call fail with a rejected request.
    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.failing_call = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str, detail: String) -> Result<(), RemoteError> {
        self.calls.borrow_mut().push(format!("{call} {detail}"));
        if self.failing_call == Some(call) {
            return Err(RemoteError::Rejected {
                status: 500,
                message: format!("{call} failed"),
            });
        }
        Ok(())
    }
}

impl RemoteIssueService for FakeJira {
    fn login(&self, user: &str, password: &str) -> Result<String, RemoteError> {
        self.record("login", user.to_string())?;
        if password != "secret" {
            return Err(RemoteError::Unauthorized);
        }
        self.logins.set(self.logins.get() + 1);
        Ok(format!("token-{}", self.logins.get()))
    }

    fn logout(&self, token: &str) -> Result<(), RemoteError> {
        self.record("logout", token.to_string())
    }

    fn create_issue(&self, token: &str, issue: &RemoteIssue) -> Result<RemoteIssue, RemoteError> {
        self.record("create_issue", token.to_string())?;
        let mut created = issue.clone();
        let number = self.created.borrow().len() + 1;
        created.id = Some(format!("{}", 10000 + number));
        created.key = Some(format!(
            "{}-{number}",
            issue.project.clone().unwrap_or_default()
        ));
        self.created.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn add_comment(
        &self,
        token: &str,
        issue_key: &str,
        comment: &RemoteComment,
    ) -> Result<(), RemoteError> {
        self.record("add_comment", format!("{token} {issue_key}"))?;
        self.comments
            .borrow_mut()
            .push((issue_key.to_string(), comment.clone()));
        Ok(())
    }

    fn update_issue(
        &self,
        token: &str,
        issue_key: &str,
        changes: &[RemoteFieldValue],
    ) -> Result<(), RemoteError> {
        self.record("update_issue", format!("{token} {issue_key}"))?;
        self.updates
            .borrow_mut()
            .push((issue_key.to_string(), changes.to_vec()));
        Ok(())
    }

    fn get_versions(&self, token: &str, project_key: &str) -> Result<Vec<RemoteVersion>, RemoteError> {
        self.record("get_versions", format!("{token} {project_key}"))?;
        Ok(self.versions.clone())
    }

    fn release_version(
        &self,
        token: &str,
        project_key: &str,
        version: &RemoteVersion,
    ) -> Result<(), RemoteError> {
        self.record(
            "release_version",
            format!("{token} {project_key} {}", version.id),
        )?;
        self.released.borrow_mut().push(version.clone());
        Ok(())
    }

    fn get_components(
        &self,
        token: &str,
        project_key: &str,
    ) -> Result<Vec<RemoteComponent>, RemoteError> {
        self.record("get_components", format!("{token} {project_key}"))?;
        Ok(self.components.clone())
    }

    fn search_issues(
        &self,
        token: &str,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<RemoteIssue>, RemoteError> {
        self.record("search_issues", format!("{token} {jql} {max_results}"))?;
        Ok(self.search_results.clone())
    }
}

pub fn version(id: &str, name: &str) -> RemoteVersion {
    RemoteVersion {
        id: id.to_string(),
        name: Some(name.to_string()),
        release_date: None,
    }
}

pub fn component(id: &str, name: &str) -> RemoteComponent {
    RemoteComponent {
        id: id.to_string(),
        name: Some(name.to_string()),
    }
}

pub fn found_issue(key: &str, issue_type: &str, status: &str, description: &str) -> RemoteIssue {
    RemoteIssue {
        key: Some(key.to_string()),
        issue_type: Some(issue_type.to_string()),
        status: Some(status.to_string()),
        description: Some(description.to_string()),
        ..RemoteIssue::default()
    }
}
