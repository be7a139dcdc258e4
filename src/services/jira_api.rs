use std::collections::HashMap;
use std::env;
use std::fs;

use chrono::{Local, NaiveDate};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::COOKIE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::services::field_converters::{COMPONENTS_FIELD, FIX_VERSIONS_FIELD};
use crate::services::remote_service::{RemoteError, RemoteIssueService};
use crate::services::remote_types::{
    RemoteComment, RemoteComponent, RemoteFieldValue, RemoteIssue, RemoteVersion,
};

const SEARCH_FIELDS: &str =
    "summary,description,status,issuetype,priority,project,reporter,assignee,components,fixVersions";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JiraProjectMetaData {
    pub base_url: String,
    pub project_key: String,
}

impl JiraProjectMetaData {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, RemoteError> {
        let contents = fs::read_to_string(filepath)
            .map_err(|err| RemoteError::Other(format!("failed to read config: {err}")))?;
        let metadata: JiraProjectMetaData =
            serde_yaml::from_str(&contents).map_err(|_| RemoteError::Parse)?;
        Ok(metadata)
    }
}

pub struct JiraConfigParser;

impl JiraConfigParser {
    pub fn parse(&self, filepath: &str) -> Result<JiraProjectMetaData, RemoteError> {
        JiraProjectMetaData::from_yaml_file(filepath)
    }
}

#[derive(Debug, Clone)]
pub struct AuthData {
    pub username: String,
    pub password: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, RemoteError> {
        let username = env::var("JIRA_USERNAME").ok();
        let password = env::var("JIRA_PASSWORD").ok();
        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(RemoteError::Unauthorized),
        }
    }
}

/// Jira REST API v2 binding of [`RemoteIssueService`].
///
/// The authentication token is the session cookie (`name=value`) handed out
/// by the login endpoint; it is sent back as a `Cookie` header.
pub struct JiraApiClient {
    jira_project: JiraProjectMetaData,
    client: Client,
}

impl JiraApiClient {
    pub fn new(jira_project: JiraProjectMetaData) -> Result<Self, RemoteError> {
        if jira_project.base_url.is_empty() || jira_project.project_key.is_empty() {
            return Err(RemoteError::Other(
                "jira_project metadata is missing base_url or project_key".to_string(),
            ));
        }

        Ok(Self {
            jira_project,
            client: Client::new(),
        })
    }

    pub fn project_key(&self) -> &str {
        &self.jira_project.project_key
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.jira_project.base_url.trim_end_matches('/'))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, RemoteError> {
        let response = request
            .send()
            .map_err(|err| RemoteError::Connection(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RemoteError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }
        if !status.is_success() {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }
        Ok(response)
    }

    fn send_json<T: for<'de> Deserialize<'de>>(&self, request: RequestBuilder) -> Result<T, RemoteError> {
        self.send(request)?
            .json::<T>()
            .map_err(|_| RemoteError::Parse)
    }
}

impl RemoteIssueService for JiraApiClient {
    fn login(&self, user: &str, password: &str) -> Result<String, RemoteError> {
        let request = self
            .client
            .post(self.url("/rest/auth/1/session"))
            .json(&LoginRequest {
                username: user,
                password,
            });
        let login: LoginResponse = self.send_json(request)?;
        Ok(format!("{}={}", login.session.name, login.session.value))
    }

    fn logout(&self, token: &str) -> Result<(), RemoteError> {
        let request = self
            .client
            .delete(self.url("/rest/auth/1/session"))
            .header(COOKIE, token);
        self.send(request)?;
        Ok(())
    }

    fn create_issue(&self, token: &str, issue: &RemoteIssue) -> Result<RemoteIssue, RemoteError> {
        let request = self
            .client
            .post(self.url("/rest/api/2/issue"))
            .header(COOKIE, token)
            .json(&json!({ "fields": issue_fields_payload(issue) }));
        let created: CreatedIssueRecord = self.send_json(request)?;
        debug!(key = %created.key, "issue created");

        let mut remote_issue = issue.clone();
        remote_issue.id = Some(created.id);
        remote_issue.key = Some(created.key);
        Ok(remote_issue)
    }

    fn add_comment(
        &self,
        token: &str,
        issue_key: &str,
        comment: &RemoteComment,
    ) -> Result<(), RemoteError> {
        let request = self
            .client
            .post(self.url(&format!("/rest/api/2/issue/{issue_key}/comment")))
            .header(COOKIE, token)
            .json(&json!({ "body": comment.body }));
        self.send(request)?;
        Ok(())
    }

    fn update_issue(
        &self,
        token: &str,
        issue_key: &str,
        changes: &[RemoteFieldValue],
    ) -> Result<(), RemoteError> {
        let fields: Map<String, Value> = changes
            .iter()
            .map(|change| (change.id.clone(), field_value_payload(change)))
            .collect();
        let request = self
            .client
            .put(self.url(&format!("/rest/api/2/issue/{issue_key}")))
            .header(COOKIE, token)
            .json(&json!({ "fields": fields }));
        self.send(request)?;
        Ok(())
    }

    fn get_versions(&self, token: &str, project_key: &str) -> Result<Vec<RemoteVersion>, RemoteError> {
        let request = self
            .client
            .get(self.url(&format!("/rest/api/2/project/{project_key}/versions")))
            .header(COOKIE, token);
        let versions: Vec<VersionRecord> = self.send_json(request)?;
        Ok(versions.into_iter().map(VersionRecord::into_remote).collect())
    }

    // The REST endpoint addresses versions by id alone.
    fn release_version(
        &self,
        token: &str,
        _project_key: &str,
        version: &RemoteVersion,
    ) -> Result<(), RemoteError> {
        let release_date = version
            .release_date
            .unwrap_or_else(|| Local::now().date_naive());
        let request = self
            .client
            .put(self.url(&format!("/rest/api/2/version/{}", version.id)))
            .header(COOKIE, token)
            .json(&json!({
                "released": true,
                "releaseDate": release_date.format("%Y-%m-%d").to_string(),
            }));
        self.send(request)?;
        Ok(())
    }

    fn get_components(
        &self,
        token: &str,
        project_key: &str,
    ) -> Result<Vec<RemoteComponent>, RemoteError> {
        let request = self
            .client
            .get(self.url(&format!("/rest/api/2/project/{project_key}/components")))
            .header(COOKIE, token);
        let components: Vec<ComponentRecord> = self.send_json(request)?;
        Ok(components.into_iter().map(ComponentRecord::into_remote).collect())
    }

    /// Follows the server's pagination (`nextPageToken`, or `startAt` against
    /// `total`) until the results run out or `max_results` issues are read.
    fn search_issues(
        &self,
        token: &str,
        jql: &str,
        max_results: usize,
    ) -> Result<Vec<RemoteIssue>, RemoteError> {
        let mut params: HashMap<&str, String> = HashMap::new();
        params.insert("jql", jql.to_string());
        params.insert("fields", SEARCH_FIELDS.to_string());

        let mut found = Vec::new();
        let mut last_page_token: Option<String> = None;

        while found.len() < max_results {
            params.insert("maxResults", (max_results - found.len()).to_string());
            let request = self
                .client
                .get(self.url("/rest/api/2/search"))
                .header(COOKIE, token)
                .query(&params);
            let payload: SearchRecord = self.send_json(request)?;

            let page_len = payload.issues.len();
            let remaining = max_results - found.len();
            found.extend(
                payload
                    .issues
                    .into_iter()
                    .take(remaining)
                    .map(IssueRecord::into_remote),
            );
            if page_len == 0 {
                break;
            }

            if let Some(page_token) = payload.next_page_token {
                if last_page_token.as_deref() == Some(page_token.as_str()) {
                    break;
                }
                params.remove("startAt");
                params.insert("nextPageToken", page_token.clone());
                last_page_token = Some(page_token);
                continue;
            }

            if payload.is_last.unwrap_or(false) {
                break;
            }

            if let (Some(start_at), Some(page_size), Some(total)) =
                (payload.start_at, payload.max_results, payload.total)
            {
                let next_start_at = start_at.saturating_add(page_size.max(page_len as u64));
                if next_start_at >= total {
                    break;
                }
                params.remove("nextPageToken");
                params.insert("startAt", next_start_at.to_string());
                continue;
            }

            break;
        }

        debug!(jql, found = found.len(), "search finished");
        Ok(found)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    session: SessionRecord,
}

#[derive(Deserialize)]
struct SessionRecord {
    name: String,
    value: String,
}

#[derive(Deserialize)]
struct CreatedIssueRecord {
    id: String,
    key: String,
}

#[derive(Deserialize)]
struct VersionRecord {
    id: String,
    name: Option<String>,
    #[serde(rename = "releaseDate")]
    release_date: Option<String>,
}

impl VersionRecord {
    fn into_remote(self) -> RemoteVersion {
        RemoteVersion {
            id: self.id,
            name: self.name,
            release_date: self
                .release_date
                .and_then(|date| NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()),
        }
    }
}

#[derive(Deserialize)]
struct ComponentRecord {
    id: String,
    name: Option<String>,
}

impl ComponentRecord {
    fn into_remote(self) -> RemoteComponent {
        RemoteComponent {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRecord {
    #[serde(default)]
    issues: Vec<IssueRecord>,
    start_at: Option<u64>,
    max_results: Option<u64>,
    total: Option<u64>,
    is_last: Option<bool>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct IssueRecord {
    id: Option<String>,
    key: String,
    #[serde(default)]
    fields: IssueFieldsRecord,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IssueFieldsRecord {
    summary: Option<String>,
    description: Option<String>,
    status: Option<IdRecord>,
    issuetype: Option<IdRecord>,
    priority: Option<IdRecord>,
    project: Option<ProjectRecord>,
    reporter: Option<UserRecord>,
    assignee: Option<UserRecord>,
    components: Option<Vec<ComponentRecord>>,
    #[serde(rename = "fixVersions")]
    fix_versions: Option<Vec<VersionRecord>>,
}

#[derive(Deserialize)]
struct IdRecord {
    id: String,
}

#[derive(Deserialize)]
struct ProjectRecord {
    key: String,
}

#[derive(Deserialize)]
struct UserRecord {
    name: String,
}

impl IssueRecord {
    fn into_remote(self) -> RemoteIssue {
        let fields = self.fields;
        RemoteIssue {
            id: self.id,
            key: Some(self.key),
            project: fields.project.map(|project| project.key),
            summary: fields.summary,
            description: fields.description,
            reporter: fields.reporter.map(|user| user.name),
            assignee: fields.assignee.map(|user| user.name),
            priority: fields.priority.map(|priority| priority.id),
            status: fields.status.map(|status| status.id),
            issue_type: fields.issuetype.map(|issue_type| issue_type.id),
            components: fields
                .components
                .unwrap_or_default()
                .into_iter()
                .map(ComponentRecord::into_remote)
                .collect(),
            fix_versions: fields
                .fix_versions
                .unwrap_or_default()
                .into_iter()
                .map(VersionRecord::into_remote)
                .collect(),
        }
    }
}

fn id_objects<'a>(ids: impl Iterator<Item = &'a str>) -> Value {
    Value::Array(ids.map(|id| json!({ "id": id })).collect())
}

fn issue_fields_payload(issue: &RemoteIssue) -> Value {
    let mut fields = Map::new();
    if let Some(project) = &issue.project {
        fields.insert("project".to_string(), json!({ "key": project }));
    }
    if let Some(summary) = &issue.summary {
        fields.insert("summary".to_string(), json!(summary));
    }
    if let Some(description) = &issue.description {
        fields.insert("description".to_string(), json!(description));
    }
    if let Some(reporter) = &issue.reporter {
        fields.insert("reporter".to_string(), json!({ "name": reporter }));
    }
    if let Some(assignee) = &issue.assignee {
        fields.insert("assignee".to_string(), json!({ "name": assignee }));
    }
    if let Some(priority) = &issue.priority {
        fields.insert("priority".to_string(), json!({ "id": priority }));
    }
    if let Some(issue_type) = &issue.issue_type {
        fields.insert("issuetype".to_string(), json!({ "id": issue_type }));
    }
    if !issue.components.is_empty() {
        fields.insert(
            COMPONENTS_FIELD.to_string(),
            id_objects(issue.components.iter().map(|c| c.id.as_str())),
        );
    }
    if !issue.fix_versions.is_empty() {
        fields.insert(
            FIX_VERSIONS_FIELD.to_string(),
            id_objects(issue.fix_versions.iter().map(|v| v.id.as_str())),
        );
    }
    Value::Object(fields)
}

/// Encodes a field update the way the REST API expects the field's type.
fn field_value_payload(change: &RemoteFieldValue) -> Value {
    let first = change.values.first();
    match change.id.as_str() {
        COMPONENTS_FIELD | FIX_VERSIONS_FIELD => {
            id_objects(change.values.iter().map(String::as_str))
        }
        "priority" | "issuetype" => first.map_or(Value::Null, |id| json!({ "id": id })),
        "assignee" | "reporter" => first.map_or(Value::Null, |name| json!({ "name": name })),
        _ => match change.values.as_slice() {
            [] => Value::Null,
            [value] => json!(value),
            values => json!(values),
        },
    }
}
