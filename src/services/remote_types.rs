use chrono::NaiveDate;

/// An issue as the remote tracker sees it. Codes (priority, status, type) are
/// the tracker's ids, not local enum values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteIssue {
    pub id: Option<String>,
    pub key: Option<String>,
    pub project: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub reporter: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    pub components: Vec<RemoteComponent>,
    pub fix_versions: Vec<RemoteVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComponent {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteVersion {
    pub id: String,
    pub name: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl RemoteVersion {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            release_date: None,
        }
    }
}

/// A field update: the remote field id and its new values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFieldValue {
    pub id: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComment {
    pub body: String,
}
