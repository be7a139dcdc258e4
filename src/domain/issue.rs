use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid {kind} value: {value}")]
pub struct ParseIssueValueError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssuePriority {
    Immediate,
    Urgent,
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueStatus {
    New,
    Assigned,
    Reopened,
    Resolved,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueType {
    Bug,
    NewFeature,
    Task,
    Improvement,
}

/// An issue attribute that can be changed through an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueField {
    Summary,
    Description,
    Reporter,
    Owner,
    Priority,
    Status,
    Type,
    DueVersion,
    Components,
}

/// New values keyed by the attribute they replace. A `None` value carries no
/// change and is skipped when the update is sent.
pub type ChangeSet = HashMap<IssueField, Option<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issue {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub reporter: Option<String>,
    pub owner: Option<String>,
    /// Component names or numeric component ids.
    pub components: Vec<String>,
    pub priority: Option<IssuePriority>,
    pub status: Option<IssueStatus>,
    pub issue_type: Option<IssueType>,
    /// Id of the version the issue is due in.
    pub due_version: Option<String>,
}

impl Issue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IssueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueField::Summary => "summary",
            IssueField::Description => "description",
            IssueField::Reporter => "reporter",
            IssueField::Owner => "owner",
            IssueField::Priority => "priority",
            IssueField::Status => "status",
            IssueField::Type => "type",
            IssueField::DueVersion => "due-version",
            IssueField::Components => "components",
        }
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace('_', "-")
}

impl FromStr for IssuePriority {
    type Err = ParseIssueValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "immediate" => Ok(IssuePriority::Immediate),
            "urgent" => Ok(IssuePriority::Urgent),
            "high" => Ok(IssuePriority::High),
            "normal" => Ok(IssuePriority::Normal),
            "low" => Ok(IssuePriority::Low),
            _ => Err(ParseIssueValueError {
                kind: "priority",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for IssueStatus {
    type Err = ParseIssueValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "new" => Ok(IssueStatus::New),
            "assigned" => Ok(IssueStatus::Assigned),
            "reopened" => Ok(IssueStatus::Reopened),
            "resolved" => Ok(IssueStatus::Resolved),
            "closed" => Ok(IssueStatus::Closed),
            _ => Err(ParseIssueValueError {
                kind: "status",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for IssueType {
    type Err = ParseIssueValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "bug" => Ok(IssueType::Bug),
            "new-feature" | "feature" => Ok(IssueType::NewFeature),
            "task" => Ok(IssueType::Task),
            "improvement" => Ok(IssueType::Improvement),
            _ => Err(ParseIssueValueError {
                kind: "type",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for IssueField {
    type Err = ParseIssueValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize(value).as_str() {
            "summary" => Ok(IssueField::Summary),
            "description" => Ok(IssueField::Description),
            "reporter" => Ok(IssueField::Reporter),
            "owner" | "assignee" => Ok(IssueField::Owner),
            "priority" => Ok(IssueField::Priority),
            "status" => Ok(IssueField::Status),
            "type" => Ok(IssueField::Type),
            "due-version" | "fix-version" => Ok(IssueField::DueVersion),
            "components" | "component" => Ok(IssueField::Components),
            _ => Err(ParseIssueValueError {
                kind: "field",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
