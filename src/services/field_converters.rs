//! Mapping tables between local issue values and the remote tracker's codes.

use thiserror::Error;

use crate::domain::issue::{IssueField, IssuePriority, IssueStatus, IssueType};

/// Status code the tracker uses for closed issues.
pub const CLOSED_STATUS_CODE: &str = "6";
pub const COMPONENTS_FIELD: &str = "components";
pub const FIX_VERSIONS_FIELD: &str = "fixVersions";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unknown priority code: {0}")]
    UnknownPriorityCode(String),
    #[error("unknown status code: {0}")]
    UnknownStatusCode(String),
    #[error("unknown issue type code: {0}")]
    UnknownTypeCode(String),
}

pub fn priority_to_code(priority: IssuePriority) -> &'static str {
    match priority {
        IssuePriority::Immediate => "1",
        IssuePriority::Urgent => "2",
        IssuePriority::High => "3",
        IssuePriority::Normal => "4",
        IssuePriority::Low => "5",
    }
}

pub fn priority_from_code(code: &str) -> Result<IssuePriority, ConversionError> {
    match code {
        "1" => Ok(IssuePriority::Immediate),
        "2" => Ok(IssuePriority::Urgent),
        "3" => Ok(IssuePriority::High),
        "4" => Ok(IssuePriority::Normal),
        "5" => Ok(IssuePriority::Low),
        other => Err(ConversionError::UnknownPriorityCode(other.to_string())),
    }
}

pub fn status_to_code(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::New => "1",
        IssueStatus::Assigned => "3",
        IssueStatus::Reopened => "4",
        IssueStatus::Resolved => "5",
        IssueStatus::Closed => CLOSED_STATUS_CODE,
    }
}

pub fn status_from_code(code: &str) -> Result<IssueStatus, ConversionError> {
    match code {
        "1" => Ok(IssueStatus::New),
        "3" => Ok(IssueStatus::Assigned),
        "4" => Ok(IssueStatus::Reopened),
        "5" => Ok(IssueStatus::Resolved),
        CLOSED_STATUS_CODE => Ok(IssueStatus::Closed),
        other => Err(ConversionError::UnknownStatusCode(other.to_string())),
    }
}

pub fn type_to_code(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Bug => "1",
        IssueType::NewFeature => "2",
        IssueType::Task => "3",
        IssueType::Improvement => "4",
    }
}

pub fn type_from_code(code: &str) -> Result<IssueType, ConversionError> {
    match code {
        "1" => Ok(IssueType::Bug),
        "2" => Ok(IssueType::NewFeature),
        "3" => Ok(IssueType::Task),
        "4" => Ok(IssueType::Improvement),
        other => Err(ConversionError::UnknownTypeCode(other.to_string())),
    }
}

/// Human readable label of a remote type code, as used in release reports.
pub fn type_label_from_code(code: &str) -> Result<&'static str, ConversionError> {
    let label = match type_from_code(code)? {
        IssueType::Bug => "Bug",
        IssueType::NewFeature => "New Feature",
        IssueType::Task => "Task",
        IssueType::Improvement => "Improvement",
    };
    Ok(label)
}

/// Remote field id for an issue attribute. Status has none: it only changes
/// through workflow transitions.
pub fn field_to_remote_id(field: IssueField) -> Option<&'static str> {
    match field {
        IssueField::Summary => Some("summary"),
        IssueField::Description => Some("description"),
        IssueField::Reporter => Some("reporter"),
        IssueField::Owner => Some("assignee"),
        IssueField::Priority => Some("priority"),
        IssueField::Type => Some("issuetype"),
        IssueField::DueVersion => Some(FIX_VERSIONS_FIELD),
        IssueField::Components => Some(COMPONENTS_FIELD),
        IssueField::Status => None,
    }
}
