//! Builds remote records from local issues and change sets.

use thiserror::Error;

use crate::domain::issue::{ChangeSet, Issue};
use crate::services::field_converters::{
    COMPONENTS_FIELD, field_to_remote_id, priority_to_code, status_to_code, type_to_code,
};
use crate::services::remote_types::{RemoteComponent, RemoteFieldValue, RemoteIssue, RemoteVersion};

/// Separates component tokens in a single change value. Component names must
/// not contain it.
pub const COMPONENT_SEPARATOR: char = ',';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranslationError {
    #[error("unknown component: {0}")]
    UnknownComponent(String),
}

pub fn build_remote_issue(
    issue: &Issue,
    project_key: &str,
    known_components: &[RemoteComponent],
) -> Result<RemoteIssue, TranslationError> {
    let components = issue
        .components
        .iter()
        .map(|component| resolve_component(component, known_components))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RemoteIssue {
        id: None,
        key: None,
        project: Some(project_key.to_string()),
        summary: issue.summary.clone(),
        description: issue.description.clone(),
        reporter: issue.reporter.clone(),
        assignee: issue.owner.clone(),
        priority: issue.priority.map(|value| priority_to_code(value).to_string()),
        status: issue.status.map(|value| status_to_code(value).to_string()),
        issue_type: issue.issue_type.map(|value| type_to_code(value).to_string()),
        components,
        fix_versions: issue
            .due_version
            .iter()
            .map(|version| RemoteVersion::with_id(version.clone()))
            .collect(),
    })
}

/// Resolves a component token to a remote component.
///
/// Numeric tokens are taken as remote ids without checking that they exist;
/// anything else must match the name of a known component exactly.
pub fn resolve_component(
    token: &str,
    known_components: &[RemoteComponent],
) -> Result<RemoteComponent, TranslationError> {
    let token = token.trim();
    if token.parse::<i64>().is_ok() {
        return Ok(RemoteComponent {
            id: token.to_string(),
            name: None,
        });
    }

    known_components
        .iter()
        .find(|component| component.name.as_deref() == Some(token))
        .cloned()
        .ok_or_else(|| TranslationError::UnknownComponent(token.to_string()))
}

pub fn build_field_changes(
    changes: &ChangeSet,
    known_components: &[RemoteComponent],
) -> Result<Vec<RemoteFieldValue>, TranslationError> {
    let mut remote_fields = Vec::with_capacity(changes.len());

    for (field, value) in changes {
        let (Some(target_field), Some(target_value)) = (field_to_remote_id(*field), value) else {
            continue;
        };

        let values = if target_field == COMPONENTS_FIELD {
            target_value
                .split(COMPONENT_SEPARATOR)
                .filter(|token| !token.trim().is_empty())
                .map(|token| resolve_component(token, known_components).map(|c| c.id))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            vec![target_value.clone()]
        };

        remote_fields.push(RemoteFieldValue {
            id: target_field.to_string(),
            values,
        });
    }

    remote_fields.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(remote_fields)
}
