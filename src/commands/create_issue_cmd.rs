use jira_connector::domain::issue::Issue;
use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn create_issue_command(cmd: Commands) -> Result<(), String> {
    let Commands::CreateIssue {
        config,
        summary,
        description,
        reporter,
        owner,
        priority,
        status,
        issue_type,
        components,
        due_version,
    } = cmd
    else {
        return Ok(());
    };

    let connector = connector_from_config(&config)?;
    let issue = Issue {
        summary: Some(summary),
        description,
        reporter,
        owner,
        components,
        priority,
        status,
        issue_type,
        due_version,
    };

    let mut context = SessionContext::new();
    let key = connector
        .create_issue(&mut context, &issue)
        .map_err(|e| format!("Failed to create issue: {e}"))?;
    println!("Created issue {key}");
    Ok(())
}
