use jira_connector::domain::issue::ChangeSet;
use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn update_issue_command(cmd: Commands) -> Result<(), String> {
    if let Commands::UpdateIssue {
        config,
        issue,
        comment,
        changes,
    } = cmd
    {
        let connector = connector_from_config(&config)?;
        let change_set: ChangeSet = changes
            .into_iter()
            .map(|(field, value)| (field, Some(value)))
            .collect();

        let mut context = SessionContext::new();
        connector
            .update_issue(&mut context, &issue, comment.as_deref(), &change_set)
            .map_err(|e| format!("Failed to update {issue}: {e}"))?;
        println!("Issue {issue} updated");
    }
    Ok(())
}
