use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn move_issues_command(cmd: Commands) -> Result<(), String> {
    if let Commands::MoveIssues { config, from, to } = cmd {
        let connector = connector_from_config(&config)?;
        let mut context = SessionContext::new();
        connector
            .move_issues_from_release_to_release(&mut context, &from, &to)
            .map_err(|e| format!("Failed to move issues: {e}"))?;
        println!("Issues of release {from} moved to release {to}");
    }
    Ok(())
}
