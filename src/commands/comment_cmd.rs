use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn comment_command(cmd: Commands) -> Result<(), String> {
    if let Commands::Comment {
        config,
        issue,
        text,
    } = cmd
    {
        let connector = connector_from_config(&config)?;
        let mut context = SessionContext::new();
        connector
            .add_comment(&mut context, &issue, &text)
            .map_err(|e| format!("Failed to comment on {issue}: {e}"))?;
        println!("Comment added to {issue}");
    }
    Ok(())
}
