use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn close_release_command(cmd: Commands) -> Result<(), String> {
    if let Commands::CloseRelease { config, name } = cmd {
        let connector = connector_from_config(&config)?;
        let mut context = SessionContext::new();
        connector
            .close_release(&mut context, &name)
            .map_err(|e| format!("Failed to close release: {e}"))?;
        println!("Release {name} closed");
    }
    Ok(())
}
