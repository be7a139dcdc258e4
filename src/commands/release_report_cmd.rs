use jira_connector::services::session::SessionContext;

use crate::commands::base_commands::{Commands, connector_from_config};

pub fn release_report_command(cmd: Commands) -> Result<(), String> {
    if let Commands::ReleaseReport { config, release } = cmd {
        let connector = connector_from_config(&config)?;
        let mut context = SessionContext::new();
        let report = connector
            .generate_release_report(&mut context, &release)
            .map_err(|e| format!("Failed to generate release report: {e}"))?;

        if report.is_empty() {
            println!("No closed issues in release {release}");
        } else {
            print!("{}", format_report_lines(&report));
        }
    }
    Ok(())
}

/// Joins report lines for the terminal. Headers and group separators already
/// end in a newline, issue lines do not.
fn format_report_lines(report: &[String]) -> String {
    let mut output = String::new();
    for line in report {
        output.push_str(line);
        if !line.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}
