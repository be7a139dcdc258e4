use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use jira_connector::domain::issue::{IssueField, IssuePriority, IssueStatus, IssueType};
use jira_connector::services::jira_api::{AuthData, JiraApiClient, JiraConfigParser};
use jira_connector::services::jira_connector::JiraConnector;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a Jira issue and print its key
    CreateIssue {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reporter: Option<String>,
        /// Assignee of the issue
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        priority: Option<IssuePriority>,
        #[arg(long)]
        status: Option<IssueStatus>,
        #[arg(long = "type")]
        issue_type: Option<IssueType>,
        /// Component name or id, may be repeated
        #[arg(long = "component")]
        components: Vec<String>,
        /// Id of the version the issue is due in
        #[arg(long)]
        due_version: Option<String>,
    },
    /// Add a comment to an issue
    Comment {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        #[arg(short, long)]
        issue: String,
        #[arg(short, long)]
        text: String,
    },
    /// Change fields of an issue
    UpdateIssue {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        #[arg(short, long)]
        issue: String,
        #[arg(long)]
        comment: Option<String>,
        /// Field change as FIELD=VALUE, may be repeated
        #[arg(long = "set", value_parser = parse_change, required = true)]
        changes: Vec<(IssueField, String)>,
    },
    /// Move all issues of one release to another
    MoveIssues {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        /// Id of the release the issues are taken from
        #[arg(long)]
        from: String,
        /// Id of the release the issues are moved to
        #[arg(long)]
        to: String,
    },
    /// Mark a release as released
    CloseRelease {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        /// Name of the release
        #[arg(short, long)]
        name: String,
    },
    /// Print the closed issues of a release grouped by type
    ReleaseReport {
        /// Path to Jira config YAML
        #[arg(short, long)]
        config: String,
        /// Id of the release
        #[arg(short, long)]
        release: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_change(value: &str) -> Result<(IssueField, String), String> {
    let (field, new_value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{value}`"))?;
    let field = field.parse::<IssueField>().map_err(|err| err.to_string())?;
    Ok((field, new_value.to_string()))
}

/// Builds a connector from a config file and the credentials in the
/// environment.
pub fn connector_from_config(config: &str) -> Result<JiraConnector<JiraApiClient>, String> {
    let config_parser = JiraConfigParser;
    let jira_project = config_parser
        .parse(config)
        .map_err(|e| format!("Failed to parse Jira config: {e}"))?;

    let auth = AuthData::from_env().map_err(|e| format!("Failed to load Jira auth: {e}"))?;

    let api_client = JiraApiClient::new(jira_project)
        .map_err(|e| format!("Failed to create JiraApiClient: {e}"))?;
    let project_key = api_client.project_key().to_string();

    Ok(JiraConnector::new(
        api_client,
        auth.username,
        auth.password,
        project_key,
    ))
}
