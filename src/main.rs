mod commands;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::close_release_cmd::close_release_command;
use crate::commands::comment_cmd::comment_command;
use crate::commands::create_issue_cmd::create_issue_command;
use crate::commands::move_issues_cmd::move_issues_command;
use crate::commands::release_report_cmd::release_report_command;
use crate::commands::update_issue_cmd::update_issue_command;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
    debug!("Tracing initialized with level: {}", level);

    let result = match args.command {
        Commands::Completions { shell } => {
            let mut cmd = CliArgs::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        cmd @ Commands::CreateIssue { .. } => create_issue_command(cmd),
        cmd @ Commands::Comment { .. } => comment_command(cmd),
        cmd @ Commands::UpdateIssue { .. } => update_issue_command(cmd),
        cmd @ Commands::MoveIssues { .. } => move_issues_command(cmd),
        cmd @ Commands::CloseRelease { .. } => close_release_command(cmd),
        cmd @ Commands::ReleaseReport { .. } => release_report_command(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
