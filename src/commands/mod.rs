pub mod base_commands;
pub mod close_release_cmd;
pub mod comment_cmd;
pub mod create_issue_cmd;
pub mod move_issues_cmd;
pub mod release_report_cmd;
pub mod update_issue_cmd;
