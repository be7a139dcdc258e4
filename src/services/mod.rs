pub mod field_converters;
pub mod issue_translator;
pub mod jira_api;
pub mod jira_connector;
pub mod release_report;
pub mod remote_service;
pub mod remote_types;
pub mod session;
