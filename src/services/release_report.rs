use crate::services::field_converters::{CLOSED_STATUS_CODE, ConversionError, type_label_from_code};
use crate::services::remote_types::RemoteIssue;

/// Renders closed issues as report lines grouped by issue type.
///
/// Groups keep the order in which their type first appears. Each group is a
/// `"** <type>\n"` header, one `"\t * [KEY] - description"` line per issue and
/// a trailing `"\n"`. Issues whose status is not closed are left out.
pub fn format_release_report(issues: &[RemoteIssue]) -> Result<Vec<String>, ConversionError> {
    let mut groups: Vec<(&'static str, Vec<String>)> = Vec::new();

    for issue in issues
        .iter()
        .filter(|issue| issue.status.as_deref() == Some(CLOSED_STATUS_CODE))
    {
        let label = type_label_from_code(issue.issue_type.as_deref().unwrap_or_default())?;
        let line = format_issue_line(issue);
        match groups.iter_mut().find(|(group, _)| *group == label) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((label, vec![line])),
        }
    }

    let mut report = Vec::new();
    for (label, lines) in groups {
        report.push(format!("** {label}\n"));
        report.extend(lines);
        report.push("\n".to_string());
    }
    Ok(report)
}

fn format_issue_line(issue: &RemoteIssue) -> String {
    format!(
        "\t * [{}] - {}",
        issue.key.as_deref().unwrap_or_default(),
        issue.description.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::found_issue;

    #[test]
    fn only_closed_issues_are_reported() {
        let issues = vec![
            found_issue("A-1", "1", "6", "x"),
            found_issue("A-2", "1", "6", "y"),
            found_issue("A-3", "3", "3", "z"),
        ];

        let report = format_release_report(&issues).unwrap();
        assert_eq!(
            report,
            vec!["** Bug\n", "\t * [A-1] - x", "\t * [A-2] - y", "\n"]
        );
    }

    #[test]
    fn groups_follow_first_appearance_of_each_type() {
        let issues = vec![
            found_issue("A-1", "3", "6", "task one"),
            found_issue("A-2", "1", "6", "bug one"),
            found_issue("A-3", "3", "6", "task two"),
        ];

        let report = format_release_report(&issues).unwrap();
        assert_eq!(
            report,
            vec![
                "** Task\n",
                "\t * [A-1] - task one",
                "\t * [A-3] - task two",
                "\n",
                "** Bug\n",
                "\t * [A-2] - bug one",
                "\n",
            ]
        );
    }

    #[test]
    fn no_closed_issues_produce_an_empty_report() {
        let issues = vec![found_issue("A-1", "1", "3", "open")];
        assert!(format_release_report(&issues).unwrap().is_empty());
    }

    #[test]
    fn unknown_type_codes_are_reported_as_errors() {
        let issues = vec![found_issue("A-1", "10000", "6", "epic")];
        assert_eq!(
            format_release_report(&issues),
            Err(ConversionError::UnknownTypeCode("10000".to_string()))
        );
    }
}
