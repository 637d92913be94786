//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats. Session output is line
//! oriented, so JSON written during a session is one compact object per
//! line; one-shot commands pretty-print.

use crate::core::{Group, Message, UserRecord};
use crate::error::{Error, GroupError, Outcome};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// JSON shape of an operation result.
#[derive(Serialize)]
struct OutcomeOutput<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    message: &'a str,
}

/// Formats the result of a mutating operation.
#[must_use]
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> String {
    match outcome {
        Ok(message) => match format {
            OutputFormat::Text => format!("{message}\n"),
            OutputFormat::Json => format_json_line(&OutcomeOutput {
                success: true,
                kind: None,
                message,
            }),
        },
        Err(err) => format_failure(err, format),
    }
}

/// Formats a group failure.
#[must_use]
pub fn format_failure(err: &GroupError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Failed ({}): {err}\n", err.kind()),
        OutputFormat::Json => format_json_line(&OutcomeOutput {
            success: false,
            kind: Some(err.kind().as_str()),
            message: &err.to_string(),
        }),
    }
}

/// Formats a rejected session line (parse error or bad input).
#[must_use]
pub fn format_invalid_input(message: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = message.trim_end().to_string();
            output.push('\n');
            output
        }
        OutputFormat::Json => format_json_line(&OutcomeOutput {
            success: false,
            kind: Some("InvalidInput"),
            message: message.trim_end(),
        }),
    }
}

/// Formats the group list.
#[must_use]
pub fn format_group_list(groups: &[Group], selected: Option<&str>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_group_list_text(groups, selected),
        OutputFormat::Json => {
            let summaries: Vec<_> = groups
                .iter()
                .map(|g| GroupSummary::new(g, selected == Some(g.name())))
                .collect();
            format_json_line(&summaries)
        }
    }
}

fn format_group_list_text(groups: &[Group], selected: Option<&str>) -> String {
    if groups.is_empty() {
        return "No groups found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Groups:\n");
    let _ = writeln!(
        output,
        "  {:<24} {:<10} {:<10}",
        "Name", "Members", "Messages"
    );
    output.push_str("  ");
    output.push_str(&"-".repeat(46));
    output.push('\n');

    for group in groups {
        let marker = if selected == Some(group.name()) { '*' } else { ' ' };
        let _ = writeln!(
            output,
            "{marker} {:<24} {:<10} {:<10}",
            truncate(group.name(), 24),
            format!("{}/{}", group.len(), group.max_capacity()),
            group.messages().len()
        );
    }

    output
}

/// Formats the currently selected group.
#[must_use]
pub fn format_selected(group: Option<&Group>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => group.map_or_else(
            || "No group selected.\n".to_string(),
            |g| {
                format!(
                    "Selected: {} ({}/{} members, {} messages)\n",
                    g.name(),
                    g.len(),
                    g.max_capacity(),
                    g.messages().len()
                )
            },
        ),
        OutputFormat::Json => format_json_line(&group.map(|g| GroupSummary::new(g, true))),
    }
}

/// Formats the members of a group.
#[must_use]
pub fn format_members(group: &str, members: &[UserRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if members.is_empty() {
                return format!("Group {group} has no members.\n");
            }
            let mut output = String::new();
            let _ = writeln!(output, "Members of {group}:");
            for (i, user) in members.iter().enumerate() {
                let _ = writeln!(output, "  {}. {user}", i + 1);
            }
            output
        }
        OutputFormat::Json => format_json_line(&members),
    }
}

/// Formats a group's message history.
#[must_use]
pub fn format_messages(group: &str, messages: &[Message], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if messages.is_empty() {
                return format!("No messages in {group}.\n");
            }
            let mut output = String::new();
            let _ = writeln!(output, "--- {group} ---");
            for message in messages {
                let _ = writeln!(output, "{message}");
            }
            output
        }
        OutputFormat::Json => format_json_line(&messages),
    }
}

/// Formats a membership check.
#[must_use]
pub fn format_membership(user_id: &str, group: &str, member: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            if member {
                format!("User {user_id} is a member of {group}\n")
            } else {
                format!("User {user_id} is not a member of {group}\n")
            }
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct MembershipOutput<'a> {
                user_id: &'a str,
                group: &'a str,
                member: bool,
            }
            format_json_line(&MembershipOutput {
                user_id,
                group,
                member,
            })
        }
    }
}

/// Formats a list of users for the one-shot `users` command.
#[must_use]
pub fn format_users(users: &[&UserRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_users_text(users),
        OutputFormat::Json => format_json(&users),
    }
}

/// Formats a list of users inside a session, as a single JSON line.
#[must_use]
pub fn format_users_line(users: &[&UserRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_users_text(users),
        OutputFormat::Json => format_json_line(&users),
    }
}

fn format_users_text(users: &[&UserRecord]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Users:\n");
    let _ = writeln!(output, "{:<8} {:<28} Email", "ID", "Name");
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for user in users {
        let _ = writeln!(
            output,
            "{:<8} {:<28} {}",
            truncate(&user.id, 8),
            truncate(&user.name, 28),
            user.email
        );
    }

    output
}

/// Formats a top-level error.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
            })
        }
    }
}

/// Serializable group summary.
#[derive(Serialize)]
struct GroupSummary<'a> {
    name: &'a str,
    members: usize,
    max_capacity: usize,
    messages: usize,
    selected: bool,
}

impl<'a> GroupSummary<'a> {
    fn new(group: &'a Group, selected: bool) -> Self {
        Self {
            name: group.name(),
            members: group.len(),
            max_capacity: group.max_capacity(),
            messages: group.messages().len(),
            selected,
        }
    }
}

/// Formats a value as pretty JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a value as a single JSON line.
fn format_json_line<T: Serialize>(value: &T) -> String {
    let mut line = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    line.push('\n');
    line
}

/// Truncates a string to max characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut out: String = s.chars().take(max_len - 3).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
        assert_eq!(truncate("João Silva", 6), "Joã...");
    }

    #[test]
    fn test_format_outcome_text() {
        let ok: Outcome = Ok("Group 'Calc1' created".to_string());
        assert_eq!(format_outcome(&ok, OutputFormat::Text), "Group 'Calc1' created\n");

        let err: Outcome = Err(GroupError::NoGroupSelected);
        assert_eq!(
            format_outcome(&err, OutputFormat::Text),
            "Failed (NoGroupSelected): no group selected\n"
        );
    }

    #[test]
    fn test_format_outcome_json() {
        let ok: Outcome = Ok("done".to_string());
        assert_eq!(
            format_outcome(&ok, OutputFormat::Json),
            "{\"success\":true,\"message\":\"done\"}\n"
        );

        let err: Outcome = Err(GroupError::InvalidName);
        let json = format_outcome(&err, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["kind"], "InvalidName");
    }

    #[test]
    fn test_format_group_list() {
        assert_eq!(
            format_group_list(&[], None, OutputFormat::Text),
            "No groups found.\n"
        );

        let group = Group::new("Calc1", 2).unwrap();
        let text = format_group_list(std::slice::from_ref(&group), Some("Calc1"), OutputFormat::Text);
        assert!(text.contains("* Calc1"));
        assert!(text.contains("0/2"));

        let json = format_group_list(&[group], None, OutputFormat::Json);
        assert!(json.contains("\"max_capacity\":2"));
        assert!(json.contains("\"selected\":false"));
    }

    #[test]
    fn test_format_members() {
        let users = [UserRecord::new("1", "Ana", "ana@example.com")];
        let text = format_members("Calc1", &users, OutputFormat::Text);
        assert!(text.contains("1. Ana (ana@example.com)"));
        assert_eq!(
            format_members("Calc1", &[], OutputFormat::Text),
            "Group Calc1 has no members.\n"
        );
    }

    #[test]
    fn test_format_users() {
        let ana = UserRecord::new("1", "Ana", "ana@example.com");
        let text = format_users(&[&ana], OutputFormat::Text);
        assert!(text.contains("ana@example.com"));
        assert_eq!(format_users(&[], OutputFormat::Text), "No users found.\n");

        let json = format_users(&[&ana], OutputFormat::Json);
        assert!(json.contains("\"email\": \"ana@example.com\""));
    }

    #[test]
    fn test_format_users_line_is_one_line() {
        let ana = UserRecord::new("1", "Ana", "ana@example.com");
        let json = format_users_line(&[&ana], OutputFormat::Json);
        assert_eq!(json.lines().count(), 1);
        assert!(json.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(json.trim_end()).unwrap();
        assert_eq!(value[0]["email"], "ana@example.com");
    }
}
