//! Line-oriented chat session.
//!
//! Reads one command per line and applies it to a [`GroupController`].
//! Group failures and malformed lines are reported and the session keeps
//! going; only I/O errors end it early.
//!
//! `chat <user-id>` switches to chat mode, where every line is posted to
//! the selected group as that user until `/leave`.

use crate::cli::output::{
    OutputFormat, format_failure, format_group_list, format_invalid_input, format_members,
    format_membership, format_messages, format_outcome, format_selected, format_users_line,
};
use crate::cli::parser::{SessionCommand, SessionLine, rest_of_line, split_line};
use crate::controller::GroupController;
use crate::directory::UserDirectory;
use crate::error::{GroupError, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::debug;

/// Leaves chat mode.
const CHAT_LEAVE: &str = "/leave";

/// Lists the members of the chat's group.
const CHAT_MEMBERS: &str = "/members";

/// What the session is currently reading.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Command,
    Chat { user_id: String, group: String },
}

/// Whether to keep reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive or scripted session over a controller.
pub struct Session<'a, D, W> {
    controller: &'a mut GroupController<D>,
    output: W,
    format: OutputFormat,
    prompt: bool,
    mode: Mode,
}

impl<'a, D: UserDirectory, W: Write> Session<'a, D, W> {
    /// Creates a session writing to `output`.
    ///
    /// With `prompt` set, a prompt is written before each line is read.
    pub fn new(
        controller: &'a mut GroupController<D>,
        output: W,
        format: OutputFormat,
        prompt: bool,
    ) -> Self {
        Self {
            controller,
            output,
            format,
            prompt,
            mode: Mode::Command,
        }
    }

    /// Processes lines until `quit` or end of input.
    ///
    /// Returns the number of lines processed.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<usize> {
        let mut lines = input.lines();
        let mut processed = 0;

        loop {
            self.write_prompt()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            processed += 1;

            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }

        self.output.flush()?;
        debug!(lines = processed, "session ended");
        Ok(processed)
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match self.mode.clone() {
            Mode::Command => self.handle_command_line(line),
            Mode::Chat { user_id, group } => {
                self.handle_chat_line(&user_id, &group, line)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_command_line(&mut self, line: &str) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }

        match SessionLine::try_parse_from(split_line(trimmed)) {
            Ok(parsed) => self.dispatch(parsed.command, trimmed),
            Err(err) => {
                let rendered = err.render().to_string();
                self.write(&format_invalid_input(&rendered, self.format))?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs a parsed command; `line` is the raw input it was parsed from.
    fn dispatch(&mut self, command: SessionCommand, line: &str) -> Result<Flow> {
        let format = self.format;

        let out = match command {
            SessionCommand::Create { name, capacity } => {
                format_outcome(&self.controller.create_group(&name, capacity), format)
            }
            SessionCommand::Delete { name } => {
                format_outcome(&self.controller.delete_group(&name), format)
            }
            SessionCommand::Groups => format_group_list(
                self.controller.groups(),
                self.controller.selected_group().map(|g| g.name()),
                format,
            ),
            SessionCommand::Select { name } => {
                format_outcome(&self.controller.select_group(&name), format)
            }
            SessionCommand::Current => format_selected(self.controller.selected_group(), format),
            SessionCommand::Add { group, user_id } => format_outcome(
                &self.controller.add_user_to_group(&group, &user_id),
                format,
            ),
            SessionCommand::Remove { group, user_id } => format_outcome(
                &self.controller.remove_user_from_group(&group, &user_id),
                format,
            ),
            SessionCommand::Members { group } => self.members_output(group.as_deref()),
            SessionCommand::Messages { group } => self.messages_output(group.as_deref()),
            // The text is taken verbatim from the line, not from the split words.
            SessionCommand::Send { user_id, .. } => format_outcome(
                &self.controller.send_message(&user_id, rest_of_line(line, 2)),
                format,
            ),
            SessionCommand::Member { user_id, group } => {
                self.membership_output(&user_id, group.as_deref())
            }
            SessionCommand::Chat { user_id } => self.enter_chat(user_id),
            SessionCommand::Users => {
                let users: Vec<_> = self.controller.directory().users().iter().collect();
                format_users_line(&users, format)
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        };

        self.write(&out)?;
        Ok(Flow::Continue)
    }

    fn members_output(&self, group: Option<&str>) -> String {
        match self.controller.group_members(group) {
            Ok(members) => format_members(self.target_name(group), members, self.format),
            Err(err) => format_failure(&err, self.format),
        }
    }

    fn messages_output(&self, group: Option<&str>) -> String {
        match self.controller.group_messages(group) {
            Ok(messages) => format_messages(self.target_name(group), messages, self.format),
            Err(err) => format_failure(&err, self.format),
        }
    }

    fn membership_output(&self, user_id: &str, group: Option<&str>) -> String {
        match self.controller.is_member(user_id, group) {
            Ok(member) => {
                format_membership(user_id, self.target_name(group), member, self.format)
            }
            Err(err) => format_failure(&err, self.format),
        }
    }

    /// Name of the explicitly given group, or of the selection.
    fn target_name<'n>(&'n self, group: Option<&'n str>) -> &'n str {
        group
            .or_else(|| self.controller.selected_group().map(|g| g.name()))
            .unwrap_or_default()
    }

    /// Switches to chat mode if `user_id` is a member of the selected group.
    fn enter_chat(&mut self, user_id: String) -> String {
        let format = self.format;

        let member = match self.controller.is_member(&user_id, None) {
            Ok(member) => member,
            Err(err) => return format_failure(&err, format),
        };

        let Some(group) = self.controller.selected_group() else {
            return format_failure(&GroupError::NoGroupSelected, format);
        };
        let group_name = group.name().to_string();

        let user_name = self
            .controller
            .directory()
            .get_user_by_id(&user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();

        if !member {
            return format_failure(
                &GroupError::NotMember {
                    user: user_name,
                    group: group_name,
                },
                format,
            );
        }

        let mut out = format_messages(&group_name, group.messages(), format);
        out.push_str(&format_outcome(
            &Ok(format!(
                "Welcome to the chat, {user_name}! Type {CHAT_MEMBERS} to list members, {CHAT_LEAVE} to leave."
            )),
            format,
        ));

        debug!(group = %group_name, user = %user_id, "entered chat");
        self.mode = Mode::Chat {
            user_id,
            group: group_name,
        };
        out
    }

    fn handle_chat_line(&mut self, user_id: &str, group: &str, line: &str) -> Result<()> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        if trimmed == CHAT_LEAVE {
            self.mode = Mode::Command;
            let out = format_outcome(&Ok(format!("Left the chat of {group}")), self.format);
            return self.write(&out);
        }

        if trimmed == CHAT_MEMBERS {
            let out = self.members_output(Some(group));
            return self.write(&out);
        }

        let outcome = self.controller.send_message(user_id, line);
        match (&outcome, self.format) {
            // Posted lines are not echoed back in text mode.
            (Ok(_), OutputFormat::Text) => Ok(()),
            _ => {
                let out = format_outcome(&outcome, self.format);
                self.write(&out)
            }
        }
    }

    fn write_prompt(&mut self) -> Result<()> {
        if !self.prompt {
            return Ok(());
        }
        match &self.mode {
            Mode::Command => write!(self.output, "> ")?,
            Mode::Chat { group, .. } => write!(self.output, "[{group}] > ")?,
        }
        self.output.flush()?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserRecord;
    use crate::directory::MemoryDirectory;
    use crate::registry::Registry;
    use std::io::Cursor;

    fn controller() -> GroupController<MemoryDirectory> {
        let directory = MemoryDirectory::from_records([
            UserRecord::new("1", "Ana", "ana@example.com"),
            UserRecord::new("2", "Bruno", "bruno@example.com"),
        ])
        .unwrap();
        GroupController::new(directory, Registry::new())
    }

    fn run_script(
        ctl: &mut GroupController<MemoryDirectory>,
        script: &str,
        format: OutputFormat,
    ) -> String {
        let mut out = Vec::new();
        Session::new(ctl, &mut out, format, false)
            .run(Cursor::new(script))
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_basic_script() {
        let mut ctl = controller();
        let out = run_script(
            &mut ctl,
            "create Calc1 -c 2\nadd Calc1 1\nselect Calc1\nsend 1 hello there\nmessages\n",
            OutputFormat::Text,
        );

        assert!(out.contains("Group 'Calc1' created"));
        assert!(out.contains("User Ana added to group Calc1"));
        assert!(out.contains("Ana: hello there"));
        assert_eq!(ctl.group_messages(Some("Calc1")).unwrap().len(), 1);
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let mut ctl = controller();
        let out = run_script(&mut ctl, "# setup\n\n   \ngroups\n", OutputFormat::Text);
        assert_eq!(out, "No groups found.\n");
    }

    #[test]
    fn test_failures_do_not_stop_session() {
        let mut ctl = controller();
        let out = run_script(
            &mut ctl,
            "send 1 hi\nbogus\ncreate Calc1\n",
            OutputFormat::Text,
        );
        assert!(out.contains("Failed (NoGroupSelected)"));
        assert!(out.contains("Group 'Calc1' created"));
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut ctl = controller();
        let mut out = Vec::new();
        let processed = Session::new(&mut ctl, &mut out, OutputFormat::Text, false)
            .run(Cursor::new("create A\nquit\ncreate B\n"))
            .unwrap();
        assert_eq!(processed, 2);
        assert!(ctl.group("A").is_some());
        assert!(ctl.group("B").is_none());
    }

    #[test]
    fn test_chat_mode() {
        let mut ctl = controller();
        let out = run_script(
            &mut ctl,
            "create Calc1\nadd Calc1 1\nselect Calc1\nchat 1\nhello\n/members\nsecond line\n/leave\nmessages\n",
            OutputFormat::Text,
        );

        assert!(out.contains("Welcome to the chat, Ana!"));
        assert!(out.contains("1. Ana (ana@example.com)"));
        assert!(out.contains("Left the chat of Calc1"));
        let contents: Vec<_> = ctl
            .group_messages(Some("Calc1"))
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, ["hello", "second line"]);
    }

    #[test]
    fn test_chat_requires_membership() {
        let mut ctl = controller();
        let out = run_script(
            &mut ctl,
            "chat 1\ncreate Calc1\nselect Calc1\nchat 2\nmessages\n",
            OutputFormat::Text,
        );
        assert!(out.contains("Failed (NoGroupSelected)"));
        assert!(out.contains("Failed (NotMember)"));
        // Still in command mode: "messages" was read as a command.
        assert!(out.contains("No messages in Calc1."));
    }

    #[test]
    fn test_json_lines() {
        let mut ctl = controller();
        let out = run_script(&mut ctl, "create Calc1\ncreate Calc1\n", OutputFormat::Json);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["success"], true);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["kind"], "DuplicateName");
    }

    fn contents(ctl: &GroupController<MemoryDirectory>) -> Vec<String> {
        ctl.group_messages(Some("Calc1"))
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect()
    }

    #[test]
    fn test_send_keeps_text_as_written() {
        let mut ctl = controller();
        run_script(
            &mut ctl,
            "create Calc1\nadd Calc1 1\nselect Calc1\nsend 1 it's a test\nsend 1 two  spaces, \"quoted\"\n",
            OutputFormat::Text,
        );
        assert_eq!(contents(&ctl), ["it's a test", "two  spaces, \"quoted\""]);
    }

    #[test]
    fn test_json_session_users_is_one_line() {
        let mut ctl = controller();
        let out = run_script(&mut ctl, "users\ngroups\ncreate Calc1\n", OutputFormat::Json);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(serde_json::from_str::<serde_json::Value>(line).is_ok(), "{line}");
        }

        let users: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(users[1]["name"], "Bruno");
    }

    #[test]
    fn test_chat_strips_carriage_return() {
        let mut ctl = controller();
        run_script(
            &mut ctl,
            "create Calc1\r\nadd Calc1 1\r\nselect Calc1\r\nchat 1\r\nhello\r\nbye\r",
            OutputFormat::Text,
        );
        assert_eq!(contents(&ctl), ["hello", "bye"]);
    }

    #[test]
    fn test_prompt_written() {
        let mut ctl = controller();
        let mut out = Vec::new();
        Session::new(&mut ctl, &mut out, OutputFormat::Text, true)
            .run(Cursor::new("groups\n"))
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("> No groups found."));
    }
}
