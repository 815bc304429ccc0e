//! Special commands parser for interactive chat mode
//!
//! Lines starting with `/` are session commands rather than chat messages:
//! starting a new chat, staging or removing a file, toggling research mode,
//! and so on. Commands are case-insensitive; arguments (file paths) keep
//! their case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Clear the conversation, staged file, and transcript
    NewChat,

    /// Upload a file and stage it for the next message
    Upload(String),

    /// Discard the staged file
    RemoveFile,

    /// Set research mode; `None` flips it
    Research(Option<bool>),

    /// Show session status
    ShowStatus,

    /// Print the server-side history of the current conversation
    History,

    /// Toggle the conversation sidebar
    Sidebar,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the line as a chat message
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError` for unknown commands and bad arguments.
///
/// # Examples
///
/// ```
/// use chatclone::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/new").unwrap(), SpecialCommand::NewChat);
/// assert_eq!(
///     parse_special_command("/research on").unwrap(),
///     SpecialCommand::Research(Some(true))
/// );
/// assert_eq!(parse_special_command("hello").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command.to_lowercase(), arg.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/new" | "/clear" => Ok(SpecialCommand::NewChat),

        "/upload" | "/file" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/upload".to_string(),
                    usage: "/upload <path>".to_string(),
                })
            } else {
                Ok(SpecialCommand::Upload(arg.to_string()))
            }
        }

        "/remove" => Ok(SpecialCommand::RemoveFile),

        "/research" => match arg.to_lowercase().as_str() {
            "" => Ok(SpecialCommand::Research(None)),
            "on" | "enable" => Ok(SpecialCommand::Research(Some(true))),
            "off" | "disable" => Ok(SpecialCommand::Research(Some(false))),
            other => Err(CommandError::UnsupportedArgument {
                command: "/research".to_string(),
                arg: other.to_string(),
            }),
        },

        "/status" => Ok(SpecialCommand::ShowStatus),
        "/history" => Ok(SpecialCommand::History),
        "/sidebar" => Ok(SpecialCommand::Sidebar),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the special command reference
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

SESSION:
  /new             - Start a new chat (clears conversation and transcript)
  /status          - Show conversation, staged file, and research mode
  /history         - Show the server-side history of this conversation
  /sidebar         - Toggle the conversation sidebar

FILES:
  /upload <path>   - Upload a file and attach it to your next message
  /remove          - Discard the staged file

RESEARCH MODE:
  /research        - Toggle research mode
  /research on     - Enable research mode
  /research off    - Disable research mode

OTHER:
  /help            - Show this help
  exit, quit       - Leave the chat
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("what is rust?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_new_chat_aliases() {
        assert_eq!(parse_special_command("/new").unwrap(), SpecialCommand::NewChat);
        assert_eq!(parse_special_command("/CLEAR").unwrap(), SpecialCommand::NewChat);
    }

    #[test]
    fn test_upload_keeps_path_case() {
        assert_eq!(
            parse_special_command("/upload ./Docs/Report Final.PDF").unwrap(),
            SpecialCommand::Upload("./Docs/Report Final.PDF".to_string())
        );
    }

    #[test]
    fn test_upload_requires_path() {
        assert!(matches!(
            parse_special_command("/upload"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_research_variants() {
        assert_eq!(
            parse_special_command("/research").unwrap(),
            SpecialCommand::Research(None)
        );
        assert_eq!(
            parse_special_command("/Research OFF").unwrap(),
            SpecialCommand::Research(Some(false))
        );
        assert!(matches!(
            parse_special_command("/research maybe"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_exit_without_slash() {
        assert_eq!(parse_special_command("exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/quit").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_special_command("/frobnicate").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/frobnicate".to_string()));
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn test_info_commands() {
        assert_eq!(parse_special_command("/status").unwrap(), SpecialCommand::ShowStatus);
        assert_eq!(parse_special_command("/history").unwrap(), SpecialCommand::History);
        assert_eq!(parse_special_command("/sidebar").unwrap(), SpecialCommand::Sidebar);
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/remove").unwrap(), SpecialCommand::RemoveFile);
    }
}
