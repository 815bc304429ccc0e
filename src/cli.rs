//! Command-line interface definition for ChatClone
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot sends, and uploads.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ChatClone - chat with the Enkay LLM ChatClone server from the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "chatclone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the chat server base URL
    #[arg(short, long)]
    pub server: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ChatClone
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Start with research mode enabled
        #[arg(short, long)]
        research: bool,
    },

    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,

        /// Upload this file first and attach it to the message
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Continue an existing conversation
        #[arg(long)]
        conversation: Option<String>,

        /// Enable research mode for this message
        #[arg(short, long)]
        research: bool,

        /// Print the raw server reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a file and print its server descriptor
    Upload {
        /// File to upload
        path: PathBuf,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["chatclone", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { research: false }));
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_chat_with_research() {
        let cli = Cli::try_parse_from(["chatclone", "chat", "--research"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { research: true }));
    }

    #[test]
    fn test_cli_parse_send_with_file() {
        let cli = Cli::try_parse_from([
            "chatclone",
            "--server",
            "http://localhost:9000",
            "send",
            "summarize this",
            "--file",
            "notes.txt",
            "--conversation",
            "abc-123",
        ])
        .unwrap();

        assert_eq!(cli.server, Some("http://localhost:9000".to_string()));
        if let Commands::Send {
            message,
            file,
            conversation,
            research,
            json,
        } = cli.command
        {
            assert_eq!(message, "summarize this");
            assert_eq!(file, Some(PathBuf::from("notes.txt")));
            assert_eq!(conversation, Some("abc-123".to_string()));
            assert!(!research);
            assert!(!json);
        } else {
            panic!("Expected Send command");
        }
    }

    #[test]
    fn test_cli_parse_upload() {
        let cli = Cli::try_parse_from(["chatclone", "upload", "report.pdf", "--json"]).unwrap();
        if let Commands::Upload { path, json } = cli.command {
            assert_eq!(path, PathBuf::from("report.pdf"));
            assert!(json);
        } else {
            panic!("Expected Upload command");
        }
    }

    #[test]
    fn test_cli_send_requires_message() {
        assert!(Cli::try_parse_from(["chatclone", "send"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["chatclone"]).is_err());
    }
}
