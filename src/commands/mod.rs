/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`: Interactive chat session
- `send`: Send one message and print the reply
- `upload`: Upload one file and print its descriptor

Each handler builds an [`HttpChatApi`] from configuration and drives a
[`ChatController`]; the controller owns all chat state.
*/

use crate::api::{FileUpload, HttpChatApi};
use crate::config::Config;
use crate::controller::{ChatController, SendOutcome, UploadOutcome};
use crate::error::{ChatCloneError, Result};
use crate::render::terminal_message;
use crate::transcript::Sender;
use colored::Colorize;

// Special commands parser for the interactive session
pub mod special_commands;

fn build_controller(config: &Config) -> Result<ChatController> {
    let api = HttpChatApi::new(&config.server)?;
    Ok(ChatController::new(Box::new(api), config))
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Runs a readline loop: special commands act on the controller,
    //! everything else is sent as a chat message.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `research` - Start with research mode enabled
    pub async fn run_chat(config: Config, research: bool) -> Result<()> {
        tracing::info!("Starting interactive chat session");

        let mut controller = build_controller(&config)?;
        if research {
            controller.set_research(true);
        }

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config, &controller);

        loop {
            let prompt = format_prompt(&controller);
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::NewChat => {
                            controller.new_chat();
                            println!("{}\n", "Started a new chat".green());
                            continue;
                        }
                        SpecialCommand::Upload(path) => {
                            upload_into(&mut controller, &path).await;
                            continue;
                        }
                        SpecialCommand::RemoveFile => {
                            match controller.remove_file() {
                                Some(file) => println!("Removed {}\n", file.label()),
                                None => println!("No file staged\n"),
                            }
                            continue;
                        }
                        SpecialCommand::Research(setting) => {
                            let enabled = setting.unwrap_or(!controller.use_research());
                            controller.set_research(enabled);
                            println!(
                                "Research mode {}\n",
                                if enabled { "enabled".green() } else { "disabled".yellow() }
                            );
                            continue;
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&controller);
                            continue;
                        }
                        SpecialCommand::History => {
                            print_history(&controller).await;
                            continue;
                        }
                        SpecialCommand::Sidebar => {
                            let open = controller.toggle_sidebar();
                            println!("Sidebar {}\n", if open { "opened" } else { "closed" });
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {}
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "Thinking...".dimmed());
                    if let Some(outcome) = controller.send(trimmed).await {
                        if let SendOutcome::Failed { reason } = &outcome {
                            tracing::warn!("Send failed: {}", reason);
                        }
                        if let Some(reply) = controller.transcript().last() {
                            println!("\n{}\n", terminal_message(reply));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn upload_into(controller: &mut ChatController, path: &str) {
        println!("{}", "Uploading file...".cyan());
        let upload = match FileUpload::from_path(path).await {
            Ok(upload) => upload,
            Err(e) => {
                eprintln!("{}\n", format!("Error uploading file: {}", e).red());
                return;
            }
        };

        match controller.upload(upload).await {
            UploadOutcome::Staged(file) => {
                println!("{} {}\n", "Attached".green(), file.label());
            }
            UploadOutcome::Failed { .. } => {
                if let Some(alert) = controller.take_alert() {
                    eprintln!("{}\n", alert.red());
                }
            }
        }
    }

    async fn print_history(controller: &ChatController) {
        match controller.history().await {
            Ok(entries) if entries.is_empty() => println!("No history yet\n"),
            Ok(entries) => {
                for entry in entries {
                    let role = match entry.role.as_str() {
                        "user" => entry.role.cyan(),
                        _ => entry.role.green(),
                    };
                    println!("{}: {}", role, entry.content);
                }
                println!();
            }
            Err(e) => eprintln!("{}\n", format!("Could not load history: {}", e).red()),
        }
    }

    fn format_prompt(controller: &ChatController) -> String {
        let mut tags = Vec::new();
        if controller.use_research() {
            tags.push(format!("[{}]", "RESEARCH".purple()));
        }
        if let Some(file) = controller.staged_file() {
            tags.push(format!("[{}]", file.filename.yellow()));
        }
        if tags.is_empty() {
            ">> ".to_string()
        } else {
            format!("{} >> ", tags.join(" "))
        }
    }

    /// Display welcome banner at the start of interactive chat
    fn print_welcome_banner(config: &Config, controller: &ChatController) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║  {:<60}║", config.chat.welcome_title);
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Server:   {}", config.server.base_url);
        println!(
            "Research: {}\n",
            if controller.use_research() { "on" } else { "off" }
        );
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display the current session state (`/status`)
    fn print_status_display(controller: &ChatController) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     ChatClone Session Status                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Conversation:  {}",
            controller.conversation_id().unwrap_or("(new)")
        );
        println!(
            "Staged file:   {}",
            controller
                .staged_file()
                .map(|f| f.label())
                .unwrap_or_else(|| "(none)".to_string())
        );
        println!(
            "Research mode: {}",
            if controller.use_research() { "on" } else { "off" }
        );
        println!("Messages:      {}", controller.transcript().len());
        println!(
            "Sidebar:       {}",
            if controller.sidebar().is_open() { "open" } else { "closed" }
        );
        println!();
    }
}

// One-shot send handler
pub mod send {
    //! Send a single message, optionally with a file, and print the reply.

    use super::*;
    use std::path::PathBuf;

    /// Options for a one-shot send
    #[derive(Debug, Clone, Default)]
    pub struct SendArgs {
        pub message: String,
        pub file: Option<PathBuf>,
        pub conversation: Option<String>,
        pub research: bool,
        pub json: bool,
    }

    /// Run the `send` command
    ///
    /// # Errors
    ///
    /// Returns error if the upload or the send fails, after printing the
    /// same fallback text the interactive session would show
    pub async fn run_send(config: Config, args: SendArgs) -> Result<()> {
        let mut controller = build_controller(&config)?;
        if args.research {
            controller.set_research(true);
        }
        if let Some(conversation) = &args.conversation {
            controller.resume(conversation.clone());
        }

        if args.message.trim().is_empty() {
            return Err(ChatCloneError::InvalidInput("Message cannot be empty".to_string()).into());
        }

        if let Some(path) = &args.file {
            let upload = FileUpload::from_path(path).await?;
            if let UploadOutcome::Failed { reason } = controller.upload(upload).await {
                if let Some(alert) = controller.take_alert() {
                    eprintln!("{}", alert.red());
                }
                return Err(anyhow::anyhow!(reason));
            }
        }

        let outcome = controller.send(&args.message).await.ok_or_else(|| {
            ChatCloneError::InvalidInput("Message cannot be empty".to_string())
        })?;

        let reply = controller
            .transcript()
            .last()
            .filter(|m| m.sender == Sender::Assistant)
            .cloned();

        match outcome {
            SendOutcome::Replied { conversation_id } => {
                if args.json {
                    let body = serde_json::json!({
                        "response": reply.map(|m| m.content).unwrap_or_default(),
                        "conversation_id": conversation_id,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                } else {
                    if let Some(reply) = reply {
                        println!("{}", reply.content);
                    }
                    eprintln!("{} {}", "conversation:".dimmed(), conversation_id);
                }
                Ok(())
            }
            SendOutcome::Failed { reason } => {
                if let Some(reply) = reply {
                    eprintln!("{}", reply.content.red());
                }
                // reason already names the endpoint that was called
                Err(anyhow::anyhow!(reason))
            }
        }
    }
}

// One-shot upload handler
pub mod upload {
    //! Upload a file and print the server descriptor.

    use super::*;
    use std::path::Path;

    /// Run the `upload` command
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the upload fails
    pub async fn run_upload(config: Config, path: &Path, json: bool) -> Result<()> {
        let mut controller = build_controller(&config)?;
        let upload = FileUpload::from_path(path).await?;

        match controller.upload(upload).await {
            UploadOutcome::Staged(file) => {
                if json {
                    let body = serde_json::json!({
                        "file_id": file.file_id,
                        "filename": file.filename,
                        "size": file.size,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                } else {
                    println!("{} {}", file.label(), format!("[{}]", file.file_id).dimmed());
                }
                Ok(())
            }
            UploadOutcome::Failed { reason } => {
                if let Some(alert) = controller.take_alert() {
                    eprintln!("{}", alert.red());
                }
                Err(anyhow::anyhow!(reason))
            }
        }
    }
}
