//! ChatClone - client library for the Enkay LLM ChatClone chat server
//!
//! This library provides the chat view controller, the HTTP client for the
//! chat API, and the pure rendering used by the `chatclone` binary.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: Wire types, the `ChatApi` trait, and its reqwest implementation
//! - `controller`: Send and upload flows over session state and transcript
//! - `session`: Conversation id, staged file, and the send state machine
//! - `transcript`: Messages in arrival order
//! - `render`: Pure view-to-render-tree mapping (HTML and terminal output)
//! - `markup`: Inline markup transform for message bodies
//! - `sidebar`: Responsive sidebar state
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatclone::api::HttpChatApi;
//! use chatclone::{ChatController, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let api = HttpChatApi::new(&config.server)?;
//!     let mut chat = ChatController::new(Box::new(api), &config);
//!     chat.send("Hello!").await;
//!     println!("{}", chat.render().to_html());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod markup;
pub mod render;
pub mod session;
pub mod sidebar;
pub mod transcript;

// Re-export commonly used types
pub use api::{ChatApi, HttpChatApi};
pub use config::Config;
pub use controller::{ChatController, PendingSend, SendOutcome, UploadOutcome};
pub use error::{ChatCloneError, Result};
pub use session::{SendPhase, SessionState, StagedFile};
pub use transcript::{Message, Sender};

#[cfg(test)]
pub mod test_utils;
