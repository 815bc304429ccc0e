//! Session state owned by the chat controller
//!
//! Holds the conversation identifier, the staged file, and the send phase.
//! The phase is the single-flight guard: a send may only begin from
//! [`SendPhase::Idle`].

use crate::api::UploadedFile;
use crate::format::format_file_size;
use std::fmt;

/// Where the send state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPhase {
    /// No request outstanding; sends are accepted
    #[default]
    Idle,
    /// A chat request is in flight; further sends are rejected
    Sending,
}

impl fmt::Display for SendPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Sending => write!(f, "sending"),
        }
    }
}

/// A file uploaded to the server and waiting to ride along with the next message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub file_id: String,
    pub filename: String,
    pub size: u64,
}

impl StagedFile {
    /// Text of the preview chip, e.g. `notes.txt (1.5 KB)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.filename, format_file_size(self.size))
    }
}

impl From<UploadedFile> for StagedFile {
    fn from(file: UploadedFile) -> Self {
        Self {
            file_id: file.file_id,
            filename: file.filename,
            size: file.size,
        }
    }
}

/// Mutable session state for one chat view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Server-issued conversation identifier; the latest reply always wins
    pub conversation_id: Option<String>,
    /// File to attach to the next outgoing message
    pub staged_file: Option<StagedFile>,
    /// Send state machine
    pub phase: SendPhase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sending(&self) -> bool {
        self.phase == SendPhase::Sending
    }

    /// Forget the conversation and staged file
    ///
    /// The phase is left alone: a request already in flight still resolves.
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.staged_file = None;
    }
}
