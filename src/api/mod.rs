//! Chat server API abstraction
//!
//! This module defines the wire types exchanged with the chat server and the
//! [`ChatApi`] trait the controller talks through. [`HttpChatApi`] is the
//! reqwest-backed implementation; tests substitute their own.

pub mod http;

pub use http::HttpChatApi;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Endpoint for plain chat messages
pub const CHAT_ENDPOINT: &str = "/api/chat";
/// Endpoint for chat messages carrying a previously uploaded file
pub const CHAT_WITH_FILE_ENDPOINT: &str = "/api/chat-with-file";
/// Endpoint for file uploads
pub const UPLOAD_ENDPOINT: &str = "/api/upload";
/// Endpoint prefix for conversation history lookups
pub const CONVERSATIONS_ENDPOINT: &str = "/api/conversations";

/// JSON body of `POST /api/chat`
///
/// `conversation_id` is serialized as `null` when no conversation exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
    pub use_research: bool,
}

/// Multipart body of `POST /api/chat-with-file`
///
/// `conversation_id` is left out of the form entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChatRequest {
    pub message: String,
    pub file_id: String,
    pub use_research: bool,
    pub conversation_id: Option<String>,
}

/// Reply to either chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant text
    pub response: String,
    /// Conversation identifier to use for the next request
    pub conversation_id: String,
}

/// A local file about to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Create an upload from in-memory contents
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, using its final path component as the filename
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(crate::error::ChatCloneError::from)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { filename, bytes })
    }

    /// MIME type guessed from the filename extension
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

/// Descriptor returned by `POST /api/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_id: String,
    pub filename: String,
    pub size: u64,
    /// First characters of the extracted text, when the server provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
    /// Server-reported content type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// One stored turn of a conversation, as returned by the history endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
}

/// Operations the chat server exposes to the client
///
/// Every method fails with [`crate::error::ChatCloneError::RequestFailed`] on
/// a network error, a non-2xx status, or an unparseable body. Implementations
/// do not retry.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/chat`
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// `POST /api/chat-with-file`
    async fn send_message_with_file(&self, request: &FileChatRequest) -> Result<ChatReply>;

    /// `POST /api/upload`
    async fn upload_file(&self, upload: &FileUpload) -> Result<UploadedFile>;

    /// `GET /api/conversations/{id}`
    async fn conversation_history(&self, conversation_id: &str) -> Result<Vec<HistoryEntry>>;
}
