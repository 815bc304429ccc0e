//! HTTP implementation of [`ChatApi`]
//!
//! Talks to the chat server with reqwest: JSON for plain messages, multipart
//! forms for file-bearing messages and uploads. Any failure is mapped to
//! `ChatCloneError::RequestFailed`; error bodies are never inspected.

use crate::api::{
    ChatApi, ChatReply, ChatRequest, FileChatRequest, FileUpload, HistoryEntry, HistoryResponse,
    UploadedFile, CHAT_ENDPOINT, CHAT_WITH_FILE_ENDPOINT, CONVERSATIONS_ENDPOINT, UPLOAD_ENDPOINT,
};
use crate::config::ServerConfig;
use crate::error::{ChatCloneError, Result};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// reqwest-backed chat server client
///
/// # Examples
///
/// ```
/// use chatclone::api::HttpChatApi;
/// use chatclone::config::ServerConfig;
///
/// let api = HttpChatApi::new(&ServerConfig::default()).unwrap();
/// assert_eq!(api.base_url().as_str(), "http://localhost:8000/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: Url,
}

impl HttpChatApi {
    /// Create a client for the configured server
    ///
    /// No timeout is applied unless `timeout_seconds` is set.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            ChatCloneError::Config(format!("Invalid server URL {}: {}", config.base_url, e))
        })?;
        // Relative joins drop the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(ChatCloneError::Http)?;

        tracing::info!(
            "Initialized chat API client: base_url={}, timeout={:?}",
            base_url,
            config.timeout_seconds
        );

        Ok(Self { client, base_url })
    }

    /// Base URL all endpoints are resolved against (always ends with `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an `/api/...` endpoint against the base URL
    ///
    /// # Errors
    ///
    /// Returns error if the joined URL is invalid
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ChatCloneError::request_failed(endpoint, format!("bad URL: {}", e)).into())
    }

    fn transport_error(endpoint: &str, error: reqwest::Error) -> anyhow::Error {
        tracing::error!("Request to {} failed: {}", endpoint, error);
        ChatCloneError::request_failed(endpoint, error.to_string()).into()
    }

    async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::error!("Server returned {} for {}", status, endpoint);
            return Err(
                ChatCloneError::request_failed(endpoint, format!("server returned {}", status))
                    .into(),
            );
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", endpoint, e);
            ChatCloneError::request_failed(endpoint, format!("invalid response body: {}", e))
                .into()
        })
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint_url(CHAT_ENDPOINT)?;
        tracing::debug!(
            "Sending chat message: {} chars, conversation={:?}, research={}",
            request.message.len(),
            request.conversation_id,
            request.use_research
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(CHAT_ENDPOINT, e))?;

        Self::read_json(CHAT_ENDPOINT, response).await
    }

    async fn send_message_with_file(&self, request: &FileChatRequest) -> Result<ChatReply> {
        let url = self.endpoint_url(CHAT_WITH_FILE_ENDPOINT)?;
        tracing::debug!(
            "Sending chat message with file {}: conversation={:?}, research={}",
            request.file_id,
            request.conversation_id,
            request.use_research
        );

        let mut form = Form::new()
            .text("message", request.message.clone())
            .text("file_id", request.file_id.clone())
            .text("use_research", request.use_research.to_string());
        if let Some(conversation_id) = &request.conversation_id {
            form = form.text("conversation_id", conversation_id.clone());
        }

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::transport_error(CHAT_WITH_FILE_ENDPOINT, e))?;

        Self::read_json(CHAT_WITH_FILE_ENDPOINT, response).await
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<UploadedFile> {
        let url = self.endpoint_url(UPLOAD_ENDPOINT)?;
        tracing::debug!(
            "Uploading {} ({} bytes)",
            upload.filename,
            upload.bytes.len()
        );

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone())
            .mime_str(&upload.mime_type())
            .map_err(|e| Self::transport_error(UPLOAD_ENDPOINT, e))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::transport_error(UPLOAD_ENDPOINT, e))?;

        let uploaded: UploadedFile = Self::read_json(UPLOAD_ENDPOINT, response).await?;
        tracing::info!(
            "Uploaded {} as {} ({} bytes)",
            uploaded.filename,
            uploaded.file_id,
            uploaded.size
        );
        Ok(uploaded)
    }

    async fn conversation_history(&self, conversation_id: &str) -> Result<Vec<HistoryEntry>> {
        let mut url = self.endpoint_url(CONVERSATIONS_ENDPOINT)?;
        url.path_segments_mut()
            .map_err(|_| {
                ChatCloneError::request_failed(CONVERSATIONS_ENDPOINT, "base URL cannot hold a path")
            })?
            .push(conversation_id);
        tracing::debug!("Fetching conversation history: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::transport_error(CONVERSATIONS_ENDPOINT, e))?;

        let history: HistoryResponse = Self::read_json(CONVERSATIONS_ENDPOINT, response).await?;
        Ok(history.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(base_url: &str) -> ServerConfig {
        ServerConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_normalizes_trailing_slash() {
        let api = HttpChatApi::new(&server("http://localhost:8000")).unwrap();
        assert_eq!(api.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_endpoint_url_keeps_path_prefix() {
        let api = HttpChatApi::new(&server("https://example.com/chat")).unwrap();
        let url = api.endpoint_url(CHAT_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "https://example.com/chat/api/chat");
    }

    #[test]
    fn test_endpoint_url_root() {
        let api = HttpChatApi::new(&server("http://127.0.0.1:9000/")).unwrap();
        let url = api.endpoint_url(CHAT_WITH_FILE_ENDPOINT).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/chat-with-file");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = HttpChatApi::new(&server("::nope::")).unwrap_err();
        assert!(err.to_string().contains("Invalid server URL"));
    }

    #[test]
    fn test_new_with_timeout() {
        let config = ServerConfig {
            timeout_seconds: Some(5),
            ..Default::default()
        };
        assert!(HttpChatApi::new(&config).is_ok());
    }

    #[test]
    fn test_bad_user_agent_is_http_error() {
        let config = ServerConfig {
            user_agent: "chatclone\nbroken".to_string(),
            ..Default::default()
        };
        let err = HttpChatApi::new(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatCloneError>(),
            Some(ChatCloneError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_failed() {
        // Port 9 (discard) on localhost is closed in CI sandboxes
        let api = HttpChatApi::new(&server("http://127.0.0.1:9")).unwrap();
        let request = ChatRequest {
            message: "hello".to_string(),
            conversation_id: None,
            use_research: false,
        };

        let err = api.send_message(&request).await.unwrap_err();
        let typed = err.downcast_ref::<ChatCloneError>();
        assert!(matches!(
            typed,
            Some(ChatCloneError::RequestFailed { endpoint, .. }) if endpoint == CHAT_ENDPOINT
        ));
    }
}
