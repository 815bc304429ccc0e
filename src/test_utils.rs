//! Test utilities for ChatClone
//!
//! Provides [`FakeChatApi`], a scripted in-memory [`ChatApi`] that records
//! every call, plus small helpers shared by unit tests.

use crate::api::{
    ChatApi, ChatReply, ChatRequest, FileChatRequest, FileUpload, HistoryEntry, UploadedFile,
    CHAT_ENDPOINT, CHAT_WITH_FILE_ENDPOINT, UPLOAD_ENDPOINT,
};
use crate::error::{ChatCloneError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call observed by [`FakeChatApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Chat(ChatRequest),
    ChatWithFile(FileChatRequest),
    Upload(String),
    History(String),
}

#[derive(Debug)]
enum Scripted {
    Reply(ChatReply),
    Upload(UploadedFile),
    Fail,
}

#[derive(Debug, Default)]
struct FakeState {
    script: VecDeque<Scripted>,
    calls: Vec<RecordedCall>,
}

/// Scripted chat API
///
/// Responses are consumed in the order they were scripted. A call with
/// nothing suitable left in the script fails like a server error would.
#[derive(Debug, Clone, Default)]
pub struct FakeChatApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful chat reply
    pub fn reply_with(&self, response: &str, conversation_id: &str) {
        self.push(Scripted::Reply(ChatReply {
            response: response.to_string(),
            conversation_id: conversation_id.to_string(),
        }));
    }

    /// Queue a successful upload
    pub fn upload_with(&self, file_id: &str, filename: &str, size: u64) {
        self.push(Scripted::Upload(UploadedFile {
            file_id: file_id.to_string(),
            filename: filename.to_string(),
            size,
            content_preview: None,
            file_type: None,
        }));
    }

    /// Queue a failure for the next chat or upload call
    pub fn fail_next(&self) {
        self.push(Scripted::Fail);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    fn push(&self, scripted: Scripted) {
        self.lock().script.push_back(scripted);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake api state poisoned")
    }

    fn next_reply(&self, endpoint: &str, call: RecordedCall) -> Result<ChatReply> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.script.pop_front() {
            Some(Scripted::Reply(reply)) => Ok(reply),
            _ => Err(ChatCloneError::request_failed(endpoint, "server returned 500").into()),
        }
    }
}

#[async_trait]
impl ChatApi for FakeChatApi {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.next_reply(CHAT_ENDPOINT, RecordedCall::Chat(request.clone()))
    }

    async fn send_message_with_file(&self, request: &FileChatRequest) -> Result<ChatReply> {
        self.next_reply(
            CHAT_WITH_FILE_ENDPOINT,
            RecordedCall::ChatWithFile(request.clone()),
        )
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<UploadedFile> {
        let mut state = self.lock();
        state
            .calls
            .push(RecordedCall::Upload(upload.filename.clone()));
        match state.script.pop_front() {
            Some(Scripted::Upload(file)) => Ok(file),
            _ => Err(ChatCloneError::request_failed(UPLOAD_ENDPOINT, "server returned 400").into()),
        }
    }

    async fn conversation_history(&self, conversation_id: &str) -> Result<Vec<HistoryEntry>> {
        self.lock()
            .calls
            .push(RecordedCall::History(conversation_id.to_string()));
        Ok(Vec::new())
    }
}

/// Assert that an error's message contains `expected`
pub fn assert_error_contains<T: std::fmt::Debug>(result: Result<T>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error containing '{}' but got Ok({:?})", expected, value),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_replies_in_script_order() {
        let api = FakeChatApi::new();
        api.reply_with("one", "c-1");
        api.fail_next();

        let request = ChatRequest {
            message: "hi".to_string(),
            conversation_id: None,
            use_research: false,
        };
        assert_eq!(api.send_message(&request).await.unwrap().response, "one");
        assert_error_contains(api.send_message(&request).await, "server returned 500");
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_fake_upload_without_script_fails() {
        let api = FakeChatApi::new();
        let result = api.upload_file(&FileUpload::new("a.txt", "x")).await;
        assert_error_contains(result, "/api/upload");
        assert_eq!(api.calls(), vec![RecordedCall::Upload("a.txt".to_string())]);
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> = Err(ChatCloneError::Config("different".to_string()).into());
        assert_error_contains(result, "not present");
    }
}
