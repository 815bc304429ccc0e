//! Chat view controller
//!
//! Owns the session state and transcript, drives the send and upload flows
//! against a [`ChatApi`], and exposes a [`ChatView`] snapshot for rendering.
//!
//! A send is split into a synchronous [`ChatController::begin_send`] (state
//! transition, user bubble, indicator) and [`ChatController::complete_send`]
//! (reply or fallback bubble). [`ChatController::send`] chains the two around
//! the API call. The split makes the single-flight guard observable: while a
//! [`PendingSend`] exists the controller rejects further sends.

use crate::api::{ChatApi, ChatReply, ChatRequest, FileChatRequest, FileUpload, HistoryEntry};
use crate::config::Config;
use crate::error::Result;
use crate::render::{render, ChatView, RenderTree};
use crate::session::{SendPhase, SessionState, StagedFile};
use crate::sidebar::{ClickTarget, Sidebar};
use crate::transcript::{Message, Transcript};

/// Overlay text shown while an upload is in flight
pub const UPLOADING_TEXT: &str = "Uploading file...";

/// A send that has been accepted but not yet answered
///
/// Produced by [`ChatController::begin_send`], consumed by
/// [`ChatController::complete_send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub message: String,
    /// Staged file taken out of the session for this message
    pub file: Option<StagedFile>,
    pub conversation_id: Option<String>,
    pub use_research: bool,
}

/// How a completed send ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant replied; the session now uses `conversation_id`
    Replied { conversation_id: String },
    /// The request failed; the fallback bubble was appended
    Failed { reason: String },
}

/// How an upload ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file is staged for the next message
    Staged(StagedFile),
    /// Nothing staged; an alert was raised
    Failed { reason: String },
}

/// Controller for one chat view
pub struct ChatController {
    api: Box<dyn ChatApi>,
    session: SessionState,
    transcript: Transcript,
    draft: String,
    use_research: bool,
    loading: Option<String>,
    alert: Option<String>,
    sidebar: Sidebar,
    fallback_message: String,
    welcome_title: String,
}

impl ChatController {
    /// Create a controller using chat and UI settings from `config`
    pub fn new(api: Box<dyn ChatApi>, config: &Config) -> Self {
        Self {
            api,
            session: SessionState::new(),
            transcript: Transcript::new(),
            draft: String::new(),
            use_research: config.chat.use_research,
            loading: None,
            alert: None,
            sidebar: Sidebar::new(config.ui.sidebar_breakpoint),
            fallback_message: config.chat.fallback_message.clone(),
            welcome_title: config.chat.welcome_title.clone(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.session.conversation_id.as_deref()
    }

    /// Continue a server-side conversation from here on
    pub fn resume(&mut self, conversation_id: impl Into<String>) {
        let conversation_id = conversation_id.into();
        tracing::info!("Resuming conversation {}", conversation_id);
        self.session.conversation_id = Some(conversation_id);
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.session.staged_file.as_ref()
    }

    pub fn use_research(&self) -> bool {
        self.use_research
    }

    pub fn set_research(&mut self, enabled: bool) {
        self.use_research = enabled;
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the composer text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether a send of `input` would be accepted right now
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.session.is_sending()
    }

    /// Whether the send control is enabled for the current draft
    pub fn send_enabled(&self) -> bool {
        self.can_send(&self.draft)
    }

    pub fn is_sending(&self) -> bool {
        self.session.is_sending()
    }

    /// Enter the sending state
    ///
    /// Returns `None` without touching any state when the trimmed input is
    /// empty or a send is already outstanding. Otherwise clears the draft,
    /// appends the user message, shows the indicator, and takes the staged
    /// file so it rides on this message only.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let message = input.trim();
        if message.is_empty() {
            tracing::debug!("Ignoring empty send");
            return None;
        }
        if self.session.is_sending() {
            tracing::debug!("Ignoring send while a reply is outstanding");
            return None;
        }

        self.draft.clear();
        self.session.phase = SendPhase::Sending;
        self.transcript.push(Message::user(message));

        let pending = PendingSend {
            message: message.to_string(),
            file: self.session.staged_file.take(),
            conversation_id: self.session.conversation_id.clone(),
            use_research: self.use_research,
        };
        tracing::debug!(
            "Send accepted: {} chars, file={:?}, research={}",
            pending.message.len(),
            pending.file.as_ref().map(|f| f.file_id.as_str()),
            pending.use_research
        );
        Some(pending)
    }

    /// Issue the request for an accepted send
    ///
    /// Routes to the multipart endpoint when a file is attached.
    pub async fn dispatch(&self, pending: &PendingSend) -> Result<ChatReply> {
        match &pending.file {
            Some(file) => {
                let request = FileChatRequest {
                    message: pending.message.clone(),
                    file_id: file.file_id.clone(),
                    use_research: pending.use_research,
                    conversation_id: pending.conversation_id.clone(),
                };
                self.api.send_message_with_file(&request).await
            }
            None => {
                let request = ChatRequest {
                    message: pending.message.clone(),
                    conversation_id: pending.conversation_id.clone(),
                    use_research: pending.use_research,
                };
                self.api.send_message(&request).await
            }
        }
    }

    /// Leave the sending state with the request's result
    pub fn complete_send(&mut self, pending: PendingSend, result: Result<ChatReply>) -> SendOutcome {
        self.session.phase = SendPhase::Idle;

        match result {
            Ok(reply) => {
                if self.session.conversation_id.as_deref() != Some(reply.conversation_id.as_str())
                {
                    tracing::debug!(
                        "Conversation id now {} (was {:?})",
                        reply.conversation_id,
                        pending.conversation_id
                    );
                }
                self.transcript.push(Message::assistant(reply.response));
                self.session.conversation_id = Some(reply.conversation_id.clone());
                SendOutcome::Replied {
                    conversation_id: reply.conversation_id,
                }
            }
            Err(e) => {
                tracing::error!("Error sending message: {:#}", e);
                self.transcript
                    .push(Message::assistant(self.fallback_message.clone()));
                SendOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Send `input` and wait for the reply
    ///
    /// Returns `None` when the send was rejected (empty input or a send in flight).
    pub async fn send(&mut self, input: &str) -> Option<SendOutcome> {
        let pending = self.begin_send(input)?;
        let result = self.dispatch(&pending).await;
        Some(self.complete_send(pending, result))
    }

    /// Send the current draft
    pub async fn send_draft(&mut self) -> Option<SendOutcome> {
        let draft = std::mem::take(&mut self.draft);
        let outcome = self.send(&draft).await;
        if outcome.is_none() {
            self.draft = draft;
        }
        outcome
    }

    /// Upload a file and stage it for the next message
    ///
    /// The loading overlay is shown for the duration of the request. On
    /// failure an alert is raised and any previously staged file is kept.
    pub async fn upload(&mut self, upload: FileUpload) -> UploadOutcome {
        self.loading = Some(UPLOADING_TEXT.to_string());
        let result = self.api.upload_file(&upload).await;
        self.loading = None;

        match result {
            Ok(uploaded) => {
                let staged = StagedFile::from(uploaded);
                tracing::info!("Staged {} for the next message", staged.label());
                self.session.staged_file = Some(staged.clone());
                UploadOutcome::Staged(staged)
            }
            Err(e) => {
                tracing::error!("Upload error: {:#}", e);
                let reason = e.to_string();
                self.alert = Some(format!("Error uploading file: {}", reason));
                UploadOutcome::Failed { reason }
            }
        }
    }

    /// Discard the staged file
    pub fn remove_file(&mut self) -> Option<StagedFile> {
        self.session.staged_file.take()
    }

    /// Start a fresh conversation
    pub fn new_chat(&mut self) {
        tracing::info!("Starting new chat");
        self.session.reset();
        self.transcript.clear();
        self.draft.clear();
    }

    /// Pending alert for the host to show, if any
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Fetch the server-side history of the current conversation
    ///
    /// Returns an empty list when no conversation has started yet.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        match &self.session.conversation_id {
            Some(id) => self.api.conversation_history(id).await,
            None => Ok(Vec::new()),
        }
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar.toggle()
    }

    pub fn click(&mut self, target: ClickTarget, viewport_width: u32) -> bool {
        self.sidebar.on_click(target, viewport_width)
    }

    pub fn resize(&mut self, viewport_width: u32) -> bool {
        self.sidebar.on_resize(viewport_width)
    }

    /// Snapshot of everything the renderer needs
    pub fn view(&self) -> ChatView<'_> {
        ChatView {
            messages: self.transcript.messages(),
            welcome_title: &self.welcome_title,
            thinking: self.session.is_sending(),
            staged_file: self.session.staged_file.as_ref(),
            loading: self.loading.as_deref(),
            sidebar_open: self.sidebar.is_open(),
            send_enabled: self.send_enabled(),
            use_research: self.use_research,
            revision: self.transcript.revision(),
        }
    }

    pub fn render(&self) -> RenderTree {
        render(&self.view())
    }
}
