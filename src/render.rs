//! Pure rendering of the chat view
//!
//! [`render`] maps a [`ChatView`] snapshot to a [`RenderTree`]. Hosts decide
//! how to show the tree: [`RenderTree::to_html`] emits the fragment a web
//! page would mount, [`terminal_message`] formats a bubble for a terminal.

use crate::markup::{escape_html, format_message};
use crate::session::StagedFile;
use crate::transcript::{Message, Sender};
use colored::Colorize;

/// Everything the renderer needs, borrowed from the controller
#[derive(Debug, Clone, Copy)]
pub struct ChatView<'a> {
    pub messages: &'a [Message],
    pub welcome_title: &'a str,
    /// A reply is outstanding; show the thinking indicator
    pub thinking: bool,
    pub staged_file: Option<&'a StagedFile>,
    /// Text of the blocking loading overlay, if shown
    pub loading: Option<&'a str>,
    pub sidebar_open: bool,
    pub send_enabled: bool,
    pub use_research: bool,
    /// Transcript revision; changes whenever the list should scroll to the end
    pub revision: u64,
}

/// One entry of the scrollable message list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Placeholder shown while the transcript is empty
    Welcome { title: String },
    /// A chat bubble with its formatted HTML body
    Message {
        sender: Sender,
        content: String,
        html: String,
    },
    /// "Thinking" indicator while a reply is outstanding
    Thinking,
}

/// Render output for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTree {
    pub nodes: Vec<Node>,
    /// Preview chip for the staged file
    pub file_chip: Option<String>,
    pub loading: Option<String>,
    pub sidebar_open: bool,
    pub send_enabled: bool,
    pub research_enabled: bool,
    /// Hosts scroll to the last node whenever this value changes
    pub scroll_revision: u64,
}

/// Build the render tree for a view snapshot
pub fn render(view: &ChatView<'_>) -> RenderTree {
    let mut nodes = Vec::with_capacity(view.messages.len() + 1);

    if view.messages.is_empty() && !view.thinking {
        nodes.push(Node::Welcome {
            title: view.welcome_title.to_string(),
        });
    }

    nodes.extend(view.messages.iter().map(|message| Node::Message {
        sender: message.sender,
        content: message.content.clone(),
        html: format_message(&message.content),
    }));

    if view.thinking {
        nodes.push(Node::Thinking);
    }

    RenderTree {
        nodes,
        file_chip: view.staged_file.map(StagedFile::label),
        loading: view.loading.map(str::to_string),
        sidebar_open: view.sidebar_open,
        send_enabled: view.send_enabled,
        research_enabled: view.use_research,
        scroll_revision: view.revision,
    }
}

fn avatar_html(sender: Sender) -> &'static str {
    match sender {
        Sender::User => r#"<div class="message-avatar"><i class="fas fa-user"></i></div>"#,
        Sender::Assistant => r#"<div class="message-avatar"><i class="fas fa-robot"></i></div>"#,
    }
}

impl RenderTree {
    /// True when only the welcome placeholder is shown
    pub fn is_welcome(&self) -> bool {
        matches!(self.nodes.as_slice(), [Node::Welcome { .. }])
    }

    /// Messages in the tree, skipping the placeholder and indicator
    pub fn message_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Message { .. }))
            .count()
    }

    /// HTML fragment for the chat container
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for node in &self.nodes {
            match node {
                Node::Welcome { title } => {
                    html.push_str(r#"<div class="welcome-message">"#);
                    html.push_str(
                        r#"<div class="welcome-icon"><i class="fas fa-robot"></i></div>"#,
                    );
                    html.push_str(&format!("<h2>{}</h2>", escape_html(title)));
                    html.push_str(
                        "<p>I'm here to help you with questions, file analysis, and research. You can:</p>",
                    );
                    html.push_str(concat!(
                        "<ul>",
                        r#"<li><i class="fas fa-comment"></i> Ask me anything</li>"#,
                        r#"<li><i class="fas fa-file-upload"></i> Upload files for analysis</li>"#,
                        r#"<li><i class="fas fa-search"></i> Enable research mode for web-based answers</li>"#,
                        "</ul>"
                    ));
                    html.push_str("</div>");
                }
                Node::Message { sender, html: body, .. } => {
                    html.push_str(&format!(r#"<div class="message {}">"#, sender));
                    html.push_str(avatar_html(*sender));
                    html.push_str(&format!(r#"<div class="message-content">{}</div>"#, body));
                    html.push_str("</div>");
                }
                Node::Thinking => {
                    html.push_str(
                        r#"<div class="message assistant typing-message" id="typingIndicator">"#,
                    );
                    html.push_str(avatar_html(Sender::Assistant));
                    html.push_str(concat!(
                        r#"<div class="typing-indicator"><span>Thinking</span>"#,
                        r#"<div class="typing-dots"><div class="typing-dot"></div>"#,
                        r#"<div class="typing-dot"></div><div class="typing-dot"></div></div></div>"#
                    ));
                    html.push_str("</div>");
                }
            }
        }
        html
    }
}

/// Format one message for terminal output
pub fn terminal_message(message: &Message) -> String {
    let label = match message.sender {
        Sender::User => "You".cyan().bold(),
        Sender::Assistant => "Assistant".green().bold(),
    };
    format!("{}: {}", label, message.content)
}
