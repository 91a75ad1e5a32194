use anyhow::Result;
use ratatui::layout::Rect;

use crate::backend::BackendClient;
use crate::chat::{ChatMessage, ChatRole, Conversation};
use crate::topic::Topic;

/// Shown when the backend answered but no usable reply was present.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong.";

/// Shown when the request itself failed (connection, status, bad body).
pub const NETWORK_ERROR_REPLY: &str = "Network error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,

    // Conversation state
    pub conversation: Conversation,
    pub input: String,
    pub cursor: usize, // cursor position in input, in characters
    pub pending: bool,
    pub reply_task: Option<tokio::task::JoinHandle<Result<Option<String>>>>,

    // Transcript scroll state
    pub chat_scroll: u16,
    pub chat_height: u16, // Height of chat area for scroll calculations
    pub chat_width: u16,  // Width of chat area for wrap calculations

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub chip_areas: Vec<(Topic, Rect)>,

    backend: BackendClient,
}

impl App {
    pub fn new(backend_url: &str) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,

            conversation: Conversation::new(),
            input: String::new(),
            cursor: 0,
            pending: false,
            reply_task: None,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,

            chat_area: None,
            chip_areas: Vec::new(),

            backend: BackendClient::new(backend_url),
        }
    }

    /// Send `text` to the backend as one user turn.
    ///
    /// Whitespace-only text is ignored, and so is a send while a request is
    /// already in flight. The user turn is appended and the draft cleared
    /// before the request goes out; the assistant turn arrives later via
    /// [`App::settle_reply`].
    pub fn send(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return;
        }

        self.conversation.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });
        self.input.clear();
        self.cursor = 0;
        self.pending = true;
        self.scroll_chat_to_bottom();

        let backend = self.backend.clone();
        let message = text.to_string();
        self.reply_task = Some(tokio::spawn(async move {
            backend.send_message(&message).await
        }));
    }

    /// Submit whatever is currently in the draft input.
    pub fn submit_draft(&mut self) {
        let draft = self.input.clone();
        self.send(&draft);
    }

    /// Send the current draft annotated with `topic`.
    ///
    /// A pick with an empty draft does nothing; the draft itself is cleared
    /// by the send, not before.
    pub fn pick_topic(&mut self, topic: Topic) {
        let draft = self.input.trim();
        if draft.is_empty() {
            return;
        }
        let augmented = topic.augment(draft);
        self.send(&augmented);
    }

    /// Resolve a finished request into the assistant turn.
    ///
    /// Called from the run loop after every event. While the request is
    /// still running this returns without touching anything; once it has
    /// finished, every outcome becomes a visible assistant turn. Failures
    /// never propagate out of here.
    pub async fn settle_reply(&mut self) {
        let finished = self.reply_task.as_ref().is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.reply_task.take() {
            let content = match task.await {
                Ok(Ok(Some(reply))) => reply,
                Ok(Ok(None)) => FALLBACK_REPLY.to_string(),
                Ok(Err(_)) | Err(_) => NETWORK_ERROR_REPLY.to_string(),
            };
            self.conversation.push(ChatMessage {
                role: ChatRole::Assistant,
                content,
            });
            self.pending = false;
            self.scroll_chat_to_bottom();
        }
    }

    // Draft editing

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn delete_char(&mut self) {
        let char_count = self.input.chars().count();
        if self.cursor < char_count {
            let byte_pos = char_to_byte_index(&self.input, self.cursor);
            self.input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        self.cursor = (self.cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.pending {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Scroll the transcript so the latest turn (and the typing indicator,
    /// while one is showing) is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;

        for msg in self.conversation.messages() {
            total_lines += 1; // Role line ("You:" or "MediBot:")
            for line in msg.content.lines() {
                // Use character count, not byte length, for proper UTF-8 handling
                let char_count = line.chars().count();
                if char_count == 0 {
                    total_lines += 1; // Empty line still takes one line
                } else {
                    total_lines += ((char_count / wrap_width) + 1) as u16;
                }
            }
            total_lines += 1; // Blank line after message
        }

        if self.pending {
            total_lines += 2; // "MediBot:" + "Typing..."
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        if total_lines > visible_height {
            self.chat_scroll = total_lines.saturating_sub(visible_height);
        }
    }
}
