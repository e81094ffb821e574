use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn idle() -> Self {
        Self { text: String::new(), severity: Severity::Info }
    }

    pub fn is_idle(&self) -> bool {
        self.text.trim().is_empty() && self.severity == Severity::Info
    }
}

/// Single-slot status line. Every `show` replaces the previous message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageChannel {
    current: StatusMessage,
    generation: u64,
}

impl Default for MessageChannel {
    fn default() -> Self {
        Self { current: StatusMessage::idle(), generation: 0 }
    }
}

impl MessageChannel {
    /// Returns the generation of the new message, for use with `clear_if_current`.
    pub fn show(&mut self, text: impl Into<String>, severity: Severity) -> u64 {
        let text = text.into();
        // Blank text always means the idle placeholder.
        self.current = if text.trim().is_empty() {
            StatusMessage::idle()
        } else {
            StatusMessage { text, severity }
        };
        self.generation += 1;
        self.generation
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.show(text, Severity::Info)
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.show(text, Severity::Success)
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.show(text, Severity::Error)
    }

    pub fn clear(&mut self) {
        self.show("", Severity::Info);
    }

    /// Clears only if nothing has replaced the message of `generation` since.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if self.generation == generation && !self.current.is_idle() {
            self.clear();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &StatusMessage {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
