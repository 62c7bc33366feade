use crate::core::engine::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    MessageChanged { label: String, message: String },
    ErrorMessageChanged { label: String, message: String },
    MessageCleared,
}

impl Message {
    /// Status line update for an engine outcome. Events that never reached
    /// the scanning phase leave the status line alone.
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        match outcome {
            Outcome::Unbound | Outcome::Ignored | Outcome::NotTriggered => None,
            Outcome::NoMatch => Some(Message::MessageCleared),
            Outcome::Unresolved { keyword } => Some(Message::MessageChanged {
                label: "unknown".to_string(),
                message: keyword.clone(),
            }),
            Outcome::Replaced(expansion) => Some(Message::MessageChanged {
                label: "expanded".to_string(),
                message: format!("{} -> {}", expansion.keyword, expansion.replacement.trim_end()),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    message: Option<String>,
}

impl StatusBar {
    pub fn message(&self) -> &Option<String> {
        &self.message
    }

    fn set_message(&mut self, label: String, message: String) {
        let normalized_message = message.replace("\n", " ");
        self.message = Some(format!("[{label}] {normalized_message}"));
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::MessageChanged { label, message } => self.set_message(label, message),
            Message::ErrorMessageChanged { label, message } => {
                self.set_message(format!("ERR: {label}"), message)
            }
            Message::MessageCleared => {
                self.message = None;
            }
        }
    }
}
