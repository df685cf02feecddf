/// Severity of the status line, picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

/// The single feedback line under the forms.
#[derive(Debug, Default)]
pub struct MessageDisplay {
    current: Option<StatusMessage>,
}

impl MessageDisplay {
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}
