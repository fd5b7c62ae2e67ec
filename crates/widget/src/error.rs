/// Every way a user action can fail. `Display` is the exact text shown in the
/// error area.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// Empty message, or custom situation selected but left blank.
    #[error("{0}")]
    Validation(String),

    /// Backend answered with a failure status or an `error` payload.
    #[error("{0}")]
    Request(String),

    /// Connection failure or a body that is not the expected JSON.
    #[error("{0}")]
    Transport(String),

    /// Clipboard write rejected or unsupported. Carries the underlying
    /// detail for logs; the user sees the configured generic message.
    #[error("{0}")]
    Clipboard(String),
}

impl WidgetError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Request(_) => "request",
            Self::Transport(_) => "transport",
            Self::Clipboard(_) => "clipboard",
        }
    }
}
