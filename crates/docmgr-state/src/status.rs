//! Transient status of an in-progress or finished operation.

/// Per-view operation status. Never persisted; reset by each new operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationStatus {
    /// Nothing has been requested yet, or the state was cleared.
    #[default]
    Idle,
    /// A request is outstanding.
    Loading,
    /// The last request completed.
    Success,
    /// The last request failed with a user-facing message.
    Error(String),
}

impl OperationStatus {
    /// The user-facing error message, if the last request failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
