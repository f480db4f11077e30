use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid program id {id}: {reason}")]
    InvalidProgramId { id: String, reason: String },
    #[error("filter has no {0}")]
    EmptyFilter(&'static str),
    #[error("duplicate account field: {0}")]
    DuplicateField(String),
    #[error("account field name is reserved: {0}")]
    ReservedField(String),
    #[error("failed to deserialize filter: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid_program_id(id: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidProgramId {
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

/// Fatal session failures. Each one ends the session it came from.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to open geyser channel: {0}")]
    Connect(String),
    #[error("subscription request was not accepted: {0}")]
    SubscribeWrite(String),
    #[error("geyser stream failed: {0}")]
    Stream(#[from] tonic::Status),
}

impl SessionError {
    pub fn connect(message: impl ToString) -> Self {
        Self::Connect(message.to_string())
    }

    pub fn subscribe_write(message: impl ToString) -> Self {
        Self::SubscribeWrite(message.to_string())
    }
}
