use thiserror::Error;

/// Errors that can arise in the minion game core and its storage layer.
#[derive(Debug, Error)]
pub enum MinionError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around JSON decoding errors (webhook payloads).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Expected, user-facing refusal. The message is the full reply shown to
    /// the player (unmet requirements, trips that cannot start, bad purchases).
    #[error("{0}")]
    Refused(String),

    /// Internal error (task join errors, unexpected conditions)
    #[error("internal error: {0}")]
    Internal(String),
}

impl MinionError {
    /// True when this error carries a player-facing reply rather than a fault.
    pub fn is_refusal(&self) -> bool {
        matches!(self, MinionError::Refused(_))
    }
}
