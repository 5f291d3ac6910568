use thiserror::Error;

/// Which kind of statement a transport failure came from. Drives the IPC error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOp {
    Query,
    Insert,
    Update,
    Delete,
    Tx,
}

impl DbOp {
    pub fn code(self) -> &'static str {
        match self {
            DbOp::Query => "db_query_failed",
            DbOp::Insert => "db_insert_failed",
            DbOp::Update => "db_update_failed",
            DbOp::Delete => "db_delete_failed",
            DbOp::Tx => "db_tx_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    /// Missing field or bad syntax; the form keeps what was typed.
    #[error("{0}")]
    Validation(String),

    #[error("No student found with ID {0}")]
    NotFound(i64),

    #[error("Student with ID {0} already exists!")]
    DuplicateKey(i64),

    #[error("Please connect to the database first.")]
    Connection,

    #[error("Database error:\n{source}")]
    Transport {
        op: DbOp,
        #[source]
        source: rusqlite::Error,
    },
}

impl RosterError {
    pub fn validation(message: impl Into<String>) -> Self {
        RosterError::Validation(message.into())
    }

    pub fn transport(op: DbOp) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| RosterError::Transport { op, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RosterError::Validation(_) => "bad_params",
            RosterError::NotFound(_) => "not_found",
            RosterError::DuplicateKey(_) => "duplicate_key",
            RosterError::Connection => "no_connection",
            RosterError::Transport { op, .. } => op.code(),
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
