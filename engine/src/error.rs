use thiserror::Error;

/// Why a monster definition file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("expected a header row and a value row")]
    MissingRows,

    #[error("header has no '{0}' column")]
    MissingField(&'static str),

    #[error("value row has no entry for '{0}'")]
    MissingValue(&'static str),

    #[error("'{field}' is not a whole number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("'moveName' is empty")]
    EmptyMoveName,

    #[error("'{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: i32 },

    #[error("file is not valid text")]
    Encoding,
}

/// Why a battle state handed back by a host was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("P{side} record is invalid: {reason}")]
    Record { side: u8, reason: MalformedReason },

    #[error("P{side} has {current_hp} HP, outside 0..={max_hp}")]
    HpOutOfRange {
        side: u8,
        current_hp: i32,
        max_hp: i32,
    },

    #[error("outcome does not match the remaining HP")]
    OutcomeMismatch,

    #[error("log has no start line")]
    EmptyLog,
}

/// Errors surfaced by the roster when resolving monsters.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("monster '{0}' not found")]
    NotFound(String),

    #[error("monster '{name}' is malformed: {reason}")]
    Malformed {
        name: String,
        reason: MalformedReason,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, RosterError::Malformed { .. })
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
