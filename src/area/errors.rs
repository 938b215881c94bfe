use thiserror::Error;

/// Errors that can arise while parsing a legacy area file.
///
/// Only `Io` is fatal to a whole file. Everything else is scoped to a
/// single entity: the caller logs it, drops the record, and keeps going.
#[derive(Debug, Error)]
pub enum AreaError {
    /// Wrapper around IO errors (the area file could not be read).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An entity block had no `#<vnum>` header line.
    #[error("{entity} block has no vnum header")]
    MissingVnum { entity: &'static str },

    /// A tilde-terminated field ran past the end of its entity block.
    #[error("{entity} #{vnum}: unterminated {field}")]
    Truncated {
        entity: &'static str,
        vnum: i64,
        field: &'static str,
    },

    /// A one-line record had fewer tokens than its grammar requires.
    #[error("rejected {entity} line: {reason}")]
    InvalidShape {
        entity: &'static str,
        reason: String,
    },
}
