use thiserror::Error;

use crate::sim::BodyId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a table or seeding it with bodies.
///
/// Runtime contact checks never fail: degenerate geometry is treated as
/// "no contact" and pocketing twice is a no-op.
#[derive(Debug, Error)]
pub enum Error {
    /// Table parameters that cannot produce a playable layout.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),

    /// Body parameters rejected by `Table::add_body`.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A rail whose endpoints coincide.
    #[error("degenerate rail: start and end points coincide")]
    DegenerateRail,

    /// A handle that does not belong to this table.
    #[error("unknown body handle {0:?}")]
    UnknownBody(BodyId),

    /// Malformed configuration JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
