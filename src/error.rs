use thiserror::Error;

use crate::circuit::WireId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("a {width}x{height} raster needs {} pixels, got {found}", .width * .height)]
    RasterSize {
        width: usize,
        height: usize,
        found: usize,
    },

    #[error("no repeated state within {limit} steps")]
    StepBudgetExceeded { limit: usize },

    #[error("simulation snapshots disagree on wire count: expected {expected}, found {found}")]
    StateMismatch { expected: usize, found: usize },

    #[error("{context} references wire {wire:?} which does not exist")]
    UnknownWire { wire: WireId, context: &'static str },

    #[error("savestate holds {found} charges for {expected} wires")]
    ChargeCount { expected: usize, found: usize },

    #[error("failed to parse RON: {0}")]
    Deserialize(#[from] ron::error::SpannedError),

    #[error("failed to write RON: {0}")]
    Serialize(#[from] ron::Error),
}
