//! Engine error type

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine actor has stopped")]
    Closed,
}
