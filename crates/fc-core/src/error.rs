//! Framework error type.
//!
//! Domain transitions in this engine are total functions and never fail;
//! errors exist only at construction time (config/roster validation).
//! Sub-crates define their own enums and either convert into `CoreError`
//! via `From` or wrap it as one variant — both patterns are fine.

use thiserror::Error;

use crate::{AgentId, ItemId};

/// The top-level error type for `fc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fc-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
