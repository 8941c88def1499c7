//! Condition engine errors.
//!
//! Configuration errors surface at load time, before any entity is
//! processed; execution errors propagate and abort the whole run. There is
//! no partial-application mode.

use thiserror::Error;

use crate::scene::VecError;

/// A problem in the condition configuration, raised while loading.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A condition child names a flag nobody registered.
    #[error("unknown flag {0:?}")]
    UnknownFlag(String),

    /// A result block names a result nobody registered.
    #[error("unknown result {0:?}")]
    UnknownResult(String),

    /// A `result` child was a leaf instead of a section of invocations.
    #[error("\"result\" must be a section of result invocations")]
    ResultNotSection,

    /// A meta condition declared flags; the meta pass has no entity to
    /// test them against.
    #[error("a meta condition cannot declare flags")]
    MetaFlags,
}

/// A failure while executing results, aborting the run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExecError {
    /// An entity attribute that must hold a vector did not.
    #[error(transparent)]
    Vector(#[from] VecError),

    /// A configuration error detected mid-run.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
