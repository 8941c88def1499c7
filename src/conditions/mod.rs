//! The condition engine.
//!
//! Conditions are declarative rules loaded from a KeyValues document: flag
//! predicates gate result mutations, priorities order evaluation, and meta
//! conditions run once globally before the per-entity pass. Results carry a
//! two-phase lifecycle (setup once at load, execute per match) and may
//! signal exhaustion, which rewrites their document node to a `nop`
//! sentinel so replaying the exported tree is idempotent.

mod condition;
pub mod cutout;
mod engine;
mod error;
pub mod randomise;
mod registry;

pub use condition::{Condition, ResultSlot};
pub use engine::{ConditionEngine, Context};
pub use error::{ConfigError, ExecError};
pub use registry::{
    FlagFn, Outcome, Registry, ResultEntry, ResultFn, SetupFn, SetupOutcome, NOP_RESULT,
};
