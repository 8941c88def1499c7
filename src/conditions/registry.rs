//! The flag/result registry.
//!
//! Flags and results are looked up by lowercase name. Each result entry is
//! a (setup, execute, export) triple: setup runs once per condition load
//! and may declare the invocation permanently inapplicable, execute runs
//! per match, and export rebuilds the document node for constructs that
//! restructure their argument subtree. Every registrant parses its own
//! generic `Property` argument block, so the contract stays schema-less.

use std::any::Any;

use rustc_hash::FxHashMap;

use crate::keyvalues::Property;
use crate::scene::{EntityId, Scene};

use super::condition::ResultSlot;
use super::engine::Context;
use super::error::{ConfigError, ExecError};
use super::{cutout, randomise};

/// Name results are rewritten to when exhausted.
pub const NOP_RESULT: &str = "nop";

/// How a result execution resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The result may run again.
    Done,
    /// The construct permanently resolved; tombstone it.
    Exhausted,
}

/// What a setup step decided about its invocation.
pub enum SetupOutcome {
    /// Ready to execute, with an optional precomputed context.
    Ready(Option<Box<dyn Any>>),
    /// This invocation can never apply; discard the owning condition.
    Discard,
}

impl SetupOutcome {
    /// Shorthand for a ready invocation carrying a context value.
    pub fn with<T: Any>(value: T) -> Self {
        SetupOutcome::Ready(Some(Box::new(value)))
    }
}

/// A side-effect-free predicate evaluated against one entity.
pub type FlagFn = Box<dyn Fn(&Scene, EntityId, &Property, &str) -> bool>;

/// One-time preparation of a result invocation's argument block.
pub type SetupFn = Box<dyn Fn(&Registry, &Property) -> Result<SetupOutcome, ConfigError>>;

/// Per-match execution of a result. `None` entity means meta scheduling.
pub type ResultFn =
    Box<dyn Fn(&Registry, &mut Context, Option<EntityId>, &mut ResultSlot) -> Result<Outcome, ExecError>>;

/// Rebuild the document node for a result whose setup restructured it.
pub type ExportFn = Box<dyn Fn(&Registry, &ResultSlot) -> Property>;

/// A registered result.
pub struct ResultEntry {
    setup: Option<SetupFn>,
    execute: ResultFn,
    export: Option<ExportFn>,
}

impl ResultEntry {
    /// An entry with no setup step.
    pub fn new(
        execute: impl Fn(&Registry, &mut Context, Option<EntityId>, &mut ResultSlot) -> Result<Outcome, ExecError>
            + 'static,
    ) -> Self {
        Self {
            setup: None,
            execute: Box::new(execute),
            export: None,
        }
    }

    /// Attach a setup step (builder pattern).
    #[must_use]
    pub fn with_setup(
        mut self,
        setup: impl Fn(&Registry, &Property) -> Result<SetupOutcome, ConfigError> + 'static,
    ) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    /// Attach an exporter (builder pattern).
    #[must_use]
    pub fn with_export(mut self, export: impl Fn(&Registry, &ResultSlot) -> Property + 'static) -> Self {
        self.export = Some(Box::new(export));
        self
    }
}

/// String-keyed registry of flags and results.
#[derive(Default)]
pub struct Registry {
    flags: FxHashMap<String, FlagFn>,
    results: FxHashMap<String, ResultEntry>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every built-in flag and result installed.
    #[must_use]
    pub fn builtins() -> Self {
        let mut reg = Self::new();
        reg.register_builtin_basics();
        randomise::register(&mut reg);
        cutout::register(&mut reg);
        reg
    }

    /// Register a flag predicate under a name.
    pub fn register_flag(
        &mut self,
        name: &str,
        flag: impl Fn(&Scene, EntityId, &Property, &str) -> bool + 'static,
    ) {
        self.flags.insert(name.to_ascii_lowercase(), Box::new(flag));
    }

    /// Register a result entry under a name.
    pub fn register_result(&mut self, name: &str, entry: ResultEntry) {
        self.results.insert(name.to_ascii_lowercase(), entry);
    }

    #[must_use]
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains_key(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn has_result(&self, name: &str) -> bool {
        self.results.contains_key(&name.to_ascii_lowercase())
    }

    /// Evaluate a flag against an entity.
    pub fn test_flag(
        &self,
        prop: &Property,
        scene: &Scene,
        ent: EntityId,
        map_seed: &str,
    ) -> Result<bool, ConfigError> {
        let name = prop.name().unwrap_or("");
        let flag = self
            .flags
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))?;
        Ok(flag(scene, ent, prop, map_seed))
    }

    /// Build a result slot from its document node, running setup once.
    ///
    /// `Ok(None)` means setup declared the invocation inapplicable and the
    /// owning condition must be discarded.
    pub fn make_slot(&self, prop: &Property) -> Result<Option<ResultSlot>, ConfigError> {
        let name = prop.name().unwrap_or("").to_ascii_lowercase();
        let entry = self
            .results
            .get(&name)
            .ok_or_else(|| ConfigError::UnknownResult(name.clone()))?;
        let setup = match &entry.setup {
            Some(setup) => match setup(self, prop)? {
                SetupOutcome::Ready(value) => value,
                SetupOutcome::Discard => return Ok(None),
            },
            None => None,
        };
        Ok(Some(ResultSlot::new(name, prop.clone(), setup)))
    }

    /// Execute one result slot. The caller tombstones on `Exhausted`.
    pub fn run_result(
        &self,
        ctx: &mut Context,
        ent: Option<EntityId>,
        slot: &mut ResultSlot,
    ) -> Result<Outcome, ExecError> {
        let entry = self
            .results
            .get(slot.name())
            .ok_or_else(|| ConfigError::UnknownResult(slot.name().to_string()))?;
        (entry.execute)(self, ctx, ent, slot)
    }

    /// Rebuild the document node for a slot.
    #[must_use]
    pub fn export_slot(&self, slot: &ResultSlot) -> Property {
        match self.results.get(slot.name()).and_then(|e| e.export.as_ref()) {
            Some(export) => export(self, slot),
            None => slot.prop().clone(),
        }
    }

    fn register_builtin_basics(&mut self) {
        // The tombstone sentinel: does nothing, forever.
        self.register_result(NOP_RESULT, ResultEntry::new(|_, _, _, _| Ok(Outcome::Done)));

        // Match the entity's instance file, case-insensitively.
        self.register_flag("instance", |scene, id, prop, _seed| {
            let Some(ent) = scene.get(id) else { return false };
            let wanted = prop.value_str().unwrap_or("");
            !wanted.is_empty() && ent.get("file", "").eq_ignore_ascii_case(wanted)
        });

        // `"instvar" "key value"`: attribute equality test.
        self.register_flag("instvar", |scene, id, prop, _seed| {
            let Some(ent) = scene.get(id) else { return false };
            let spec = prop.value_str().unwrap_or("");
            match spec.split_once(char::is_whitespace) {
                Some((key, want)) => ent.get(key, "").eq_ignore_ascii_case(want.trim()),
                // A bare key tests for presence.
                None => ent.has(spec),
            }
        });
    }
}
