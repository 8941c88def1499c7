//! A loaded condition: flags, results, priority, scheduling class.
//!
//! Conditions are built once from their parsed section. Each result slot
//! owns its document node plus the opaque value its setup computed; an
//! exhausted slot is rewritten in place to the `nop` sentinel so replaying
//! the exported tree never re-resolves the construct.

use std::any::Any;

use tracing::debug;

use crate::conv::{conv_bool, conv_int};
use crate::keyvalues::Property;
use crate::scene::{EntityId, Scene};

use super::engine::Context;
use super::error::{ConfigError, ExecError};
use super::registry::{Outcome, Registry, NOP_RESULT};

/// One result invocation owned by a condition.
pub struct ResultSlot {
    name: String,
    prop: Property,
    /// Setup-computed context, shared by every execution of this slot.
    pub setup: Option<Box<dyn Any>>,
}

impl std::fmt::Debug for ResultSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSlot")
            .field("name", &self.name)
            .field("prop", &self.prop)
            .field("setup", &self.setup.as_ref().map(|_| "..."))
            .finish()
    }
}

impl ResultSlot {
    pub(crate) fn new(name: String, prop: Property, setup: Option<Box<dyn Any>>) -> Self {
        Self { name, prop, setup }
    }

    /// The lowercase registry key this slot dispatches through.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owned document node for this invocation.
    #[must_use]
    pub fn prop(&self) -> &Property {
        &self.prop
    }

    /// Borrow the setup context downcast to its concrete type.
    #[must_use]
    pub fn setup_ref<T: Any>(&self) -> Option<&T> {
        self.setup.as_ref()?.downcast_ref()
    }

    /// Mutably borrow the setup context downcast to its concrete type.
    pub fn setup_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.setup.as_mut()?.downcast_mut()
    }

    /// Permanently resolve this slot: rewrite the document node to the
    /// no-op sentinel and drop the setup context.
    pub fn exhaust(&mut self) {
        self.name = NOP_RESULT.to_string();
        self.prop = Property::new(NOP_RESULT, "");
        self.setup = None;
    }

    #[must_use]
    pub fn is_nop(&self) -> bool {
        self.name == NOP_RESULT
    }
}

/// A rule: flag predicates gating an ordered list of results.
#[derive(Debug)]
pub struct Condition {
    /// Flag declarations, all of which must pass for an entity.
    pub flags: Vec<Property>,
    /// Results executed, in declaration order, on a match.
    pub results: Vec<ResultSlot>,
    /// Scheduling priority; lower runs earlier, ties keep declaration order.
    pub priority: i64,
    /// Meta conditions run once globally instead of per entity.
    pub meta: bool,
}

impl Condition {
    /// Build a condition from its document section.
    ///
    /// Returns `Ok(None)` when a result's setup (or an empty result list)
    /// declares the whole condition inapplicable.
    pub fn parse(prop: &Property, registry: &Registry) -> Result<Option<Self>, ConfigError> {
        let mut flags = Vec::new();
        let mut results = Vec::new();
        let mut priority = 0;
        let mut meta = false;

        for child in prop.iter() {
            let name = child.name().unwrap_or("");
            if name.eq_ignore_ascii_case("priority") {
                priority = conv_int(child.value_str().unwrap_or(""), 0);
            } else if name.eq_ignore_ascii_case("meta") {
                meta = conv_bool(child.value_str().unwrap_or("1"), true);
            } else if name.eq_ignore_ascii_case("result") {
                if !child.has_children() {
                    return Err(ConfigError::ResultNotSection);
                }
                for invocation in child.iter() {
                    match registry.make_slot(invocation)? {
                        Some(slot) => results.push(slot),
                        None => {
                            debug!(
                                result = invocation.name().unwrap_or(""),
                                "setup discarded condition"
                            );
                            return Ok(None);
                        }
                    }
                }
            } else if registry.has_flag(name) {
                flags.push(child.clone());
            } else {
                return Err(ConfigError::UnknownFlag(name.to_string()));
            }
        }

        if meta && !flags.is_empty() {
            return Err(ConfigError::MetaFlags);
        }
        if results.is_empty() {
            debug!("condition with no results discarded");
            return Ok(None);
        }

        Ok(Some(Self {
            flags,
            results,
            priority,
            meta,
        }))
    }

    /// Does this condition apply to the entity? Empty flag list always does.
    pub fn test(
        &self,
        registry: &Registry,
        scene: &Scene,
        ent: EntityId,
        map_seed: &str,
    ) -> Result<bool, ConfigError> {
        for flag in &self.flags {
            if !registry.test_flag(flag, scene, ent, map_seed)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Run every result in declaration order, tombstoning exhausted ones.
    pub fn execute(
        &mut self,
        registry: &Registry,
        ctx: &mut Context,
        ent: Option<EntityId>,
    ) -> Result<(), ExecError> {
        for slot in &mut self.results {
            if registry.run_result(ctx, ent, slot)? == Outcome::Exhausted {
                slot.exhaust();
            }
        }
        Ok(())
    }

    /// Rebuild the document section, reflecting any tombstone rewrites.
    #[must_use]
    pub fn export(&self, registry: &Registry) -> Property {
        let mut children: Vec<Property> = self.flags.clone();
        if self.priority != 0 {
            children.push(Property::new("priority", self.priority.to_string()));
        }
        if self.meta {
            children.push(Property::new("meta", "1"));
        }
        children.push(Property::section(
            "result",
            self.results.iter().map(|s| registry.export_slot(s)).collect(),
        ));
        Property::section("Condition", children)
    }
}
