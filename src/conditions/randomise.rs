//! Randomisation flags and results.
//!
//! Every draw derives its own generator from the entity's identity (or the
//! map seed for global scheduling) immediately before the decision it
//! protects, so recompiles reproduce the same choices entity for entity.

use tracing::warn;

use crate::conv::{conv_bool, conv_float, conv_int};
use crate::keyvalues::Property;
use crate::random::{entity_seed, global_seed, parse_chance, weighted_pool, DrawRng};
use crate::scene::Vec3;

use super::condition::ResultSlot;
use super::registry::{Outcome, Registry, ResultEntry, SetupOutcome};

/// Precomputed state for the weighted-choice result.
struct RandomCase {
    token: String,
    chance: i64,
    pool: Vec<usize>,
    choices: Vec<Choice>,
    /// The chance/weights/seed leaves, kept for export.
    header: Vec<Property>,
}

/// One alternative of a weighted choice.
enum Choice {
    Single(ResultSlot),
    /// A `group` block: ordered sub-results executed as one unit.
    Group(Vec<ResultSlot>),
}

struct VariantPool(Vec<usize>);

struct ShiftRange {
    min: Vec3,
    max: Vec3,
}

/// Install the randomisation flags and results.
pub fn register(reg: &mut Registry) {
    // Randomly true or false, seeded from the entity's identity.
    reg.register_flag("random", |scene, id, prop, _seed| {
        let Some(ent) = scene.get(id) else { return false };
        let (chance_spec, token) = if prop.has_children() {
            (prop.get("chance", "100"), prop.get("seed", ""))
        } else {
            (prop.value_str().unwrap_or("100"), "")
        };
        let chance = parse_chance(chance_spec, 100);
        let mut rng = DrawRng::from_key(&entity_seed("random_chance", token, ent));
        rng.chance(chance)
    });

    reg.register_result(
        "random",
        ResultEntry::new(execute_random)
            .with_setup(setup_random)
            .with_export(export_random),
    );

    reg.register_result(
        "variant",
        ResultEntry::new(execute_variant).with_setup(setup_variant),
    );

    reg.register_result("randomnum", ResultEntry::new(execute_random_num));
    reg.register_result("randomvec", ResultEntry::new(execute_random_vec));

    reg.register_result(
        "randomshift",
        ResultEntry::new(execute_random_shift).with_setup(setup_random_shift),
    );
}

fn setup_random(
    reg: &Registry,
    prop: &Property,
) -> Result<SetupOutcome, super::error::ConfigError> {
    let mut chance = 100;
    let mut weights = String::new();
    let mut token = String::new();
    let mut header = Vec::new();
    let mut picks = Vec::new();

    for child in prop.iter() {
        let name = child.name().unwrap_or("").to_ascii_lowercase();
        match name.as_str() {
            "chance" => {
                chance = parse_chance(child.value_str().unwrap_or(""), chance);
                header.push(child.clone());
            }
            "weights" => {
                weights = child.value_str().unwrap_or("").to_string();
                header.push(child.clone());
            }
            "seed" => {
                token = child.value_str().unwrap_or("").to_string();
                header.push(child.clone());
            }
            _ => picks.push(child.clone()),
        }
    }

    // Child results get their own setup; ones that can never apply just
    // drop out of the pool.
    let mut choices = Vec::new();
    for pick in picks {
        if pick.name_is("group") {
            let mut members = Vec::new();
            for sub in pick.iter() {
                if let Some(slot) = reg.make_slot(sub)? {
                    members.push(slot);
                }
            }
            if !members.is_empty() {
                choices.push(Choice::Group(members));
            }
        } else if let Some(slot) = reg.make_slot(&pick)? {
            choices.push(Choice::Single(slot));
        }
    }
    if choices.is_empty() {
        return Ok(SetupOutcome::Discard);
    }

    let pool = weighted_pool(choices.len(), &weights);
    Ok(SetupOutcome::with(RandomCase {
        token,
        chance,
        pool,
        choices,
        header,
    }))
}

/// Randomly pick one sub-result (or `group` of sub-results) to execute.
///
/// Per entity the draw is re-derived from the entity's identity, so the
/// same entity always takes the same branch. Under meta scheduling the
/// draw comes from the map seed and the whole construct exhausts.
fn execute_random(
    reg: &Registry,
    ctx: &mut super::engine::Context,
    ent: Option<crate::scene::EntityId>,
    slot: &mut ResultSlot,
) -> Result<Outcome, super::error::ExecError> {
    let global = ent.is_none();
    let key = match ent.and_then(|id| ctx.scene.get(id)) {
        Some(e) => entity_seed("random_case", token_of(slot), e),
        None => global_seed("random_case", token_of(slot), ctx.map_seed),
    };
    let Some(case) = slot.setup_mut::<RandomCase>() else {
        return Ok(Outcome::Done);
    };

    // Under meta scheduling the construct resolves on its single draw,
    // whether or not the gate passed.
    let resolved = if global { Outcome::Exhausted } else { Outcome::Done };

    let mut rng = DrawRng::from_key(&key);
    if !rng.chance(case.chance) {
        return Ok(resolved);
    }
    let Some(&pick) = rng.choose(&case.pool) else {
        return Ok(resolved);
    };

    match &mut case.choices[pick] {
        Choice::Single(child) => {
            if reg.run_result(ctx, ent, child)? == Outcome::Exhausted {
                child.exhaust();
            }
        }
        Choice::Group(members) => {
            for member in members.iter_mut() {
                if reg.run_result(ctx, ent, member)? == Outcome::Exhausted {
                    member.exhaust();
                }
            }
        }
    }

    Ok(resolved)
}

fn token_of(slot: &ResultSlot) -> &str {
    slot.setup_ref::<RandomCase>()
        .map_or("", |case| case.token.as_str())
}

fn export_random(reg: &Registry, slot: &ResultSlot) -> Property {
    let Some(case) = slot.setup_ref::<RandomCase>() else {
        return slot.prop().clone();
    };
    let mut children = case.header.clone();
    for choice in &case.choices {
        match choice {
            Choice::Single(child) => children.push(reg.export_slot(child)),
            Choice::Group(members) => children.push(Property::section(
                "group",
                members.iter().map(|m| reg.export_slot(m)).collect(),
            )),
        }
    }
    Property::section(slot.prop().name().unwrap_or("random"), children)
}

fn setup_variant(
    _reg: &Registry,
    prop: &Property,
) -> Result<SetupOutcome, super::error::ConfigError> {
    if prop.has_children() {
        let count = conv_int(prop.get("number", ""), 0);
        if count <= 0 {
            return Ok(SetupOutcome::Discard);
        }
        Ok(SetupOutcome::with(VariantPool(weighted_pool(
            count as usize,
            prop.get("weights", ""),
        ))))
    } else {
        let count = conv_int(prop.value_str().unwrap_or(""), 0);
        if count <= 0 {
            return Ok(SetupOutcome::Discard);
        }
        Ok(SetupOutcome::with(VariantPool((0..count as usize).collect())))
    }
}

/// Append a `_varN` suffix to the entity's instance file, chosen from a
/// weighted group by the entity's name, position, and orientation.
fn execute_variant(
    _reg: &Registry,
    ctx: &mut super::engine::Context,
    ent: Option<crate::scene::EntityId>,
    slot: &mut ResultSlot,
) -> Result<Outcome, super::error::ExecError> {
    let Some(id) = ent else {
        warn!("variant result needs an entity; skipped under meta scheduling");
        return Ok(Outcome::Done);
    };
    let Some(pool) = slot.setup_ref::<VariantPool>() else {
        return Ok(Outcome::Done);
    };
    let pick = {
        let Some(e) = ctx.scene.get(id) else {
            return Ok(Outcome::Done);
        };
        // Unnamed entities fall back to the global seed; named ones still
        // mix in position and angles since names may not be unique.
        let key = if e.name().is_empty() {
            format!("{}{}{}", ctx.map_seed, e.get("origin", ""), e.get("angles", ""))
        } else {
            format!("{}{}{}", e.name(), e.get("origin", ""), e.get("angles", ""))
        };
        let mut rng = DrawRng::from_key(&key);
        *rng.choose(&pool.0).unwrap_or(&0)
    };
    if let Some(e) = ctx.scene.get_mut(id) {
        e.add_file_suffix(&format!("_var{}", pick + 1));
    }
    Ok(Outcome::Done)
}

/// Store a random number in an entity attribute.
fn execute_random_num(
    _reg: &Registry,
    ctx: &mut super::engine::Context,
    ent: Option<crate::scene::EntityId>,
    slot: &mut ResultSlot,
) -> Result<Outcome, super::error::ExecError> {
    let Some(id) = ent else { return Ok(Outcome::Done) };
    let prop = slot.prop();
    let (var, value) = {
        let Some(e) = ctx.scene.get(id) else {
            return Ok(Outcome::Done);
        };
        let is_float = conv_bool(prop.get("decimal", ""), false);
        let max = conv_float(prop.get("max", "1"), 1.0);
        let min = conv_float(prop.get("min", "0"), 0.0);
        let var = prop.get("resultvar", "$random").to_string();
        let token = prop.get("seed", "random");
        let key = format!("{}{}random_{}", e.get("origin", ""), e.get("angles", ""), token);

        let mut rng = DrawRng::from_key(&key);
        let value = if is_float {
            rng.float_range(min, max).to_string()
        } else {
            rng.int_range(min as i64, max as i64).to_string()
        };
        (var, value)
    };
    if let Some(e) = ctx.scene.get_mut(id) {
        e.set(&var, value);
    }
    Ok(Outcome::Done)
}

/// The vector form of `randomnum`: per-axis ranges, equal min/max pins the
/// axis.
fn execute_random_vec(
    _reg: &Registry,
    ctx: &mut super::engine::Context,
    ent: Option<crate::scene::EntityId>,
    slot: &mut ResultSlot,
) -> Result<Outcome, super::error::ExecError> {
    let Some(id) = ent else { return Ok(Outcome::Done) };
    let prop = slot.prop();
    let (var, value) = {
        let Some(e) = ctx.scene.get(id) else {
            return Ok(Outcome::Done);
        };
        let is_float = conv_bool(prop.get("decimal", ""), false);
        let var = prop.get("resultvar", "$random").to_string();
        let token = prop.get("seed", "random");
        let key = format!("{}{}random_{}", e.get("origin", ""), e.get("angles", ""), token);

        let mut rng = DrawRng::from_key(&key);
        let mut axis = |axis: &str| {
            let max = conv_float(prop.get(&format!("max_{axis}"), "0"), 0.0);
            let min = conv_float(prop.get(&format!("min_{axis}"), "0"), 0.0);
            if (min - max).abs() < f64::EPSILON {
                min
            } else if is_float {
                rng.float_range(min, max)
            } else {
                rng.int_range(min as i64, max as i64) as f64
            }
        };
        let value = Vec3::new(axis("x"), axis("y"), axis("z"));
        (var, value.join())
    };
    if let Some(e) = ctx.scene.get_mut(id) {
        e.set(&var, value);
    }
    Ok(Outcome::Done)
}

fn setup_random_shift(
    _reg: &Registry,
    prop: &Property,
) -> Result<SetupOutcome, super::error::ConfigError> {
    let axis = |key: &str| conv_int(prop.get(key, "0"), 0) as f64;
    Ok(SetupOutcome::with(ShiftRange {
        min: Vec3::new(axis("min_x"), axis("min_y"), axis("min_z")),
        max: Vec3::new(axis("max_x"), axis("max_y"), axis("max_z")),
    }))
}

/// Randomly shift an entity by per-axis offsets, local to its orientation.
fn execute_random_shift(
    _reg: &Registry,
    ctx: &mut super::engine::Context,
    ent: Option<crate::scene::EntityId>,
    slot: &mut ResultSlot,
) -> Result<Outcome, super::error::ExecError> {
    let Some(id) = ent else { return Ok(Outcome::Done) };
    let Some(range) = slot.setup_ref::<ShiftRange>() else {
        return Ok(Outcome::Done);
    };
    let new_origin = {
        let Some(e) = ctx.scene.get(id) else {
            return Ok(Outcome::Done);
        };
        let origin = e.origin()?;
        let angles = e.angles()?;
        let key = format!(
            "{}_random_shift_{}{}",
            ctx.map_seed,
            e.get("origin", ""),
            e.get("angles", ""),
        );
        let mut rng = DrawRng::from_key(&key);
        let offset = Vec3::new(
            rng.float_range(range.min.x, range.max.x),
            rng.float_range(range.min.y, range.max.y),
            rng.float_range(range.min.z, range.max.z),
        );
        origin + offset.rotated(angles.x, angles.y, angles.z)
    };
    if let Some(e) = ctx.scene.get_mut(id) {
        e.set("origin", new_origin.join());
    }
    Ok(Outcome::Done)
}
