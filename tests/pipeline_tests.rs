//! Full pipeline integration tests.
//!
//! These run the whole contract end to end: parse a conditions document,
//! load it, compile against a scene, export the rewritten tree, and replay.

use mapforge::{parse, ConditionEngine, Scene, Solid, TileKind, Vec3};

const MARKER: &str = "instances/tile_marker.vmf";
const ITEM: &str = "instances/item.vmf";

fn conditions_text() -> String {
    concat!(
        "\"Conditions\"\n{\n",
        // Give every item instance a weighted variant suffix.
        "\"Condition\"\n{\n",
        "\"instance\" \"instances/item.vmf\"\n",
        "\"result\"\n{\n\"variant\"\n{\n\"number\" \"3\"\n\"weights\" \"2,1,1\"\n}\n}\n",
        "}\n",
        // Randomly pick one of two attribute writes per item.
        "\"Condition\"\n{\n",
        "\"instance\" \"instances/item.vmf\"\n",
        "\"priority\" \"5\"\n",
        "\"result\"\n{\n\"random\"\n{\n",
        "\"seed\" \"pick\"\n",
        "\"randomnum\"\n{\n\"resultvar\" \"$left\"\n\"max\" \"4\"\n}\n",
        "\"randomnum\"\n{\n\"resultvar\" \"$right\"\n\"max\" \"4\"\n}\n",
        "}\n}\n",
        "}\n",
        // The one-shot tile generator.
        "\"Condition\"\n{\n",
        "\"meta\" \"1\"\n",
        "\"result\"\n{\n\"CutOutTile\"\n{\n",
        "\"MarkerItem\" \"instances/tile_marker.vmf\"\n",
        "\"floorChance\" \"60\"\n",
        "}\n}\n",
        "}\n",
        "}\n",
    )
    .to_string()
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    for n in 0..4 {
        let ent = scene.create_entity();
        ent.set("targetname", format!("item_{n}"));
        ent.set("origin", format!("{} 256 0", n * 64));
        ent.set("angles", "0 0 0");
        ent.set("file", ITEM);
    }
    let marker = scene.create_entity();
    marker.set("targetname", "tile_region");
    marker.set("origin", "64 64 256");
    marker.set("angles", "0 0 0");
    marker.set("file", MARKER);
    scene.add_solid(Solid::floor(Vec3::new(64.0, 64.0, 192.0), "floor"));
    scene
}

fn item_states(scene: &Scene) -> Vec<(String, String, String)> {
    scene
        .iter()
        .filter(|e| e.get("file", "").starts_with("instances/item"))
        .map(|e| {
            (
                e.name().to_string(),
                e.get("file", "").to_string(),
                format!("{}/{}", e.get("$left", "-"), e.get("$right", "-")),
            )
        })
        .collect()
}

#[test]
fn test_two_identical_runs_match_exactly() {
    let forest = parse(conditions_text().lines()).unwrap();
    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut engine = ConditionEngine::new("map_seed");
        engine.load(&forest).unwrap();
        let mut scene = build_scene();
        engine.compile(&mut scene).unwrap();
        runs.push((item_states(&scene), scene.tiles().to_vec()));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_different_seed_token_changes_branch_pattern() {
    let with_token = |token: &str| {
        let text = conditions_text().replace("\"seed\" \"pick\"", &format!("\"seed\" \"{token}\""));
        let forest = parse(text.lines()).unwrap();
        let mut engine = ConditionEngine::new("map_seed");
        engine.load(&forest).unwrap();
        let mut scene = build_scene();
        engine.compile(&mut scene).unwrap();
        scene
            .iter()
            .map(|e| e.has("$left"))
            .collect::<Vec<_>>()
    };
    // Different author tokens reseed the branch choice; with four items it
    // is overwhelmingly likely at least one flips across many tokens.
    let baseline = with_token("pick");
    let changed = ["alpha", "beta", "gamma", "delta", "epsilon"]
        .iter()
        .any(|t| with_token(t) != baseline);
    assert!(changed, "every token produced identical branches");
}

#[test]
fn test_exhausted_tree_replays_as_noop() {
    let forest = parse(conditions_text().lines()).unwrap();

    let mut engine = ConditionEngine::new("map_seed");
    engine.load(&forest).unwrap();
    let mut scene = build_scene();
    engine.compile(&mut scene).unwrap();
    let first_tiles = scene.tiles().len();
    assert!(first_tiles > 0, "the generator placed tiles");

    // Replay the rewritten tree against a fresh copy of the same scene:
    // the one-shot generator is tombstoned, so no tiles appear.
    let exported = engine.export();
    let mut replay = ConditionEngine::new("map_seed");
    replay.load(std::slice::from_ref(&exported)).unwrap();
    let mut scene2 = build_scene();
    replay.compile(&mut scene2).unwrap();
    assert_eq!(scene2.tiles().len(), 0);

    // Per-entity choices are not exhausted; they re-derive identically.
    assert_eq!(item_states(&scene), item_states(&scene2));
}

#[test]
fn test_replay_keeps_marker_untouched_when_exhausted() {
    let forest = parse(conditions_text().lines()).unwrap();
    let mut engine = ConditionEngine::new("map_seed");
    engine.load(&forest).unwrap();
    let mut scene = build_scene();
    engine.compile(&mut scene).unwrap();

    let exported = engine.export();
    let mut replay = ConditionEngine::new("map_seed");
    replay.load(std::slice::from_ref(&exported)).unwrap();
    let mut scene2 = build_scene();
    replay.compile(&mut scene2).unwrap();

    // The tombstoned generator never consumed the marker on replay.
    assert!(scene2.iter().any(|e| e.get("file", "") == MARKER));
}

#[test]
fn test_tiles_are_a_mix_at_midrange_chance() {
    // A 5x5 region: interior cells keep a low absent-neighbour weight, so
    // the noise field actually decides them.
    let forest = parse(conditions_text().lines()).unwrap();
    let mut scene = Scene::new();
    let start = scene.create_entity();
    start.set("targetname", "start");
    start.set("origin", "64 64 256");
    start.set("angles", "0 0 0");
    start.set("file", MARKER);
    start
        .outputs
        .push(mapforge::Output::new("OnActivate", "end", "Trigger"));
    let end = scene.create_entity();
    end.set("targetname", "end");
    end.set("origin", "576 576 256");
    end.set("angles", "0 0 0");
    end.set("file", MARKER);
    for cx in 0..5 {
        for cy in 0..5 {
            scene.add_solid(Solid::floor(
                Vec3::new(64.0 + 128.0 * f64::from(cx), 64.0 + 128.0 * f64::from(cy), 192.0),
                "floor",
            ));
        }
    }

    let mut engine = ConditionEngine::new("map_seed");
    engine.load(&forest).unwrap();
    engine.compile(&mut scene).unwrap();

    let full = scene
        .tiles()
        .iter()
        .filter(|t| t.kind == TileKind::Full)
        .count();
    // 60% threshold over 25 cells of 16 subtiles: a real mix.
    assert!(full > 0);
    assert!(full < 400);
}
