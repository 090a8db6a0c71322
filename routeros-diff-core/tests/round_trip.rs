use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use routeros_diff_core::{
    apply, diff, export, format_text, parse, parse_file, parse_script, render, RenderMode,
    SectionPath, SectionTree,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../fixtures")
        .join(name)
}

fn load(name: &str) -> SectionTree {
    parse_file(fixture(name)).expect("fixture should parse")
}

#[test]
fn pretty_script_text_replays_to_target() {
    let base = load("base.rsc");
    let target = load("target.rsc");
    let script = diff(&base, &target).expect("diff");

    let reparsed = parse_script(&format_text(&script)).expect("pretty text parses");
    assert_eq!(format_text(&reparsed), format_text(&script));
    assert_eq!(apply(&base, &reparsed).expect("apply"), target);
}

#[test]
fn wire_script_text_replays_to_target() {
    let base = load("base.rsc");
    let target = load("target.rsc");
    let script = diff(&base, &target).expect("diff");

    let wire = render(&script, RenderMode::Wire).collect::<Vec<_>>().join("\n");
    let reparsed = parse_script(&wire).expect("wire text parses");
    assert_eq!(apply(&base, &reparsed).expect("apply"), target);
}

#[test]
fn export_round_trips_fixtures() {
    for name in ["base.rsc", "target.rsc", "wrapped.rsc"] {
        let tree = load(name);
        let again = parse(&export(&tree)).expect("export parses");
        assert_eq!(again, tree, "{name}");
        assert_eq!(again.version(), tree.version(), "{name}");
    }
}

#[test]
fn wrapped_export_matches_unwrapped_lines() {
    let wrapped = load("wrapped.rsc");
    let text = fs::read_to_string(fixture("wrapped.rsc")).expect("read fixture");
    let unwrapped = text.replace("\\\n    ", "");
    assert!(!unwrapped.contains("\\\n"));
    assert_eq!(parse(&unwrapped).expect("unwrapped parses"), wrapped);

    let identity = wrapped
        .get(&SectionPath::parse("/system identity"))
        .expect("identity section");
    let name = identity
        .settings()
        .next()
        .and_then(|setting| setting.values().get("name"))
        .map(String::as_str);
    assert_eq!(name, Some("lab-router"));
    assert_eq!(wrapped.version(), Some("7.15.3"));
}
