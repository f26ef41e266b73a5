mod common;

use common::{test_config, touch, FakeRunner, MemoryClipboard, TEMPLATE};
use figflow_core::{ErrorCode, Workflow};
use std::fs;

#[test]
fn creates_figures_dir_copies_template_and_copies_stem() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let doc = tmp.path().join("doc");
    fs::create_dir(&doc).unwrap();
    let runner = FakeRunner::new();
    let mut clipboard = MemoryClipboard::default();

    let created = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("Block Diagram", &doc)
        .unwrap();

    let svg = doc.join("figures").join("block-diagram.svg");
    assert_eq!(created.stem, "block-diagram");
    assert_eq!(created.svg, svg);
    assert_eq!(fs::read_to_string(&svg).unwrap(), TEMPLATE);
    assert_eq!(clipboard.text.as_deref(), Some("block-diagram"));
    assert_eq!(created.export.exported, vec!["block-diagram"]);
}

#[test]
fn editor_runs_inside_a_floating_space() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let runner = FakeRunner::new();
    let mut clipboard = MemoryClipboard::default();

    let created = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("Phase Plot", tmp.path())
        .unwrap();

    let svg = created.svg.display().to_string();
    let create = runner.position("yabai -m space --create").unwrap();
    let focus_new = runner.position("yabai -m space --focus 4").unwrap();
    let float = runner.position("yabai -m space --layout float").unwrap();
    let editor = runner.position(&format!("inkscape {}", svg)).unwrap();
    let destroy = runner.position("yabai -m space 4 --destroy").unwrap();
    let refocus = runner.position("yabai -m space --focus 2").unwrap();
    let export = runner.position(&format!("inkscape -f {}", svg)).unwrap();

    assert!(create < focus_new && focus_new < float && float < editor);
    assert!(editor < destroy && destroy < refocus && refocus < export);
}

#[test]
fn taken_stem_gets_a_suffix() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let figures = tmp.path().join("figures");
    touch(&figures, &["block-diagram.svg", "block-diagram-1.svg"]);
    let runner = FakeRunner::new();
    let mut clipboard = MemoryClipboard::default();

    let created = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("Block Diagram", tmp.path())
        .unwrap();

    assert_eq!(created.stem, "block-diagram-2");
    assert_eq!(
        fs::read_to_string(figures.join("block-diagram.svg")).unwrap(),
        "contents of block-diagram.svg"
    );
    assert_eq!(clipboard.text.as_deref(), Some("block-diagram-2"));
}

#[test]
fn missing_template_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = test_config(tmp.path());
    config.template = tmp.path().join("nope.svg");
    let runner = FakeRunner::new();
    let mut clipboard = MemoryClipboard::default();

    let err = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("Block Diagram", tmp.path())
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::TemplateMissing);
    assert!(!tmp.path().join("figures").exists());
    assert!(runner.calls().is_empty());
    assert!(clipboard.text.is_none());
}

#[test]
fn blank_title_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let runner = FakeRunner::new();
    let mut clipboard = MemoryClipboard::default();

    let err = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("   ", tmp.path())
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidTitle);
}

#[test]
fn unreadable_space_query_aborts_before_editing() {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(tmp.path());
    let runner = FakeRunner::new().fail("yabai -m query --spaces");
    let mut clipboard = MemoryClipboard::default();

    let err = Workflow::new(&config, &runner, &mut clipboard)
        .create_figure("Block Diagram", tmp.path())
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::QueryFailed);
    assert!(runner.position("inkscape").is_none());
    assert!(clipboard.text.is_none());
}
