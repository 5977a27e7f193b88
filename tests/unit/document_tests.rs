/*!
 * Tests for document segment collection and reinjection
 */

use grimoire::document::{Anchor, capture_english_names, collect_segments, reinject};
use serde_json::json;

use crate::common::sample_spell_document;

#[test]
fn test_collectSegments_shouldSkipIdentifierKeys() {
    let root = sample_spell_document();
    let segments = collect_segments(&root);

    let texts: Vec<&str> = segments.iter().map(|segment| segment.text.as_str()).collect();
    // school/level/source are codes, not prose
    assert!(!texts.contains(&"V"));
    assert!(!texts.contains(&"XPHB"));
}

#[test]
fn test_collectSegments_shouldSkipSystemSubtree() {
    let root = sample_spell_document();
    let segments = collect_segments(&root);

    assert!(
        segments
            .iter()
            .all(|segment| !segment.text.contains("technical block"))
    );
}

#[test]
fn test_collectSegments_shouldKeepDocumentOrder() {
    let root = sample_spell_document();
    let segments = collect_segments(&root);

    let texts: Vec<&str> = segments.iter().map(|segment| segment.text.as_str()).collect();
    let name_pos = texts.iter().position(|t| *t == "Searing Smite").unwrap();
    let first_entry_pos = texts
        .iter()
        .position(|t| t.starts_with("Your weapon flares"))
        .unwrap();
    let second_entry_pos = texts
        .iter()
        .position(|t| t.starts_with("The target takes"))
        .unwrap();

    assert!(name_pos < first_entry_pos);
    assert!(first_entry_pos < second_entry_pos);
}

#[test]
fn test_collectSegments_shouldAnchorListItemsByIndex() {
    let root = sample_spell_document();
    let segments = collect_segments(&root);

    let entry = segments
        .iter()
        .find(|segment| segment.text.starts_with("The target takes"))
        .unwrap();
    assert_eq!(entry.anchor, Anchor::Index(1));
    assert_eq!(entry.path, "0.entries");
}

#[test]
fn test_reinject_shouldWriteBackThroughSameAnchors() {
    let mut root = sample_spell_document();
    let segments = collect_segments(&root);

    let translations: Vec<String> = segments
        .iter()
        .map(|segment| format!("FR:{}", segment.text))
        .collect();
    reinject(&mut root, &segments, &translations).unwrap();

    assert_eq!(root[0]["name"], "FR:Searing Smite");
    assert_eq!(
        root[0]["entries"][0],
        "FR:Your weapon flares with white-hot intensity."
    );
    // Skipped values are untouched
    assert_eq!(root[0]["school"], "V");
    assert_eq!(
        root[0]["system"]["description"],
        "technical block, never translated"
    );
}

#[test]
fn test_reinject_withCountMismatch_shouldFail() {
    let mut root = sample_spell_document();
    let segments = collect_segments(&root);

    let result = reinject(&mut root, &segments, &["too few".to_string()]);
    assert!(result.is_err());
}

#[test]
fn test_captureEnglishNames_shouldCopyNameOnce() {
    let mut root = json!([
        { "name": "Fireball" },
        { "name": "Shield", "name_en": "Shield (original)" }
    ]);

    capture_english_names(&mut root);

    assert_eq!(root[0]["name_en"], "Fireball");
    // An existing non-empty capture is left alone
    assert_eq!(root[1]["name_en"], "Shield (original)");
}

#[test]
fn test_captureEnglishNames_resultIsNeverCollected() {
    let mut root = json!([{ "name": "Fireball" }]);
    capture_english_names(&mut root);

    let segments = collect_segments(&root);
    assert!(
        segments
            .iter()
            .all(|segment| segment.anchor != Anchor::Key("name_en".to_string()))
    );
}
