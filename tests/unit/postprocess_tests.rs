/*!
 * Tests for post-translation fixups
 */

use grimoire::postprocess::{apply, apply_glossary};
use serde_json::json;

#[test]
fn test_apply_shouldMapActivityTypeInContext() {
    let mut root = json!([
        { "activities": [ { "type": "damage" } ] }
    ]);

    apply(&mut root);
    assert_eq!(root[0]["activities"][0]["type"], "dégâts");
}

#[test]
fn test_apply_shouldLeaveTypeOutsideKnownContextsAlone() {
    let mut root = json!([
        { "type": "damage" }
    ]);

    apply(&mut root);
    assert_eq!(root[0]["type"], "damage");
}

#[test]
fn test_apply_shouldMapActivationType() {
    let mut root = json!([
        { "activation": { "type": "reaction" } }
    ]);

    apply(&mut root);
    assert_eq!(root[0]["activation"]["type"], "réaction");
}

#[test]
fn test_apply_shouldMapOnSaveInDamageContext() {
    let mut root = json!([
        { "damage": { "onSave": "half" } }
    ]);

    apply(&mut root);
    assert_eq!(root[0]["damage"]["onSave"], "moitié");
}

#[test]
fn test_apply_shouldMapStatusLists() {
    let mut root = json!([
        { "effects": [ { "statuses": ["blinded", "prone", "unknownStatus"] } ] }
    ]);

    apply(&mut root);
    let statuses = &root[0]["effects"][0]["statuses"];
    assert_eq!(statuses[0], "aveuglé");
    assert_eq!(statuses[1], "à terre");
    // Unknown values pass through untouched
    assert_eq!(statuses[2], "unknownStatus");
}

#[test]
fn test_apply_shouldRunGlossaryOnNames() {
    let mut root = json!([
        { "name": "Searing Smite" }
    ]);

    apply(&mut root);
    assert_eq!(root[0]["name"], "Searing Châtiment");
}

#[test]
fn test_applyGlossary_shouldReplaceSequentially() {
    assert_eq!(apply_glossary("Blindness/Deafness"), "Cécité/Surdité");
}
