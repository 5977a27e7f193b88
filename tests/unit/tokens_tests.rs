/*!
 * Tests for token protection and restoration
 */

use grimoire::translation::tokens::{TokenClass, protect, restore};

#[test]
fn test_roundTrip_withNoTokens_shouldBeIdentity() {
    let text = "A plain sentence with no markup at all.";
    let (shielded, tokens) = protect(text);
    assert_eq!(restore(&shielded, &tokens), text);
}

#[test]
fn test_roundTrip_withOneOfEachClass_shouldBeIdentity() {
    let text =
        "Cast [[/damage]] using {@spell Fireball|phb} at @item.level dealing 3d8 radiant via /roll";
    let (shielded, tokens) = protect(text);
    assert_eq!(restore(&shielded, &tokens), text);
}

#[test]
fn test_roundTrip_withManyTokens_shouldBeIdentity() {
    let text = "Roll 2d6+3 then 1d4, apply {@condition prone} and {@condition stunned}, \
                see @abilities.con.mod and [[/save dex]] or /check";
    let (shielded, tokens) = protect(text);
    assert_eq!(restore(&shielded, &tokens), text);
}

#[test]
fn test_protect_withOneOfEachClass_shouldYieldFiveOrderedTokens() {
    let text =
        "Cast [[/damage]] using {@spell Fireball|phb} at @item.level dealing 3d8 radiant via /roll";
    let (shielded, tokens) = protect(text);

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].text, "[[/damage]]");
    assert_eq!(tokens[0].class, TokenClass::MacroBlock);
    assert_eq!(tokens[1].text, "{@spell Fireball|phb}");
    assert_eq!(tokens[1].class, TokenClass::TagReference);
    assert_eq!(tokens[2].text, "@item.level");
    assert_eq!(tokens[2].class, TokenClass::PathReference);
    assert_eq!(tokens[3].text, "3d8");
    assert_eq!(tokens[3].class, TokenClass::Dice);
    assert_eq!(tokens[4].text, "/roll");
    assert_eq!(tokens[4].class, TokenClass::Command);

    // Placeholders are distinct and all present
    for index in 0..5 {
        let placeholder = format!("§§T{index}§§");
        assert_eq!(shielded.matches(&placeholder).count(), 1);
    }
}

#[test]
fn test_protect_withEmptyInput_shouldYieldEmptyOutput() {
    let (shielded, tokens) = protect("");
    assert!(shielded.is_empty());
    assert!(tokens.is_empty());
}

#[test]
fn test_protect_shouldNotLeaveProtectedTextInShieldedOutput() {
    let (shielded, _) = protect("Deal 3d8 damage with {@spell Fireball|phb}");
    assert!(!shielded.contains("3d8"));
    assert!(!shielded.contains("{@spell"));
}

#[test]
fn test_restore_withCaseFoldingTranslator_shouldSurvive() {
    let text = "Cast {@spell Fireball|phb} for 8d6 damage";
    let (shielded, tokens) = protect(text);

    // Some providers normalize case; the marker alphabet must survive that.
    let mangled = shielded.to_uppercase();
    let restored = restore(&mangled, &tokens);

    assert!(restored.contains("{@spell Fireball|phb}"));
    assert!(restored.contains("8d6"));
}

#[test]
fn test_restore_withDuplicatedPlaceholder_shouldReplaceEveryOccurrence() {
    let (shielded, tokens) = protect("Use {@item Longsword|phb} now");
    let duplicated = format!("{shielded} encore: {shielded}");

    let restored = restore(&duplicated, &tokens);
    assert_eq!(restored.matches("{@item Longsword|phb}").count(), 2);
}

#[test]
fn test_restore_withUnknownIndex_shouldLeavePlaceholderInPlace() {
    let (shielded, tokens) = protect("Only one {@spell Shield|phb} here");
    let with_stray = format!("{shielded} §§T9§§");

    let restored = restore(&with_stray, &tokens);
    assert!(restored.contains("{@spell Shield|phb}"));
    assert!(restored.contains("§§T9§§"));
}

#[test]
fn test_protect_withDiceVariants_shouldMatchModifiers() {
    let (_, tokens) = protect("Roll 2d6+3 or 1d20-1");
    let texts: Vec<&str> = tokens.iter().map(|token| token.text.as_str()).collect();
    assert_eq!(texts, vec!["2d6+3", "1d20-1"]);
}
