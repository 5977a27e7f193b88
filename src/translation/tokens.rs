/*!
 * Token protection for translatable text.
 *
 * Spell descriptions embed markup that must survive a round trip through an
 * external translator unmodified: Foundry macro blocks `[[...]]`, 5eTools tag
 * references `{@spell Fireball|phb}`, attribute paths `@item.level`, dice
 * expressions `3d8`, and slash commands `/save`. Before a segment is sent
 * out, every such fragment is swapped for an opaque placeholder; after
 * translation the placeholders are swapped back.
 *
 * Placeholders look like `§§T4§§`. The marker alphabet is uppercase ASCII
 * and digits between `§§` sentinels, so it survives providers that case-fold
 * or reflow whitespace. Nothing is guaranteed if a provider rewrites the
 * marker itself.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Classes of non-translatable substrings, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Foundry macro blocks: `[[/damage 3d8]]`
    MacroBlock,
    /// 5eTools tag references: `{@spell Fireball|phb}`
    TagReference,
    /// Attribute path references: `@item.level`, `@abilities.con.mod`
    PathReference,
    /// Dice expressions: `3d8`, `2d6+3`
    Dice,
    /// Slash commands: `/save`, `/roll`
    Command,
}

/// Ordered pattern table. Order matters: classes earlier in the table may
/// span characters that later classes would also match, and each class runs
/// as one left-to-right scan over the text.
static TOKEN_PATTERNS: Lazy<Vec<(Regex, TokenClass)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\[\[.*?\]\]").unwrap(), TokenClass::MacroBlock),
        (Regex::new(r"\{@[^{}]+\}").unwrap(), TokenClass::TagReference),
        (
            Regex::new(r"@[A-Za-z0-9_.\[\]-]+").unwrap(),
            TokenClass::PathReference,
        ),
        (Regex::new(r"\b\d+d\d+([+-]\d+)?\b").unwrap(), TokenClass::Dice),
        (Regex::new(r"/[a-zA-Z]+").unwrap(), TokenClass::Command),
    ]
});

/// A protected substring lifted out of a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedToken {
    /// Which pattern class matched
    pub class: TokenClass,
    /// The original matched text, restored verbatim after translation
    pub text: String,
}

/// Replace every protected substring in `text` with a placeholder.
///
/// Returns the shielded text (safe to hand to a translator) and the list of
/// lifted tokens in order of first appearance. The placeholder index is
/// global across all pattern classes within one call.
pub fn protect(text: &str) -> (String, Vec<ProtectedToken>) {
    if text.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut tokens: Vec<ProtectedToken> = Vec::new();
    let mut shielded = text.to_string();

    for (pattern, class) in TOKEN_PATTERNS.iter() {
        shielded = pattern
            .replace_all(&shielded, |caps: &regex::Captures| {
                let placeholder = format!("§§T{}§§", tokens.len());
                tokens.push(ProtectedToken {
                    class: *class,
                    text: caps[0].to_string(),
                });
                placeholder
            })
            .into_owned();
    }

    (shielded, tokens)
}

/// Replace each placeholder `§§T<i>§§` in `translated` with `tokens[i]`.
///
/// Tolerates the translator moving or duplicating placeholders. A
/// placeholder whose index has no entry in `tokens` is left in place rather
/// than failing.
pub fn restore(translated: &str, tokens: &[ProtectedToken]) -> String {
    let mut out = translated.to_string();
    for (index, token) in tokens.iter().enumerate() {
        let placeholder = format!("§§T{index}§§");
        out = out.replace(&placeholder, &token.text);
    }
    out
}
