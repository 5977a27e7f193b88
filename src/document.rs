/*!
 * Segment collection and reinjection over a spell document tree.
 *
 * The translation core only sees a flat ordered list of strings; this module
 * decides which strings in an arbitrary JSON tree are prose. Collection
 * produces the ordered anchor list, and reinjection consumes that same list,
 * so both directions share one contract and cannot drift apart.
 */

use anyhow::{Result, anyhow};
use serde_json::Value;

/// Keys whose string values are identifiers, codes, or asset paths, never
/// prose to translate.
const SKIP_VALUE_KEYS: &[&str] = &[
    "foundryId",
    "uuid",
    "id",
    "img",
    "icon",
    "iconPath",
    "tag",
    "tags",
    "slug",
    "key",
    "module",
    "pack",
    "path",
    "file",
    "source",
    "sources",
    "calculation",
    "mode",
    "denomination",
    "number",
    "school",
    "level",
    "scaling",
    "ability",
    "abilities",
    // kept as the untouched original once captured
    "name_en",
];

/// Subtrees that are entirely technical and never walked for prose
const SKIP_SUBTREES: &[&str] = &["system"];

/// Where a segment's translation goes back: an object key or a list index
/// under the parent container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Key(String),
    Index(usize),
}

/// One translatable unit lifted out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Dot-path of the parent container; opaque to the translation core
    pub path: String,
    /// Key or index under the parent
    pub anchor: Anchor,
    /// The raw text at that location
    pub text: String,
}

/// Copy each record's original `name` into `name_en` before translation
/// overwrites it. An existing non-empty `name_en` is left alone, and
/// `name_en` itself is excluded from collection.
pub fn capture_english_names(root: &mut Value) {
    let Value::Array(records) = root else {
        return;
    };

    for record in records {
        let Value::Object(map) = record else {
            continue;
        };
        let Some(name) = map.get("name").and_then(Value::as_str).map(str::to_string) else {
            continue;
        };

        let already_captured = map
            .get("name_en")
            .and_then(Value::as_str)
            .is_some_and(|existing| !existing.is_empty());
        if !already_captured {
            map.insert("name_en".to_string(), Value::String(name));
        }
    }
}

/// Walk the tree and collect every translatable string segment, in document
/// order, with the anchor needed to reinject its translation.
pub fn collect_segments(root: &Value) -> Vec<Segment> {
    let mut segments = Vec::new();
    walk_collect(root, "", &mut segments);
    segments
}

fn walk_collect(value: &Value, dotpath: &str, segments: &mut Vec<Segment>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if let Value::String(text) = child {
                    if should_skip_value(dotpath, key) {
                        continue;
                    }
                    segments.push(Segment {
                        path: dotpath.to_string(),
                        anchor: Anchor::Key(key.clone()),
                        text: text.clone(),
                    });
                } else {
                    walk_collect(child, &join_path(dotpath, key), segments);
                }
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                if let Value::String(text) = child {
                    if in_skipped_subtree(dotpath) {
                        continue;
                    }
                    segments.push(Segment {
                        path: dotpath.to_string(),
                        anchor: Anchor::Index(index),
                        text: text.clone(),
                    });
                } else {
                    walk_collect(child, &join_path(dotpath, &index.to_string()), segments);
                }
            }
        }
        _ => {}
    }
}

/// Write translations back through the same ordered anchor list that
/// collection produced. Lengths must match exactly.
pub fn reinject(root: &mut Value, segments: &[Segment], translations: &[String]) -> Result<()> {
    if segments.len() != translations.len() {
        return Err(anyhow!(
            "Segment/translation count mismatch: {} anchors, {} translations",
            segments.len(),
            translations.len()
        ));
    }

    for (segment, translation) in segments.iter().zip(translations) {
        let parent = resolve_path_mut(root, &segment.path)
            .ok_or_else(|| anyhow!("Anchor path no longer resolves: {}", segment.path))?;

        match (&segment.anchor, parent) {
            (Anchor::Key(key), Value::Object(map)) => {
                map.insert(key.clone(), Value::String(translation.clone()));
            }
            (Anchor::Index(index), Value::Array(items)) if *index < items.len() => {
                items[*index] = Value::String(translation.clone());
            }
            (anchor, _) => {
                return Err(anyhow!(
                    "Anchor {:?} does not fit the container at '{}'",
                    anchor,
                    segment.path
                ));
            }
        }
    }

    Ok(())
}

fn join_path(dotpath: &str, component: &str) -> String {
    if dotpath.is_empty() {
        component.to_string()
    } else {
        format!("{dotpath}.{component}")
    }
}

fn should_skip_value(dotpath: &str, key: &str) -> bool {
    SKIP_VALUE_KEYS.contains(&key) || in_skipped_subtree(dotpath)
}

fn in_skipped_subtree(dotpath: &str) -> bool {
    !dotpath.is_empty()
        && dotpath
            .split('.')
            .any(|part| SKIP_SUBTREES.contains(&part))
}

fn resolve_path_mut<'a>(root: &'a mut Value, dotpath: &str) -> Option<&'a mut Value> {
    if dotpath.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for part in dotpath.split('.') {
        current = match current {
            Value::Object(map) => map.get_mut(part)?,
            Value::Array(items) => items.get_mut(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
