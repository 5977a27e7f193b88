/*!
 * Post-translation fixups applied after reinjection: contextual enum
 * mappings, condition status mappings, and a small French glossary for
 * recurring names the machine translation gets wrong.
 */

use serde_json::Value;

/// `activities[].type` values
const ACTIVITY_TYPES: &[(&str, &str)] = &[
    ("damage", "dégâts"),
    ("save", "sauvegarde"),
    ("healing", "soin"),
    ("utility", "utilitaire"),
];

/// `activation.type` values
const ACTIVATION_TYPES: &[(&str, &str)] = &[
    ("action", "action"),
    ("bonus", "action bonus"),
    ("reaction", "réaction"),
    ("minute", "minute"),
    ("hour", "heure"),
];

/// `damage.onSave` values
const DAMAGE_ON_SAVE: &[(&str, &str)] = &[("none", "aucun"), ("half", "moitié")];

/// Condition statuses, fine to translate for print-only use
const STATUSES: &[(&str, &str)] = &[
    ("blinded", "aveuglé"),
    ("deafened", "assourdi"),
    ("charmed", "charmé"),
    ("frightened", "terrorisé"),
    ("paralyzed", "paralysé"),
    ("poisoned", "empoisonné"),
    ("prone", "à terre"),
    ("restrained", "entravé"),
    ("stunned", "hébété"),
    ("unconscious", "inconscient"),
    ("poison", "poison"),
];

/// Recurring words in names and descriptions the provider translates badly
const GLOSSARY: &[(&str, &str)] = &[
    ("Smite", "Châtiment"),
    ("Blinding", "Aveuglant"),
    ("Blindness", "Cécité"),
    ("Deafness", "Surdité"),
    ("and", "et"),
    ("radiant", "rayonnant"),
];

/// Apply all post-translation fixups to the document tree in place.
pub fn apply(root: &mut Value) {
    walk(root, "");
}

/// Sequentially apply the glossary replacements to one string.
pub fn apply_glossary(text: &str) -> String {
    let mut out = text.to_string();
    for (source, replacement) in GLOSSARY {
        out = out.replace(source, replacement);
    }
    out
}

fn walk(value: &mut Value, dotpath: &str) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = join_path(dotpath, key);

                match key.as_str() {
                    "type" => {
                        if in_context(dotpath, "activities") {
                            map_string_in_place(child, ACTIVITY_TYPES);
                        }
                        if in_context(dotpath, "activation") {
                            map_string_in_place(child, ACTIVATION_TYPES);
                        }
                    }
                    "onSave" if in_context(dotpath, "damage") => {
                        map_string_in_place(child, DAMAGE_ON_SAVE);
                    }
                    "statuses" => {
                        if let Value::Array(statuses) = child {
                            for status in statuses.iter_mut() {
                                map_string_in_place(status, STATUSES);
                            }
                        }
                    }
                    "name" | "description" => {
                        if let Value::String(text) = child {
                            *text = apply_glossary(text);
                        }
                    }
                    _ => {}
                }

                walk(child, &child_path);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                let child_path = join_path(dotpath, &index.to_string());
                if let Value::String(text) = child {
                    if in_context(dotpath, "effects") || in_context(dotpath, "activities") {
                        *text = apply_glossary(text);
                    }
                } else {
                    walk(child, &child_path);
                }
            }
        }
        _ => {}
    }
}

fn map_string_in_place(value: &mut Value, table: &[(&str, &str)]) {
    if let Value::String(text) = value {
        if let Some((_, mapped)) = table.iter().find(|(source, _)| *source == text.as_str()) {
            *text = mapped.to_string();
        }
    }
}

fn in_context(dotpath: &str, name: &str) -> bool {
    dotpath.split('.').any(|part| part == name)
}

fn join_path(dotpath: &str, component: &str) -> String {
    if dotpath.is_empty() {
        component.to_string()
    } else {
        format!("{dotpath}.{component}")
    }
}
