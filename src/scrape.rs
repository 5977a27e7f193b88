//! Spell data collection from the 5eTools GitHub mirror.
//!
//! Lists `data/spells/*.json` through the GitHub contents API, downloads each
//! file, extracts and tags the spell records, and writes an aggregate JSON
//! dump plus a flattened CSV summary.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::file_utils::FileManager;

const SPELLS_DIR_API: &str =
    "https://api.github.com/repos/5etools-mirror-3/5etools-src/contents/data/spells";

/// Gentle throttle between unauthenticated downloads
const DOWNLOAD_THROTTLE: Duration = Duration::from_millis(300);

/// One entry from a GitHub contents-API directory listing
#[derive(Debug, Deserialize)]
struct DirectoryItem {
    name: String,
    download_url: Option<String>,
}

/// What a scrape run produced
#[derive(Debug)]
pub struct ScrapeSummary {
    /// Number of spell files downloaded
    pub files: usize,
    /// Number of spell records aggregated
    pub spells: usize,
    /// Full JSON dump location
    pub json_path: PathBuf,
    /// Flattened CSV location
    pub csv_path: PathBuf,
}

/// Scraper for the 5eTools spell mirror
pub struct Scraper {
    client: Client,
}

impl Scraper {
    /// Create a new scraper.
    pub fn new() -> Result<Self> {
        // The GitHub API rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(concat!("grimoire/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Download and aggregate every spell file into `out_dir`.
    pub fn run(&self, out_dir: &Path) -> Result<ScrapeSummary> {
        FileManager::ensure_dir(out_dir)?;

        let files = self.list_spell_files()?;
        info!("Found {} spell files", files.len());

        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut all_spells: Vec<Value> = Vec::new();
        for item in &files {
            let Some(url) = item.download_url.as_deref() else {
                warn!("No download URL for {}, skipping", item.name);
                bar.inc(1);
                continue;
            };

            bar.set_message(item.name.clone());
            let payload = self.fetch_json(url)?;
            let spells = extract_spells(&payload, &item.name);
            debug!("{} -> {} spells", item.name, spells.len());
            all_spells.extend(spells);

            bar.inc(1);
            thread::sleep(DOWNLOAD_THROTTLE);
        }
        bar.finish_and_clear();

        info!("Aggregated {} spells", all_spells.len());

        let json_path = out_dir.join("spells_5etools_full.json");
        let serialized = serde_json::to_string_pretty(&all_spells)
            .context("Failed to serialize aggregated spells")?;
        FileManager::write_to_file(&json_path, &serialized)?;

        let csv_path = out_dir.join("spells_5etools_min.csv");
        FileManager::write_to_file(&csv_path, &flatten_to_csv(&all_spells))?;

        Ok(ScrapeSummary {
            files: files.len(),
            spells: all_spells.len(),
            json_path,
            csv_path,
        })
    }

    /// List the spell JSON files under data/spells/.
    fn list_spell_files(&self) -> Result<Vec<DirectoryItem>> {
        let response = self
            .client
            .get(SPELLS_DIR_API)
            .send()
            .context("Failed to list spell directory")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("GitHub API responded with HTTP {}", status.as_u16()));
        }

        let items: Vec<DirectoryItem> = response
            .json()
            .context("Failed to parse directory listing")?;

        Ok(items
            .into_iter()
            .filter(|item| item.name.ends_with(".json"))
            .collect())
    }

    /// Download one raw JSON payload.
    fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to download {url}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Download of {url} failed with HTTP {}", status.as_u16()));
        }

        response
            .json()
            .with_context(|| format!("Failed to parse JSON from {url}"))
    }
}

/// Pull the spell records out of one file's payload, tagging each with its
/// source file and, when present, the book code from `_meta.sources`.
fn extract_spells(payload: &Value, source_filename: &str) -> Vec<Value> {
    let book = payload
        .get("_meta")
        .and_then(|meta| meta.get("sources"))
        .and_then(Value::as_array)
        .and_then(|sources| sources.first())
        .and_then(|source| source.get("json"))
        .cloned()
        .unwrap_or(Value::Null);

    let records = payload
        .get("spell")
        .or_else(|| payload.get("spells"))
        .and_then(Value::as_array)
        .cloned()
        .or_else(|| payload.as_array().cloned())
        .unwrap_or_default();

    records
        .into_iter()
        .filter_map(|record| match record {
            Value::Object(mut map) => {
                map.insert(
                    "_src_file".to_string(),
                    Value::String(source_filename.to_string()),
                );
                map.insert("_book".to_string(), book.clone());
                Some(Value::Object(map))
            }
            _ => None,
        })
        .collect()
}

const CSV_HEADER: &[&str] = &[
    "name",
    "level",
    "school",
    "time",
    "range",
    "components",
    "duration",
    "classes",
    "source",
    "_src_file",
    "_book",
];

/// Flatten the aggregated spells into a minimal CSV, sorted by level then
/// name. The full JSON dump keeps everything; this is a skimmable summary.
fn flatten_to_csv(spells: &[Value]) -> String {
    let mut rows: Vec<(i64, String, Vec<String>)> = spells
        .iter()
        .map(|spell| {
            let level = spell.get("level").and_then(Value::as_i64).unwrap_or(i64::MAX);
            let name = text_at(spell, "name");
            (level, name, flatten_row(spell))
        })
        .collect();
    rows.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

    let mut out = String::new();
    write_csv_row(&mut out, CSV_HEADER.iter().map(|field| field.to_string()));
    for (_, _, row) in rows {
        write_csv_row(&mut out, row.into_iter());
    }
    out
}

fn flatten_row(spell: &Value) -> Vec<String> {
    let time = match spell.get("time") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {}",
                    entry.get("number").map(render_scalar).unwrap_or_default(),
                    text_at(entry, "unit")
                )
                .trim()
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => render_scalar(other),
        None => String::new(),
    };

    let range = match spell.get("range") {
        Some(Value::Object(range)) => range
            .get("distance")
            .and_then(|distance| distance.get("amount"))
            .map(render_scalar)
            .unwrap_or_default(),
        Some(other) => render_scalar(other),
        None => String::new(),
    };

    let components = match spell.get("components") {
        Some(Value::Object(components)) => {
            let mut present: Vec<&str> = components
                .iter()
                .filter(|(_, used)| matches!(used, Value::Bool(true)))
                .map(|(component, _)| component.as_str())
                .collect();
            present.sort_unstable();
            present.join(",")
        }
        Some(other) => render_scalar(other),
        None => String::new(),
    };

    let duration = match spell.get("duration") {
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| text_at(entry, "type"))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => render_scalar(other),
        None => String::new(),
    };

    let classes = spell
        .get("classes")
        .and_then(|classes| classes.get("fromClassList"))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .map(render_scalar)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    vec![
        text_at(spell, "name"),
        spell.get("level").map(render_scalar).unwrap_or_default(),
        text_at(spell, "school"),
        time,
        range,
        components,
        duration,
        classes,
        text_at(spell, "source"),
        text_at(spell, "_src_file"),
        text_at(spell, "_book"),
    ]
}

fn text_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .map(render_scalar)
        .unwrap_or_default()
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_csv_row(out: &mut String, row: impl Iterator<Item = String>) {
    let mut first = true;
    for cell in row {
        if !first {
            out.push(',');
        } else {
            first = false;
        }
        if needs_quotes(&cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&cell);
        }
    }
    out.push('\n');
}
