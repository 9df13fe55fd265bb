//! Model catalog loaded from a JSON manifest
//!
//! Two manifest shapes are accepted:
//!
//! ```json
//! { "categories": { "fine_art": [ { "name": "...", "path": "..." } ] } }
//! { "models": [ { "name": "...", "path": "...", "category": "..." } ] }
//! ```
//!
//! Entries are grouped by title-cased category, categories sorted
//! lexically, and asset paths resolved against the manifest's directory.

use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One selectable model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry {
    pub name: String,
    /// Absolute (or manifest-relative resolved) asset path
    pub path: PathBuf,
    pub description: String,
}

/// One accordion section
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub label: String,
    pub entries: Vec<ModelEntry>,
}

/// The grouped, ordered catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    pub categories: Vec<CategoryGroup>,
}

impl ModelCatalog {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn model_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: Option<String>,
    path: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    categories: Option<BTreeMap<String, Vec<RawEntry>>>,
    #[serde(default)]
    models: Option<Vec<RawEntry>>,
}

/// Read and normalize a manifest file
pub fn load_manifest(path: &Path) -> Result<ModelCatalog, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let catalog = parse_manifest(&text, base)?;
    info!(
        "manifest {}: {} categories, {} models",
        path.display(),
        catalog.categories.len(),
        catalog.model_count()
    );
    Ok(catalog)
}

/// Normalize manifest JSON; `base` anchors relative asset paths
pub fn parse_manifest(text: &str, base: &Path) -> Result<ModelCatalog, String> {
    let raw: RawManifest =
        serde_json::from_str(text).map_err(|e| format!("Invalid manifest JSON: {}", e))?;

    let mut grouped: BTreeMap<String, Vec<ModelEntry>> = BTreeMap::new();

    if let Some(categories) = raw.categories {
        for (key, entries) in categories {
            let label = title_case(&key);
            let bucket = grouped.entry(label).or_default();
            bucket.extend(entries.into_iter().map(|e| normalize_entry(e, base)));
        }
    } else if let Some(models) = raw.models {
        for entry in models {
            let label = title_case(entry.category.as_deref().unwrap_or(DEFAULT_CATEGORY));
            grouped.entry(label).or_default().push(normalize_entry(entry, base));
        }
    } else {
        return Err("Manifest has neither \"categories\" nor \"models\"".to_string());
    }

    Ok(ModelCatalog {
        categories: grouped
            .into_iter()
            .map(|(label, entries)| CategoryGroup { label, entries })
            .collect(),
    })
}

fn normalize_entry(entry: RawEntry, base: &Path) -> ModelEntry {
    let name = entry
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| {
            Path::new(&entry.path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Unnamed".to_string())
        });
    let raw_path = Path::new(&entry.path);
    let path = if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        base.join(raw_path)
    };
    ModelEntry {
        name,
        path,
        description: entry.description.unwrap_or_default(),
    }
}

/// "fine_art-prints" -> "Fine Art Prints"
pub fn title_case(s: &str) -> String {
    let cleaned = s.replace(['_', '-'], " ");
    let words: Vec<String> = cleaned
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flat_list_defaults_to_uncategorized() {
        let catalog =
            parse_manifest(r#"{"models":[{"name":"X","path":"a.glb"}]}"#, Path::new("/m")).unwrap();
        assert_eq!(catalog.categories.len(), 1);
        let group = &catalog.categories[0];
        assert_eq!(group.label, "Uncategorized");
        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.entries[0].name, "X");
    }

    #[test]
    fn category_keys_are_title_cased() {
        let catalog = parse_manifest(
            r#"{"categories":{"fine_art":[{"path":"art/venus.glb"}]}}"#,
            Path::new("/m"),
        )
        .unwrap();
        assert_eq!(catalog.categories[0].label, "Fine Art");
    }

    #[test]
    fn categories_sort_lexically() {
        let catalog = parse_manifest(
            r#"{"models":[
                {"path":"a.glb","category":"medical"},
                {"path":"b.glb","category":"education"},
                {"path":"c.glb","category":"art"}
            ]}"#,
            Path::new("/m"),
        )
        .unwrap();
        let labels: Vec<_> = catalog.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Art", "Education", "Medical"]);
    }

    #[test]
    fn paths_resolve_against_manifest_directory() {
        let catalog = parse_manifest(
            r#"{"models":[{"path":"assets/duck.glb"}]}"#,
            Path::new("/srv/data"),
        )
        .unwrap();
        assert_eq!(
            catalog.categories[0].entries[0].path,
            PathBuf::from("/srv/data/assets/duck.glb")
        );
        // Missing name falls back to the file stem
        assert_eq!(catalog.categories[0].entries[0].name, "duck");
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(parse_manifest("not json", Path::new(".")).is_err());
        assert!(parse_manifest(r#"{"other":1}"#, Path::new(".")).is_err());
    }

    #[test]
    fn title_case_collapses_separators() {
        assert_eq!(title_case("fine_art"), "Fine Art");
        assert_eq!(title_case("sci-fi__props"), "Sci Fi Props");
        assert_eq!(title_case(""), "Uncategorized");
    }

    #[test]
    fn load_manifest_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("models.json");
        let mut f = std::fs::File::create(&manifest).unwrap();
        write!(f, r#"{{"models":[{{"name":"Duck","path":"duck.glb"}}]}}"#).unwrap();

        let catalog = load_manifest(&manifest).unwrap();
        assert_eq!(catalog.model_count(), 1);
        assert_eq!(
            catalog.categories[0].entries[0].path,
            dir.path().join("duck.glb")
        );

        assert!(load_manifest(&dir.path().join("missing.json")).is_err());
    }
}
