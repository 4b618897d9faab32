//! Project analysis: language/family breakdown and framework signals.

use crate::core::classify::{classify_language_and_family, Family, Language};
use crate::core::ingest::{ByteSource, FileEntry, WorkingSet};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// File name that is read and parsed as the project manifest
pub const MANIFEST_NAME: &str = "package.json";

struct Hint {
    label: &'static str,
    matchers: &'static [&'static str],
}

const FRAMEWORK_HINTS: &[Hint] = &[
    Hint { label: "React", matchers: &["react", "react-dom", ".jsx", ".tsx"] },
    Hint { label: "Preact", matchers: &["preact"] },
    Hint { label: "Vue", matchers: &["vue", ".vue", "nuxt"] },
    Hint { label: "Svelte", matchers: &["svelte"] },
    Hint { label: "Solid", matchers: &["solid-js"] },
    Hint { label: "Astro", matchers: &["astro"] },
    Hint { label: "Next.js", matchers: &["next"] },
    Hint { label: "Remix", matchers: &["remix"] },
    Hint { label: "Angular", matchers: &["angular", "angular.json"] },
    Hint { label: "Lit", matchers: &["lit", "lit-element"] },
];

const TOOLING_HINTS: &[Hint] = &[
    Hint { label: "Vite", matchers: &["vite", "vite.config"] },
    Hint { label: "Webpack", matchers: &["webpack", "webpack.config"] },
    Hint { label: "Rollup", matchers: &["rollup", "rollup.config"] },
    Hint { label: "Parcel", matchers: &["parcel", "parcel config"] },
    Hint { label: "esbuild", matchers: &["esbuild"] },
    Hint { label: "Snowpack", matchers: &["snowpack"] },
];

const LOCK_FILES: &[(&str, &str)] = &[
    ("package-lock.json", "npm"),
    ("yarn.lock", "yarn"),
    ("pnpm-lock.yaml", "pnpm"),
    ("bun.lockb", "bun"),
];

/// Aggregate view of one Working Set
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectInsights {
    pub total_files: usize,
    pub total_size: u64,
    /// Only languages that occur
    pub language_counts: BTreeMap<Language, usize>,
    /// Every family, zero when absent
    pub family_counts: BTreeMap<Family, usize>,
    pub frameworks: BTreeSet<&'static str>,
    pub tooling: BTreeSet<&'static str>,
    pub package_managers: BTreeSet<&'static str>,
    /// Parsed `package.json`, if one was present and valid JSON
    pub manifest: Option<Value>,
}

impl ProjectInsights {
    /// Share of files in `language`, 0 for an empty project
    pub fn language_ratio(&self, language: Language) -> f64 {
        self.ratio(self.language_counts.get(&language).copied().unwrap_or(0))
    }

    /// Share of files in `family`, 0 for an empty project
    pub fn family_ratio(&self, family: Family) -> f64 {
        self.ratio(self.family_counts.get(&family).copied().unwrap_or(0))
    }

    fn ratio(&self, count: usize) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            count as f64 / self.total_files as f64
        }
    }

    /// `count` as a rounded percentage of all files
    pub fn percent(&self, count: usize) -> u32 {
        (self.ratio(count) * 100.0).round() as u32
    }

    pub fn has_frameworks(&self) -> bool {
        !self.frameworks.is_empty()
    }

    /// Most frequent language; the earlier-declared language wins a tie
    pub fn dominant_language(&self) -> Option<(Language, usize)> {
        self.top_languages(1).into_iter().next()
    }

    /// Up to `limit` languages by descending count
    pub fn top_languages(&self, limit: usize) -> Vec<(Language, usize)> {
        let mut languages: Vec<(Language, usize)> =
            self.language_counts.iter().map(|(l, c)| (*l, *c)).collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1));
        languages.truncate(limit);
        languages
    }

    /// One-line description, e.g. `Projecto com 12 ficheiros · 83% TypeScript · 8% docs`
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("Projecto com {} ficheiros", self.total_files)];
        if let Some((language, count)) = self.dominant_language() {
            parts.push(format!("· {}% {}", self.percent(count), language));
        }
        let assets = self.percent(self.family_counts.get(&Family::Assets).copied().unwrap_or(0));
        if assets > 0 {
            parts.push(format!("· {}% assets", assets));
        }
        let docs = self.percent(self.family_counts.get(&Family::Docs).copied().unwrap_or(0));
        if docs > 0 {
            parts.push(format!("· {}% docs", docs));
        }
        parts.join(" ")
    }
}

/// Analyze `set`, reading the manifest through `bytes` when present.
///
/// An unreadable manifest is treated like a missing one.
pub fn analyze(set: &WorkingSet, bytes: &dyn ByteSource) -> ProjectInsights {
    let manifest_text = find_manifest(set).and_then(|entry| match bytes.read_to_string(&entry.file) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %entry.relative_path, error = %e, "Could not read manifest");
            None
        }
    });
    analyze_with_manifest(set, manifest_text.as_deref())
}

/// Analyze `set` given the manifest content, if any. Pure.
pub fn analyze_with_manifest(set: &WorkingSet, manifest_text: Option<&str>) -> ProjectInsights {
    let mut insights = ProjectInsights {
        family_counts: Family::ALL.iter().map(|f| (*f, 0)).collect(),
        ..Default::default()
    };

    if let Some(text) = manifest_text {
        match serde_json::from_str::<Value>(text) {
            Ok(manifest) => {
                let dependencies = dependency_names(&manifest);
                insights.frameworks.extend(match_keys(FRAMEWORK_HINTS, &dependencies));
                insights.tooling.extend(match_keys(TOOLING_HINTS, &dependencies));
                insights.manifest = Some(manifest);
            }
            Err(e) => debug!(error = %e, "Manifest is not valid JSON, ignoring"),
        }
    }

    for entry in set.files() {
        let name = &entry.file.name;
        insights.total_files += 1;
        insights.total_size += entry.file.size;

        let (language, family) = classify_language_and_family(name);
        *insights.language_counts.entry(language).or_insert(0) += 1;
        *insights.family_counts.entry(family).or_insert(0) += 1;

        let lower = name.to_lowercase();
        insights.frameworks.extend(match_name(FRAMEWORK_HINTS, &lower));
        insights.tooling.extend(match_name(TOOLING_HINTS, &lower));
        if let Some((_, manager)) = LOCK_FILES.iter().find(|(lock, _)| *lock == lower) {
            insights.package_managers.insert(*manager);
        }
    }

    debug!(
        files = insights.total_files,
        frameworks = ?insights.frameworks,
        tooling = ?insights.tooling,
        "Project analyzed"
    );
    insights
}

fn find_manifest(set: &WorkingSet) -> Option<&FileEntry> {
    set.files()
        .find(|entry| entry.file.name.eq_ignore_ascii_case(MANIFEST_NAME))
}

/// Keys of `dependencies` and `devDependencies`
fn dependency_names(manifest: &Value) -> BTreeSet<String> {
    ["dependencies", "devDependencies"]
        .iter()
        .filter_map(|section| manifest.get(section).and_then(Value::as_object))
        .flat_map(|deps| deps.keys().cloned())
        .collect()
}

fn match_keys<'a>(
    hints: &'static [Hint],
    keys: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'static str> + 'a {
    hints
        .iter()
        .filter(move |hint| hint.matchers.iter().any(|m| keys.contains(*m)))
        .map(|hint| hint.label)
}

fn match_name<'a>(hints: &'static [Hint], lower_name: &'a str) -> impl Iterator<Item = &'static str> + 'a {
    hints
        .iter()
        .filter(move |hint| hint.matchers.iter().any(|m| lower_name.contains(m)))
        .map(|hint| hint.label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::{IngestedItem, InMemoryBytes, SourceFile};

    fn set_of(names: &[&str]) -> WorkingSet {
        WorkingSet::new(
            names
                .iter()
                .map(|name| IngestedItem::file(SourceFile::new(*name, 10, format!("/mem/{name}")), *name))
                .collect(),
        )
    }

    #[test]
    fn empty_project_has_zero_ratios() {
        let insights = analyze_with_manifest(&WorkingSet::default(), None);
        assert_eq!(insights.total_files, 0);
        assert_eq!(insights.family_ratio(Family::Script), 0.0);
        assert_eq!(insights.language_ratio(Language::Html), 0.0);
        assert_eq!(insights.family_counts.len(), Family::ALL.len());
        assert!(insights.dominant_language().is_none());
    }

    #[test]
    fn counts_and_ratios() {
        let insights = analyze_with_manifest(
            &set_of(&["index.html", "main.js", "util.js", "style.css"]),
            None,
        );
        assert_eq!(insights.total_files, 4);
        assert_eq!(insights.total_size, 40);
        assert_eq!(insights.language_ratio(Language::JavaScript), 0.5);
        assert_eq!(insights.family_ratio(Family::Html), 0.25);
        assert_eq!(insights.family_counts[&Family::Media], 0);
        assert_eq!(insights.dominant_language(), Some((Language::JavaScript, 2)));
    }

    #[test]
    fn dependencies_detect_frameworks_and_tooling() {
        let manifest = r#"{
            "dependencies": { "react": "^18.0.0" },
            "devDependencies": { "vite": "^5.0.0", "typescript": "^5.0.0" }
        }"#;
        let insights = analyze_with_manifest(&set_of(&["package.json"]), Some(manifest));

        assert!(insights.frameworks.contains("React"));
        assert!(insights.tooling.contains("Vite"));
        assert!(insights.manifest.is_some());
    }

    #[test]
    fn dependency_match_is_by_exact_key() {
        let manifest = r#"{ "dependencies": { "react-router": "^6" } }"#;
        let insights = analyze_with_manifest(&set_of(&["package.json"]), Some(manifest));
        assert!(!insights.frameworks.contains("React"));
    }

    #[test]
    fn broken_manifest_is_ignored() {
        let insights = analyze_with_manifest(&set_of(&["package.json", "a.js"]), Some("{ not json"));
        assert!(insights.manifest.is_none());
        assert!(insights.frameworks.is_empty());
        assert_eq!(insights.total_files, 2);
    }

    #[test]
    fn file_names_are_scanned_case_insensitively() {
        let insights = analyze_with_manifest(
            &set_of(&["App.TSX", "Webpack.config.js", "yarn.lock", "PNPM-LOCK.yaml"]),
            None,
        );
        assert!(insights.frameworks.contains("React"));
        assert!(insights.tooling.contains("Webpack"));
        assert_eq!(
            insights.package_managers.iter().copied().collect::<Vec<_>>(),
            vec!["pnpm", "yarn"]
        );
    }

    #[test]
    fn manifest_is_read_through_byte_source() {
        let bytes = InMemoryBytes::new();
        bytes.insert("/mem/Package.JSON", r#"{"devDependencies":{"rollup":"4"}}"#);
        let insights = analyze(&set_of(&["Package.JSON"]), &bytes);
        assert!(insights.tooling.contains("Rollup"));
    }

    #[test]
    fn unreadable_manifest_keeps_name_signals() {
        let bytes = InMemoryBytes::new();
        let insights = analyze(&set_of(&["package.json", "vite.config.ts"]), &bytes);
        assert!(insights.manifest.is_none());
        assert!(insights.tooling.contains("Vite"));
    }

    #[test]
    fn dominant_tie_goes_to_declaration_order() {
        let insights = analyze_with_manifest(&set_of(&["a.css", "b.html"]), None);
        assert_eq!(insights.dominant_language(), Some((Language::Html, 1)));
        assert_eq!(insights.top_languages(4).len(), 2);
    }

    #[test]
    fn summary_mentions_dominant_language_and_docs() {
        let insights = analyze_with_manifest(&set_of(&["a.ts", "b.ts", "c.ts", "README.md"]), None);
        assert_eq!(insights.summary(), "Projecto com 4 ficheiros · 75% TypeScript · 25% docs");
    }
}
