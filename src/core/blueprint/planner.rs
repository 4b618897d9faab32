//! Plan generator for blueprint exports.

use super::catalog::BlueprintId;
use super::routing::{join_path, placement_path, relative_directory};
use crate::core::archive::{ArchiveEntry, ArchiveManifest};
use crate::core::classify::{classify_language_and_family, Family};
use crate::core::ingest::{SourceFile, WorkingSet};
use crate::core::placement::UniquePaths;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Archive folder that holds empty-directory markers in blueprint mode
pub const ORIGINAL_EMPTY_FOLDER: &str = "ORIGINAL_EMPTY";

/// Where one file lands under the chosen blueprint
#[derive(Debug, Clone, Serialize)]
pub struct BlueprintPlanEntry {
    pub source: SourceFile,
    pub relative_path: String,
    pub family: Family,
    pub target_path: String,
    pub has_conflict: bool,
}

/// Files per top-level folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderCount {
    pub folder: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlueprintPlan {
    pub id: String,
    pub blueprint: BlueprintId,
    pub entries: Vec<BlueprintPlanEntry>,
    pub directories: Vec<String>,
    /// Descending by count, first-seen order on ties
    pub mapping: Vec<FolderCount>,
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub conflict_count: usize,
}

impl BlueprintPlan {
    pub fn to_manifest(&self) -> ArchiveManifest {
        ArchiveManifest {
            files: self
                .entries
                .iter()
                .map(|entry| ArchiveEntry {
                    source: entry.source.clone(),
                    target_path: entry.target_path.clone(),
                })
                .collect(),
            directories: self.directories.clone(),
        }
    }

    /// Default archive file name for this plan
    pub fn archive_name(&self) -> String {
        format!("{}-ziplifica.zip", self.blueprint)
    }
}

pub struct BlueprintPlanner;

impl BlueprintPlanner {
    /// Route every file in `set` through `blueprint`'s table
    pub fn create_plan(set: &WorkingSet, blueprint: BlueprintId) -> BlueprintPlan {
        let mut claimed = UniquePaths::new();
        let mut conflict_count = 0;
        let mut total_size_bytes = 0u64;
        let mut entries = Vec::new();

        for entry in set.files() {
            let (_, family) = classify_language_and_family(&entry.file.name);
            let relative_dir = relative_directory(&entry.relative_path, &entry.file.name);
            let natural = placement_path(blueprint, family, &relative_dir, &entry.file.name);
            let (target_path, has_conflict) = claimed.claim(&natural);
            if has_conflict {
                conflict_count += 1;
                debug!(from = %natural, to = %target_path, "Target path taken, renamed");
            }

            total_size_bytes += entry.file.size;
            entries.push(BlueprintPlanEntry {
                source: entry.file.clone(),
                relative_path: entry.relative_path.clone(),
                family,
                target_path,
                has_conflict,
            });
        }

        let directories = set
            .empty_directories()
            .map(|dir| join_path(&[ORIGINAL_EMPTY_FOLDER, &dir.relative_path]))
            .collect();

        let mapping = mapping_summary(&entries);
        info!(
            blueprint = %blueprint,
            files = entries.len(),
            folders = mapping.len(),
            "Blueprint plan ready"
        );

        BlueprintPlan {
            id: Uuid::new_v4().to_string(),
            blueprint,
            total_files: entries.len(),
            total_size_bytes,
            conflict_count,
            entries,
            directories,
            mapping,
        }
    }
}

fn mapping_summary(entries: &[BlueprintPlanEntry]) -> Vec<FolderCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut mapping: Vec<FolderCount> = Vec::new();
    for entry in entries {
        let top = entry.target_path.split('/').next().unwrap_or_default();
        match index.get(top) {
            Some(&i) => mapping[i].count += 1,
            None => {
                index.insert(top, mapping.len());
                mapping.push(FolderCount {
                    folder: top.to_string(),
                    count: 1,
                });
            }
        }
    }
    mapping.sort_by(|a, b| b.count.cmp(&a.count));
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::IngestedItem;

    fn item(relative_path: &str) -> IngestedItem {
        let name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        IngestedItem::file(SourceFile::new(name, 5, format!("/mem/{relative_path}")), relative_path)
    }

    fn project() -> WorkingSet {
        WorkingSet::new(vec![
            item("index.html"),
            item("js/app.js"),
            item("js/util.js"),
            item("css/site.css"),
            item("README.md"),
            item("logo.png"),
            item("Makefile"),
            IngestedItem::empty_directory("drafts"),
        ])
    }

    #[test]
    fn every_file_gets_a_path_under_every_blueprint() {
        let set = project();
        for blueprint in BlueprintId::ALL {
            let plan = BlueprintPlanner::create_plan(&set, blueprint);
            assert_eq!(plan.entries.len(), set.file_count());
            assert!(plan.entries.iter().all(|e| !e.target_path.is_empty()));
        }
    }

    #[test]
    fn vanilla_routes_by_family() {
        let plan = BlueprintPlanner::create_plan(&project(), BlueprintId::VanillaFoundation);
        let targets: Vec<&str> = plan.entries.iter().map(|e| e.target_path.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "public/index.html",
                "src/scripts/js/app.js",
                "src/scripts/js/util.js",
                "src/styles/css/site.css",
                "docs/README.md",
                "public/assets/logo.png",
                "src/modules/Makefile",
            ]
        );
        assert_eq!(plan.directories, vec!["ORIGINAL_EMPTY/drafts".to_string()]);
    }

    #[test]
    fn mapping_counts_top_level_folders() {
        let plan = BlueprintPlanner::create_plan(&project(), BlueprintId::VanillaFoundation);
        assert_eq!(
            plan.mapping,
            vec![
                FolderCount { folder: "src".into(), count: 4 },
                FolderCount { folder: "public".into(), count: 2 },
                FolderCount { folder: "docs".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn archive_name_carries_blueprint_id() {
        let plan = BlueprintPlanner::create_plan(&project(), BlueprintId::ContentHub);
        assert_eq!(plan.archive_name(), "content-hub-ziplifica.zip");
        assert_eq!(plan.to_manifest().files.len(), 7);
    }

    #[test]
    fn duplicate_targets_are_numbered() {
        let set = WorkingSet::new(vec![item("a/x.md"), item("a/x.md")]);
        let plan = BlueprintPlanner::create_plan(&set, BlueprintId::ContentHub);
        assert_eq!(plan.entries[1].target_path, "content/docs/a/x_1.md");
        assert_eq!(plan.conflict_count, 1);
    }
}
