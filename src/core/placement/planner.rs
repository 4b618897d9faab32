//! Plan generator for organize runs.

use super::folder::resolve_folder;
use super::rename::{replace_leaf, resolve_renamed_name};
use super::types::*;
use super::unique::UniquePaths;
use super::join_target;
use crate::core::archive::{ArchiveEntry, ArchiveManifest};
use crate::core::ingest::{FileEntry, WorkingSet};
use crate::core::rules::CustomRules;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

/// Archive folder that holds empty-directory markers in organize mode
pub const EMPTY_DIRECTORIES_FOLDER: &str = "DIRECTORIES";

/// Generates organize plans
pub struct OrganizePlanner;

impl OrganizePlanner {
    /// Resolve folder, name and final archive path for every file in `set`.
    ///
    /// Entries keep Working Set order. Folder and name resolution is pure and
    /// runs in parallel; collision handling runs afterwards in order so the
    /// first file to claim a path keeps it.
    pub fn create_plan(set: &WorkingSet, options: OrganizeOptions, rules: &CustomRules) -> OrganizePlan {
        let files: Vec<&FileEntry> = set.files().collect();

        let resolved: Vec<(String, String, String)> = files
            .par_iter()
            .map(|entry| {
                let folder = resolve_folder(&entry.file, options.mode, rules);
                let renamed = resolve_renamed_name(&entry.file, options.date_mode, options.char_mode);
                let relative = replace_leaf(&entry.relative_path, &renamed);
                let target = join_target(&folder, &relative);
                (folder, renamed, target)
            })
            .collect();

        let mut claimed = UniquePaths::new();
        let mut folders = HashSet::new();
        let mut conflict_count = 0;
        let mut total_size_bytes = 0u64;
        let mut entries = Vec::with_capacity(files.len());

        for (entry, (folder, renamed_name, natural)) in files.into_iter().zip(resolved) {
            let (target_path, has_conflict) = claimed.claim(&natural);
            if has_conflict {
                conflict_count += 1;
                debug!(from = %natural, to = %target_path, "Target path taken, renamed");
            }

            total_size_bytes += entry.file.size;
            folders.insert(folder.clone());
            entries.push(PlannedEntry {
                source: entry.file.clone(),
                relative_path: entry.relative_path.clone(),
                folder,
                renamed_name,
                target_path,
                has_conflict,
            });
        }

        let directories: Vec<String> = set
            .empty_directories()
            .map(|dir| join_target(EMPTY_DIRECTORIES_FOLDER, &dir.relative_path))
            .collect();

        info!(
            files = entries.len(),
            directories = directories.len(),
            folders = folders.len(),
            conflicts = conflict_count,
            mode = %options.mode,
            "Organize plan ready"
        );

        OrganizePlan {
            id: Uuid::new_v4().to_string(),
            options,
            total_files: entries.len(),
            total_size_bytes,
            folder_count: folders.len(),
            conflict_count,
            entries,
            directories,
        }
    }
}

impl OrganizePlan {
    /// Entries and directory markers as archive input
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

    /// Distinct top-level folders in first-use order
    pub fn folders(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.folder.as_str())
            .filter(|folder| seen.insert(*folder))
            .collect()
    }
}
