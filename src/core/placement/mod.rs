//! # Placement Module
//!
//! Decides where each ingested file goes inside the archive and what it is
//! called there.
//!
//! - `folder` - destination folder for an [`OrganizeMode`]
//! - `rename` - date and character transforms applied to the file name
//! - `planner` - applies both to a whole Working Set and resolves collisions

mod folder;
mod planner;
mod rename;
mod types;
mod unique;

pub use folder::{resolve_folder, SizeBucket};
pub use planner::{OrganizePlanner, EMPTY_DIRECTORIES_FOLDER};
pub use rename::{apply_char_mode, apply_date_mode, normalize_file_name, replace_leaf, resolve_renamed_name};
pub use types::*;
pub use unique::UniquePaths;

/// Join a folder and a relative path, skipping an empty folder
pub fn join_target(folder: &str, relative_path: &str) -> String {
    if folder.is_empty() {
        relative_path.to_string()
    } else {
        format!("{}/{}", folder, relative_path)
    }
}
