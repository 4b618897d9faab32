//! # Core Module
//!
//! The front-end-agnostic engine.
//!
//! ## Modules
//! - `ingest` - Turns drops and picker selections into a Working Set
//! - `classify` - Category, language/family and date lookups
//! - `rules` - User extension → folder overrides and their persistence
//! - `placement` - Folder and file name for each file, whole-set plans
//! - `blueprint` - Project analysis and layout suggestions
//! - `archive` - Writes a plan out as a ZIP or a directory

pub mod archive;
pub mod blueprint;
pub mod classify;
pub mod ingest;
pub mod placement;
pub mod rules;

// Re-export commonly used types
pub use archive::{ArchiveBuilder, ArchiveManifest, ArchiveReport, ArchiveWriter};
pub use blueprint::{BlueprintId, BlueprintPlanner, BlueprintSelector, ProjectInsights};
pub use ingest::{IngestedItem, SourceFile, WorkingSet, Workspace};
pub use placement::{OrganizeMode, OrganizeOptions, OrganizePlan, OrganizePlanner};
pub use rules::{CustomRules, RuleStore};
