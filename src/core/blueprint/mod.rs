//! # Blueprint Module
//!
//! Project-analysis mode: look at a whole Working Set, score a fixed set of
//! layouts against it, and remap every file into the chosen one.
//!
//! - `insights` - language/family counts and framework/tooling signals
//! - `catalog` - the built-in blueprints and their score weights
//! - `routing` - `(blueprint, family) → folder` table
//! - `selection` - ranking and the selected blueprint
//! - `planner` - per-file target paths for one blueprint

mod catalog;
mod insights;
mod planner;
mod routing;
mod selection;

pub use catalog::{catalog, Blueprint, BlueprintId, ScoreTerm, Signal, TreeNode};
pub use insights::{analyze, analyze_with_manifest, ProjectInsights, MANIFEST_NAME};
pub use planner::{BlueprintPlan, BlueprintPlanEntry, BlueprintPlanner, FolderCount, ORIGINAL_EMPTY_FOLDER};
pub use routing::{join_path, placement_path, relative_directory, route_base};
pub use selection::{BlueprintSelector, RankedBlueprint, Ranking};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingest::{IngestedItem, InMemoryBytes, SourceFile, WorkingSet};

    #[test]
    fn react_typescript_project_picks_component_layout() {
        let bytes = InMemoryBytes::new();
        bytes.insert("/mem/package.json", r#"{"dependencies":{"react":"^18.2.0"}}"#);

        let mut items = vec![
            IngestedItem::file(SourceFile::new("package.json", 40, "/mem/package.json"), "package.json"),
            IngestedItem::file(SourceFile::new("README.md", 10, "/mem/README.md"), "README.md"),
        ];
        for i in 0..10 {
            let name = format!("Widget{i}.tsx");
            items.push(IngestedItem::file(
                SourceFile::new(name.clone(), 100, format!("/mem/{name}")),
                format!("src/{name}"),
            ));
        }
        let set = WorkingSet::new(items);

        let insights = analyze(&set, &bytes);
        assert!(insights.frameworks.contains("React"));

        let mut selector = BlueprintSelector::new();
        let ranking = selector.recompute(&insights);
        let component = ranking.get(BlueprintId::ComponentSlices).map(|r| r.score).unwrap();
        let vanilla = ranking.get(BlueprintId::VanillaFoundation).map(|r| r.score).unwrap();
        assert!(component > vanilla);
        assert!((component - (40.0 + 35.0 * 10.0 / 12.0)).abs() < 1e-9);
        assert_eq!(selector.selected(), Some(BlueprintId::ComponentSlices));

        let plan = BlueprintPlanner::create_plan(&set, BlueprintId::ComponentSlices);
        assert_eq!(plan.entries[2].target_path, "src/components/src/Widget0.tsx");
        assert_eq!(plan.entries[0].target_path, "config/package.json");
    }
}
