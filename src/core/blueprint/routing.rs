//! `(blueprint, family) → base folder` routing table.

use super::catalog::BlueprintId;
use crate::core::classify::Family;

/// Explicit routes; any family missing here falls into the blueprint's catch-all
const ROUTES: &[(BlueprintId, Family, &str)] = &[
    (BlueprintId::VanillaFoundation, Family::Html, "public"),
    (BlueprintId::VanillaFoundation, Family::Style, "src/styles"),
    (BlueprintId::VanillaFoundation, Family::Script, "src/scripts"),
    (BlueprintId::VanillaFoundation, Family::Docs, "docs"),
    (BlueprintId::VanillaFoundation, Family::Assets, "public/assets"),
    (BlueprintId::VanillaFoundation, Family::Media, "public/assets"),
    (BlueprintId::VanillaFoundation, Family::Config, "config"),
    (BlueprintId::ComponentSlices, Family::Script, "src/components"),
    (BlueprintId::ComponentSlices, Family::Style, "src/styles"),
    (BlueprintId::ComponentSlices, Family::Html, "app/routes"),
    (BlueprintId::ComponentSlices, Family::Docs, "docs"),
    (BlueprintId::ComponentSlices, Family::Config, "config"),
    (BlueprintId::ComponentSlices, Family::Assets, "public/assets"),
    (BlueprintId::ComponentSlices, Family::Media, "public/assets"),
    (BlueprintId::ContentHub, Family::Docs, "content/docs"),
    (BlueprintId::ContentHub, Family::Html, "content/guides"),
    (BlueprintId::ContentHub, Family::Style, "src/styles"),
    (BlueprintId::ContentHub, Family::Script, "src/scripts"),
    (BlueprintId::ContentHub, Family::Assets, "assets/images"),
    (BlueprintId::ContentHub, Family::Media, "assets/media"),
    (BlueprintId::ContentHub, Family::Config, "config"),
];

const CATCH_ALL: &[(BlueprintId, &str)] = &[
    (BlueprintId::VanillaFoundation, "src/modules"),
    (BlueprintId::ComponentSlices, "src/services"),
    (BlueprintId::ContentHub, "content/misc"),
];

/// Base folder for a family under a blueprint
pub fn route_base(blueprint: BlueprintId, family: Family) -> &'static str {
    ROUTES
        .iter()
        .find(|(id, f, _)| *id == blueprint && *f == family)
        .map(|(_, _, base)| *base)
        .unwrap_or_else(|| catch_all(blueprint))
}

fn catch_all(blueprint: BlueprintId) -> &'static str {
    CATCH_ALL
        .iter()
        .find(|(id, _)| *id == blueprint)
        .map(|(_, base)| *base)
        .unwrap_or("misc")
}

/// Archive path for one file: base folder, original directory, file name
pub fn placement_path(blueprint: BlueprintId, family: Family, relative_dir: &str, filename: &str) -> String {
    join_path(&[route_base(blueprint, family), relative_dir, filename])
}

/// `\` to `/`, leading slashes removed
pub fn normalize_path(value: &str) -> String {
    value.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Join normalized segments with `/`, skipping empty ones
pub fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| normalize_path(segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory part of `relative_path`; empty for top-level files and when the
/// directory part is just the file name again
pub fn relative_directory(relative_path: &str, filename: &str) -> String {
    let normalized = normalize_path(relative_path);
    let Some(idx) = normalized.rfind('/') else {
        return String::new();
    };
    let dir = &normalized[..idx];
    if dir == filename.replace('\\', "/") {
        return String::new();
    }
    dir.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_has_a_route_in_every_blueprint() {
        for blueprint in BlueprintId::ALL {
            for family in Family::ALL {
                assert!(!route_base(blueprint, family).is_empty());
            }
        }
    }

    #[test]
    fn other_family_uses_catch_all() {
        assert_eq!(route_base(BlueprintId::VanillaFoundation, Family::Other), "src/modules");
        assert_eq!(route_base(BlueprintId::ComponentSlices, Family::Other), "src/services");
        assert_eq!(route_base(BlueprintId::ContentHub, Family::Other), "content/misc");
    }

    #[test]
    fn content_hub_splits_assets_and_media() {
        assert_eq!(route_base(BlueprintId::ContentHub, Family::Assets), "assets/images");
        assert_eq!(route_base(BlueprintId::ContentHub, Family::Media), "assets/media");
        assert_eq!(
            route_base(BlueprintId::VanillaFoundation, Family::Media),
            route_base(BlueprintId::VanillaFoundation, Family::Assets)
        );
    }

    #[test]
    fn placement_keeps_original_directory() {
        assert_eq!(
            placement_path(BlueprintId::ComponentSlices, Family::Script, "ui/buttons", "Button.tsx"),
            "src/components/ui/buttons/Button.tsx"
        );
        assert_eq!(
            placement_path(BlueprintId::VanillaFoundation, Family::Html, "", "index.html"),
            "public/index.html"
        );
    }

    #[test]
    fn join_normalizes_separators() {
        assert_eq!(join_path(&["docs", "/guides\\intro", "", "a.md"]), "docs/guides/intro/a.md");
        assert_eq!(join_path(&["", ""]), "");
    }

    #[test]
    fn relative_directory_cases() {
        assert_eq!(relative_directory("index.html", "index.html"), "");
        assert_eq!(relative_directory("site/pages/about.html", "about.html"), "site/pages");
        assert_eq!(relative_directory("\\site\\a.css", "a.css"), "site");
        assert_eq!(relative_directory("a.css/a.css", "a.css"), "");
        assert_eq!(relative_directory("", "x"), "");
    }
}
