//! Language and family tables used by blueprint inference.

use super::extension_of;
use serde::{Deserialize, Serialize};

/// Language label shown in the project breakdown.
///
/// Variant order is the tie-break order when two languages have the same count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    TypeScript,
    Html,
    Css,
    Json,
    Documentation,
    Configuration,
    Assets,
    Media,
    Other,
}

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Documentation => "Documentação",
            Language::Configuration => "Configuração",
            Language::Assets => "Assets",
            Language::Media => "Media",
            Language::Other => "Outros",
        }
    }

    pub fn from_extension(extension: &str) -> Language {
        match extension {
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "html" | "htm" => Language::Html,
            "css" | "scss" | "sass" | "less" | "styl" => Language::Css,
            "json" => Language::Json,
            "md" | "markdown" => Language::Documentation,
            "yml" | "yaml" | "toml" | "xml" => Language::Configuration,
            "svg" | "png" | "jpg" | "jpeg" | "webp" | "gif" | "ico" => Language::Assets,
            "mp4" | "mov" | "mp3" | "wav" => Language::Media,
            _ => Language::Other,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse file family that drives blueprint scoring and routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Script,
    Style,
    Html,
    Docs,
    Config,
    Assets,
    Media,
    Other,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Script,
        Family::Style,
        Family::Html,
        Family::Docs,
        Family::Config,
        Family::Assets,
        Family::Media,
        Family::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Family::Script => "script",
            Family::Style => "style",
            Family::Html => "html",
            Family::Docs => "docs",
            Family::Config => "config",
            Family::Assets => "assets",
            Family::Media => "media",
            Family::Other => "other",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Family::Script => &["js", "mjs", "cjs", "jsx", "ts", "tsx"],
            Family::Style => &["css", "scss", "sass", "less", "styl"],
            Family::Html => &["html", "htm"],
            Family::Docs => &["md", "markdown"],
            Family::Config => &["json", "yml", "yaml", "toml", "xml"],
            Family::Assets => &["svg", "png", "jpg", "jpeg", "webp", "gif", "ico"],
            Family::Media => &["mp4", "mov", "mp3", "wav"],
            Family::Other => &[],
        }
    }

    pub fn from_extension(extension: &str) -> Family {
        Family::ALL
            .into_iter()
            .find(|family| family.extensions().contains(&extension))
            .unwrap_or(Family::Other)
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Language and family for a file name; unmatched names give `Outros` / `other`.
pub fn classify_language_and_family(filename: &str) -> (Language, Family) {
    let extension = extension_of(filename);
    (
        Language::from_extension(&extension),
        Family::from_extension(&extension),
    )
}
