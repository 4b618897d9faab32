//! The fixed set of blueprint layouts.

use super::insights::ProjectInsights;
use crate::core::classify::{Family, Language};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a built-in blueprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlueprintId {
    VanillaFoundation,
    ComponentSlices,
    ContentHub,
}

impl BlueprintId {
    /// Declaration order, also the tie-break order when ranking
    pub const ALL: [BlueprintId; 3] = [
        BlueprintId::VanillaFoundation,
        BlueprintId::ComponentSlices,
        BlueprintId::ContentHub,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintId::VanillaFoundation => "vanilla-foundation",
            BlueprintId::ComponentSlices => "component-slices",
            BlueprintId::ContentHub => "content-hub",
        }
    }

    pub fn blueprint(&self) -> &'static Blueprint {
        match self {
            BlueprintId::VanillaFoundation => &VANILLA_FOUNDATION,
            BlueprintId::ComponentSlices => &COMPONENT_SLICES,
            BlueprintId::ContentHub => &CONTENT_HUB,
        }
    }
}

impl FromStr for BlueprintId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        BlueprintId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown blueprint '{}', expected one of: {}",
                    s,
                    BlueprintId::ALL.map(|id| id.as_str()).join(", ")
                )
            })
    }
}

impl std::fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a blueprint's declarative tree. Folder names end with `/`.
#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub name: &'static str,
    pub children: &'static [TreeNode],
}

macro_rules! node {
    ($name:literal) => {
        TreeNode { name: $name, children: &[] }
    };
    ($name:literal, [$($child:expr),+ $(,)?] $(,)?) => {
        TreeNode { name: $name, children: &[$($child),+] }
    };
}

impl TreeNode {
    pub fn is_folder(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// A signal a blueprint's score is built from
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// 1 when no framework was detected
    NoFrameworks,
    /// 1 when at least one framework was detected
    AnyFramework,
    LanguageRatio(Language),
    FamilyRatio(Family),
}

impl Signal {
    fn value(&self, insights: &ProjectInsights) -> f64 {
        match self {
            Signal::NoFrameworks => indicator(!insights.has_frameworks()),
            Signal::AnyFramework => indicator(insights.has_frameworks()),
            Signal::LanguageRatio(language) => insights.language_ratio(*language),
            Signal::FamilyRatio(family) => insights.family_ratio(*family),
        }
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreTerm {
    pub signal: Signal,
    pub weight: f64,
}

const fn term(signal: Signal, weight: f64) -> ScoreTerm {
    ScoreTerm { signal, weight }
}

/// A named target layout
#[derive(Debug, Serialize)]
pub struct Blueprint {
    pub id: BlueprintId,
    pub title: &'static str,
    pub badges: &'static [&'static str],
    pub description: &'static str,
    pub tree: &'static [TreeNode],
    pub score_terms: &'static [ScoreTerm],
}

impl Blueprint {
    /// Weighted sum of the blueprint's signals
    pub fn score(&self, insights: &ProjectInsights) -> f64 {
        self.score_terms
            .iter()
            .map(|term| term.signal.value(insights) * term.weight)
            .sum()
    }

    /// The tree as indented lines, two spaces per level
    pub fn tree_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut stack: Vec<(&TreeNode, usize)> = self.tree.iter().rev().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            lines.push(format!("{}{}", "  ".repeat(depth), node.name));
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        lines
    }
}

pub static VANILLA_FOUNDATION: Blueprint = Blueprint {
    id: BlueprintId::VanillaFoundation,
    title: "Base Vanilla Modular",
    badges: &["Vanilla", "Sem build"],
    description: "Separa origem e distribuição, pronto para alojar em qualquer static host.",
    tree: &[
        node!(
            "public/",
            [
                node!("index.html"),
                node!("assets/", [node!("images/"), node!("fonts/")]),
            ],
        ),
        node!(
            "src/",
            [
                node!("scripts/"),
                node!("styles/"),
                node!("modules/"),
            ],
        ),
        node!("docs/"),
    ],
    score_terms: &[
        term(Signal::NoFrameworks, 30.0),
        term(Signal::LanguageRatio(Language::Html), 25.0),
        term(Signal::LanguageRatio(Language::JavaScript), 30.0),
    ],
};

pub static COMPONENT_SLICES: Blueprint = Blueprint {
    id: BlueprintId::ComponentSlices,
    title: "Component Driven",
    badges: &["Componentes", "Escalável"],
    description: "Ideal para React/Vue/Svelte ou para modularizar vanilla JS em slices.",
    tree: &[
        node!(
            "src/",
            [
                node!("components/"),
                node!("hooks/"),
                node!("services/"),
                node!("styles/"),
            ],
        ),
        node!("app/", [node!("routes/"), node!("layouts/")]),
        node!("tests/"),
        node!("public/"),
    ],
    score_terms: &[
        term(Signal::AnyFramework, 40.0),
        term(Signal::LanguageRatio(Language::TypeScript), 35.0),
        term(Signal::LanguageRatio(Language::JavaScript), 20.0),
    ],
};

pub static CONTENT_HUB: Blueprint = Blueprint {
    id: BlueprintId::ContentHub,
    title: "Content & Assets",
    badges: &["Docs", "Assets"],
    description: "Para projectos com muitos media e documentação, mantendo código isolado.",
    tree: &[
        node!(
            "content/",
            [
                node!("docs/"),
                node!("guides/"),
                node!("changelogs/"),
            ],
        ),
        node!("src/", [node!("scripts/"), node!("styles/")]),
        node!(
            "assets/",
            [
                node!("images/"),
                node!("media/"),
                node!("vectors/"),
            ],
        ),
        node!("dist/"),
    ],
    score_terms: &[
        term(Signal::FamilyRatio(Family::Docs), 40.0),
        term(Signal::FamilyRatio(Family::Assets), 35.0),
        term(Signal::FamilyRatio(Family::Media), 20.0),
    ],
};

/// All blueprints in declaration order
pub fn catalog() -> [&'static Blueprint; 3] {
    BlueprintId::ALL.map(|id| id.blueprint())
}
