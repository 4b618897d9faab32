//! Ranking blueprints and tracking the user's choice.

use super::catalog::{catalog, Blueprint, BlueprintId};
use super::insights::ProjectInsights;
use serde::Serialize;
use tracing::debug;

/// A blueprint with its score for one set of insights
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedBlueprint {
    pub blueprint: &'static Blueprint,
    pub score: f64,
}

impl RankedBlueprint {
    pub fn id(&self) -> BlueprintId {
        self.blueprint.id
    }
}

/// Blueprints by descending score, ties in declaration order
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    entries: Vec<RankedBlueprint>,
}

impl Ranking {
    pub fn new(insights: &ProjectInsights) -> Self {
        let mut entries: Vec<RankedBlueprint> = catalog()
            .into_iter()
            .map(|blueprint| RankedBlueprint {
                blueprint,
                score: blueprint.score(insights),
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedBlueprint] {
        &self.entries
    }

    /// Highest-scoring blueprint
    pub fn suggested(&self) -> BlueprintId {
        self.entries
            .first()
            .map(RankedBlueprint::id)
            .unwrap_or(BlueprintId::ALL[0])
    }

    pub fn get(&self, id: BlueprintId) -> Option<&RankedBlueprint> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: BlueprintId) -> bool {
        self.get(id).is_some()
    }
}

/// Holds the current ranking and the selected blueprint.
///
/// Without a user choice the selection follows the top of the ranking. A
/// user choice survives re-ranking as long as the ranking still contains it.
#[derive(Debug, Default)]
pub struct BlueprintSelector {
    ranking: Option<Ranking>,
    chosen: Option<BlueprintId>,
}

impl BlueprintSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-rank against fresh insights and re-validate the user's choice
    pub fn recompute(&mut self, insights: &ProjectInsights) -> &Ranking {
        let ranking = Ranking::new(insights);
        if let Some(chosen) = self.chosen {
            if !ranking.contains(chosen) {
                debug!(blueprint = %chosen, "Chosen blueprint no longer ranked, reverting to suggestion");
                self.chosen = None;
            }
        }
        self.ranking.insert(ranking)
    }

    /// Record a user choice. Returns false if there is no ranking yet or
    /// the ranking does not contain `id`.
    pub fn select(&mut self, id: BlueprintId) -> bool {
        match &self.ranking {
            Some(ranking) if ranking.contains(id) => {
                self.chosen = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Drop the user choice and follow the ranking again
    pub fn reset(&mut self) {
        self.chosen = None;
    }

    pub fn ranking(&self) -> Option<&Ranking> {
        self.ranking.as_ref()
    }

    /// The user's choice, else the suggestion; `None` before the first ranking
    pub fn selected(&self) -> Option<BlueprintId> {
        let ranking = self.ranking.as_ref()?;
        Some(self.chosen.unwrap_or_else(|| ranking.suggested()))
    }

    pub fn is_user_choice(&self) -> bool {
        self.chosen.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::{Family, Language};

    fn insights_with(language: Language, family: Family, count: usize, total: usize) -> ProjectInsights {
        let mut insights = ProjectInsights {
            total_files: total,
            ..Default::default()
        };
        insights.language_counts.insert(language, count);
        insights.family_counts.insert(family, count);
        insights
    }

    #[test]
    fn ranking_is_descending() {
        let insights = insights_with(Language::Documentation, Family::Docs, 9, 10);
        let ranking = Ranking::new(&insights);
        let scores: Vec<f64> = ranking.entries().iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ranking.suggested(), BlueprintId::ContentHub);
    }

    #[test]
    fn ties_keep_declaration_order() {
        let mut insights = ProjectInsights::default();
        insights.frameworks.insert("React");
        let ranking = Ranking::new(&insights);
        // vanilla 0, component 40, content 0
        let order: Vec<BlueprintId> = ranking.entries().iter().map(RankedBlueprint::id).collect();
        assert_eq!(
            order,
            vec![BlueprintId::ComponentSlices, BlueprintId::VanillaFoundation, BlueprintId::ContentHub]
        );
    }

    #[test]
    fn selection_defaults_to_suggestion() {
        let mut selector = BlueprintSelector::new();
        assert_eq!(selector.selected(), None);
        assert!(!selector.select(BlueprintId::ContentHub));

        selector.recompute(&insights_with(Language::Html, Family::Html, 5, 5));
        assert_eq!(selector.selected(), Some(BlueprintId::VanillaFoundation));
        assert!(!selector.is_user_choice());
    }

    #[test]
    fn user_choice_survives_recompute() {
        let mut selector = BlueprintSelector::new();
        selector.recompute(&insights_with(Language::Html, Family::Html, 5, 5));
        assert!(selector.select(BlueprintId::ContentHub));

        selector.recompute(&insights_with(Language::TypeScript, Family::Script, 5, 5));
        assert_eq!(selector.selected(), Some(BlueprintId::ContentHub));

        selector.reset();
        assert_eq!(selector.selected(), selector.ranking().map(Ranking::suggested));
    }
}
