use crate::models::{InvalidPreferenceInput, Neighborhood, PreferenceInput, ScoredNeighborhood, WeightVector};
use crate::core::{
    scoring::{calculate_overall_score, generate_match_reasons, ReasonThresholds},
    weights::derive_weights,
};

/// Result of ranking a catalog
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub matches: Vec<ScoredNeighborhood>,
    pub weights: WeightVector,
    pub total_candidates: usize,
}

/// Score and rank every neighborhood in a catalog
///
/// Output has one entry per catalog entry, sorted by overall score
/// (descending). The sort is stable, so equal scores keep catalog order.
/// Factor scores are copied through untouched; weights only affect the
/// overall score and the reasons.
pub fn rank_neighborhoods(
    preferences: &PreferenceInput,
    weights: &WeightVector,
    catalog: &[Neighborhood],
    thresholds: &ReasonThresholds,
) -> Vec<ScoredNeighborhood> {
    let mut scored: Vec<ScoredNeighborhood> = catalog
        .iter()
        .map(|neighborhood| ScoredNeighborhood {
            overall_score: calculate_overall_score(&neighborhood.scores, weights),
            match_reasons: generate_match_reasons(&neighborhood.scores, preferences, thresholds),
            neighborhood: neighborhood.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
    scored
}

/// Ranking pipeline: validate preferences, derive weights, rank
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    thresholds: ReasonThresholds,
}

impl Matcher {
    pub fn new(thresholds: ReasonThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ReasonThresholds {
        &self.thresholds
    }

    /// Rank a catalog for a user
    ///
    /// # Arguments
    /// * `preferences` - The user's questionnaire answers
    /// * `catalog` - Candidate neighborhoods, in insertion order
    ///
    /// # Returns
    /// MatchResult with every neighborhood ranked, or the reason the
    /// preferences could not be scored
    pub fn rank(
        &self,
        preferences: &PreferenceInput,
        catalog: &[Neighborhood],
    ) -> Result<MatchResult, InvalidPreferenceInput> {
        preferences.validate()?;

        let weights = derive_weights(preferences);
        let matches = rank_neighborhoods(preferences, &weights, catalog, &self.thresholds);

        if let Some(best) = matches.first() {
            tracing::debug!(
                "Ranked {} neighborhoods, best match: {} ({}%)",
                catalog.len(),
                best.neighborhood.name,
                best.overall_score
            );
        }

        Ok(MatchResult {
            matches,
            weights,
            total_candidates: catalog.len(),
        })
    }
}
