use crate::models::{Factor, FactorScores, PreferenceInput, WeightVector};

/// Default factor score a neighborhood needs before it earns a match reason
pub const MIN_REASON_FACTOR_SCORE: u8 = 80;

/// Default raw slider value the user must give before a factor earns a match reason
pub const MIN_REASON_PREFERENCE: f64 = 7.0;

/// Factors that can produce a match reason, in the order reasons are listed
const REASON_TEMPLATES: [(Factor, fn(&PreferenceInput) -> f64, &str); 4] = [
    (
        Factor::Walkability,
        |p| p.walkability,
        "Excellent walkability matches your preference",
    ),
    (
        Factor::Safety,
        |p| p.safety,
        "High safety rating aligns with your priorities",
    ),
    (
        Factor::Nightlife,
        |p| p.nightlife,
        "Vibrant nightlife scene matches your lifestyle",
    ),
    (
        Factor::FamilyFriendly,
        |p| p.family_friendly,
        "Family-friendly amenities match your needs",
    ),
];

/// Thresholds that gate match reasons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReasonThresholds {
    pub min_factor_score: u8,
    pub min_preference: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            min_factor_score: MIN_REASON_FACTOR_SCORE,
            min_preference: MIN_REASON_PREFERENCE,
        }
    }
}

/// Calculate the overall match score (0-100) of a neighborhood
///
/// Scoring formula:
/// ```text
/// score = round(Σ(factor_score × factor_weight) / 6)
/// ```
/// The divisor is the factor count, not the weight sum, so the score is the
/// mean of the weighted products. Summation follows `Factor::ALL`.
pub fn calculate_overall_score(scores: &FactorScores, weights: &WeightVector) -> u8 {
    let raw: f64 = Factor::ALL
        .iter()
        .map(|factor| f64::from(scores.get(*factor)) * weights.get(*factor))
        .sum();

    let mean = (raw / Factor::ALL.len() as f64).round();

    // Affordability weight can reach 1.1, which can push a perfect neighborhood past 100
    mean.clamp(0.0, 100.0) as u8
}

/// Explain which of the user's strong preferences a neighborhood satisfies
///
/// A reason is produced when the neighborhood scores at least
/// `min_factor_score` on the factor and the user's raw slider is at least
/// `min_preference`. Transit and affordability never produce reasons.
pub fn generate_match_reasons(
    scores: &FactorScores,
    preferences: &PreferenceInput,
    thresholds: &ReasonThresholds,
) -> Vec<String> {
    REASON_TEMPLATES
        .iter()
        .filter(|(factor, slider, _)| {
            scores.get(*factor) >= thresholds.min_factor_score
                && slider(preferences) >= thresholds.min_preference
        })
        .map(|(_, _, reason)| reason.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(walkability: u8, safety: u8, nightlife: u8, family_friendly: u8) -> FactorScores {
        FactorScores {
            walkability,
            safety,
            affordability: 100,
            nightlife,
            family_friendly,
            transit: 100,
        }
    }

    fn prefs(walkability: f64, safety: f64, nightlife: f64, family_friendly: f64) -> PreferenceInput {
        PreferenceInput {
            walkability,
            safety,
            budget: 0.0,
            nightlife,
            family_friendly,
            public_transit: 10.0,
        }
    }

    #[test]
    fn test_overall_score_is_mean_of_products() {
        let scores = FactorScores {
            walkability: 95,
            safety: 75,
            affordability: 60,
            nightlife: 90,
            family_friendly: 65,
            transit: 85,
        };
        let weights = WeightVector {
            walkability: 0.9,
            safety: 0.9,
            affordability: 0.8,
            nightlife: 0.9,
            family_friendly: 0.5,
            transit: 0.8,
        };

        // 382.5 / 6 = 63.75
        assert_eq!(calculate_overall_score(&scores, &weights), 64);
    }

    #[test]
    fn test_overall_score_zero_weights() {
        let scores = scores(100, 100, 100, 100);
        assert_eq!(calculate_overall_score(&scores, &WeightVector::uniform(0.0)), 0);
    }

    #[test]
    fn test_overall_score_is_capped() {
        let scores = scores(100, 100, 100, 100);
        let mut weights = WeightVector::uniform(1.0);
        weights.affordability = 1.1;

        assert_eq!(calculate_overall_score(&scores, &weights), 100);
    }

    #[test]
    fn test_reasons_follow_factor_order() {
        let reasons = generate_match_reasons(
            &scores(90, 90, 90, 90),
            &prefs(10.0, 10.0, 10.0, 10.0),
            &ReasonThresholds::default(),
        );

        assert_eq!(
            reasons,
            vec![
                "Excellent walkability matches your preference",
                "High safety rating aligns with your priorities",
                "Vibrant nightlife scene matches your lifestyle",
                "Family-friendly amenities match your needs",
            ]
        );
    }

    #[test]
    fn test_reason_score_boundary() {
        let thresholds = ReasonThresholds::default();
        let strong = prefs(10.0, 0.0, 0.0, 0.0);

        let at = generate_match_reasons(&scores(80, 0, 0, 0), &strong, &thresholds);
        assert_eq!(at, vec!["Excellent walkability matches your preference"]);

        let below = generate_match_reasons(&scores(79, 0, 0, 0), &strong, &thresholds);
        assert!(below.is_empty());
    }

    #[test]
    fn test_reason_preference_boundary() {
        let thresholds = ReasonThresholds::default();
        let high = scores(0, 0, 0, 100);

        let at = generate_match_reasons(&high, &prefs(0.0, 0.0, 0.0, 7.0), &thresholds);
        assert_eq!(at, vec!["Family-friendly amenities match your needs"]);

        let below = generate_match_reasons(&high, &prefs(0.0, 0.0, 0.0, 6.0), &thresholds);
        assert!(below.is_empty());
    }

    #[test]
    fn test_each_reason_reads_its_own_slider() {
        let thresholds = ReasonThresholds::default();
        let high = scores(100, 100, 100, 100);

        let cases = [
            (prefs(7.0, 0.0, 0.0, 0.0), "Excellent walkability matches your preference"),
            (prefs(0.0, 7.0, 0.0, 0.0), "High safety rating aligns with your priorities"),
            (prefs(0.0, 0.0, 7.0, 0.0), "Vibrant nightlife scene matches your lifestyle"),
            (prefs(0.0, 0.0, 0.0, 7.0), "Family-friendly amenities match your needs"),
        ];

        for (preferences, expected) in cases {
            assert_eq!(generate_match_reasons(&high, &preferences, &thresholds), vec![expected]);
        }
    }

    #[test]
    fn test_transit_and_affordability_never_give_reasons() {
        let reasons = generate_match_reasons(
            &scores(0, 0, 0, 0),
            &prefs(10.0, 10.0, 10.0, 10.0),
            &ReasonThresholds::default(),
        );
        assert!(reasons.is_empty());
    }
}
