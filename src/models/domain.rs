use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound of every preference slider
pub const SLIDER_MAX: f64 = 10.0;

/// One of the six scored neighborhood dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Factor {
    Walkability,
    Safety,
    Affordability,
    Nightlife,
    FamilyFriendly,
    Transit,
}

impl Factor {
    /// Canonical iteration order; the overall score is summed in this order
    pub const ALL: [Factor; 6] = [
        Factor::Walkability,
        Factor::Safety,
        Factor::Affordability,
        Factor::Nightlife,
        Factor::FamilyFriendly,
        Factor::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Walkability => "walkability",
            Factor::Safety => "safety",
            Factor::Affordability => "affordability",
            Factor::Nightlife => "nightlife",
            Factor::FamilyFriendly => "familyFriendly",
            Factor::Transit => "transit",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a preference record cannot be scored
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidPreferenceInput {
    #[error("missing preference field: {0}")]
    MissingField(&'static str),

    #[error("preference field {0} has an empty slider value")]
    EmptySlider(&'static str),

    #[error("preference field {0} is not a finite number")]
    NotFinite(&'static str),

    #[error("preference field {field} = {value} is outside 0..=10")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("budget {0} must not be negative")]
    NegativeBudget(f64),
}

/// A user's lifestyle preferences as captured by the questionnaire
///
/// Sliders are on a 0-10 scale; `budget` is in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceInput {
    pub walkability: f64,
    pub safety: f64,
    pub budget: f64,
    pub nightlife: f64,
    #[serde(rename = "familyFriendly")]
    pub family_friendly: f64,
    #[serde(rename = "publicTransit")]
    pub public_transit: f64,
}

impl PreferenceInput {
    /// Build a validated preference record
    pub fn new(
        walkability: f64,
        safety: f64,
        budget: f64,
        nightlife: f64,
        family_friendly: f64,
        public_transit: f64,
    ) -> Result<Self, InvalidPreferenceInput> {
        let preferences = Self {
            walkability,
            safety,
            budget,
            nightlife,
            family_friendly,
            public_transit,
        };
        preferences.validate()?;
        Ok(preferences)
    }

    /// Check every slider is within 0..=10 and the budget is a non-negative number
    pub fn validate(&self) -> Result<(), InvalidPreferenceInput> {
        for (field, value) in self.sliders() {
            if !value.is_finite() {
                return Err(InvalidPreferenceInput::NotFinite(field));
            }
            if !(0.0..=SLIDER_MAX).contains(&value) {
                return Err(InvalidPreferenceInput::OutOfRange { field, value });
            }
        }

        if !self.budget.is_finite() {
            return Err(InvalidPreferenceInput::NotFinite("budget"));
        }
        if self.budget < 0.0 {
            return Err(InvalidPreferenceInput::NegativeBudget(self.budget));
        }

        Ok(())
    }

    /// Raw slider value backing a factor; affordability is budget-driven and has none
    pub fn slider(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Walkability => Some(self.walkability),
            Factor::Safety => Some(self.safety),
            Factor::Nightlife => Some(self.nightlife),
            Factor::FamilyFriendly => Some(self.family_friendly),
            Factor::Transit => Some(self.public_transit),
            Factor::Affordability => None,
        }
    }

    /// Exact key for caching rankings of this record
    ///
    /// Each field contributes its bit pattern, so two records share a key
    /// only when they hold the same values. -0.0 and 0.0 score identically
    /// and are folded together.
    pub fn cache_key(&self) -> [u64; 6] {
        [
            self.walkability,
            self.safety,
            self.budget,
            self.nightlife,
            self.family_friendly,
            self.public_transit,
        ]
        .map(|value| (value + 0.0).to_bits())
    }

    fn sliders(&self) -> [(&'static str, f64); 5] {
        [
            ("walkability", self.walkability),
            ("safety", self.safety),
            ("nightlife", self.nightlife),
            ("familyFriendly", self.family_friendly),
            ("publicTransit", self.public_transit),
        ]
    }
}

/// Per-factor weights derived from a preference record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub walkability: f64,
    pub safety: f64,
    pub affordability: f64,
    pub nightlife: f64,
    #[serde(rename = "familyFriendly")]
    pub family_friendly: f64,
    pub transit: f64,
}

impl WeightVector {
    /// Same weight for every factor
    pub fn uniform(weight: f64) -> Self {
        Self {
            walkability: weight,
            safety: weight,
            affordability: weight,
            nightlife: weight,
            family_friendly: weight,
            transit: weight,
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Walkability => self.walkability,
            Factor::Safety => self.safety,
            Factor::Affordability => self.affordability,
            Factor::Nightlife => self.nightlife,
            Factor::FamilyFriendly => self.family_friendly,
            Factor::Transit => self.transit,
        }
    }
}

/// Factor scores of a neighborhood, each in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScores {
    pub walkability: u8,
    pub safety: u8,
    pub affordability: u8,
    pub nightlife: u8,
    #[serde(rename = "familyFriendly")]
    pub family_friendly: u8,
    pub transit: u8,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> u8 {
        match factor {
            Factor::Walkability => self.walkability,
            Factor::Safety => self.safety,
            Factor::Affordability => self.affordability,
            Factor::Nightlife => self.nightlife,
            Factor::FamilyFriendly => self.family_friendly,
            Factor::Transit => self.transit,
        }
    }

    /// First factor whose score exceeds 100, if any
    pub fn out_of_range(&self) -> Option<(Factor, u8)> {
        Factor::ALL
            .into_iter()
            .map(|factor| (factor, self.get(factor)))
            .find(|(_, score)| *score > 100)
    }
}

/// Informational demographics; never scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(rename = "medianAge")]
    pub median_age: u32,
    #[serde(rename = "medianIncome")]
    pub median_income: u32,
    pub population: u32,
}

/// Catalog entry for a candidate neighborhood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub city: String,
    pub scores: FactorScores,
    pub demographics: Demographics,
    #[serde(rename = "keyFeatures", default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Ranked neighborhood with its personalized score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredNeighborhood {
    #[serde(flatten)]
    pub neighborhood: Neighborhood,
    #[serde(rename = "overallScore")]
    pub overall_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preferences() -> PreferenceInput {
        PreferenceInput {
            walkability: 9.0,
            safety: 9.0,
            budget: 1500.0,
            nightlife: 9.0,
            family_friendly: 5.0,
            public_transit: 8.0,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(PreferenceInput::new(0.0, 10.0, 0.0, 0.0, 10.0, 5.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_slider() {
        let err = PreferenceInput::new(11.0, 5.0, 1000.0, 5.0, 5.0, 5.0).unwrap_err();
        assert_eq!(
            err,
            InvalidPreferenceInput::OutOfRange { field: "walkability", value: 11.0 }
        );

        let err = PreferenceInput::new(5.0, 5.0, 1000.0, 5.0, 5.0, -0.5).unwrap_err();
        assert_eq!(
            err,
            InvalidPreferenceInput::OutOfRange { field: "publicTransit", value: -0.5 }
        );
    }

    #[test]
    fn test_validate_rejects_bad_budget() {
        let err = PreferenceInput::new(5.0, 5.0, -1.0, 5.0, 5.0, 5.0).unwrap_err();
        assert_eq!(err, InvalidPreferenceInput::NegativeBudget(-1.0));

        let err = PreferenceInput::new(5.0, 5.0, f64::NAN, 5.0, 5.0, 5.0).unwrap_err();
        assert_eq!(err, InvalidPreferenceInput::NotFinite("budget"));
    }

    #[test]
    fn test_slider_lookup() {
        let prefs = preferences();
        assert_eq!(prefs.slider(Factor::Transit), Some(8.0));
        assert_eq!(prefs.slider(Factor::FamilyFriendly), Some(5.0));
        assert_eq!(prefs.slider(Factor::Affordability), None);
    }

    #[test]
    fn test_cache_key_is_stable() {
        let a = preferences();
        let mut b = preferences();
        assert_eq!(a.cache_key(), b.cache_key());

        b.budget = 1600.0;
        assert_ne!(a.cache_key(), b.cache_key());

        let mut zero = preferences();
        zero.nightlife = 0.0;
        let mut negative_zero = preferences();
        negative_zero.nightlife = -0.0;
        assert_eq!(zero.cache_key(), negative_zero.cache_key());
    }

    #[test]
    fn test_cache_key_tracks_field_position() {
        let a = PreferenceInput {
            walkability: 9.0,
            safety: 3.0,
            budget: 1500.0,
            nightlife: 5.0,
            family_friendly: 5.0,
            public_transit: 5.0,
        };
        let b = PreferenceInput {
            walkability: 3.0,
            safety: 9.0,
            ..a
        };

        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key()[0], 9.0f64.to_bits());
        assert_eq!(a.cache_key()[2], 1500.0f64.to_bits());
    }

    #[test]
    fn test_scored_neighborhood_json_shape() {
        let scored = ScoredNeighborhood {
            neighborhood: Neighborhood {
                id: "1".to_string(),
                name: "Capitol Hill".to_string(),
                city: "Seattle, WA".to_string(),
                scores: FactorScores {
                    walkability: 95,
                    safety: 75,
                    affordability: 60,
                    nightlife: 90,
                    family_friendly: 65,
                    transit: 85,
                },
                demographics: Demographics {
                    median_age: 29,
                    median_income: 75000,
                    population: 28000,
                },
                key_features: vec!["Arts scene".to_string()],
                highlights: vec![],
            },
            overall_score: 64,
            match_reasons: vec![],
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["name"], "Capitol Hill");
        assert_eq!(json["overallScore"], 64);
        assert_eq!(json["scores"]["familyFriendly"], 65);
        assert_eq!(json["demographics"]["medianIncome"], 75000);
        assert_eq!(json["keyFeatures"][0], "Arts scene");
        assert!(json["matchReasons"].as_array().unwrap().is_empty());
    }
}
