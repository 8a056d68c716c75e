use crate::models::{PreferenceInput, WeightVector};

/// Currency units per budget bracket
pub const BUDGET_BRACKET: f64 = 500.0;

/// Number of brackets after which a bigger budget no longer lowers affordability weight
pub const MAX_BUDGET_BRACKETS: f64 = 10.0;

/// Derive per-factor weights from a user's preferences
///
/// Slider factors map linearly: weight = slider / 10.
/// Affordability is inverse to budget:
/// ```text
/// capped = min(budget / 500, 10)
/// weight = (11 - capped) / 10
/// ```
/// so a zero budget gives 1.1 and anything from 5000 upwards gives 0.1.
///
/// Values are not clamped; callers validate the record first.
pub fn derive_weights(preferences: &PreferenceInput) -> WeightVector {
    WeightVector {
        walkability: slider_weight(preferences.walkability),
        safety: slider_weight(preferences.safety),
        affordability: affordability_weight(preferences.budget),
        nightlife: slider_weight(preferences.nightlife),
        family_friendly: slider_weight(preferences.family_friendly),
        transit: slider_weight(preferences.public_transit),
    }
}

#[inline]
fn slider_weight(raw: f64) -> f64 {
    raw / 10.0
}

#[inline]
fn affordability_weight(budget: f64) -> f64 {
    let capped = (budget / BUDGET_BRACKET).min(MAX_BUDGET_BRACKETS);
    (11.0 - capped) / 10.0
}
