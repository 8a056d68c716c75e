use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{InvalidPreferenceInput, PreferenceInput};

/// A slider reading: either a bare number or the single-element array
/// the questionnaire stores (`"walkability": [9]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SliderValue {
    Scalar(f64),
    Track(Vec<f64>),
}

impl SliderValue {
    /// Current reading; for a track this is the first thumb
    pub fn value(&self) -> Option<f64> {
        match self {
            SliderValue::Scalar(value) => Some(*value),
            SliderValue::Track(values) => values.first().copied(),
        }
    }
}

impl From<f64> for SliderValue {
    fn from(value: f64) -> Self {
        SliderValue::Scalar(value)
    }
}

/// Preferences as posted by a client, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPreferences {
    #[serde(default)]
    pub walkability: Option<SliderValue>,
    #[serde(default)]
    pub safety: Option<SliderValue>,
    #[serde(default)]
    pub budget: Option<SliderValue>,
    #[serde(default)]
    pub nightlife: Option<SliderValue>,
    #[serde(rename = "familyFriendly", alias = "family_friendly", default)]
    pub family_friendly: Option<SliderValue>,
    #[serde(rename = "publicTransit", alias = "public_transit", default)]
    pub public_transit: Option<SliderValue>,
}

fn read_slider(
    value: &Option<SliderValue>,
    field: &'static str,
) -> Result<f64, InvalidPreferenceInput> {
    value
        .as_ref()
        .ok_or(InvalidPreferenceInput::MissingField(field))?
        .value()
        .ok_or(InvalidPreferenceInput::EmptySlider(field))
}

impl TryFrom<&RawPreferences> for PreferenceInput {
    type Error = InvalidPreferenceInput;

    fn try_from(raw: &RawPreferences) -> Result<Self, Self::Error> {
        PreferenceInput::new(
            read_slider(&raw.walkability, "walkability")?,
            read_slider(&raw.safety, "safety")?,
            read_slider(&raw.budget, "budget")?,
            read_slider(&raw.nightlife, "nightlife")?,
            read_slider(&raw.family_friendly, "familyFriendly")?,
            read_slider(&raw.public_transit, "publicTransit")?,
        )
    }
}

/// Request to rank the catalog against a user's preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    pub preferences: RawPreferences,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}
