// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Demographics, Factor, FactorScores, InvalidPreferenceInput, Neighborhood, PreferenceInput,
    ScoredNeighborhood, WeightVector,
};
pub use requests::{RankRequest, RawPreferences, SliderValue};
pub use responses::{ErrorResponse, HealthResponse, RankResponse};
