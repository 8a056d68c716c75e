//! Neighborhood Match - personalized neighborhood ranking
//!
//! Turns a user's lifestyle preferences into per-factor weights, scores every
//! neighborhood in a catalog against them, and returns the catalog ranked with
//! a short explanation of why each match fits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{derive_weights, rank_neighborhoods, Matcher, MatchResult, ReasonThresholds};
pub use models::{
    Factor, FactorScores, InvalidPreferenceInput, Neighborhood, PreferenceInput,
    ScoredNeighborhood, WeightVector,
};
pub use services::Catalog;
