// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod weights;

pub use matcher::{rank_neighborhoods, Matcher, MatchResult};
pub use scoring::{calculate_overall_score, generate_match_reasons, ReasonThresholds};
pub use weights::derive_weights;
