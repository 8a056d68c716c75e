// Service exports
pub mod cache;
pub mod catalog;

pub use cache::{CachedRanking, RankingCache};
pub use catalog::{Catalog, CatalogError};
