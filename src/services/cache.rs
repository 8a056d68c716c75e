use crate::models::{PreferenceInput, ScoredNeighborhood};
use std::sync::Arc;
use std::time::Duration;

/// Ranking shared between cache readers
pub type CachedRanking = Arc<Vec<ScoredNeighborhood>>;

/// In-memory cache of full rankings
///
/// Ranking is a pure function of the preferences and the catalog, and the
/// catalog is fixed for the lifetime of the process, so the preference values
/// alone identify a ranking.
#[derive(Clone)]
pub struct RankingCache {
    rankings: moka::future::Cache<[u64; 6], CachedRanking>,
    enabled: bool,
}

impl RankingCache {
    /// Create a new ranking cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let rankings = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            rankings,
            enabled: true,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self {
            rankings: moka::future::Cache::new(0),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the ranking previously stored for these preferences
    pub async fn get(&self, preferences: &PreferenceInput) -> Option<CachedRanking> {
        if !self.enabled {
            return None;
        }

        let key = preferences.cache_key();
        let hit = self.rankings.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Ranking cache hit: {:?}", key);
        } else {
            tracing::trace!("Ranking cache miss: {:?}", key);
        }
        hit
    }

    /// Store a ranking for these preferences
    pub async fn insert(&self, preferences: &PreferenceInput, ranking: CachedRanking) {
        if !self.enabled {
            return;
        }

        let key = preferences.cache_key();
        self.rankings.insert(key, ranking).await;
        tracing::trace!("Ranking cache set: {:?}", key);
    }

    /// Drop every cached ranking
    pub fn invalidate_all(&self) {
        self.rankings.invalidate_all();
    }

    /// Approximate number of cached rankings
    pub async fn entry_count(&self) -> u64 {
        self.rankings.run_pending_tasks().await;
        self.rankings.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::services::Catalog;

    fn preferences(nightlife: f64) -> PreferenceInput {
        PreferenceInput {
            walkability: 9.0,
            safety: 9.0,
            budget: 1500.0,
            nightlife,
            family_friendly: 5.0,
            public_transit: 8.0,
        }
    }

    fn ranking(prefs: &PreferenceInput) -> CachedRanking {
        let catalog = Catalog::canonical();
        let result = Matcher::default().rank(prefs, catalog.neighborhoods()).unwrap();
        Arc::new(result.matches)
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let cache = RankingCache::new(100, 60);
        let prefs = preferences(9.0);

        assert!(cache.get(&prefs).await.is_none());

        cache.insert(&prefs, ranking(&prefs)).await;
        let hit = cache.get(&prefs).await.unwrap();

        assert_eq!(hit.len(), 5);
        assert_eq!(hit[0].neighborhood.name, "Capitol Hill");
        assert!(cache.get(&preferences(2.0)).await.is_none());
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_swapped_sliders_get_their_own_entry() {
        let cache = RankingCache::new(100, 60);
        let prefs = preferences(9.0);
        let swapped = PreferenceInput {
            walkability: prefs.nightlife,
            nightlife: prefs.walkability,
            safety: prefs.family_friendly,
            family_friendly: prefs.safety,
            ..prefs
        };

        cache.insert(&prefs, ranking(&prefs)).await;

        assert!(cache.get(&swapped).await.is_none());
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = RankingCache::new(100, 60);
        let prefs = preferences(9.0);

        cache.insert(&prefs, ranking(&prefs)).await;
        cache.invalidate_all();

        assert!(cache.get(&prefs).await.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_stores_nothing() {
        let cache = RankingCache::disabled();
        let prefs = preferences(9.0);

        cache.insert(&prefs, ranking(&prefs)).await;

        assert!(!cache.is_enabled());
        assert!(cache.get(&prefs).await.is_none());
    }
}
