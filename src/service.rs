//! Fitness service: the read-through aggregation façade
//!
//! Ties the muscle catalog, the upstream client, the merge step, the TTL cache
//! and the enrichment heuristics together. One instance is shared by all
//! concurrent requests; the cache is the only mutable state.

use std::sync::Arc;
use tracing::{debug, error};

use crate::advice::advise;
use crate::cache::{CacheKey, TtlCache};
use crate::config::Config;
use crate::data::catalog::{self, normalize};
use crate::data::{
    ExerciseSet, ExerciseSummary, ExercisesResponse, SimilarMuscles, WgerClient, WgerError,
};
use crate::error::FitnessError;

/// Cache of merged exercise sets keyed by muscle name and limit
pub type ExerciseCache = TtlCache<CacheKey, Arc<ExerciseSet>>;

/// Aggregates exercises for a muscle group over the upstream API
#[derive(Debug)]
pub struct FitnessService {
    client: WgerClient,
    cache: ExerciseCache,
    similar: SimilarMuscles,
    config: Config,
}

impl FitnessService {
    /// Builds a service from configuration
    ///
    /// Creates the upstream client, loads the similar-muscles file (falling
    /// back to the built-in table) and starts with an empty cache. Fails only
    /// if the upstream client cannot be built from the configuration.
    pub fn new(config: Config) -> Result<Self, WgerError> {
        let client = WgerClient::new(
            config.base_url.clone(),
            config.language,
            config.user_agent.clone(),
            config.request_timeout,
        )?;
        let similar = SimilarMuscles::load(&config.similar_file);
        let cache = ExerciseCache::new(config.cache_ttl);
        Ok(Self::with_parts(client, cache, similar, config))
    }

    /// Builds a service from already constructed collaborators
    pub fn with_parts(
        client: WgerClient,
        cache: ExerciseCache,
        similar: SimilarMuscles,
        config: Config,
    ) -> Self {
        Self {
            client,
            cache,
            similar,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &ExerciseCache {
        &self.cache
    }

    pub fn similar_muscles(&self) -> &SimilarMuscles {
        &self.similar
    }

    /// Returns exercises for `muscle` with advice and similar muscle groups
    ///
    /// # Arguments
    /// * `muscle` - Muscle-group name (any case, surrounding whitespace ignored)
    ///   or a comma-separated list of upstream muscle ids
    /// * `limit` - Requested page size; missing or out-of-range values use the default
    ///
    /// # Returns
    /// * `Ok(ExercisesResponse)` - Merged exercises, served from cache when fresh
    /// * `Err(FitnessError::UnknownMuscle)` - The name could not be resolved
    /// * `Err(FitnessError::Upstream)` - Either upstream query failed; nothing is cached
    pub async fn get_exercises(
        &self,
        muscle: &str,
        limit: Option<i64>,
    ) -> Result<ExercisesResponse, FitnessError> {
        let muscle = normalize(muscle);
        let ids = catalog::resolve(&muscle)?;
        let limit = self.config.normalize_limit(limit);
        let key = CacheKey::new(muscle.clone(), limit);

        let exercises = match self.cache.read(&key) {
            Some(cached) => {
                debug!(%key, cached_at = %cached.cached_at, "cache hit");
                cached.data
            }
            None => {
                debug!(%key, ?ids, "cache miss");
                let fresh = Arc::new(self.fetch_merged(&ids, limit).await?);
                self.cache.write(key, Arc::clone(&fresh));
                fresh
            }
        };

        Ok(self.compose(muscle, &exercises))
    }

    async fn fetch_merged(&self, ids: &[u32], limit: u32) -> Result<ExerciseSet, FitnessError> {
        let (primary, secondary) = self
            .client
            .fetch_both(ids, limit)
            .await
            .inspect_err(|e| error!(error = %e, ?ids, "upstream fetch failed"))?;
        let merged = ExerciseSet::merge(primary, secondary);
        debug!(unique = merged.len(), "merged upstream pages");
        Ok(merged)
    }

    fn compose(&self, muscle: String, exercises: &ExerciseSet) -> ExercisesResponse {
        let similar_muscles = self.similar.similar(&muscle).to_vec();
        ExercisesResponse {
            exercises: exercises
                .to_sorted_vec()
                .into_iter()
                .map(ExerciseSummary::from)
                .collect(),
            similar_muscles,
            advice: advise(exercises).text().to_string(),
            muscle,
        }
    }
}
