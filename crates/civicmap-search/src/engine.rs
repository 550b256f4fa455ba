use civicmap_core::config::SearchSettings;
use civicmap_core::error::{CivicmapError, Result};
use civicmap_core::models::{ProximityPage, ProximityQuery, RankedResult};
use civicmap_geo::{DistanceMetric, HaversineMetric};
use civicmap_store::ports::RecordStore;

/// Stateless proximity search over a record store
///
/// Candidates are scanned linearly; the store may narrow them through the
/// query's filter. Nothing is cached between calls, so any number of searches
/// can run concurrently against the same engine.
pub struct ProximitySearchEngine<S, M = HaversineMetric>
where
    S: RecordStore,
    M: DistanceMetric,
{
    store: S,
    metric: M,
    settings: SearchSettings,
}

impl<S> ProximitySearchEngine<S, HaversineMetric>
where
    S: RecordStore,
{
    /// Create an engine ranking by great-circle distance
    pub fn new(store: S, settings: SearchSettings) -> Self {
        Self::with_metric(store, HaversineMetric, settings)
    }
}

impl<S, M> ProximitySearchEngine<S, M>
where
    S: RecordStore,
    M: DistanceMetric,
{
    pub fn with_metric(store: S, metric: M, settings: SearchSettings) -> Self {
        Self { store, metric, settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Return the next page of records nearest to the query origin
    pub async fn search(&self, query: &ProximityQuery) -> Result<ProximityPage> {
        self.validate(query)?;

        // Store failures propagate unchanged
        let candidates = self.store.candidates(&query.filter).await?;
        let candidate_count = candidates.len();

        let mut remaining: Vec<RankedResult> = candidates
            .into_iter()
            .map(|record| {
                let distance = self.metric.distance(&query.origin, &record.location);
                RankedResult::new(record, distance)
            })
            .filter(|result| match &query.resume_after {
                Some(token) => result.ranks_after(token),
                None => true,
            })
            .collect();

        let page_size = query.page_size;
        let has_more = remaining.len() > page_size;

        if has_more {
            // Partition so the first `page_size` entries are the smallest, then drop the rest
            remaining.select_nth_unstable_by(page_size, RankedResult::rank_cmp);
            remaining.truncate(page_size);
        }
        remaining.sort_unstable_by(RankedResult::rank_cmp);

        tracing::debug!(
            origin = %query.origin,
            resumed = query.resume_after.is_some(),
            candidates = candidate_count,
            returned = remaining.len(),
            has_more,
            "Proximity search completed"
        );

        Ok(ProximityPage { results: remaining, has_more })
    }

    /// The origin is a `GeoPoint`, already range-checked on construction
    fn validate(&self, query: &ProximityQuery) -> Result<()> {
        let max = self.settings.max_page_size;
        if query.page_size == 0 || query.page_size > max {
            return Err(CivicmapError::PageSizeExceeded { requested: query.page_size, max });
        }

        if let Some(token) = &query.resume_after {
            token.validate()?;
        }

        Ok(())
    }
}
