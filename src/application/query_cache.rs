// Query cache - serves descriptor results until they go stale
use crate::application::dhis2_resources::Dhis2Resources;
use crate::application::queries::{QueryDescriptor, QueryKey};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

/// Entries are keyed by query key and result type, so descriptors sharing a
/// key but producing different shapes never read each other's values.
pub struct QueryCache {
    stale_time: Duration,
    entries: RwLock<HashMap<(QueryKey, TypeId), CacheEntry>>,
}

impl QueryCache {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached result for `query`, running its fetch when missing or stale.
    /// Failed fetches are not cached. Storing a result evicts every stale entry.
    pub async fn fetch<Q: QueryDescriptor>(
        &self,
        query: &Q,
        resources: &dyn Dhis2Resources,
    ) -> anyhow::Result<Q::Output> {
        let cache_key = (query.key(), TypeId::of::<Q::Output>());

        if let Some(value) = self.fresh(&cache_key).await {
            tracing::debug!("Cache hit for {:?}", cache_key.0.segments());
            return Ok(value);
        }

        tracing::debug!("Cache miss for {:?}", cache_key.0.segments());
        let value = query.fetch(resources).await?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.stale_time);
        entries.insert(
            cache_key,
            CacheEntry {
                value: Arc::new(value.clone()),
                fetched_at: Instant::now(),
            },
        );

        Ok(value)
    }

    async fn fresh<T: Clone + 'static>(&self, cache_key: &(QueryKey, TypeId)) -> Option<T> {
        let entries = self.entries.read().await;
        let entry = entries.get(cache_key)?;
        if entry.fetched_at.elapsed() >= self.stale_time {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Drop every entry whose key starts with `prefix`; returns how many were dropped
    pub async fn invalidate(&self, prefix: &[String]) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(key, _), _| !key.starts_with(prefix));
        let removed = before - entries.len();

        tracing::debug!("Invalidated {} cache entries under {:?}", removed, prefix);
        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_resources::FakeResources;
    use crate::application::queries::{
        DASHBOARDS_NAMESPACE, DashboardQuery, DashboardsQuery, TemplateQuery,
    };
    use crate::domain::dashboard::Template;
    use serde_json::json;

    fn resources() -> FakeResources {
        FakeResources::default()
            .with_entry(DASHBOARDS_NAMESPACE, "d1", json!({ "id": "d1", "categoryCombo": "cc1" }))
            .with_entry(DASHBOARDS_NAMESPACE, "d2", json!({ "id": "d2" }))
            .with_resource("categoryCombos/cc1.json", json!({ "categories": [] }))
    }

    #[tokio::test]
    async fn test_cache_hit_skips_fetch() {
        let resources = resources();
        let cache = QueryCache::new(Duration::from_secs(60));

        let first = cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();
        let second = cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(resources.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_entries_are_refetched() {
        let resources = resources();
        let cache = QueryCache::new(Duration::ZERO);

        cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();
        cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();

        assert_eq!(resources.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_entries_evicted_on_insert() {
        let resources = resources();
        let cache = QueryCache::new(Duration::ZERO);

        cache.fetch(&DashboardQuery::new("d1"), &resources).await.unwrap();
        cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();
        cache.fetch(&DashboardsQuery, &resources).await.unwrap();

        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_shared_key_different_results() {
        let resources = resources();
        let cache = QueryCache::new(Duration::from_secs(60));

        let dashboard = cache.fetch(&DashboardQuery::new("d1"), &resources).await.unwrap();
        let template = cache.fetch(&TemplateQuery::new("d1"), &resources).await.unwrap();

        assert_eq!(dashboard.id, "d1");
        assert!(matches!(template, Template::DashboardWithCategoryCombo { .. }));
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_invalidate_by_prefix() {
        let resources = resources();
        let cache = QueryCache::new(Duration::from_secs(60));

        cache.fetch(&DashboardsQuery, &resources).await.unwrap();
        cache.fetch(&DashboardQuery::new("d1"), &resources).await.unwrap();
        cache.fetch(&DashboardQuery::new("d2"), &resources).await.unwrap();

        let removed = cache
            .invalidate(&["i-dashboards".to_string(), "d1".to_string()])
            .await;
        assert_eq!(removed, 1);

        let removed = cache.invalidate(&["i-dashboards".to_string()]).await;
        assert_eq!(removed, 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let resources = resources();
        let cache = QueryCache::new(Duration::from_secs(60));

        assert!(cache.fetch(&DashboardQuery::new("missing"), &resources).await.is_err());
        assert!(cache.fetch(&DashboardQuery::new("missing"), &resources).await.is_err());

        assert_eq!(resources.calls().len(), 2);
        assert_eq!(cache.len().await, 0);
    }
}
