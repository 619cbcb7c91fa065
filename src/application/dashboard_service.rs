// Dashboard service - cached access to dashboards, settings and bootstrap data
use crate::application::dhis2_resources::Dhis2Resources;
use crate::application::queries::{
    DashboardQuery, DashboardSettingsQuery, DashboardsQuery, InitialQuery, QueryDescriptor,
    TemplateQuery, UsersQuery,
};
use crate::application::query_cache::QueryCache;
use crate::domain::dashboard::{Dashboard, DashboardSettings, InitialData, Template};
use anyhow::Context;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    resources: Arc<dyn Dhis2Resources>,
    cache: Arc<QueryCache>,
}

impl DashboardService {
    pub fn new(resources: Arc<dyn Dhis2Resources>, cache: Arc<QueryCache>) -> Self {
        Self { resources, cache }
    }

    async fn run<Q: QueryDescriptor>(&self, query: Q) -> anyhow::Result<Q::Output> {
        let segments = query.key().segments();
        self.cache
            .fetch(&query, self.resources.as_ref())
            .await
            .with_context(|| format!("Query {:?} failed", segments))
    }

    pub async fn users(&self) -> anyhow::Result<Value> {
        self.run(UsersQuery).await
    }

    pub async fn initial(&self) -> anyhow::Result<InitialData> {
        self.run(InitialQuery).await
    }

    pub async fn dashboards(&self) -> anyhow::Result<Vec<Dashboard>> {
        self.run(DashboardsQuery).await
    }

    pub async fn dashboard_settings(&self) -> anyhow::Result<DashboardSettings> {
        self.run(DashboardSettingsQuery).await
    }

    pub async fn dashboard(&self, key: &str) -> anyhow::Result<Dashboard> {
        self.run(DashboardQuery::new(key)).await
    }

    pub async fn template(&self, key: &str) -> anyhow::Result<Template> {
        let template = self.run(TemplateQuery::new(key)).await?;
        tracing::debug!(
            "Template {} loaded (category combo: {})",
            template.dashboard().id,
            template.category_combo().is_some()
        );
        Ok(template)
    }

    pub async fn invalidate(&self, prefix: &[String]) -> usize {
        self.cache.invalidate(prefix).await
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}
