// Query descriptors - cache keys paired with the fetches that fill them
use crate::application::dhis2_resources::Dhis2Resources;
use crate::domain::category_combo::CategoryCombo;
use crate::domain::dashboard::{Dashboard, DashboardSettings, InitialData, Template};
use crate::domain::organisation_unit::OrgUnitNode;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DASHBOARDS_NAMESPACE: &str = "i-dashboards";
pub const SETTINGS_NAMESPACE: &str = "i-dashboard-settings";
pub const SETTINGS_KEY: &str = "settings";

const ORG_UNITS_FIELDS: &str = "dataViewOrganisationUnits[id~rename(key),name~rename(title),leaf]";
const CATEGORY_COMBO_FIELDS: &str = "categories[id,name,shortName,categoryOptions[id,name,startDate,endDate]],categoryOptionCombos[id,categoryOptions]";

/// Cache key, one variant per resource kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Users,
    Initial,
    Dashboards,
    DashboardSettings,
    Dashboard(String),
}

impl QueryKey {
    pub fn segments(&self) -> Vec<String> {
        match self {
            QueryKey::Users => vec!["users".to_string()],
            QueryKey::Initial => vec!["initial".to_string()],
            QueryKey::Dashboards => vec![DASHBOARDS_NAMESPACE.to_string()],
            QueryKey::DashboardSettings => vec![SETTINGS_NAMESPACE.to_string()],
            QueryKey::Dashboard(key) => vec![DASHBOARDS_NAMESPACE.to_string(), key.clone()],
        }
    }

    pub fn starts_with(&self, prefix: &[String]) -> bool {
        let segments = self.segments();
        prefix.len() <= segments.len() && segments.iter().zip(prefix).all(|(a, b)| a == b)
    }
}

#[async_trait]
pub trait QueryDescriptor: Send + Sync {
    type Output: Clone + Send + Sync + 'static;

    fn key(&self) -> QueryKey;

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<Self::Output>;
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> anyhow::Result<T> {
    serde_json::from_value(value).with_context(|| format!("Failed to decode {}", what))
}

pub struct UsersQuery;

#[async_trait]
impl QueryDescriptor for UsersQuery {
    type Output = Value;

    fn key(&self) -> QueryKey {
        QueryKey::Users
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<Value> {
        resources.get_resource("users", &[]).await
    }
}

pub struct InitialQuery;

#[async_trait]
impl QueryDescriptor for InitialQuery {
    type Output = InitialData;

    fn key(&self) -> QueryKey {
        QueryKey::Initial
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<InitialData> {
        let settings = resources
            .get_namespace_key_data(SETTINGS_NAMESPACE, SETTINGS_KEY)
            .await?;
        let settings: DashboardSettings = decode(settings, "dashboard settings")?;

        let units = resources
            .get_resources(
                "me.json",
                "dataViewOrganisationUnits",
                &[("fields", ORG_UNITS_FIELDS)],
            )
            .await?;
        let units: Vec<OrgUnitNode> = decode(Value::Array(units), "organisation units")?;

        Ok(InitialData::merge(units, settings))
    }
}

pub struct DashboardsQuery;

#[async_trait]
impl QueryDescriptor for DashboardsQuery {
    type Output = Vec<Dashboard>;

    fn key(&self) -> QueryKey {
        QueryKey::Dashboards
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<Vec<Dashboard>> {
        let entries = resources.get_namespace_data(DASHBOARDS_NAMESPACE).await?;
        decode(Value::Array(entries), "dashboards")
    }
}

pub struct DashboardSettingsQuery;

#[async_trait]
impl QueryDescriptor for DashboardSettingsQuery {
    type Output = DashboardSettings;

    fn key(&self) -> QueryKey {
        QueryKey::DashboardSettings
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<DashboardSettings> {
        let settings = resources
            .get_namespace_key_data(SETTINGS_NAMESPACE, SETTINGS_KEY)
            .await?;
        decode(settings, "dashboard settings")
    }
}

pub struct DashboardQuery {
    pub key: String,
}

impl DashboardQuery {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

async fn fetch_dashboard(resources: &dyn Dhis2Resources, key: &str) -> anyhow::Result<Dashboard> {
    let dashboard = resources
        .get_namespace_key_data(DASHBOARDS_NAMESPACE, key)
        .await?;
    let dashboard: Dashboard = decode(dashboard, &format!("dashboard {}", key))?;
    Ok(dashboard.with_key(key))
}

#[async_trait]
impl QueryDescriptor for DashboardQuery {
    type Output = Dashboard;

    fn key(&self) -> QueryKey {
        QueryKey::Dashboard(self.key.clone())
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<Dashboard> {
        fetch_dashboard(resources, &self.key).await
    }
}

/// Dashboard plus, when referenced, its category combination
pub struct TemplateQuery {
    pub key: String,
}

impl TemplateQuery {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait]
impl QueryDescriptor for TemplateQuery {
    type Output = Template;

    fn key(&self) -> QueryKey {
        QueryKey::Dashboard(self.key.clone())
    }

    async fn fetch(&self, resources: &dyn Dhis2Resources) -> anyhow::Result<Template> {
        let dashboard = fetch_dashboard(resources, &self.key).await?;

        let Some(combo_id) = dashboard.category_combo_id().map(str::to_string) else {
            return Ok(Template::DashboardOnly { dashboard });
        };

        let resource = format!("categoryCombos/{}.json", combo_id);
        tracing::debug!("Dashboard {} references {}", self.key, resource);
        let category_combo = resources
            .get_resource(&resource, &[("fields", CATEGORY_COMBO_FIELDS)])
            .await?;
        let category_combo: CategoryCombo =
            decode(category_combo, &format!("category combo {}", combo_id))?;

        Ok(Template::DashboardWithCategoryCombo {
            dashboard,
            category_combo,
        })
    }
}
