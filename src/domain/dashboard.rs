// Dashboard domain model
use super::category_combo::CategoryCombo;
use super::organisation_unit::OrgUnitNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Stored entries may omit it; the namespace key identifies the dashboard
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_combo: Option<String>,
    /// Remaining dashboard fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dashboard {
    /// Category combination id, ignoring blank references
    pub fn category_combo_id(&self) -> Option<&str> {
        self.category_combo.as_deref().filter(|id| !id.is_empty())
    }

    /// Fill a missing id from the namespace key the dashboard is stored under
    pub fn with_key(mut self, key: &str) -> Self {
        if self.id.is_empty() {
            self.id = key.to_string();
        }
        self
    }
}

const ORGANISATION_UNITS_FIELD: &str = "organisationUnits";

/// Key-value settings stored under `i-dashboard-settings/settings`
pub type DashboardSettings = Map<String, Value>;

/// Fetched organisation unit tree, or whatever a settings entry put in its place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrganisationUnits {
    Tree(Vec<OrgUnitNode>),
    Setting(Value),
}

/// Bootstrap payload: settings with the user's organisation units merged in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    pub organisation_units: OrganisationUnits,
    #[serde(flatten)]
    pub settings: DashboardSettings,
}

impl InitialData {
    /// Settings are spread over the tree, so an `organisationUnits` setting
    /// replaces the fetched one verbatim.
    pub fn merge(organisation_units: Vec<OrgUnitNode>, mut settings: DashboardSettings) -> Self {
        let organisation_units = match settings.remove(ORGANISATION_UNITS_FIELD) {
            Some(value) => {
                tracing::debug!("organisationUnits setting overrides the fetched tree");
                OrganisationUnits::Setting(value)
            }
            None => OrganisationUnits::Tree(organisation_units),
        };

        Self {
            organisation_units,
            settings,
        }
    }
}

/// Dashboard template, with its category combination when the dashboard references one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Template {
    #[serde(rename_all = "camelCase")]
    DashboardWithCategoryCombo {
        dashboard: Dashboard,
        category_combo: CategoryCombo,
    },
    DashboardOnly { dashboard: Dashboard },
}

impl Template {
    pub fn dashboard(&self) -> &Dashboard {
        match self {
            Template::DashboardWithCategoryCombo { dashboard, .. } => dashboard,
            Template::DashboardOnly { dashboard } => dashboard,
        }
    }

    pub fn category_combo(&self) -> Option<&CategoryCombo> {
        match self {
            Template::DashboardWithCategoryCombo { category_combo, .. } => Some(category_combo),
            Template::DashboardOnly { .. } => None,
        }
    }
}
