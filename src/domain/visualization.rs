// Visualization descriptor domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Default,
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub show_title: Option<bool>,
    #[serde(default)]
    pub order: SortOrder,
    /// Number of categories to keep after ordering
    #[serde(default)]
    pub show: Option<usize>,
    #[serde(default)]
    pub indicators: Vec<Value>,
    /// Free-form properties; per-series overrides use `<series>.bg` and `<series>.name`
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Visualization {
    /// Title to render above the chart, if any.
    ///
    /// An explicit `showTitle: false` hides it; otherwise a non-empty name is shown.
    pub fn title(&self) -> Option<&str> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        match self.show_title {
            Some(false) => None,
            Some(true) | None => Some(name),
        }
    }

    pub fn summarize(&self) -> bool {
        self.properties
            .get("summarize")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn series_color(&self, series: &str) -> Option<&str> {
        self.series_property(series, "bg")
    }

    pub fn series_label(&self, series: &str) -> Option<&str> {
        self.series_property(series, "name")
    }

    fn series_property(&self, series: &str, suffix: &str) -> Option<&str> {
        self.properties
            .get(&format!("{}.{}", series, suffix))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
