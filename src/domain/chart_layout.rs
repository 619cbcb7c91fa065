// Chart layout domain model - defaults, partial overrides and figure assembly
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLORWAY: [&str; 9] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLayout {
    pub x: f64,
    pub y: f64,
    pub orientation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisLayout {
    pub automargin: bool,
}

/// The user-adjustable part of a chart layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub legend: LegendLayout,
    pub yaxis: YAxisLayout,
    pub colorway: Vec<String>,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            legend: LegendLayout {
                x: 0.5,
                y: -0.1,
                orientation: "h".to_string(),
            },
            yaxis: YAxisLayout { automargin: true },
            colorway: DEFAULT_COLORWAY.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendOverrides {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YAxisOverrides {
    pub automargin: Option<bool>,
}

/// Partial layout; every field left as `None` keeps the default.
///
/// Unknown fields are rejected when deserializing, so a misspelled path is an
/// error rather than a silently ignored setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutOverrides {
    pub legend: Option<LegendOverrides>,
    pub yaxis: Option<YAxisOverrides>,
    pub colorway: Option<Vec<String>>,
}

impl ChartLayout {
    pub fn merge(mut self, overrides: &LayoutOverrides) -> Self {
        if let Some(legend) = &overrides.legend {
            if let Some(x) = legend.x {
                self.legend.x = x;
            }
            if let Some(y) = legend.y {
                self.legend.y = y;
            }
            if let Some(orientation) = &legend.orientation {
                self.legend.orientation = orientation.clone();
            }
        }

        if let Some(yaxis) = &overrides.yaxis {
            if let Some(automargin) = yaxis.automargin {
                self.yaxis.automargin = automargin;
            }
        }

        // An empty palette would leave legend swatches without a colour
        if let Some(colorway) = overrides.colorway.as_ref().filter(|c| !c.is_empty()) {
            self.colorway = colorway.clone();
        }

        self
    }

    /// Colour for the series at `index`, cycling through the colorway
    pub fn color_at(&self, index: usize) -> &str {
        match self.colorway.len() {
            0 => DEFAULT_COLORWAY[index % DEFAULT_COLORWAY.len()],
            len => &self.colorway[index % len],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub pad: u32,
    pub r: u32,
    pub t: u32,
    pub l: u32,
    pub b: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabels {
    pub rotate: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisLayout {
    pub automargin: bool,
    pub showgrid: bool,
    #[serde(rename = "type")]
    pub axis_type: String,
    pub labels: AxisLabels,
}

/// Full layout handed to the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLayout {
    pub margin: Margin,
    pub autosize: bool,
    pub showlegend: bool,
    pub xaxis: XAxisLayout,
    #[serde(flatten)]
    pub chart: ChartLayout,
}

impl PlotLayout {
    pub fn new(chart: ChartLayout) -> Self {
        Self {
            margin: Margin {
                pad: 5,
                r: 10,
                t: 0,
                l: 50,
                b: 0,
            },
            autosize: true,
            showlegend: false,
            xaxis: XAxisLayout {
                automargin: true,
                showgrid: false,
                axis_type: "category".to_string(),
                labels: AxisLabels { rotate: 0 },
            },
            chart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageExportOptions {
    pub format: String,
    pub scale: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub display_mode_bar: bool,
    pub responsive: bool,
    pub to_image_button_options: ImageExportOptions,
    pub mode_bar_buttons_to_remove: Vec<String>,
    pub displaylogo: bool,
}

impl PlotConfig {
    pub fn new(mode_bar_buttons_to_remove: Vec<String>) -> Self {
        Self {
            display_mode_bar: true,
            responsive: true,
            to_image_button_options: ImageExportOptions {
                format: "svg".to_string(),
                scale: 1,
            },
            mode_bar_buttons_to_remove,
            displaylogo: false,
        }
    }
}
