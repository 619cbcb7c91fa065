// Visualization service - builds renderable bar chart figures
use crate::domain::chart_layout::{ChartLayout, LayoutOverrides, PlotConfig, PlotLayout};
use crate::domain::graph::{GraphOptions, Record, Trace, process_graphs};
use crate::domain::legend::{LegendEntry, build_legend};
use crate::domain::visualization::{ChartType, Visualization};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGraphRequest {
    pub visualization: Visualization,
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub layout_properties: LayoutOverrides,
}

/// Everything a front end needs to draw the chart and its legend
#[derive(Debug, Clone, Serialize)]
pub struct BarGraphFigure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub data: Vec<Trace>,
    pub layout: PlotLayout,
    pub config: PlotConfig,
    pub legend: Vec<LegendEntry>,
}

#[derive(Clone)]
pub struct VisualizationService {
    mode_bar_exclusions: Vec<String>,
}

impl VisualizationService {
    pub fn new(mode_bar_exclusions: Vec<String>) -> Self {
        Self {
            mode_bar_exclusions,
        }
    }

    pub fn bar_graph(&self, request: &BarGraphRequest) -> BarGraphFigure {
        let visualization = &request.visualization;
        let layout = ChartLayout::default().merge(&request.layout_properties);

        let shaped = process_graphs(
            &request.data,
            &GraphOptions {
                order: visualization.order,
                show: visualization.show,
                summarize: visualization.summarize(),
                category: request.category.as_deref(),
                series: request.series.as_deref(),
                chart_type: ChartType::Bar,
            },
        );

        tracing::debug!(
            "Shaped visualization {} into {} traces",
            visualization.id,
            shaped.chart_data.len()
        );

        let legend = build_legend(&shaped.all_series, visualization, &layout);

        BarGraphFigure {
            title: visualization.title().map(str::to_string),
            data: shaped.chart_data,
            layout: PlotLayout::new(layout),
            config: PlotConfig::new(self.mode_bar_exclusions.clone()),
            legend,
        }
    }
}
