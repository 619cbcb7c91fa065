// Legend assembly for shaped chart series
use super::chart_layout::ChartLayout;
use super::visualization::Visualization;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

/// One swatch per non-empty series name, in the order given.
///
/// Colours come from `<series>.bg` or the layout colorway by position among
/// the non-empty names; labels from `<series>.name` or the series name itself.
pub fn build_legend(
    all_series: &[String],
    visualization: &Visualization,
    layout: &ChartLayout,
) -> Vec<LegendEntry> {
    all_series
        .iter()
        .filter(|series| !series.is_empty())
        .enumerate()
        .map(|(index, series)| LegendEntry {
            color: visualization
                .series_color(series)
                .unwrap_or_else(|| layout.color_at(index))
                .to_string(),
            label: visualization
                .series_label(series)
                .unwrap_or(series.as_str())
                .to_string(),
        })
        .collect()
}
