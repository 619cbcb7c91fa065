// Graph shaping - turns flat analytics records into chart traces
use super::visualization::{ChartType, SortOrder};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub type Record = Map<String, Value>;

/// Category used when records carry no category dimension
pub const TOTAL_CATEGORY: &str = "Total";

const VALUE_FIELD: &str = "value";

#[derive(Debug, Clone, Default)]
pub struct GraphOptions<'a> {
    pub order: SortOrder,
    pub show: Option<usize>,
    pub summarize: bool,
    pub category: Option<&'a str>,
    pub series: Option<&'a str>,
    pub chart_type: ChartType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapedGraph {
    pub chart_data: Vec<Trace>,
    pub all_series: Vec<String>,
}

/// Position-preserving set of labels
#[derive(Default)]
struct Labels {
    order: Vec<String>,
    index: HashMap<String, usize>,
}

impl Labels {
    fn position(&mut self, label: String) -> usize {
        if let Some(&position) = self.index.get(&label) {
            return position;
        }
        let position = self.order.len();
        self.index.insert(label.clone(), position);
        self.order.push(label);
        position
    }
}

pub fn process_graphs(records: &[Record], options: &GraphOptions<'_>) -> ShapedGraph {
    let mut categories = Labels::default();
    let mut series = Labels::default();
    let mut cells: HashMap<(usize, usize), f64> = HashMap::new();

    for record in records {
        let Some(value) = record.get(VALUE_FIELD).and_then(numeric) else {
            continue;
        };

        let category = match options.category {
            Some(field) => label(record, field).unwrap_or_else(|| TOTAL_CATEGORY.to_string()),
            None => TOTAL_CATEGORY.to_string(),
        };
        let series_name = match options.series {
            Some(field) if !options.summarize => label(record, field).unwrap_or_default(),
            _ => String::new(),
        };

        let key = (categories.position(category), series.position(series_name));
        *cells.entry(key).or_insert(0.0) += value;
    }

    let mut category_positions: Vec<usize> = (0..categories.order.len()).collect();
    if options.order != SortOrder::Default {
        let totals: Vec<f64> = category_positions
            .iter()
            .map(|&c| {
                (0..series.order.len())
                    .filter_map(|s| cells.get(&(c, s)))
                    .sum::<f64>()
            })
            .collect();

        // Stable sort so ties keep first-seen order
        category_positions.sort_by(|&a, &b| {
            let ordering = totals[a].total_cmp(&totals[b]);
            match options.order {
                SortOrder::Desc => ordering.reverse(),
                _ => ordering,
            }
        });
    }
    if let Some(show) = options.show {
        category_positions.truncate(show);
    }

    let x: Vec<String> = category_positions
        .iter()
        .map(|&c| categories.order[c].clone())
        .collect();

    let chart_data = series
        .order
        .iter()
        .enumerate()
        .map(|(s, name)| Trace {
            name: name.clone(),
            x: x.clone(),
            y: category_positions
                .iter()
                .map(|&c| cells.get(&(c, s)).copied().unwrap_or(0.0))
                .collect(),
            chart_type: options.chart_type,
        })
        .collect();

    ShapedGraph {
        chart_data,
        all_series: series.order,
    }
}

fn label(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}
