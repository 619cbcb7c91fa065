// Domain layer - dashboard entities and chart shaping
pub mod category_combo;
pub mod chart_layout;
pub mod dashboard;
pub mod graph;
pub mod legend;
pub mod organisation_unit;
pub mod visualization;
