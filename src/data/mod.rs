mod metrics;
mod rows;
mod schema;

pub use metrics::{RadarMetric, radar_metrics, severity_score, wellbeing_score};
pub use rows::{DataRow, load_rows};
pub use schema::{MetricKind, Schema};
