use super::rows::DataRow;
use super::schema::{MetricKind, Schema};

pub fn goodness(kind: MetricKind, value: f32) -> f32 {
    match kind {
        MetricKind::Sleep => (value / 9.0).clamp(0.0, 1.0),
        MetricKind::Exercise => (value / 12.0).clamp(0.0, 1.0),
        MetricKind::Anxiety | MetricKind::Depression | MetricKind::Stress => {
            (1.0 - value / 10.0).clamp(0.0, 1.0)
        }
    }
}

pub fn severity_score(row: &DataRow, schema: &Schema) -> f32 {
    let values = [MetricKind::Stress, MetricKind::Anxiety, MetricKind::Depression]
        .into_iter()
        .filter_map(|kind| schema.value(row, kind))
        .collect::<Vec<_>>();

    match mean(&values) {
        Some(average) => average.clamp(0.0, 10.0),
        None => 5.0,
    }
}

pub fn wellbeing_score(row: &DataRow, schema: &Schema) -> f32 {
    let values = MetricKind::ALL
        .into_iter()
        .filter_map(|kind| schema.value(row, kind).map(|value| goodness(kind, value)))
        .collect::<Vec<_>>();

    match mean(&values) {
        Some(average) => average.clamp(0.0, 1.0),
        None => 0.5,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RadarMetric {
    pub label: &'static str,
    pub value: f32,
}

pub fn radar_metrics(row: &DataRow, schema: &Schema) -> [RadarMetric; 5] {
    let raw = |kind: MetricKind, divisor: f32| {
        (schema.value(row, kind).unwrap_or(0.0) / divisor).clamp(0.0, 1.0)
    };

    [
        RadarMetric {
            label: "Sleep",
            value: raw(MetricKind::Sleep, 9.0),
        },
        RadarMetric {
            label: "Exercise",
            value: raw(MetricKind::Exercise, 12.0),
        },
        RadarMetric {
            label: "Anxiety",
            value: raw(MetricKind::Anxiety, 10.0),
        },
        RadarMetric {
            label: "Depression",
            value: raw(MetricKind::Depression, 10.0),
        },
        RadarMetric {
            label: "Stress",
            value: raw(MetricKind::Stress, 10.0),
        },
    ]
}

fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}
