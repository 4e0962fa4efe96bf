use super::rows::DataRow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    Sleep,
    Exercise,
    Anxiety,
    Depression,
    Stress,
}

impl MetricKind {
    pub const ALL: [MetricKind; 5] = [
        Self::Sleep,
        Self::Exercise,
        Self::Anxiety,
        Self::Depression,
        Self::Stress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Exercise => "exercise",
            Self::Anxiety => "anxiety",
            Self::Depression => "depression",
            Self::Stress => "stress",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Sleep => &[
                "sleep_hours",
                "sleep",
                "sleep_duration",
                "avg_sleep_hours",
                "4._on_average,_how_many_hours_of_sleep_do_you_get_on_a_typical_day?",
                "how_many_hours_of_actual_sleep_did_you_get_on_an_average_for_the_past_month?_(maybe_different_from_the_number_of_hours_spent_in_bed)",
                "what_is_your_average_hours_of_sleep_per_night?",
            ],
            Self::Exercise => &[
                "exercise_hours",
                "avg_exercise",
                "exercise_hours_per_week",
                "exercise",
                "extracurricular_activities",
            ],
            Self::Anxiety => &["anxiety_score", "anxiety", "gad7", "anxiety_level"],
            Self::Depression => &["depression_score", "depression", "phq9"],
            Self::Stress => &[
                "stress_score",
                "stress",
                "rate_your_academic_stress_index",
                "avg_stress",
                "stress_level",
            ],
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Schema {
    sleep: Option<String>,
    exercise: Option<String>,
    anxiety: Option<String>,
    depression: Option<String>,
    stress: Option<String>,
}

impl Schema {
    pub fn resolve(rows: &[DataRow]) -> Schema {
        let Some(first) = rows.first() else {
            return Schema::default();
        };

        Schema {
            sleep: first_key(first, MetricKind::Sleep.aliases()),
            exercise: first_key(first, MetricKind::Exercise.aliases()),
            anxiety: first_key(first, MetricKind::Anxiety.aliases()),
            depression: first_key(first, MetricKind::Depression.aliases()),
            stress: first_key(first, MetricKind::Stress.aliases()),
        }
    }

    pub fn field(&self, kind: MetricKind) -> Option<&str> {
        match kind {
            MetricKind::Sleep => self.sleep.as_deref(),
            MetricKind::Exercise => self.exercise.as_deref(),
            MetricKind::Anxiety => self.anxiety.as_deref(),
            MetricKind::Depression => self.depression.as_deref(),
            MetricKind::Stress => self.stress.as_deref(),
        }
    }

    pub fn value(&self, row: &DataRow, kind: MetricKind) -> Option<f32> {
        self.field(kind).and_then(|field| row.number(field))
    }

    pub fn missing(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|kind| self.field(*kind).is_none())
            .collect()
    }
}

fn first_key(row: &DataRow, candidates: &[&str]) -> Option<String> {
    for candidate in candidates {
        if row.get(candidate).is_some() || row.field_names().any(|name| name == *candidate) {
            return Some((*candidate).to_string());
        }
    }

    for candidate in candidates {
        if let Some(name) = row
            .field_names()
            .find(|name| name.eq_ignore_ascii_case(candidate))
        {
            return Some(name.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn row(pairs: &[(&str, &str)]) -> DataRow {
        DataRow::new(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn resolves_aliases_case_insensitively() {
        let rows = vec![row(&[
            ("Sleep_Hours", "7"),
            ("anxiety_level", "4"),
            ("stress_score", "6"),
        ])];
        let schema = Schema::resolve(&rows);

        assert_eq!(schema.field(MetricKind::Sleep), Some("Sleep_Hours"));
        assert_eq!(schema.field(MetricKind::Anxiety), Some("anxiety_level"));
        assert_eq!(schema.field(MetricKind::Stress), Some("stress_score"));
        assert_eq!(schema.field(MetricKind::Exercise), None);
        assert_eq!(
            schema.missing(),
            vec![MetricKind::Exercise, MetricKind::Depression]
        );
    }

    #[test]
    fn empty_dataset_resolves_to_empty_schema() {
        let schema = Schema::resolve(&[]);
        assert_eq!(schema.missing().len(), 5);
    }
}
