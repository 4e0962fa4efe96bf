use std::collections::HashMap;
use std::fs::File;

use anyhow::{Context, Result};

#[derive(Clone, Debug, Default)]
pub struct DataRow {
    fields: HashMap<String, String>,
}

impl DataRow {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn number(&self, field: &str) -> Option<f32> {
        self.get(field)
            .and_then(|value| value.parse::<f32>().ok())
            .filter(|value| value.is_finite())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

pub fn load_rows(path: &str) -> Result<Vec<DataRow>> {
    let file = File::open(path).with_context(|| format!("failed to open survey CSV at {path}"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for record in reader.deserialize::<HashMap<String, String>>() {
        let fields = record.with_context(|| format!("malformed CSV record in {path}"))?;
        rows.push(DataRow::new(fields));
    }

    Ok(rows)
}
