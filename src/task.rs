use serde::{Deserialize, Serialize};
use std::io::Read;

/// One row of the task export, columns assigned by position:
/// `ID,Priority,Date,Project,Labels,Content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub priority: String,
    pub due_date_text: String,
    pub project: String,
    pub labels: String,
    pub content: String,
}

impl TaskRecord {
    pub fn new(
        id: impl Into<String>,
        due_date_text: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            due_date_text: due_date_text.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_labels(mut self, labels: impl Into<String>) -> Self {
        self.labels = labels.into();
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Label tokens split on commas, semicolons or whitespace, with any
    /// leading `@` stripped.
    pub fn label_tokens(&self) -> impl Iterator<Item = &str> {
        self.labels
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .map(|token| token.trim_start_matches('@'))
            .filter(|token| !token.is_empty())
    }
}

/// Decodes a headerless export. Structural CSV damage (a row with the wrong
/// number of fields) is an error; cell contents are never validated here.
pub fn read_task_records<R: Read>(reader: R) -> Result<Vec<TaskRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::Fields)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in reader.deserialize::<TaskRecord>() {
        records.push(record?);
    }
    Ok(records)
}
