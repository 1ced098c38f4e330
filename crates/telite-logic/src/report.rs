//! Display-ready projections returned by the info queries.
//!
//! A report is a heading plus rows. Item rows carry a key a menu-driven
//! front end can hand back to an action (a system or commodity name); text
//! rows are just printed.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Text(String),
    Item { key: String, label: String },
}

impl Row {
    /// What a line-oriented front end prints for this row.
    pub fn label(&self) -> &str {
        match self {
            Row::Text(text) => text,
            Row::Item { label, .. } => label,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Row::Text(_) => None,
            Row::Item { key, .. } => Some(key.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub heading: String,
    pub rows: Vec<Row>,
}

impl Report {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            rows: Vec::new(),
        }
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.rows.push(Row::Text(text.into()));
        self
    }

    pub fn item(&mut self, key: impl Into<String>, label: impl Into<String>) -> &mut Self {
        self.rows.push(Row::Item {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    /// Keys of all selectable rows, in order.
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().filter_map(Row::key).collect()
    }

    pub fn has_items(&self) -> bool {
        self.rows.iter().any(|r| r.key().is_some())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for row in &self.rows {
            writeln!(f, "{}", row.label())?;
        }
        Ok(())
    }
}

/// Result of an info query.
pub type ReportResult = Result<Report, crate::error::GameError>;
