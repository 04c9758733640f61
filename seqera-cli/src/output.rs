//! Output module
//!
//! Every command builds a response object that serializes for `json`/`yaml`
//! output and renders itself for the console.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::*;
use serde::Serialize;

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured, column-aligned text
    #[default]
    Console,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// A command response that knows its console rendering
pub trait Render: Serialize {
    fn to_console(&self) -> String;
}

/// Render a response in the requested format
pub fn render<T: Render>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(value.to_console()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Failed to serialize output as YAML")
        }
    }
}

/// Render a response and print it to stdout
pub fn print<T: Render>(value: &T, format: OutputFormat) -> Result<()> {
    let rendered = render(value, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Outcome of a command that changes something without returning an entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn with_id(message: impl Into<String>, id: impl ToString) -> Self {
        Self {
            message: message.into(),
            id: Some(id.to_string()),
        }
    }
}

impl Render for Message {
    fn to_console(&self) -> String {
        format!("{}", format!("✓ {}", self.message).green().bold())
    }
}

/// Format an optional timestamp, `-` when unset
pub fn fmt_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format an optional value, `-` when unset
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

/// Heading line followed by aligned `label: value` pairs
pub fn details(title: &str, fields: &[(&str, String)]) -> String {
    let width = fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let mut out = format!("{}\n", title.bold());
    for (label, value) in fields {
        out.push_str(&format!(
            "  {:<width$} {}\n",
            format!("{}:", label),
            value,
            width = width
        ));
    }
    out
}

/// Column-aligned table
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format!("  {}\n", line(&self.headers).bold()));
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&format!("  {}\n", "─".repeat(rule).dimmed()));
        for row in &self.rows {
            out.push_str(&format!("  {}\n", line(row)));
        }
        out
    }
}

/// A titled table, or a notice when there are no rows
pub fn listing(title: &str, empty: &str, table: &Table) -> String {
    if table.is_empty() {
        return format!("{}", empty.yellow());
    }
    format!("{}\n\n{}", title.bold(), table.render())
}

#[cfg(test)]
pub(crate) fn plain() {
    colored::control::set_override(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_columns() {
        plain();
        let mut table = Table::new(&["ID", "NAME"]);
        table
            .row(vec!["1".to_string(), "hello".to_string()])
            .row(vec!["1234".to_string(), "x".to_string()]);

        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "  ID    NAME");
        assert_eq!(lines[1], "  ───────────");
        assert_eq!(lines[2], "  1     hello");
        assert_eq!(lines[3], "  1234  x");
    }

    #[test]
    fn test_listing_empty_notice() {
        plain();
        let table = Table::new(&["ID"]);
        assert_eq!(listing("Pipelines", "No pipelines found.", &table), "No pipelines found.");
    }

    #[test]
    fn test_message_formats() {
        plain();
        let message = Message::with_id("Pipeline 'hello' added", 42);
        assert_eq!(message.to_console(), "✓ Pipeline 'hello' added");
        assert_eq!(
            render(&message, OutputFormat::Json).unwrap(),
            "{\n  \"message\": \"Pipeline 'hello' added\",\n  \"id\": \"42\"\n}"
        );
        assert_eq!(
            render(&Message::with_id("Secret added", 7), OutputFormat::Yaml).unwrap(),
            "message: Secret added\nid: '7'\n"
        );
    }

    #[test]
    fn test_details_aligns_labels() {
        plain();
        let out = details("Pipeline", &[("ID", "1".to_string()), ("Name", "x".to_string())]);
        assert_eq!(out, "Pipeline\n  ID:   1\n  Name: x\n");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None::<String>), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some(3)), "3");
    }
}
