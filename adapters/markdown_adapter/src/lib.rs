use chrono::{DateTime, Utc};
use monitor_core::domain::Record;
use monitor_core::ports::{MarkdownWriter, Result};
use monitor_core::utils::{display_title, escape_table_cell, topic_label};
use std::fs;
use std::path::PathBuf;
use tracing::info;

const TITLE_MAX_CHARS: usize = 60;

/// Markdown writer adapter implementation
pub struct MarkdownSummaryRenderer {
    output_path: PathBuf,
    display_limit: usize,
}

impl MarkdownSummaryRenderer {
    pub fn new(output_path: impl Into<PathBuf>, display_limit: usize) -> Self {
        Self {
            output_path: output_path.into(),
            display_limit,
        }
    }

    /// Newest first; records sharing a date keep their merge order.
    /// Records without a recognizable date go last
    fn select_for_display<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let mut sorted: Vec<&Record> = records.iter().collect();
        sorted.sort_by(|a, b| b.date.day().cmp(&a.date.day()));
        sorted.truncate(self.display_limit);
        sorted
    }

    fn format_row(record: &Record) -> String {
        format!(
            "| {} | {} | [{}]({}) |\n",
            escape_table_cell(&record.date.to_string()),
            escape_table_cell(&topic_label(&record.topic)),
            escape_table_cell(&display_title(&record.text, TITLE_MAX_CHARS)),
            record.url
        )
    }

    /// Formats the whole summary document
    pub fn render(&self, records: &[Record], generated_at: DateTime<Utc>) -> String {
        let mut output = String::new();
        output.push_str("# 🚢 Naval OSINT Monitor (Russia & China)\n");
        output.push_str("**Automated Daily X (Twitter) Tracker**\n\n");
        output.push_str(&format!(
            "> Last Updated: {}\n\n",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        output.push_str(
            "This repository tracks open-source intelligence on Russian and Chinese naval activities.\n\n",
        );
        output.push_str("## 📡 Latest Intercepts\n");
        output.push_str("| Date | Topic | Tweet / Source |\n");
        output.push_str("|------|-------|----------------|\n");

        for record in self.select_for_display(records) {
            output.push_str(&Self::format_row(record));
        }

        output.push_str("\n---\n");
        output.push_str(
            "*Data is sourced via search engine indexing to respect platform limitations.*\n",
        );
        output
    }
}

impl MarkdownWriter for MarkdownSummaryRenderer {
    fn write(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self
            .output_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }

        let markdown_content = self.render(records, Utc::now());
        fs::write(&self.output_path, markdown_content)?;

        info!(
            path = %self.output_path.display(),
            shown = records.len().min(self.display_limit),
            "summary written"
        );
        Ok(())
    }
}
