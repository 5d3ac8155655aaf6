//! Text encodings for exchanging tasks with other tools.
//!
//! All converters work on the store's storage order. Tags are not carried by
//! any of the formats.

pub mod csv;
pub mod ics;
pub mod markdown;

use chrono::Utc;
use clap::ValueEnum;

use crate::error::Result;
use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    #[value(name = "md", alias = "markdown")]
    Markdown,
    Ics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportFormat {
    Csv,
    #[value(name = "md", alias = "markdown")]
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Markdown => "md",
            Self::Ics => "ics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub content: String,
    /// Tasks (or, for ICS, events) written.
    pub count: usize,
}

pub fn export(tasks: &[Task], format: ExportFormat) -> Exported {
    match format {
        ExportFormat::Csv => Exported {
            content: csv::render(tasks),
            count: tasks.len(),
        },
        ExportFormat::Markdown => Exported {
            content: markdown::render(tasks),
            count: tasks.len(),
        },
        ExportFormat::Ics => {
            let (content, count) = ics::render(tasks, Utc::now());
            Exported { content, count }
        }
    }
}

pub fn parse(format: ImportFormat, text: &str) -> Result<Vec<Task>> {
    match format {
        ImportFormat::Csv => csv::parse(text),
        ImportFormat::Markdown => Ok(markdown::parse(text)),
    }
}
