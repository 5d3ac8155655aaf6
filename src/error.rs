use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("task description cannot be empty")]
    EmptyDescription,

    #[error("invalid priority '{0}' (use High, Medium, or Low)")]
    InvalidPriority(String),

    #[error("invalid task index {index} (list has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("cannot access {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("import failed: {0}")]
    MalformedImportSource(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TickError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "empty_description",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::Persistence { .. } => "persistence_error",
            Self::MalformedImportSource(_) => "malformed_import_source",
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
            Self::Yaml(_) => "yaml_error",
        }
    }

    /// Wrap an I/O failure on the backing file.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TickError>;
