use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Result, TickError};
use crate::model::Task;
use crate::store::migration::{DocumentShape, decode_document};

/// What `open` found in the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No backing file yet; the collection starts empty.
    Missing,
    Loaded,
    /// Legacy string array upgraded and written back.
    Migrated { count: usize },
    /// Content did not parse; the collection starts empty and the raw bytes
    /// were copied to `backup` when that succeeded.
    Corrupt { backup: Option<PathBuf> },
}

/// The task collection backed by one JSON file.
///
/// Storage order is insertion order. The whole collection is rewritten on
/// every save.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    pub(crate) tasks: Vec<Task>,
    status: LoadStatus,
}

impl TaskStore {
    /// Load the collection from `path`, migrating legacy data in place.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no task file at {}, starting empty", path.display());
                return Ok(Self {
                    path,
                    tasks: Vec::new(),
                    status: LoadStatus::Missing,
                });
            }
            Err(e) => return Err(TickError::persistence(path, e)),
        };

        if data.trim().is_empty() {
            return Ok(Self {
                path,
                tasks: Vec::new(),
                status: LoadStatus::Loaded,
            });
        }

        let decoded = serde_json::from_str(&data).ok().and_then(decode_document);
        let Some(decoded) = decoded else {
            warn!(
                "task file {} is not a valid task list; starting empty",
                path.display()
            );
            let backup = write_backup(&path, &data);
            return Ok(Self {
                path,
                tasks: Vec::new(),
                status: LoadStatus::Corrupt { backup },
            });
        };

        let mut store = Self {
            path,
            tasks: decoded.tasks,
            status: LoadStatus::Loaded,
        };

        if decoded.shape == DocumentShape::Legacy {
            let count = store.tasks.len();
            debug!("migrating {count} legacy tasks in {}", store.path.display());
            if let Err(e) = store.save() {
                warn!("migrated tasks could not be written back: {e}");
            }
            store.status = LoadStatus::Migrated { count };
        }

        debug!(
            "loaded {} tasks from {}",
            store.tasks.len(),
            store.path.display()
        );
        Ok(store)
    }

    /// Write the full collection, replacing the backing file in one rename.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.tasks)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| TickError::persistence(&self.path, e))?;
        }

        let staging = staging_path(&self.path);
        if let Err(e) = fs::write(&staging, json) {
            let _ = fs::remove_file(&staging);
            return Err(TickError::persistence(&self.path, e));
        }
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(TickError::persistence(&self.path, e));
        }

        debug!("saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.status
    }
}

fn sibling_path(path: &Path, prefix: &str, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "todos.json".to_string());
    path.with_file_name(format!("{prefix}{name}{suffix}"))
}

fn staging_path(path: &Path) -> PathBuf {
    sibling_path(path, ".", &format!(".{}.tmp", std::process::id()))
}

fn backup_path(path: &Path) -> PathBuf {
    sibling_path(path, "", ".backup")
}

fn write_backup(path: &Path, data: &str) -> Option<PathBuf> {
    let backup = backup_path(path);
    match fs::write(&backup, data) {
        Ok(()) => {
            warn!("previous contents saved to {}", backup.display());
            Some(backup)
        }
        Err(e) => {
            warn!("could not back up {}: {e}", path.display());
            None
        }
    }
}
