//! Task list and theme persistence over a `KeyValueStore`.

use crate::model::task::Task;
use crate::model::theme::Theme;
use crate::storage::{KeyValueStore, StorageError};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task array.
pub const TASKS_KEY: &str = "devtasks";
/// Storage key holding the theme literal.
pub const THEME_KEY: &str = "devtasks-theme";

/// Failure while writing state to the backing store.
#[derive(Debug)]
pub enum PersistError {
    Encode(serde_json::Error),
    Storage(StorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Stored task payload could not be parsed.
#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed task payload: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

/// Serializes a task list to its stored JSON form.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, PersistError> {
    serde_json::to_string(tasks).map_err(PersistError::Encode)
}

/// Parses a stored JSON payload and normalizes each record.
///
/// Priority defaulting happens while decoding. Records whose title is blank
/// are dropped, and a repeated id keeps only its first record.
pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, DecodeError> {
    let decoded: Vec<Task> = serde_json::from_str(payload).map_err(DecodeError::Json)?;
    let mut seen = HashSet::with_capacity(decoded.len());
    let mut tasks = Vec::with_capacity(decoded.len());

    for mut task in decoded {
        let trimmed = task.title.trim();
        if trimmed.is_empty() {
            warn!(
                "event=tasks_load module=persistence status=skipped reason=blank_title id={}",
                task.id
            );
            continue;
        }
        if trimmed.len() != task.title.len() {
            task.title = trimmed.to_string();
        }
        if !seen.insert(task.id) {
            warn!(
                "event=tasks_load module=persistence status=skipped reason=duplicate_id id={}",
                task.id
            );
            continue;
        }
        tasks.push(task);
    }

    Ok(tasks)
}

/// Reads and writes application state through a key-value store.
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the task list, falling back to an empty list on any failure.
    pub fn load(&self) -> Vec<Task> {
        let payload = match self.store.get(TASKS_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("event=tasks_load module=persistence status=ok source=empty count=0");
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=persistence status=error error_code=read_failed error={}",
                    err
                );
                return Vec::new();
            }
        };

        match decode_tasks(&payload) {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=persistence status=ok source=store count={}",
                    tasks.len()
                );
                tasks
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=persistence status=error error_code=decode_failed bytes={} error={}",
                    payload.len(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the stored task list.
    pub fn save(&mut self, tasks: &[Task]) -> Result<(), PersistError> {
        let payload = encode_tasks(tasks)?;
        self.store.set(TASKS_KEY, &payload)?;
        debug!(
            "event=tasks_save module=persistence status=ok count={} bytes={}",
            tasks.len(),
            payload.len()
        );
        Ok(())
    }

    /// Reads the theme; anything other than `"light"` means dark.
    pub fn load_theme_preference(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(err) => {
                warn!(
                    "event=theme_load module=persistence status=error error_code=read_failed error={}",
                    err
                );
                Theme::default()
            }
        }
    }

    pub fn save_theme_preference(&mut self, theme: Theme) -> Result<(), PersistError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        debug!("event=theme_save module=persistence status=ok theme={theme}");
        Ok(())
    }

    /// Flips the stored theme and returns the new value.
    pub fn toggle_theme(&mut self) -> Result<Theme, PersistError> {
        let next = self.load_theme_preference().toggled();
        self.save_theme_preference(next)?;
        Ok(next)
    }
}
