use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TodozError};
use crate::store::{StorageBackend, TodoStore};
use chrono::{DateTime, Datelike, TimeZone, Timelike};
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// `todoz-backup-2024-M3-D7_H9-M5-S2.json`: year, then unpadded month, day,
/// hour, minute and second of `now`.
pub fn backup_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!(
        "todoz-backup-{}-M{}-D{}_H{}-M{}-S{}.json",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Writes the persisted value byte for byte into `dir`.
pub fn run<B: StorageBackend, Tz: TimeZone>(
    store: &TodoStore<B>,
    dir: &Path,
    now: &DateTime<Tz>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(raw) = store.raw() else {
        result.add_message(CmdMessage::info("Nothing has been saved yet, nothing to export"));
        return Ok(result);
    };

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(TodozError::Io)?;
    }
    let path = dir.join(backup_filename(now));
    fs::write(&path, raw).map_err(|e| {
        error!(path = %path.display(), error = %e, "export failed");
        TodozError::Io(e)
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "exported backup");

    result.add_message(CmdMessage::success(format!(
        "Exported {} todos to {}",
        store.get().len(),
        path.display()
    )));
    result.written_paths.push(path);
    Ok(result)
}
