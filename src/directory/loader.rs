//! CSV loading and sample generation for the user directory.
//!
//! The users file has a header row followed by `id,name,email` rows.
//! Extra columns are ignored. Rows with fewer than three fields and rows
//! repeating an already loaded ID are skipped with a warning.

use crate::core::UserRecord;
use crate::error::{DirectoryError, IoError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Header written to generated users files.
const HEADER: [&str; 3] = ["id", "name", "email"];

/// Parses user records from CSV data.
///
/// The first row is always treated as a header.
///
/// # Errors
///
/// Returns [`DirectoryError::Csv`] if the data is not valid CSV or UTF-8.
pub fn load_users_csv<R: Read>(reader: R) -> Result<Vec<UserRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut users = Vec::new();
    let mut seen = HashSet::new();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(DirectoryError::from)?;
        // Header is line 1.
        let line = row + 2;

        let (Some(id), Some(name), Some(email)) = (record.get(0), record.get(1), record.get(2))
        else {
            warn!(line, fields = record.len(), "skipping short users row");
            continue;
        };

        if !seen.insert(id.to_string()) {
            warn!(line, id, "skipping duplicate user ID");
            continue;
        }

        users.push(UserRecord::new(id, name, email));
    }

    Ok(users)
}

/// Reads user records from a CSV file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::ReadFailed`] if it cannot be opened, or a directory error if
/// it cannot be parsed.
pub fn read_users_csv<P: AsRef<Path>>(path: P) -> Result<Vec<UserRecord>> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let file = File::open(path).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    let users = load_users_csv(file)?;
    info!(path = %path_str, count = users.len(), "loaded users");
    Ok(users)
}

/// Returns the records written by [`write_sample_csv`].
#[must_use]
pub fn sample_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new("1", "João Silva", "joao@example.com"),
        UserRecord::new("2", "Maria Santos", "maria@example.com"),
        UserRecord::new("3", "Pedro Oliveira", "pedro@example.com"),
        UserRecord::new("4", "Ana Souza", "ana@example.com"),
        UserRecord::new("5", "Carlos Ferreira", "carlos@example.com"),
    ]
}

/// Writes a users CSV file with the sample records.
///
/// Returns the number of users written. Existing files are overwritten.
///
/// # Errors
///
/// Returns [`IoError::WriteFailed`] if the file cannot be written.
pub fn write_sample_csv<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let write_failed = |reason: String| IoError::WriteFailed {
        path: path.to_string_lossy().to_string(),
        reason,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
    }

    let users = sample_users();
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_failed(e.to_string()))?;

    writer
        .write_record(HEADER)
        .map_err(|e| write_failed(e.to_string()))?;
    for user in &users {
        writer
            .write_record([&user.id, &user.name, &user.email])
            .map_err(|e| write_failed(e.to_string()))?;
    }
    writer.flush().map_err(|e| write_failed(e.to_string()))?;

    info!(path = %path.display(), count = users.len(), "wrote sample users");
    Ok(users.len())
}
