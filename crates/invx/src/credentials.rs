//! 🔒 Credentials: one CSV, two columns, first row wins.
//!
//! The file is what Elastic Cloud hands you when a deployment is created:
//! a header row with `username,password` and a single data row beneath it.
//! We read it once at startup and never look at it again. Like terms of service.

use std::fs::File;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use crate::error::InventoryError;

/// 🔒 Basic-auth material for the Elasticsearch cluster. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// 📦 Load the first credential row from a CSV file with `username` and `password` columns.
///
/// Extra columns are ignored. Header names are trimmed; values are taken
/// exactly as written, spaces and all. A missing file, a header-only file, or a header
/// without the two required columns all become [`InventoryError::Configuration`].
pub fn load_credentials(path: &Path) -> Result<Credential> {
    debug!("🔒 Reading credentials from '{}'", path.display());

    let file = File::open(path).map_err(|err| {
        InventoryError::configuration(format!(
            "could not open credentials file '{}': {}",
            path.display(),
            err
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    // -- 🧾 header check first, so "wrong file" and "empty file" get different messages
    let headers = reader.headers().map_err(|err| {
        InventoryError::configuration(format!(
            "could not read the header of '{}': {}",
            path.display(),
            err
        ))
    })?;
    for required in ["username", "password"] {
        if !headers.iter().any(|h| h == required) {
            return Err(InventoryError::configuration(format!(
                "credentials file '{}' has no '{}' column",
                path.display(),
                required
            ))
            .into());
        }
    }

    let first_row = reader.deserialize::<Credential>().next().ok_or_else(|| {
        InventoryError::configuration(format!(
            "credentials file '{}' has a header but no credential rows",
            path.display()
        ))
    })?;

    let credential = first_row.map_err(|err| {
        InventoryError::configuration(format!(
            "credentials file '{}' has a malformed first row: {}",
            path.display(),
            err
        ))
    })?;

    debug!("✅ Loaded credentials for user '{}'", credential.username);
    Ok(credential)
}
