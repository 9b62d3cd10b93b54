//! 📡 Bulk documents: turning catalog records into the bulk API's two-line dance 🚀
//!
//! Rule 1: Two lines per document. Action metadata, then the document. Always.
//! Rule 2: Newline-delimited. Not comma-separated. NEWLINES.
//! Rule 3: The trailing newline on the whole body matters. It is NOT added here.
//!         The sink owns the trailing newline, the same way it owns the HTTP call.
//!
//! ## Knowledge Graph 🧠
//! - Software records → index `software`, with `@timestamp` + `event.category`
//! - Threat records   → index `eol-versions`, with `@timestamp` only
//! - Timestamps are stamped at build time, never at catalog-definition time
//! - `render_console_snippet` produces the Kibana Dev Tools flavor for humans 🦆

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use crate::catalog::{SoftwareRecord, ThreatRecord};

/// 📦 Where software observations land.
pub const SOFTWARE_INDEX: &str = "software";
/// ⚠️ Where end-of-life indicators land.
pub const EOL_INDEX: &str = "eol-versions";
/// 🏷️ The one and only `event.category` this program knows.
pub const SOFTWARE_EVENT_CATEGORY: &str = "software_inventory";

/// ⏰ `YYYY-MM-DDTHH:MM:SSZ`. Second precision, UTC, no fractional seconds.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Serialize)]
struct EventFields {
    category: &'static str,
}

#[derive(Serialize)]
struct SoftwareDocument<'a> {
    #[serde(flatten)]
    record: &'a SoftwareRecord,
    #[serde(rename = "@timestamp")]
    timestamp: String,
    event: EventFields,
}

#[derive(Serialize)]
struct ThreatDocument<'a> {
    #[serde(flatten)]
    record: &'a ThreatRecord,
    #[serde(rename = "@timestamp")]
    timestamp: String,
}

/// 📦 `{"index":{"_index":"<index>"}}`: the cover letter for each document.
fn action_line(index: &str) -> Result<String> {
    serde_json::to_string(&json!({ "index": { "_index": index } })).context(
        "💀 Failed to serialize the bulk action line. The JSON that describes JSON has failed to become JSON.",
    )
}

/// 🖥️ Software record → `action\ndocument` for the `software` index.
pub fn build_software_document(record: &SoftwareRecord, now: DateTime<Utc>) -> Result<String> {
    let document = SoftwareDocument {
        record,
        timestamp: format_timestamp(now),
        event: EventFields {
            category: SOFTWARE_EVENT_CATEGORY,
        },
    };
    let document = serde_json::to_string(&document)
        .context("💀 Failed to serialize a software document. It was two strings. Two.")?;
    Ok(format!("{}\n{}", action_line(SOFTWARE_INDEX)?, document))
}

/// ⚠️ Threat record → `action\ndocument` for the `eol-versions` index.
pub fn build_threat_document(record: &ThreatRecord, now: DateTime<Utc>) -> Result<String> {
    let document = ThreatDocument {
        record,
        timestamp: format_timestamp(now),
    };
    let document = serde_json::to_string(&document)
        .context("💀 Failed to serialize a threat document.")?;
    Ok(format!("{}\n{}", action_line(EOL_INDEX)?, document))
}

/// 🖨️ A paste-ready Kibana Dev Tools request that loads the threat catalog by hand.
///
/// Timestamps start at `now` and step 10 seconds per entry, so the documents
/// sort in catalog order on a timeline.
pub fn render_console_snippet(threats: &[ThreatRecord], now: DateTime<Utc>) -> Result<String> {
    let mut snippet = String::from("POST _bulk\n");
    for (i, threat) in threats.iter().enumerate() {
        let stamped_at = now + Duration::seconds(i as i64 * 10);
        snippet.push_str(&build_threat_document(threat, stamped_at)?);
        snippet.push('\n');
    }
    Ok(snippet)
}
