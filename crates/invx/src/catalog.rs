//! 📦 The catalogs: the tiny, hardcoded universe of software this program
//! pretends to have found on a machine.
//!
//! Two lists. One gets reported forever in a circle. The other gets reported
//! exactly once, at startup, to flag the versions that have reached end of life.
//! Both can be swapped out via the `[catalog]` config table, but the defaults
//! are what you get if you don't ask. 🦆

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// 🖥️ One installed-software observation: a name and a version. That's it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareRecord {
    pub software: String,
    pub version: String,
}

/// ⚠️ One end-of-life indicator.
///
/// Serialized under the flat, dotted ECS-style keys Elasticsearch expects for
/// threat indicators. In TOML you may also spell them plain `software` / `version`,
/// because nobody enjoys quoting dotted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatRecord {
    #[serde(rename = "threat.indicator.software", alias = "software")]
    pub indicator_software: String,
    #[serde(rename = "threat.indicator.version", alias = "version")]
    pub indicator_version: String,
}

impl SoftwareRecord {
    pub fn new(software: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            software: software.into(),
            version: version.into(),
        }
    }
}

impl ThreatRecord {
    pub fn new(software: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            indicator_software: software.into(),
            indicator_version: version.into(),
        }
    }
}

/// 📚 Both catalogs, owned together because the scheduler walks them together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default = "builtin_software")]
    pub software: Vec<SoftwareRecord>,
    #[serde(default = "builtin_threats")]
    pub threats: Vec<ThreatRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            software: builtin_software(),
            threats: builtin_threats(),
        }
    }
}

impl Catalog {
    /// 🔍 The steady-state loop picks `i % software.len()`, so an empty software
    /// list is a division by zero waiting to happen. Threats may be empty; bootstrap
    /// just has nothing to say.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.software.is_empty() {
            return Err(InventoryError::configuration(
                "the software catalog is empty, nothing to report in the steady-state loop",
            ));
        }
        Ok(())
    }

    /// 🔄 Round-robin selection. `index` grows forever, the catalog doesn't.
    /// `None` only when the software list is empty.
    pub fn software_at(&self, index: u64) -> Option<&SoftwareRecord> {
        let slot = index.checked_rem(self.software.len() as u64)?;
        self.software.get(slot as usize)
    }
}

fn builtin_software() -> Vec<SoftwareRecord> {
    vec![
        SoftwareRecord::new("python", "3.10"),
        SoftwareRecord::new("python", "2.7"),
        SoftwareRecord::new("python", "3.8"),
        SoftwareRecord::new("node.js", "18.17"),
        SoftwareRecord::new("node.js", "16.15"),
        SoftwareRecord::new("node.js", "20.5"),
    ]
}

fn builtin_threats() -> Vec<ThreatRecord> {
    vec![
        ThreatRecord::new("python", "3.10"),
        ThreatRecord::new("node.js", "18.17"),
    ]
}
