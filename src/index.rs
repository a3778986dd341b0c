use serde::{Deserialize, Serialize};

use crate::os_version::OsVersion;

/// Index of every build context written by a render run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderIndex {
    #[serde(rename = "schemaVersion")]
    pub schema_version: i32,
    pub generated: String,
    pub contexts: Vec<ContextEntry>,
}

/// One rendered build context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub name: String,
    pub package_name: String,
    pub os_version: OsVersion,
    pub version: String,
    pub tags: Vec<String>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl RenderIndex {
    pub fn new(contexts: Vec<ContextEntry>) -> Self {
        Self {
            schema_version: 1,
            generated: chrono::Utc::now().to_rfc3339(),
            contexts,
        }
    }
}
