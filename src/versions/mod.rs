//! Package version lookup
//!
//! Versions come from a JSON table mapping package name to OS release to
//! the version shipped in that release's repositories.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::os_version::OsVersion;


/// Table shipped with the crate, used when no versions file is configured
const BUILTIN_VERSIONS: &str = include_str!("package_versions.json");

/// Something that knows which version of a package an OS release ships
pub trait VersionLookup {
    fn get_pkg_version(&self, package: &str, os_version: OsVersion) -> Result<String>;
}

/// How many components of a version to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseVersion {
    Major,
    Minor,
    Patch,
}

impl ParseVersion {
    pub fn components(&self) -> usize {
        match self {
            ParseVersion::Major => 1,
            ParseVersion::Minor => 2,
            ParseVersion::Patch => 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTable {
    packages: BTreeMap<String, BTreeMap<OsVersion, String>>,
}

impl VersionTable {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_VERSIONS).context("Failed to parse built-in package versions")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let table: VersionTable = serde_json::from_str(content)?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading package versions from {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read versions file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse versions file {}", path.display()))
    }

    pub fn insert(&mut self, package: &str, os_version: OsVersion, version: &str) {
        self.packages
            .entry(package.to_string())
            .or_default()
            .insert(os_version, version.to_string());
    }
}

impl VersionLookup for VersionTable {
    fn get_pkg_version(&self, package: &str, os_version: OsVersion) -> Result<String> {
        let per_os = self
            .packages
            .get(package)
            .with_context(|| format!("No versions known for package {}", package))?;
        let version = per_os.get(&os_version).with_context(|| {
            format!(
                "No version of package {} known for OS version {}",
                package, os_version
            )
        })?;
        Ok(version.clone())
    }
}

/// Truncate `version` to the number of components selected by `parse_version`
pub fn format_version(version: &str, parse_version: ParseVersion) -> Result<String> {
    let wanted = parse_version.components();
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() < wanted {
        anyhow::bail!(
            "Version {} has fewer than {} components",
            version,
            wanted
        );
    }

    let kept = &parts[..wanted];
    for part in kept {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid version component {:?} in {}", part, version);
        }
    }
    Ok(kept.join("."))
}

/// `10.11.6` becomes `10.11`
pub fn to_major_minor_version(version: &str) -> Result<String> {
    format_version(version, ParseVersion::Minor)
}
