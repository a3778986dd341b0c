use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::os_version::{OsVersion, ALL_NONBASE_OS_VERSIONS};


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Package version table; the built-in table is used when unset
    pub versions_file: Option<PathBuf>,

    /// Directory build contexts are rendered into
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// OS releases to generate for; empty means all of them
    #[serde(default)]
    pub os_versions: Vec<OsVersion>,

    /// Base image overrides keyed by OS version (e.g. "6", "Tumbleweed")
    #[serde(default)]
    pub base_images: HashMap<String, String>,

    /// Also pack every context into a tarball
    #[serde(default)]
    pub archive: bool,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            versions_file: None,
            out_dir: default_out_dir(),
            os_versions: Vec::new(),
            base_images: HashMap::new(),
            archive: false,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("stackgen").join("config.toml");
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Config::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Configured OS releases, or every default release when none are set
    pub fn os_versions(&self) -> Vec<OsVersion> {
        if self.os_versions.is_empty() {
            ALL_NONBASE_OS_VERSIONS.to_vec()
        } else {
            self.os_versions.clone()
        }
    }

    /// Base image overrides with their keys parsed as OS versions
    pub fn base_images_by_os(&self) -> anyhow::Result<HashMap<OsVersion, String>> {
        let mut by_os = HashMap::new();
        for (key, image) in &self.base_images {
            let os_version = key
                .parse::<OsVersion>()
                .with_context(|| format!("Invalid base_images key {:?}", key))?;
            if by_os.insert(os_version, image.clone()).is_some() {
                anyhow::bail!(
                    "base_images has more than one entry for OS version {}",
                    os_version
                );
            }
        }
        Ok(by_os)
    }
}
