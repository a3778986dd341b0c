//! Target operating system releases
//!
//! Every application container is generated once per OS release. The
//! release decides the base image, the registry namespace and, for some
//! packages, the naming policy.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// A supported target operating system release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OsVersion {
    /// SUSE Linux Enterprise 15 SP6
    #[serde(rename = "6")]
    Sp6,
    /// SUSE Linux Enterprise 15 SP7
    #[serde(rename = "7")]
    Sp7,
    /// SUSE Linux 16.0
    #[serde(rename = "16.0")]
    Sl16_0,
    /// openSUSE Tumbleweed
    #[serde(rename = "Tumbleweed")]
    Tumbleweed,
    /// The Basalt project
    #[serde(rename = "Basalt")]
    Basalt,
}

/// Every OS release application containers are built for by default
pub const ALL_NONBASE_OS_VERSIONS: &[OsVersion] = &[
    OsVersion::Sp6,
    OsVersion::Sp7,
    OsVersion::Sl16_0,
    OsVersion::Tumbleweed,
];

/// OS releases whose images may carry the `latest` tag
pub const CAN_BE_LATEST_OS_VERSION: &[OsVersion] =
    &[OsVersion::Sp7, OsVersion::Sl16_0, OsVersion::Tumbleweed];

impl OsVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsVersion::Sp6 => "6",
            OsVersion::Sp7 => "7",
            OsVersion::Sl16_0 => "16.0",
            OsVersion::Tumbleweed => "Tumbleweed",
            OsVersion::Basalt => "Basalt",
        }
    }

    pub fn is_sle15(&self) -> bool {
        matches!(self, OsVersion::Sp6 | OsVersion::Sp7)
    }

    pub fn is_tumbleweed(&self) -> bool {
        matches!(self, OsVersion::Tumbleweed)
    }

    /// Whether images for this release may be tagged `latest`
    pub fn can_be_latest(&self) -> bool {
        CAN_BE_LATEST_OS_VERSION.contains(self)
    }

    /// Registry namespace application containers are published under
    pub fn registry_prefix(&self) -> &'static str {
        match self {
            OsVersion::Sp6 | OsVersion::Sp7 | OsVersion::Sl16_0 => "suse",
            OsVersion::Tumbleweed => "opensuse",
            OsVersion::Basalt => "basalt",
        }
    }

    /// Label namespace matching the registry the image ends up in
    pub fn label_prefix(&self) -> &'static str {
        match self {
            OsVersion::Tumbleweed => crate::constants::label::OPENSUSE_PREFIX,
            _ => crate::constants::label::SUSE_PREFIX,
        }
    }

    /// Version of the OS as it appears in container tags (`15.6`, `16.0`, ...)
    pub fn os_container_version(&self) -> &'static str {
        match self {
            OsVersion::Sp6 => "15.6",
            OsVersion::Sp7 => "15.7",
            OsVersion::Sl16_0 => "16.0",
            OsVersion::Tumbleweed | OsVersion::Basalt => "latest",
        }
    }

    /// Default image the application containers are layered on
    pub fn base_image(&self) -> String {
        match self {
            OsVersion::Sp6 | OsVersion::Sp7 => {
                format!("suse/sle15:{}", self.os_container_version())
            }
            OsVersion::Sl16_0 => format!("suse/sl16:{}", self.os_container_version()),
            OsVersion::Tumbleweed => "opensuse/tumbleweed:latest".to_string(),
            OsVersion::Basalt => "basalt/bci/bci-base:latest".to_string(),
        }
    }

    /// Human readable distribution name used in image descriptions
    pub fn distribution_name(&self) -> &'static str {
        match self {
            OsVersion::Sp6 => "SUSE Linux Enterprise Server 15 SP6",
            OsVersion::Sp7 => "SUSE Linux Enterprise Server 15 SP7",
            OsVersion::Sl16_0 => "SUSE Linux 16.0",
            OsVersion::Tumbleweed => "openSUSE Tumbleweed",
            OsVersion::Basalt => "Basalt Project",
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "6" | "sp6" | "15.6" => Ok(OsVersion::Sp6),
            "7" | "sp7" | "15.7" => Ok(OsVersion::Sp7),
            "16.0" | "sl16.0" => Ok(OsVersion::Sl16_0),
            "tumbleweed" => Ok(OsVersion::Tumbleweed),
            "basalt" => Ok(OsVersion::Basalt),
            _ => anyhow::bail!("Unsupported OS version: {}", s),
        }
    }
}
