//! Container definitions
//!
//! Each submodule turns package versions into application stack
//! container descriptors for a family of images.

use anyhow::Result;

use crate::container::ApplicationStackContainer;
use crate::os_version::OsVersion;
use crate::versions::VersionLookup;

pub mod mariadb;

/// Every descriptor generated for `os_versions`: servers first, then clients.
pub fn all_containers(
    lookup: &dyn VersionLookup,
    os_versions: &[OsVersion],
) -> Result<Vec<ApplicationStackContainer>> {
    let mariadb = mariadb::build_containers(lookup, os_versions)?;
    Ok(mariadb.server.into_iter().chain(mariadb.client).collect())
}

/// Look up a descriptor by image name or alias for one OS release.
pub fn find_container<'a>(
    containers: &'a [ApplicationStackContainer],
    name: &str,
    os_version: OsVersion,
) -> Option<&'a ApplicationStackContainer> {
    containers.iter().find(|c| {
        c.os_version() == os_version
            && (c.name() == name || c.additional_names().iter().any(|n| n == name))
    })
}
