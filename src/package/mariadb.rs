//! MariaDB server and client containers
//!
//! One server and one client image per OS release. On the SUSE Linux
//! Enterprise releases the images are published as `rmt-mariadb` (the
//! database for the Repository Mirroring Tool) and keep `mariadb` as an
//! alias; elsewhere they are plain `mariadb`.

use anyhow::Result;
use tracing::debug;

use crate::constants::dockerfile::RUN;
use crate::container::{ApplicationStackContainer, BuildType, SupportLevel};
use crate::helpers::{generate_disk_size_constraints, generate_package_version_check};
use crate::os_version::OsVersion;
use crate::versions::{to_major_minor_version, ParseVersion, VersionLookup};

#[cfg(test)]
mod tests;

pub const MARIADB_ENTRYPOINT: &[u8] = include_bytes!("mariadb/entrypoint.sh");
pub const MARIADB_HEALTHCHECK: &[u8] = include_bytes!("mariadb/healthcheck.sh");
pub const MARIADB_GOSU: &[u8] = br#"#!/bin/bash

u=$1
shift

if ! id -u $u > /dev/null 2>&1; then
    echo "Invalid user: $u"
    exit 1
fi

setpriv --reuid=$u --regid=$u --clear-groups -- /bin/bash "$@"
"#;

/// Package the server version is looked up by
pub const SERVER_PACKAGE: &str = "mariadb";
/// Package the version check runs against
pub const CLIENT_PACKAGE: &str = "mariadb-client";
/// Appended to every server alias to name the matching client alias
pub const CLIENT_SUFFIX: &str = "-client";
/// Disk the build workers need, in GB
const DISK_SIZE_GB: u32 = 11;

const SERVER_PACKAGES: &[&str] = &[
    "mariadb",
    "mariadb-tools",
    "gawk",
    "timezone",
    "util-linux",
    "findutils",
];

/// Image naming for an OS release. The prefix and the aliases always
/// come from the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// Plain `mariadb` without aliases
    Unprefixed,
    /// `rmt-mariadb`, aliased to `mariadb`
    Rmt,
}

impl NamingPolicy {
    pub fn for_os_version(os_version: OsVersion) -> Self {
        match os_version {
            OsVersion::Basalt | OsVersion::Tumbleweed => NamingPolicy::Unprefixed,
            _ => NamingPolicy::Rmt,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            NamingPolicy::Unprefixed => "",
            NamingPolicy::Rmt => "rmt-",
        }
    }

    pub fn additional_names(&self) -> Vec<String> {
        match self {
            NamingPolicy::Unprefixed => Vec::new(),
            NamingPolicy::Rmt => vec!["mariadb".to_string()],
        }
    }
}

/// Server and client images, in OS release order
#[derive(Debug, Clone, Default)]
pub struct MariadbContainers {
    pub server: Vec<ApplicationStackContainer>,
    pub client: Vec<ApplicationStackContainer>,
}

/// Build the server and client descriptors for every OS release in
/// `os_versions`. Repeated releases are built once.
pub fn build_containers(
    lookup: &dyn VersionLookup,
    os_versions: &[OsVersion],
) -> Result<MariadbContainers> {
    let mut containers = MariadbContainers::default();
    let mut seen = Vec::new();
    for os_version in os_versions {
        // A release listed twice still yields a single server and client
        if seen.contains(os_version) {
            debug!("Skipping repeated OS version {}", os_version);
            continue;
        }
        seen.push(*os_version);

        let (server, client) = build_for_os_version(lookup, *os_version)?;
        containers.server.push(server);
        containers.client.push(client);
    }
    Ok(containers)
}

/// Build the server and client descriptors for a single OS release.
pub fn build_for_os_version(
    lookup: &dyn VersionLookup,
    os_version: OsVersion,
) -> Result<(ApplicationStackContainer, ApplicationStackContainer)> {
    let version = to_major_minor_version(&lookup.get_pkg_version(SERVER_PACKAGE, os_version)?)?;
    let naming = NamingPolicy::for_os_version(os_version);
    let prefix = naming.prefix();
    let additional_names = naming.additional_names();
    debug!(
        "MariaDB {} for OS version {} (prefix {:?})",
        version, os_version, prefix
    );

    let version_check_lines =
        generate_package_version_check(CLIENT_PACKAGE, &version, ParseVersion::Minor);
    let is_latest = os_version.can_be_latest();

    let client_names = additional_names
        .iter()
        .map(|name| format!("{}{}", name, CLIENT_SUFFIX))
        .collect();

    let server_name = format!("{}mariadb", prefix);
    let server = ApplicationStackContainer::new(server_name, os_version, version.as_str())
        .with_package_name(format!("{}mariadb-image", prefix))
        .with_additional_names(additional_names)
        .with_is_latest(is_latest)
        .with_version_in_uid(false)
        .with_pretty_name("MariaDB Server")
        .with_package_list(SERVER_PACKAGES.iter().copied())
        .with_entrypoint(&["docker-entrypoint.sh"])
        .with_extra_file("docker-entrypoint.sh", MARIADB_ENTRYPOINT)
        .with_extra_file("healthcheck.sh", MARIADB_HEALTHCHECK)
        .with_extra_file("gosu", MARIADB_GOSU)
        .with_extra_file("_constraints", generate_disk_size_constraints(DISK_SIZE_GB)?)
        .with_support_level(SupportLevel::L3)
        .with_build_recipe_type(BuildType::Docker)
        .with_cmd(&["mariadbd"])
        .with_volumes(&["/var/lib/mysql"])
        .with_exposes_tcp(&[3306])
        .with_custom_end(server_custom_end(&version_check_lines));

    let client_name = format!("{}mariadb-client", prefix);
    let client = ApplicationStackContainer::new(client_name, os_version, version)
        .with_package_name(format!("{}mariadb-client-image", prefix))
        .with_is_latest(is_latest)
        .with_version_in_uid(false)
        .with_additional_names(client_names)
        .with_pretty_name("MariaDB Client")
        .with_support_level(SupportLevel::L3)
        .with_package_list([CLIENT_PACKAGE])
        .with_build_recipe_type(BuildType::Docker)
        .with_cmd(&["mariadb"])
        .with_custom_end(version_check_lines);

    Ok((server, client))
}

fn server_custom_end(version_check_lines: &str) -> String {
    format!(
        r#"{version_check_lines}

{RUN} mkdir /docker-entrypoint-initdb.d

# docker-entrypoint from https://github.com/MariaDB/mariadb-docker.git
COPY docker-entrypoint.sh /usr/local/bin/
{RUN} chmod 755 /usr/local/bin/docker-entrypoint.sh
{RUN} ln -s usr/local/bin/docker-entrypoint.sh / # backwards compat

# healthcheck from https://github.com/MariaDB/mariadb-docker.git
COPY healthcheck.sh /usr/local/bin/
{RUN} chmod 755 /usr/local/bin/healthcheck.sh

COPY gosu /usr/local/bin/gosu
{RUN} chmod 755 /usr/local/bin/gosu

{RUN} sed -i -e 's,$(pwgen .*),$(openssl rand -base64 36),' /usr/local/bin/docker-entrypoint.sh

# Ensure all logs goes to stdout
{RUN} sed -i 's/^log/#log/g' /etc/my.cnf

# Disable binding to localhost only, doesn't make sense in a container
{RUN} sed -i -e 's|^\(bind-address.*\)|#\1|g' /etc/my.cnf

{RUN} mkdir /run/mysql
"#
    )
}
