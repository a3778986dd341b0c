#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::os_version::ALL_NONBASE_OS_VERSIONS;
    use crate::versions::VersionTable;

    fn table() -> VersionTable {
        let mut table = VersionTable::default();
        table.insert("mariadb", OsVersion::Sp6, "10.6.15");
        table.insert("mariadb", OsVersion::Sp7, "10.11.9");
        table.insert("mariadb", OsVersion::Sl16_0, "11.4.5");
        table.insert("mariadb", OsVersion::Tumbleweed, "10.11.6");
        table.insert("mariadb", OsVersion::Basalt, "11.4.2");
        table
    }

    #[test]
    fn test_one_server_and_client_per_os_version() {
        let containers = build_containers(&table(), ALL_NONBASE_OS_VERSIONS).unwrap();
        assert_eq!(containers.server.len(), ALL_NONBASE_OS_VERSIONS.len());
        assert_eq!(containers.client.len(), ALL_NONBASE_OS_VERSIONS.len());

        for ((server, client), os) in containers
            .server
            .iter()
            .zip(&containers.client)
            .zip(ALL_NONBASE_OS_VERSIONS)
        {
            assert_eq!(server.os_version(), *os);
            assert_eq!(client.os_version(), *os);
            assert_eq!(server.version(), client.version());
            assert_eq!(server.version().split('.').count(), 2);
            assert_eq!(
                client.additional_names(),
                server
                    .additional_names()
                    .iter()
                    .map(|n| format!("{n}-client"))
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_repeated_os_version_built_once() {
        let containers =
            build_containers(&table(), &[OsVersion::Sp6, OsVersion::Tumbleweed, OsVersion::Sp6])
                .unwrap();
        let servers: Vec<OsVersion> = containers.server.iter().map(|c| c.os_version()).collect();
        let clients: Vec<OsVersion> = containers.client.iter().map(|c| c.os_version()).collect();
        assert_eq!(servers, [OsVersion::Sp6, OsVersion::Tumbleweed]);
        assert_eq!(clients, [OsVersion::Sp6, OsVersion::Tumbleweed]);
    }

    #[test]
    fn test_unprefixed_os_version() {
        let (server, client) = build_for_os_version(&table(), OsVersion::Tumbleweed).unwrap();
        assert_eq!(server.name(), "mariadb");
        assert_eq!(server.package_name(), "mariadb-image");
        assert!(server.additional_names().is_empty());
        assert_eq!(server.version(), "10.11");

        assert_eq!(client.name(), "mariadb-client");
        assert_eq!(client.package_name(), "mariadb-client-image");
        assert!(client.additional_names().is_empty());
    }

    #[test]
    fn test_basalt_is_unprefixed() {
        let (server, _) = build_for_os_version(&table(), OsVersion::Basalt).unwrap();
        assert_eq!(server.name(), "mariadb");
        assert!(server.additional_names().is_empty());
        assert!(!server.is_latest());
    }

    #[test]
    fn test_rmt_prefixed_os_version() {
        let (server, client) = build_for_os_version(&table(), OsVersion::Sp6).unwrap();
        assert_eq!(server.name(), "rmt-mariadb");
        assert_eq!(server.package_name(), "rmt-mariadb-image");
        assert_eq!(server.additional_names(), ["mariadb"]);
        assert_eq!(server.version(), "10.6");

        assert_eq!(client.name(), "rmt-mariadb-client");
        assert_eq!(client.package_name(), "rmt-mariadb-client-image");
        assert_eq!(client.additional_names(), ["mariadb-client"]);
        assert_eq!(client.version(), "10.6");
    }

    #[test]
    fn test_naming_policy_prefix_and_aliases_agree() {
        for os in ALL_NONBASE_OS_VERSIONS.iter().chain([&OsVersion::Basalt]) {
            let policy = NamingPolicy::for_os_version(*os);
            assert_eq!(policy.prefix().is_empty(), policy.additional_names().is_empty());
        }
        assert_eq!(NamingPolicy::for_os_version(OsVersion::Sp7), NamingPolicy::Rmt);
        assert_eq!(
            NamingPolicy::for_os_version(OsVersion::Tumbleweed),
            NamingPolicy::Unprefixed
        );
    }

    #[test]
    fn test_server_contents() {
        let (server, _) = build_for_os_version(&table(), OsVersion::Sp7).unwrap();
        assert!(server.is_latest());
        assert_eq!(
            server.package_list(),
            ["mariadb", "mariadb-tools", "gawk", "timezone", "util-linux", "findutils"]
        );
        assert_eq!(server.entrypoint().unwrap(), ["docker-entrypoint.sh"]);
        assert_eq!(server.cmd().unwrap(), ["mariadbd"]);
        assert_eq!(server.volumes(), ["/var/lib/mysql"]);
        assert_eq!(server.exposes_tcp(), [3306u16]);
        assert_eq!(server.uid(), "rmt-mariadb");

        let files: Vec<&str> = server.extra_files().keys().map(String::as_str).collect();
        assert_eq!(
            files,
            ["_constraints", "docker-entrypoint.sh", "gosu", "healthcheck.sh"]
        );
        assert_eq!(server.extra_files()["gosu"], MARIADB_GOSU);
        assert!(String::from_utf8_lossy(&server.extra_files()["_constraints"])
            .contains(r#"<size unit="G">11</size>"#));
    }

    #[test]
    fn test_server_custom_end() {
        let (server, _) = build_for_os_version(&table(), OsVersion::Sp6).unwrap();
        let custom_end = server.custom_end();
        assert!(custom_end.starts_with("# sanity check"));
        assert!(custom_end.contains("mariadb-client | cut -d '.' -f -2)\" = \"10.6\" ]"));
        assert!(custom_end.contains("RUN set -euo pipefail; mkdir /docker-entrypoint-initdb.d"));
        assert!(custom_end.contains("COPY gosu /usr/local/bin/gosu"));
        assert!(custom_end.contains("$(openssl rand -base64 36)"));
        assert!(custom_end.contains("sed -i 's/^log/#log/g' /etc/my.cnf"));
        assert!(custom_end.contains(r"sed -i -e 's|^\(bind-address.*\)|#\1|g' /etc/my.cnf"));
        assert!(custom_end.ends_with("RUN set -euo pipefail; mkdir /run/mysql\n"));
    }

    #[test]
    fn test_client_contents() {
        let (server, client) = build_for_os_version(&table(), OsVersion::Sl16_0).unwrap();
        assert_eq!(client.package_list(), ["mariadb-client"]);
        assert_eq!(client.cmd().unwrap(), ["mariadb"]);
        assert!(client.entrypoint().is_none());
        assert!(client.extra_files().is_empty());
        assert_eq!(client.pretty_name(), "MariaDB Client");
        assert!(server.custom_end().starts_with(client.custom_end()));
        assert_eq!(
            client.custom_end(),
            crate::helpers::generate_package_version_check("mariadb-client", "11.4", ParseVersion::Minor)
        );
    }

    #[test]
    fn test_missing_version_propagates() {
        let mut table = VersionTable::default();
        table.insert("mariadb", OsVersion::Sp6, "10.6.15");

        let result = build_containers(&table, &[OsVersion::Sp6, OsVersion::Sp7]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("mariadb"));
    }

    #[test]
    fn test_entrypoint_uses_pwgen_for_substitution() {
        let entrypoint = String::from_utf8_lossy(MARIADB_ENTRYPOINT);
        assert!(entrypoint.contains("$(pwgen "));
        assert!(entrypoint.starts_with("#!/bin/bash"));
        assert!(String::from_utf8_lossy(MARIADB_HEALTHCHECK).starts_with("#!/bin/bash"));
    }
}
