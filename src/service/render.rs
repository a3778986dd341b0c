//! Render service for emitting build contexts
//!
//! Generates the container descriptors, renders a Dockerfile for each
//! one and writes the resulting build contexts plus an index.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::{
    constants::context::{ARCHIVE_SUFFIX, INDEX_FILE},
    container::ApplicationStackContainer,
    context::BuildContext,
    dockerfile::DockerfileRenderer,
    index::{ContextEntry, RenderIndex},
    os_version::OsVersion,
    package::{all_containers, find_container},
    versions::VersionLookup,
};

/// Configuration for a render operation
pub struct RenderConfig {
    pub out_dir: PathBuf,
    pub os_versions: Vec<OsVersion>,
    pub base_images: HashMap<OsVersion, String>,
    pub archive: bool,
}

/// Result of a render operation
pub struct RenderResult {
    pub index: RenderIndex,
    pub index_path: PathBuf,
}

/// Service for turning descriptors into build contexts
pub struct RenderService;

impl RenderService {
    /// Render every descriptor for the configured OS releases into `out_dir`
    pub fn render(lookup: &dyn VersionLookup, config: &RenderConfig) -> Result<RenderResult> {
        let containers = all_containers(lookup, &config.os_versions)?;
        info!("Rendering {} container(s)", containers.len());

        std::fs::create_dir_all(&config.out_dir).with_context(|| {
            format!("Failed to create output directory {}", config.out_dir.display())
        })?;

        let mut entries = Vec::new();
        for container in &containers {
            entries.push(Self::render_container(container, config)?);
        }

        let index = RenderIndex::new(entries);
        let index_path = config.out_dir.join(INDEX_FILE);
        let index_data = serde_json::to_vec_pretty(&index)?;
        std::fs::write(&index_path, index_data)
            .with_context(|| format!("Failed to write {}", index_path.display()))?;

        info!("Wrote index to {:?}", index_path);
        Ok(RenderResult { index, index_path })
    }

    /// Render the Dockerfile of a single image, looked up by name or alias
    pub fn dockerfile(
        lookup: &dyn VersionLookup,
        name: &str,
        os_version: OsVersion,
        base_image: Option<&str>,
    ) -> Result<String> {
        let containers = all_containers(lookup, &[os_version])?;
        let container = find_container(&containers, name, os_version)
            .with_context(|| format!("No container named {} for OS version {}", name, os_version))?;

        let mut renderer = DockerfileRenderer::new(container);
        if let Some(base_image) = base_image {
            renderer = renderer.with_base_image(base_image);
        }
        renderer.render()
    }

    fn render_container(
        container: &ApplicationStackContainer,
        config: &RenderConfig,
    ) -> Result<ContextEntry> {
        let os_version = container.os_version();
        info!("Rendering {} for OS version {}", container.name(), os_version);

        let mut renderer = DockerfileRenderer::new(container);
        if let Some(base_image) = config.base_images.get(&os_version) {
            debug!("Using base image override {}", base_image);
            renderer = renderer.with_base_image(base_image.as_str());
        }
        let build_context = BuildContext::new(container, renderer.render()?);

        let os_dir = config.out_dir.join(os_version.as_str());
        let context_dir = os_dir.join(container.uid());
        build_context.write_to(&context_dir)?;

        let (archive, digest) = if config.archive {
            let packed = build_context.pack()?;
            let archive_path = os_dir.join(format!("{}{}", container.uid(), ARCHIVE_SUFFIX));
            std::fs::write(&archive_path, &packed.archive)
                .with_context(|| format!("Failed to write {}", archive_path.display()))?;
            info!("Packed {:?} ({})", archive_path, packed.digest);
            (
                Some(archive_path.display().to_string()),
                Some(packed.digest),
            )
        } else {
            (None, None)
        };

        Ok(ContextEntry {
            name: container.name().to_string(),
            package_name: container.package_name().to_string(),
            os_version,
            version: container.version().to_string(),
            tags: container.build_tags(),
            path: context_dir.display().to_string(),
            archive,
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::versions::VersionTable;
    use tempfile::tempdir;

    fn table() -> VersionTable {
        let mut table = VersionTable::default();
        table.insert("mariadb", OsVersion::Sp6, "10.6.15");
        table.insert("mariadb", OsVersion::Tumbleweed, "10.11.6");
        table
    }

    #[test]
    fn test_render_writes_contexts_and_index() {
        let dir = tempdir().unwrap();
        let config = RenderConfig {
            out_dir: dir.path().to_path_buf(),
            os_versions: vec![OsVersion::Sp6, OsVersion::Tumbleweed],
            base_images: HashMap::new(),
            archive: false,
        };

        let result = RenderService::render(&table(), &config).unwrap();
        assert_eq!(result.index.contexts.len(), 4);
        assert!(result.index_path.exists());

        assert!(dir.path().join("6/rmt-mariadb/Dockerfile").exists());
        assert!(dir.path().join("6/rmt-mariadb/gosu").exists());
        assert!(dir.path().join("6/rmt-mariadb-client/Dockerfile").exists());
        assert!(dir.path().join("Tumbleweed/mariadb/healthcheck.sh").exists());
        assert!(dir.path().join("Tumbleweed/mariadb-client/Dockerfile").exists());

        let index: RenderIndex =
            serde_json::from_slice(&std::fs::read(&result.index_path).unwrap()).unwrap();
        assert_eq!(index.contexts[0].name, "rmt-mariadb");
        assert_eq!(index.contexts[1].version, "10.11");
        assert!(index.contexts[0].digest.is_none());
    }

    #[test]
    fn test_render_with_archive_and_base_image() {
        let dir = tempdir().unwrap();
        let mut base_images = HashMap::new();
        base_images.insert(OsVersion::Sp6, "registry.example.com/sle15:15.6".to_string());
        let config = RenderConfig {
            out_dir: dir.path().to_path_buf(),
            os_versions: vec![OsVersion::Sp6],
            base_images,
            archive: true,
        };

        let result = RenderService::render(&table(), &config).unwrap();
        let server = &result.index.contexts[0];
        assert!(server.digest.as_deref().unwrap().starts_with("sha256:"));
        assert!(dir.path().join("6/rmt-mariadb.tar.gz").exists());

        let dockerfile =
            std::fs::read_to_string(dir.path().join("6/rmt-mariadb/Dockerfile")).unwrap();
        assert!(dockerfile.contains("FROM registry.example.com/sle15:15.6\n"));
    }

    #[test]
    fn test_render_repeated_os_version_once() {
        let dir = tempdir().unwrap();
        let config = RenderConfig {
            out_dir: dir.path().to_path_buf(),
            os_versions: vec![OsVersion::Sp6, OsVersion::Sp6],
            base_images: HashMap::new(),
            archive: false,
        };

        let result = RenderService::render(&table(), &config).unwrap();
        let paths: Vec<&str> = result.index.contexts.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths.len(), 2);
        assert_ne!(paths[0], paths[1]);
        assert_eq!(result.index.contexts[0].name, "rmt-mariadb");
        assert_eq!(result.index.contexts[1].name, "rmt-mariadb-client");
    }

    #[test]
    fn test_render_missing_version_fails() {
        let dir = tempdir().unwrap();
        let config = RenderConfig {
            out_dir: dir.path().to_path_buf(),
            os_versions: vec![OsVersion::Sp7],
            base_images: HashMap::new(),
            archive: false,
        };
        assert!(RenderService::render(&table(), &config).is_err());
    }

    #[test]
    fn test_dockerfile_by_alias() {
        let dockerfile =
            RenderService::dockerfile(&table(), "mariadb-client", OsVersion::Sp6, None).unwrap();
        assert!(dockerfile.contains("#!BuildName: rmt-mariadb-client-image"));

        let err = RenderService::dockerfile(&table(), "postgres", OsVersion::Sp6, None)
            .unwrap_err();
        assert!(err.to_string().contains("No container named postgres"));
    }
}
