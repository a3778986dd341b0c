//! Build contexts handed to the image pipeline
//!
//! A context is the rendered Dockerfile plus every extra file of the
//! descriptor. It can be written out as a directory or packed into a
//! gzip-compressed tarball.

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use sha256::digest;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tar::Builder;
use tracing::debug;

use crate::constants::{context, dockerfile};
use crate::container::ApplicationStackContainer;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFile {
    pub data: Vec<u8>,
    pub mode: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    files: BTreeMap<String, ContextFile>,
}

/// A packed build context
pub struct PackedContext {
    /// gzip-compressed tar
    pub archive: Vec<u8>,
    /// sha256 of the uncompressed tar
    pub diff_id: String,
    /// sha256 of `archive`
    pub digest: String,
}

impl BuildContext {
    pub fn new(container: &ApplicationStackContainer, dockerfile_text: String) -> Self {
        let mut files = BTreeMap::new();
        files.insert(
            dockerfile::FILE_NAME.to_string(),
            ContextFile {
                data: dockerfile_text.into_bytes(),
                mode: context::FILE_MODE,
            },
        );
        for (name, data) in container.extra_files() {
            files.insert(
                name.clone(),
                ContextFile {
                    data: data.clone(),
                    mode: file_mode(data),
                },
            );
        }
        Self { files }
    }

    pub fn files(&self) -> &BTreeMap<String, ContextFile> {
        &self.files
    }

    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create context directory {}", dir.display()))?;

        for (name, file) in &self.files {
            let path = dir.join(name);
            debug!("Writing {:?}", path);
            std::fs::write(&path, &file.data)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&path, std::fs::Permissions::from_mode(file.mode))
                    .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn pack(&self) -> Result<PackedContext> {
        let mut tar_data = Vec::new();
        {
            let mut tar = Builder::new(&mut tar_data);
            for (name, file) in &self.files {
                let mut header = tar::Header::new_gnu();
                header.set_path(name)?;
                header.set_size(file.data.len() as u64);
                header.set_mode(file.mode);
                // Fixed mtime keeps the archive digest reproducible
                header.set_mtime(0);
                header.set_cksum();
                tar.append(&header, file.data.as_slice())?;
            }
            tar.finish()?;
        }

        let diff_id = format!("sha256:{}", digest(&tar_data));

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_data)?;
        let archive = encoder.finish()?;
        let archive_digest = format!("sha256:{}", digest(&archive));

        Ok(PackedContext {
            archive,
            diff_id,
            digest: archive_digest,
        })
    }
}

/// Files with a shebang are installed executable
fn file_mode(data: &[u8]) -> u32 {
    if data.starts_with(b"#!") {
        context::SCRIPT_MODE
    } else {
        context::FILE_MODE
    }
}
