//! Snippets shared by container definitions

use anyhow::Result;

use crate::constants::dockerfile::RUN;
use crate::versions::ParseVersion;


/// Dockerfile lines that fail the build when the installed `package` does
/// not have the version the image is tagged with.
pub fn generate_package_version_check(
    package: &str,
    version: &str,
    parse_version: ParseVersion,
) -> String {
    format!(
        "# sanity check that the version from the tag is equal to the version of {package} that we expect\n\
         {RUN} \\\n    \
         [ \"$(rpm -q --qf '%{{version}}' {package} | cut -d '.' -f -{fields})\" = \"{version}\" ]",
        fields = parse_version.components(),
    )
}

/// OBS `_constraints` document requesting at least `size_gb` GB of disk
pub fn generate_disk_size_constraints(size_gb: u32) -> Result<String> {
    if size_gb == 0 {
        anyhow::bail!("Disk size constraint must be positive, got {}", size_gb);
    }

    Ok(format!(
        r#"<constraints>
  <hardware>
    <disk>
      <size unit="G">{size_gb}</size>
    </disk>
  </hardware>
</constraints>
"#
    ))
}
