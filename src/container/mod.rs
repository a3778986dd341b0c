//! Application stack container descriptors
//!
//! A descriptor is everything the image pipeline needs to know to build
//! one container image variant: identity, version, packages, the files
//! that go into the build context and the trailing Dockerfile
//! instructions. Descriptors are assembled with the `with_*` methods and
//! are read-only afterwards.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::constants::tag;
use crate::os_version::OsVersion;


/// Level of support the image is published with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    L2,
    L3,
    Techpreview,
    Unsupported,
}

impl SupportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLevel::L2 => "l2",
            SupportLevel::L3 => "l3",
            SupportLevel::Techpreview => "techpreview",
            SupportLevel::Unsupported => "unsupported",
        }
    }
}

/// Recipe format the image pipeline builds from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Docker,
    Kiwi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationStackContainer {
    package_name: String,
    name: String,
    pretty_name: String,
    additional_names: Vec<String>,
    os_version: OsVersion,
    is_latest: bool,
    version: String,
    version_in_uid: bool,
    support_level: SupportLevel,
    build_recipe_type: BuildType,
    package_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entrypoint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cmd: Option<Vec<String>>,
    volumes: Vec<String>,
    exposes_tcp: Vec<u16>,
    #[serde(serialize_with = "serialize_file_sizes")]
    extra_files: BTreeMap<String, Vec<u8>>,
    custom_end: String,
}

/// Extra files are listed by name and size; the payload stays out of JSON output.
fn serialize_file_sizes<S>(
    files: &BTreeMap<String, Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(files.iter().map(|(name, data)| (name, data.len())))
}

impl ApplicationStackContainer {
    pub fn new(name: impl Into<String>, os_version: OsVersion, version: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package_name: format!("{}-image", name),
            name,
            pretty_name: String::new(),
            additional_names: Vec::new(),
            os_version,
            is_latest: false,
            version: version.into(),
            version_in_uid: true,
            support_level: SupportLevel::L3,
            build_recipe_type: BuildType::Docker,
            package_list: Vec::new(),
            entrypoint: None,
            cmd: None,
            volumes: Vec::new(),
            exposes_tcp: Vec::new(),
            extra_files: BTreeMap::new(),
            custom_end: String::new(),
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn with_pretty_name(mut self, pretty_name: impl Into<String>) -> Self {
        self.pretty_name = pretty_name.into();
        self
    }

    pub fn with_additional_names(mut self, names: Vec<String>) -> Self {
        self.additional_names = names;
        self
    }

    pub fn with_is_latest(mut self, is_latest: bool) -> Self {
        self.is_latest = is_latest;
        self
    }

    pub fn with_version_in_uid(mut self, version_in_uid: bool) -> Self {
        self.version_in_uid = version_in_uid;
        self
    }

    pub fn with_support_level(mut self, support_level: SupportLevel) -> Self {
        self.support_level = support_level;
        self
    }

    pub fn with_build_recipe_type(mut self, build_recipe_type: BuildType) -> Self {
        self.build_recipe_type = build_recipe_type;
        self
    }

    pub fn with_package_list<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_list = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_entrypoint(mut self, entrypoint: &[&str]) -> Self {
        self.entrypoint = Some(entrypoint.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_cmd(mut self, cmd: &[&str]) -> Self {
        self.cmd = Some(cmd.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_volumes(mut self, volumes: &[&str]) -> Self {
        self.volumes = volumes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_exposes_tcp(mut self, ports: &[u16]) -> Self {
        self.exposes_tcp = ports.to_vec();
        self
    }

    pub fn with_extra_file(
        mut self,
        name: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.extra_files.insert(name.into(), contents.into());
        self
    }

    pub fn with_custom_end(mut self, custom_end: impl Into<String>) -> Self {
        self.custom_end = custom_end.into();
        self
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    pub fn additional_names(&self) -> &[String] {
        &self.additional_names
    }

    pub fn os_version(&self) -> OsVersion {
        self.os_version
    }

    pub fn is_latest(&self) -> bool {
        self.is_latest
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn support_level(&self) -> SupportLevel {
        self.support_level
    }

    pub fn build_recipe_type(&self) -> BuildType {
        self.build_recipe_type
    }

    pub fn package_list(&self) -> &[String] {
        &self.package_list
    }

    pub fn entrypoint(&self) -> Option<&[String]> {
        self.entrypoint.as_deref()
    }

    pub fn cmd(&self) -> Option<&[String]> {
        self.cmd.as_deref()
    }

    pub fn volumes(&self) -> &[String] {
        &self.volumes
    }

    pub fn exposes_tcp(&self) -> &[u16] {
        &self.exposes_tcp
    }

    pub fn extra_files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.extra_files
    }

    pub fn custom_end(&self) -> &str {
        &self.custom_end
    }

    /// Unique id of the image within one OS release
    pub fn uid(&self) -> String {
        if self.version_in_uid {
            format!("{}-{}", self.name, self.version)
        } else {
            self.name.clone()
        }
    }

    pub fn registry_prefix(&self) -> &'static str {
        self.os_version.registry_prefix()
    }

    /// Reference the image is pushed to, with the release placeholder
    pub fn reference(&self) -> String {
        format!(
            "{}/{}:{}-{}",
            self.registry_prefix(),
            self.name,
            self.version,
            tag::RELEASE
        )
    }

    /// All tags of the image: the main name first, then every alias
    pub fn build_tags(&self) -> Vec<String> {
        let prefix = self.registry_prefix();
        let mut tags = Vec::new();
        for name in std::iter::once(&self.name).chain(self.additional_names.iter()) {
            tags.push(format!("{}/{}:{}-{}", prefix, name, self.version, tag::RELEASE));
            tags.push(format!("{}/{}:{}", prefix, name, self.version));
            if self.is_latest {
                tags.push(format!("{}/{}:{}", prefix, name, tag::LATEST));
            }
        }
        tags
    }

    pub fn base_image(&self) -> String {
        self.os_version.base_image()
    }

    pub fn description(&self) -> String {
        format!(
            "{} container based on the {} Base Container Image.",
            self.pretty_name,
            self.os_version.distribution_name()
        )
    }
}
