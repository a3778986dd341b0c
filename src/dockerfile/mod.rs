use anyhow::Result;
use std::fmt::Write;
use tracing::debug;

use crate::constants::{dockerfile, label};
use crate::container::{ApplicationStackContainer, BuildType};


/// Renders an application stack container into Dockerfile text
pub struct DockerfileRenderer<'a> {
    container: &'a ApplicationStackContainer,
    base_image: String,
}

impl<'a> DockerfileRenderer<'a> {
    pub fn new(container: &'a ApplicationStackContainer) -> Self {
        Self {
            container,
            base_image: container.base_image(),
        }
    }

    pub fn with_base_image(mut self, base_image: impl Into<String>) -> Self {
        self.base_image = base_image.into();
        self
    }

    pub fn render(&self) -> Result<String> {
        let c = self.container;
        if c.build_recipe_type() != BuildType::Docker {
            anyhow::bail!(
                "Cannot render a Dockerfile for {} with build recipe type {:?}",
                c.name(),
                c.build_recipe_type()
            );
        }
        debug!("Rendering Dockerfile for {} ({})", c.name(), c.os_version());

        let mut out = String::new();
        writeln!(out, "{}", dockerfile::LICENSE_HEADER)?;
        writeln!(out)?;
        for tag in c.build_tags() {
            writeln!(out, "#!BuildTag: {}", tag)?;
        }
        writeln!(out, "#!BuildName: {}", c.package_name())?;
        writeln!(out, "#!BuildVersion: {}", c.version())?;
        writeln!(out)?;
        writeln!(out, "FROM {}", self.base_image)?;
        writeln!(out)?;

        if !c.package_list().is_empty() {
            writeln!(
                out,
                "{} zypper -n in --no-recommends {}; zypper -n clean; rm -rf /var/log/{{lastlog,tallylog,zypper.log,zypp/history,YaST2}}",
                dockerfile::RUN,
                c.package_list().join(" ")
            )?;
            writeln!(out)?;
        }

        let oci = label::OCI_PREFIX;
        let os_prefix = c.os_version().label_prefix();
        writeln!(
            out,
            "# Define labels according to https://en.opensuse.org/Building_derived_containers"
        )?;
        writeln!(out, "# labelprefix={}.application.{}", os_prefix, c.name())?;
        writeln!(out, "LABEL {}.title={}", oci, quote(c.pretty_name()))?;
        writeln!(out, "LABEL {}.description={}", oci, quote(&c.description()))?;
        writeln!(out, "LABEL {}.version={}", oci, quote(c.version()))?;
        writeln!(out, "LABEL {}.created=\"%BUILDTIME%\"", oci)?;
        writeln!(out, "LABEL {}.vendor={}", oci, quote(label::VENDOR))?;
        writeln!(out, "LABEL {}.reference={}", os_prefix, quote(&c.reference()))?;
        writeln!(out, "LABEL {}.release=\"%RELEASE%\"", os_prefix)?;
        writeln!(
            out,
            "LABEL {}.supportlevel={}",
            os_prefix,
            quote(c.support_level().as_str())
        )?;
        writeln!(out, "LABEL {}.image-type=\"application\"", os_prefix)?;

        if let Some(entrypoint) = c.entrypoint() {
            writeln!(out, "ENTRYPOINT {}", serde_json::to_string(entrypoint)?)?;
        }
        if let Some(cmd) = c.cmd() {
            writeln!(out, "CMD {}", serde_json::to_string(cmd)?)?;
        }
        if !c.exposes_tcp().is_empty() {
            let ports: Vec<String> = c.exposes_tcp().iter().map(|p| p.to_string()).collect();
            writeln!(out, "EXPOSE {}", ports.join(" "))?;
        }
        if !c.volumes().is_empty() {
            writeln!(out, "VOLUME {}", c.volumes().join(" "))?;
        }

        let custom_end = c.custom_end();
        if !custom_end.is_empty() {
            writeln!(out)?;
            out.push_str(custom_end);
            if !custom_end.ends_with('\n') {
                out.push('\n');
            }
        }

        Ok(out)
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
