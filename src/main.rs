use anyhow::Result;
use clap::Parser;
use stackgen::{
    cli::{Cli, Commands},
    config::Config,
    os_version::OsVersion,
    package::all_containers,
    service::{RenderConfig, RenderService},
    versions::VersionTable,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { os_versions, json } => {
            let config = Config::load()?;
            let versions = load_versions(cli.versions.or(config.versions_file.clone()))?;
            let os_versions = pick_os_versions(os_versions, &config);

            let containers = all_containers(&versions, &os_versions)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&containers)?);
            } else {
                for container in &containers {
                    println!(
                        "{}\t{}\t{}\t{}",
                        container.os_version(),
                        container.name(),
                        container.version(),
                        container.additional_names().join(",")
                    );
                }
            }
        }
        Commands::Render {
            out,
            os_versions,
            archive,
        } => {
            let config = Config::load()?;
            let versions = load_versions(cli.versions.or(config.versions_file.clone()))?;

            let render_config = RenderConfig {
                out_dir: out.unwrap_or_else(|| config.out_dir.clone()),
                os_versions: pick_os_versions(os_versions, &config),
                base_images: config.base_images_by_os()?,
                archive: archive || config.archive,
            };

            let result = RenderService::render(&versions, &render_config)?;
            info!(
                "Rendered {} build context(s)",
                result.index.contexts.len()
            );

            // Print only the index path to stdout
            println!("{}", result.index_path.display());
        }
        Commands::Dockerfile {
            name,
            os_version,
            base_image,
        } => {
            let config = Config::load()?;
            let versions = load_versions(cli.versions.or(config.versions_file.clone()))?;
            let base_image = match base_image {
                Some(base_image) => Some(base_image),
                None => config.base_images_by_os()?.remove(&os_version),
            };

            let dockerfile =
                RenderService::dockerfile(&versions, &name, os_version, base_image.as_deref())?;
            print!("{}", dockerfile);
        }
        Commands::Version => {
            println!("stackgen {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load_versions(path: Option<PathBuf>) -> Result<VersionTable> {
    match path {
        Some(path) => VersionTable::load(path),
        None => VersionTable::builtin(),
    }
}

fn pick_os_versions(from_cli: Vec<OsVersion>, config: &Config) -> Vec<OsVersion> {
    if from_cli.is_empty() {
        config.os_versions()
    } else {
        from_cli
    }
}
