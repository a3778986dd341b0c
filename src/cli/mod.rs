use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::os_version::OsVersion;

#[derive(Parser)]
#[command(name = "stackgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with package versions per OS version
    #[arg(long, global = true, env = "STACKGEN_VERSIONS")]
    pub versions: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the container descriptors
    List {
        /// OS versions to generate for (e.g., 6, 16.0, Tumbleweed)
        /// Can be specified multiple times or as a comma-separated list
        #[arg(long = "os", value_delimiter = ',')]
        os_versions: Vec<OsVersion>,

        /// Print the descriptors as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render build contexts for every container
    Render {
        /// Directory to write the build contexts to
        #[arg(short, long, value_name = "DIRECTORY")]
        out: Option<PathBuf>,

        /// OS versions to generate for (e.g., 6, 16.0, Tumbleweed)
        #[arg(long = "os", value_delimiter = ',')]
        os_versions: Vec<OsVersion>,

        /// Also pack each build context into a .tar.gz
        #[arg(long)]
        archive: bool,
    },

    /// Print the Dockerfile of a single container
    Dockerfile {
        /// Image name or alias (e.g., rmt-mariadb, mariadb-client)
        name: String,

        /// OS version of the image
        #[arg(long = "os")]
        os_version: OsVersion,

        /// Base image to use instead of the OS default
        #[arg(long)]
        base_image: Option<String>,
    },

    /// Show version information
    Version,
}
