/// Dockerfile instruction constants
pub mod dockerfile {
    /// Prefix for every shell `RUN` instruction so that failures abort the build
    pub const RUN: &str = "RUN set -euo pipefail;";

    /// File name of the rendered Dockerfile inside a build context
    pub const FILE_NAME: &str = "Dockerfile";

    /// License header placed at the top of every rendered Dockerfile
    pub const LICENSE_HEADER: &str = "# SPDX-License-Identifier: MIT";
}

/// Label namespace constants
pub mod label {
    /// OCI image annotation namespace
    pub const OCI_PREFIX: &str = "org.opencontainers.image";

    /// Namespace for SUSE Linux Enterprise based images
    pub const SUSE_PREFIX: &str = "com.suse";

    /// Namespace for openSUSE based images
    pub const OPENSUSE_PREFIX: &str = "org.opensuse";

    /// Vendor written into image labels
    pub const VENDOR: &str = "SUSE LLC";
}

/// Build context file constants
pub mod context {
    /// Mode for executable helper scripts
    pub const SCRIPT_MODE: u32 = 0o755;

    /// Mode for all other context files
    pub const FILE_MODE: u32 = 0o644;

    /// Name of the index written next to the rendered contexts
    pub const INDEX_FILE: &str = "index.json";

    /// Suffix of packed build context archives
    pub const ARCHIVE_SUFFIX: &str = ".tar.gz";
}

/// Release placeholder substituted by the build service
pub mod tag {
    /// Placeholder for the build release counter
    pub const RELEASE: &str = "%RELEASE%";

    /// Tag used for images allowed to be marked latest
    pub const LATEST: &str = "latest";
}
