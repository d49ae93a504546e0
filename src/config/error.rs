//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing, or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist or is not a regular file.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Leading whitespace on a line is not made up purely of spaces.
    #[error("Invalid indentation on line {line}")]
    InvalidIndentation {
        /// 1-based source line number.
        line: usize,
    },

    /// A line is indented deeper than the block it belongs to.
    #[error("Unexpected indentation on line {line}")]
    UnexpectedIndentation {
        /// 1-based source line number.
        line: usize,
    },

    /// A sequence item appeared where a mapping entry was expected.
    #[error("Unexpected list item on line {line}")]
    UnexpectedSequenceItem {
        /// 1-based source line number.
        line: usize,
    },

    /// A mapping entry has no `:` separator.
    #[error("Expected ':' on line {line}")]
    MissingSeparator {
        /// 1-based source line number.
        line: usize,
    },

    /// Content remained after the root block ended.
    #[error("Unexpected trailing content in configuration on line {line}")]
    TrailingContent {
        /// 1-based source line number of the first unconsumed token.
        line: usize,
    },

    /// The top-level `distros` key is missing or the root is not a mapping.
    #[error("Top-level 'distros' mapping missing in configuration")]
    MissingDistros,

    /// `distros` exists but does not hold a mapping.
    #[error("'distros' must map distro names to configuration blocks")]
    DistrosNotMapping,

    /// A distro requested by name is absent from the configuration.
    #[error("Distro '{distro}' not defined in configuration")]
    UnknownDistro {
        /// The requested distro name.
        distro: String,
    },

    /// A distro entry is not a mapping.
    #[error("Distro '{distro}' must map to a dictionary")]
    DistroNotMapping {
        /// Distro name.
        distro: String,
    },

    /// A distro has no usable `baseURL`.
    #[error("Distro '{distro}' is missing 'baseURL'")]
    MissingBaseUrl {
        /// Distro name.
        distro: String,
    },

    /// A distro has no `releases` mapping, or it is empty.
    #[error("Distro '{distro}' must define at least one release")]
    NoReleases {
        /// Distro name.
        distro: String,
    },

    /// A release entry is not a mapping.
    #[error("Release '{release}' under '{distro}' must map to a dictionary")]
    ReleaseNotMapping {
        /// Distro name.
        distro: String,
        /// Release name.
        release: String,
    },

    /// A release has no usable `remoteChecksums`.
    #[error("Release '{release}' under '{distro}' is missing 'remoteChecksums'")]
    MissingRemoteChecksums {
        /// Distro name.
        distro: String,
        /// Release name.
        release: String,
    },

    /// A release has no `artifacts` list, an empty one, or non-string items.
    #[error("Release '{release}' under '{distro}' must define a non-empty 'artifacts' list")]
    InvalidArtifacts {
        /// Distro name.
        distro: String,
        /// Release name.
        release: String,
    },
}

impl ConfigError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns the offending source line, for errors raised while parsing.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidIndentation { line }
            | Self::UnexpectedIndentation { line }
            | Self::UnexpectedSequenceItem { line }
            | Self::MissingSeparator { line }
            | Self::TrailingContent { line } => Some(*line),
            _ => None,
        }
    }
}
