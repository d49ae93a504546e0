//! Validation of the parsed configuration into release contexts.

use std::path::Path;

use tracing::{debug, instrument};

use super::parser::parse_document;
use super::release::ReleaseContext;
use super::value::{ConfigValue, Mapping};
use super::ConfigError;

/// Distro and release names selected on the command line.
///
/// An empty list selects everything. Unknown distro names are an error;
/// unknown release names simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseFilter {
    distros: Vec<String>,
    releases: Vec<String>,
}

impl ReleaseFilter {
    /// Creates a filter from explicit distro and release names.
    #[must_use]
    pub fn new(distros: Vec<String>, releases: Vec<String>) -> Self {
        Self { distros, releases }
    }

    /// Returns true when no names were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distros.is_empty() && self.releases.is_empty()
    }

    fn includes_release(&self, release: &str) -> bool {
        self.releases.is_empty() || self.releases.iter().any(|name| name == release)
    }
}

/// Reads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` is not a regular file,
/// [`ConfigError::Read`] if it cannot be read, or any parse error.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<ConfigValue, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    parse_document(&text)
}

/// Returns the `distros` mapping of a parsed configuration.
///
/// # Errors
///
/// Returns [`ConfigError::MissingDistros`] when the root is not a mapping or
/// has no `distros` key, and [`ConfigError::DistrosNotMapping`] when the key
/// holds anything other than a mapping.
pub fn distros(config: &ConfigValue) -> Result<&Mapping, ConfigError> {
    config
        .get("distros")
        .ok_or(ConfigError::MissingDistros)?
        .as_mapping()
        .ok_or(ConfigError::DistrosNotMapping)
}

/// Builds the release contexts selected by `filter`, in distro-then-release
/// order.
///
/// Explicitly requested distros are visited in the order given; otherwise
/// configuration order is used.
///
/// # Errors
///
/// Returns a [`ConfigError`] naming the distro, release, and field for the
/// first validation failure, or [`ConfigError::UnknownDistro`] for a requested
/// distro that is not configured.
pub fn release_contexts(
    config: &ConfigValue,
    images_root: &Path,
    filter: &ReleaseFilter,
) -> Result<Vec<ReleaseContext>, ConfigError> {
    let distros = distros(config)?;
    let distro_names: Vec<&str> = if filter.distros.is_empty() {
        distros.keys().map(String::as_str).collect()
    } else {
        filter.distros.iter().map(String::as_str).collect()
    };

    let mut contexts = Vec::new();
    for distro in distro_names {
        let distro_cfg = distros
            .get(distro)
            .ok_or_else(|| ConfigError::UnknownDistro {
                distro: distro.to_string(),
            })?;
        contexts.extend(distro_release_contexts(
            distro,
            distro_cfg,
            images_root,
            filter,
        )?);
    }

    debug!(count = contexts.len(), "release contexts selected");
    Ok(contexts)
}

/// Convenience wrapper: load the file and build the selected contexts.
///
/// # Errors
///
/// Returns any error from [`load_config`] or [`release_contexts`].
pub fn load_release_contexts(
    path: &Path,
    images_root: &Path,
    filter: &ReleaseFilter,
) -> Result<Vec<ReleaseContext>, ConfigError> {
    let config = load_config(path)?;
    release_contexts(&config, images_root, filter)
}

fn distro_release_contexts(
    distro: &str,
    distro_cfg: &ConfigValue,
    images_root: &Path,
    filter: &ReleaseFilter,
) -> Result<Vec<ReleaseContext>, ConfigError> {
    let distro_cfg = distro_cfg
        .as_mapping()
        .ok_or_else(|| ConfigError::DistroNotMapping {
            distro: distro.to_string(),
        })?;

    let base_url = non_empty_str(distro_cfg.get("baseURL")).ok_or_else(|| {
        ConfigError::MissingBaseUrl {
            distro: distro.to_string(),
        }
    })?;
    let releases = distro_cfg
        .get("releases")
        .and_then(ConfigValue::as_mapping)
        .filter(|releases| !releases.is_empty())
        .ok_or_else(|| ConfigError::NoReleases {
            distro: distro.to_string(),
        })?;

    let mut contexts = Vec::new();
    for (release, release_cfg) in releases {
        if !filter.includes_release(release) {
            continue;
        }
        let release_cfg =
            release_cfg
                .as_mapping()
                .ok_or_else(|| ConfigError::ReleaseNotMapping {
                    distro: distro.to_string(),
                    release: release.clone(),
                })?;

        let release_url = release_cfg
            .get("releaseURL")
            .and_then(ConfigValue::as_str)
            .unwrap_or_default();
        let checksum_file = non_empty_str(release_cfg.get("remoteChecksums")).ok_or_else(|| {
            ConfigError::MissingRemoteChecksums {
                distro: distro.to_string(),
                release: release.clone(),
            }
        })?;
        let artifacts = artifact_names(release_cfg.get("artifacts")).ok_or_else(|| {
            ConfigError::InvalidArtifacts {
                distro: distro.to_string(),
                release: release.clone(),
            }
        })?;

        contexts.push(ReleaseContext::new(
            distro,
            release.as_str(),
            base_url,
            release_url,
            checksum_file,
            artifacts,
            images_root,
        ));
    }
    Ok(contexts)
}

fn non_empty_str(value: Option<&ConfigValue>) -> Option<&str> {
    value
        .and_then(ConfigValue::as_str)
        .filter(|text| !text.is_empty())
}

fn artifact_names(value: Option<&ConfigValue>) -> Option<Vec<String>> {
    let items = value?.as_sequence()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| non_empty_str(Some(item)).map(str::to_string))
        .collect()
}
