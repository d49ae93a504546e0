//! User-Agent string for manifest and artifact requests.

/// Product token sent ahead of the version.
const PRODUCT: &str = "cloud-image-sync";

/// Default User-Agent (identifies the tool and its version to mirrors).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (image-mirror)")
}
