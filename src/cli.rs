//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use image_sync_core::download::DEFAULT_MAX_ATTEMPTS;

/// Synchronise distribution cloud images into a local mirror.
///
/// Each configured release is fetched only when its remote checksum manifest
/// changed since the last successful run. Every artifact is verified against
/// the manifest before the release is marked as synced.
#[derive(Parser, Debug)]
#[command(name = "sync-cloud-images")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the mirror configuration file
    #[arg(long, default_value = "conf/cloud-init.conf")]
    pub config: PathBuf,

    /// Root directory that receives <distro>/<release>/ trees
    #[arg(long, default_value = "images")]
    pub images_dir: PathBuf,

    /// Only sync this distro (repeatable; order is honoured)
    #[arg(long = "distro", value_name = "NAME")]
    pub distros: Vec<String>,

    /// Only sync releases with this name (repeatable)
    #[arg(long = "release", value_name = "NAME")]
    pub releases: Vec<String>,

    /// Attempts per artifact, including the first
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
