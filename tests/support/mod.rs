//! Shared fixtures for integration tests: a mock mirror and config files.

#![allow(dead_code)]

pub mod socket_guard;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image_sync_core::HashAlgorithm;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Respond, ResponseTemplate};

/// Lowercase SHA-256 hex of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    HashAlgorithm::Sha256.digest_hex(data)
}

/// `<digest>  <name>` manifest with one line per artifact.
pub fn sha256_manifest(artifacts: &[(&str, &str)]) -> String {
    artifacts
        .iter()
        .map(|(name, body)| format!("{}  {name}\n", sha256_hex(body.as_bytes())))
        .collect()
}

/// Single-distro config pointing at `base_url`.
///
/// Every release uses `releaseURL: latest`, `SHA256SUMS`, and the same
/// artifact list.
pub fn config_text(base_url: &str, releases: &[&str], artifacts: &[&str]) -> String {
    let mut text = format!(
        "# mirror fixture\ndistros:\n  debian:\n    baseURL: {base_url}\n    releases:\n"
    );
    for release in releases {
        text.push_str(&format!(
            "      {release}:\n        releaseURL: latest\n        remoteChecksums: SHA256SUMS\n        artifacts:\n"
        ));
        for artifact in artifacts {
            text.push_str(&format!("          - {artifact}\n"));
        }
    }
    text
}

/// Writes `text` to `<dir>/cloud-init.conf` and returns the path.
pub fn write_config(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("cloud-init.conf");
    std::fs::write(&path, text).expect("write config");
    path
}

/// Serves `body` at `url_path`, optionally asserting the request count
/// when the server is dropped.
pub async fn mount_file(server: &MockServer, url_path: &str, body: &[u8], expect: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()));
    let mock = match expect {
        Some(count) => mock.expect(count),
        None => mock,
    };
    mock.mount(server).await;
}

/// Serves `status` at `url_path`, optionally expecting exactly `expect`
/// requests.
pub async fn mount_status(server: &MockServer, url_path: &str, status: u16, expect: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status));
    let mock = match expect {
        Some(count) => mock.expect(count),
        None => mock,
    };
    mock.mount(server).await;
}

/// Responder that returns `bad_body` for the first `bad_count` requests,
/// then `good_body`.
pub struct CorruptThenGood {
    requests: Arc<AtomicUsize>,
    bad_count: usize,
    bad_body: Vec<u8>,
    good_body: Vec<u8>,
}

impl CorruptThenGood {
    pub fn new(bad_count: usize, bad_body: &[u8], good_body: &[u8]) -> (Self, Arc<AtomicUsize>) {
        let requests = Arc::new(AtomicUsize::new(0));
        (
            Self {
                requests: Arc::clone(&requests),
                bad_count,
                bad_body: bad_body.to_vec(),
                good_body: good_body.to_vec(),
            },
            requests,
        )
    }
}

impl Respond for CorruptThenGood {
    fn respond(&self, _request: &wiremock::Request) -> ResponseTemplate {
        let n = self.requests.fetch_add(1, Ordering::SeqCst);
        let body = if n < self.bad_count {
            &self.bad_body
        } else {
            &self.good_body
        };
        ResponseTemplate::new(200).set_body_bytes(body.clone())
    }
}
