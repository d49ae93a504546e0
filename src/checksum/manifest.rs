//! Checksum manifest parsing (`SHA256SUMS`-style files).

use std::collections::HashMap;

/// A fetched checksum manifest.
///
/// Keeps the raw text verbatim, since that is what change detection compares
/// against the sync marker, alongside the parsed filename to digest map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumManifest {
    raw: String,
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parses manifest text.
    ///
    /// Each line is `<digest> <filename>`, where the filename may carry a
    /// leading `*` (binary mode marker). Blank lines, `#` comments, and lines
    /// with fewer than two fields are skipped. Digests are stored lowercase.
    /// When a filename repeats, the last line wins.
    #[must_use]
    pub fn parse(text: impl Into<String>) -> Self {
        let raw = text.into();
        let mut entries = HashMap::new();

        for line in raw.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [digest, .., filename] = fields.as_slice() else {
                continue;
            };
            let filename = filename.trim_start_matches('*');
            entries.insert(filename.to_string(), digest.to_ascii_lowercase());
        }

        Self { raw, entries }
    }

    /// The manifest text exactly as fetched.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Expected lowercase digest for `filename`.
    #[must_use]
    pub fn digest_for(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    /// Names from `artifacts` that have no manifest entry, in the given order.
    #[must_use]
    pub fn missing<'a>(&self, artifacts: &'a [String]) -> Vec<&'a str> {
        artifacts
            .iter()
            .map(String::as_str)
            .filter(|artifact| !self.entries.contains_key(*artifact))
            .collect()
    }

    /// Number of distinct filenames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_binary_entries() {
        let manifest = ChecksumManifest::parse(
            "ABCDEF  disk.img\n0123ab *other.qcow2\n",
        );
        assert_eq!(manifest.digest_for("disk.img"), Some("abcdef"));
        assert_eq!(manifest.digest_for("other.qcow2"), Some("0123ab"));
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_parse_skips_blank_comment_and_short_lines() {
        let manifest = ChecksumManifest::parse("\n# generated\n   \nlonely\nff  a.img\n");
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.digest_for("a.img"), Some("ff"));
        assert_eq!(manifest.digest_for("lonely"), None);
    }

    #[test]
    fn test_parse_duplicate_filename_last_wins() {
        let manifest = ChecksumManifest::parse("aa disk.img\nbb disk.img\n");
        assert_eq!(manifest.digest_for("disk.img"), Some("bb"));
    }

    #[test]
    fn test_parse_keeps_raw_text_verbatim() {
        let text = "aa  disk.img\r\n# trailing comment\n";
        let manifest = ChecksumManifest::parse(text);
        assert_eq!(manifest.raw(), text);
        assert_eq!(manifest.digest_for("disk.img"), Some("aa"));
    }

    #[test]
    fn test_missing_lists_absent_artifacts_in_order() {
        let manifest = ChecksumManifest::parse("aa present.img\n");
        let artifacts = vec![
            "gone.img".to_string(),
            "present.img".to_string(),
            "also-gone.img".to_string(),
        ];
        assert_eq!(manifest.missing(&artifacts), ["gone.img", "also-gone.img"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ChecksumManifest::parse("");
        assert!(manifest.is_empty());
        assert_eq!(manifest.raw(), "");
    }
}
