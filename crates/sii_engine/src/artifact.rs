use std::collections::BTreeMap;
use std::fmt::Write;

use bytes::Bytes;
use pipeline_logging::{pipeline_debug, pipeline_warn};
use sha2::{Digest, Sha256};

/// A downloadable blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: String,
    pub body: Bytes,
    pub fingerprint: String,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, body: Bytes) -> Self {
        let fingerprint = short_hash(&body);
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            body,
            fingerprint,
        }
    }
}

/// Blobs reachable through revocable locator ids.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    live: BTreeMap<u64, Artifact>,
    published: u64,
    revoked: u64,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, locator: u64, artifact: Artifact) {
        if !self.live.is_empty() {
            let ids: Vec<_> = self.live.keys().collect();
            pipeline_warn!("publishing locator {} while {:?} still live", locator, ids);
        }
        pipeline_debug!(
            "publish locator {} filename={} bytes={} sha256={}",
            locator,
            artifact.filename,
            artifact.body.len(),
            artifact.fingerprint
        );
        self.published += 1;
        if self.live.insert(locator, artifact).is_some() {
            pipeline_warn!("locator {} was published twice", locator);
        }
    }

    /// Releases the blob behind `locator`. Returns false if it was not live.
    pub fn revoke(&mut self, locator: u64) -> bool {
        let removed = self.live.remove(&locator).is_some();
        if removed {
            self.revoked += 1;
            pipeline_debug!("revoked locator {}", locator);
        } else {
            pipeline_warn!("revoke of unknown locator {}", locator);
        }
        removed
    }

    pub fn get(&self, locator: u64) -> Option<&Artifact> {
        self.live.get(&locator)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn published_count(&self) -> u64 {
        self.published
    }

    pub fn revoked_count(&self) -> u64 {
        self.revoked
    }
}

fn short_hash(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
