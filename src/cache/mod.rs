use std::fs;
use std::path::PathBuf;

use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::aggregate::AggregatedMetric;
use crate::common::ensure_dir_exists;
use crate::record::VoterRecord;

/// String key → string blob persistence boundary, scoped to the client
/// session. Durability beyond that is advisory.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store: lives and dies with the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One file per key under a directory; survives restarts. Keys are used as
/// file names verbatim, so they must be path-safe.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir_exists(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read cache entry {key}")),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)
            .with_context(|| format!("Failed to write cache entry {key}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Failed to remove cache entry {key}")),
        }
    }
}

/// The validated cached pair: the full normalized dataset plus its
/// top-level summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAggregate {
    pub payload: Vec<VoterRecord>,
    pub summary: Vec<AggregatedMetric>,
}

/// Checksummed wrapper around every stored blob. A body that no longer
/// matches its digest is corruption, not data.
#[derive(Serialize, Deserialize)]
struct Envelope {
    sha256: String,
    body: String,
}

/// Durable aggregate cache over any [`BlobStore`]. The payload and its
/// summary live under two sibling keys and are saved, validated, and
/// cleared strictly together. Entries never expire by time; only
/// [`AggregateCache::invalidate`] (the explicit reload action) and detected
/// corruption remove them.
pub struct AggregateCache<S: BlobStore> {
    store: S,
    key: String,
}

impl<S: BlobStore> AggregateCache<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    fn summary_key(&self) -> String {
        format!("{}.summary", self.key)
    }

    /// Persist the full payload and its summary together.
    pub fn save(&mut self, payload: &[VoterRecord], summary: &[AggregatedMetric]) -> Result<()> {
        let sealed_payload = seal(&payload)?;
        let sealed_summary = seal(&summary)?;
        self.store.put(&self.key, &sealed_payload)?;
        self.store.put(&self.summary_key(), &sealed_summary)?;
        Ok(())
    }

    /// Load and validate the cached pair. Any parse failure, checksum
    /// mismatch, empty payload, or half-missing pair is a cache *miss*, and
    /// both entries are cleared so a payload can never pair with a stale
    /// summary.
    pub fn load(&mut self) -> Option<CachedAggregate> {
        match self.try_load() {
            Ok(hit) => hit,
            Err(_) => {
                let _ = self.invalidate();
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<CachedAggregate>> {
        let payload_blob = self.store.get(&self.key)?;
        let summary_blob = self.store.get(&self.summary_key())?;

        let (payload_blob, summary_blob) = match (payload_blob, summary_blob) {
            (None, None) => return Ok(None),
            (Some(p), Some(s)) => (p, s),
            _ => bail!("cache holds payload or summary but not both"),
        };

        let payload: Vec<VoterRecord> = unseal(&payload_blob)?;
        let summary: Vec<AggregatedMetric> = unseal(&summary_blob)?;
        if payload.is_empty() {
            bail!("cached payload is empty");
        }
        if summary.is_empty() {
            bail!("cached summary is structurally absent");
        }
        Ok(Some(CachedAggregate { payload, summary }))
    }

    /// Explicit invalidation: clears both entries. The caller follows up
    /// with a fresh remote load.
    pub fn invalidate(&mut self) -> Result<()> {
        self.store.remove(&self.key)?;
        self.store.remove(&self.summary_key())?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn seal<T: Serialize>(value: &T) -> Result<String> {
    let body = serde_json::to_string(value).context("Failed to serialize cache body")?;
    let envelope = Envelope { sha256: hex::encode(Sha256::digest(body.as_bytes())), body };
    serde_json::to_string(&envelope).context("Failed to serialize cache envelope")
}

fn unseal<T: DeserializeOwned>(blob: &str) -> Result<T> {
    let envelope: Envelope =
        serde_json::from_str(blob).context("cache blob is not a sealed envelope")?;
    let digest = hex::encode(Sha256::digest(envelope.body.as_bytes()));
    if digest != envelope.sha256 {
        bail!("cache blob checksum mismatch");
    }
    serde_json::from_str(&envelope.body).context("cache body failed to deserialize")
}
