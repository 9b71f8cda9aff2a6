//! Local cache for downloaded ontology files.
//!
//! A resource is stored under its URL file name in the cache directory, next
//! to a `<file>.meta.json` sidecar recording where it came from and its
//! sha256. A cached file whose digest no longer matches its sidecar is fetched
//! again. Downloads are a single GET; there is no retry loop.

use crate::{GoError, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use rcsb_go_common::checksum::{sha256_bytes, verify_sha256};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const SIDECAR_SUFFIX: &str = ".meta.json";
const PARTIAL_SUFFIX: &str = ".part";

/// Sidecar metadata for one cached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    pub file_name: String,
    pub size: u64,
    pub sha256: String,
    pub fetched_at: DateTime<Utc>,
}

/// Last path segment of a URL, ignoring any query string or fragment
pub fn file_name_for_url(url: &str) -> std::result::Result<String, String> {
    let base = url.split(['?', '#']).next().unwrap_or(url);
    let path = match base.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => base,
    };

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(format!("Cannot derive a file name from URL: {}", url)),
    }
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Read a sidecar and check it describes the file it sits next to
fn read_sidecar(meta_path: &Path, cached: &Path) -> Result<CacheEntry> {
    let entry: CacheEntry = serde_json::from_slice(&std::fs::read(meta_path)?)?;
    let own_name = cached.file_name().and_then(|n| n.to_str());
    if own_name != Some(entry.file_name.as_str()) {
        return Err(GoError::Cache(format!(
            "{} describes '{}' instead of its own file",
            meta_path.display(),
            entry.file_name
        )));
    }
    Ok(entry)
}

/// Returns whether a file was actually deleted
fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Removed cached file");
            Ok(())
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub struct ResourceCache {
    dir: PathBuf,
    client: Client,
}

impl ResourceCache {
    pub fn new(dir: impl Into<PathBuf>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("rcsb-go/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ResourceCache {
            dir: dir.into(),
            client,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Return a local path holding the resource at `url`.
    ///
    /// With `use_cache` a valid cached copy is returned without touching the
    /// network. Without it any cached copy is deleted and fetched again.
    pub async fn fetch(&self, url: &str, use_cache: bool) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = file_name_for_url(url).map_err(GoError::Validation)?;
        let path = self.dir.join(&file_name);
        let meta_path = sidecar_path(&path);

        if !use_cache {
            remove_if_exists(&path).await?;
            remove_if_exists(&meta_path).await?;
        } else if tokio::fs::try_exists(&path).await? {
            if self.is_intact(&path, &meta_path).await {
                info!(path = %path.display(), "Using cached resource file");
                return Ok(path);
            }
            warn!(path = %path.display(), "Cached file does not match its checksum, fetching again");
        }

        info!(url, path = %path.display(), "Fetching url to resource file");
        let entry = self.download(url, &path, file_name).await?;
        tokio::fs::write(&meta_path, serde_json::to_vec_pretty(&entry)?).await?;

        info!(
            size = entry.size,
            sha256 = %entry.sha256,
            "Fetched {} ({} KB)",
            entry.file_name,
            entry.size / 1024
        );
        Ok(path)
    }

    /// A file without a sidecar is trusted as-is
    async fn is_intact(&self, path: &Path, meta_path: &Path) -> bool {
        if matches!(tokio::fs::try_exists(meta_path).await, Ok(false)) {
            return true;
        }
        match verify_cached(path, meta_path).await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Cached file failed verification");
                false
            },
        }
    }

    async fn download(&self, url: &str, path: &Path, file_name: String) -> Result<CacheEntry> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GoError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let partial = self.dir.join(format!("{}{}", file_name, PARTIAL_SUFFIX));
        tokio::fs::write(&partial, &bytes).await?;
        tokio::fs::rename(&partial, path).await?;

        Ok(CacheEntry {
            url: url.to_string(),
            file_name,
            size: bytes.len() as u64,
            sha256: sha256_bytes(&bytes),
            fetched_at: Utc::now(),
        })
    }

    /// `(sidecar, cached file)` path pairs in the cache directory, sorted.
    /// The cached file is always the sidecar's own name minus the suffix.
    fn sidecars(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut found = Vec::new();
        if !self.dir.exists() {
            return Ok(found);
        }

        for dir_entry in std::fs::read_dir(&self.dir)? {
            let dir_entry = dir_entry?;
            if dir_entry.file_type()?.is_dir() {
                continue;
            }
            let meta_path = dir_entry.path();
            let cached = meta_path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(SIDECAR_SUFFIX))
                .filter(|n| !n.is_empty())
                .map(|n| self.dir.join(n));
            if let Some(cached) = cached {
                found.push((meta_path, cached));
            }
        }

        found.sort();
        Ok(found)
    }

    /// Sidecar metadata of every cached file, sorted by file name.
    /// Unreadable or inconsistent sidecars are logged and skipped.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let mut entries = Vec::new();
        for (meta_path, cached) in self.sidecars()? {
            match read_sidecar(&meta_path, &cached) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(path = %meta_path.display(), error = %e, "Skipping cache sidecar"),
            }
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(entries)
    }

    /// Delete every cached file with a sidecar, plus leftover partial
    /// downloads. Returns the number of cached files removed.
    ///
    /// Only files inside the cache directory are touched; the sidecar
    /// contents never decide what gets deleted.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for (meta_path, cached) in self.sidecars()? {
            if remove_file_if_exists(&cached)? {
                debug!(path = %cached.display(), "Removed cached file");
                removed += 1;
            }
            remove_file_if_exists(&meta_path)?;
        }

        if self.dir.exists() {
            for dir_entry in std::fs::read_dir(&self.dir)? {
                let path = dir_entry?.path();
                if path.to_string_lossy().ends_with(PARTIAL_SUFFIX) {
                    std::fs::remove_file(&path)?;
                }
            }
        }

        info!(removed, dir = %self.dir.display(), "Cleared cache");
        Ok(removed)
    }
}

/// Check a cached file against the digest in its sidecar
async fn verify_cached(path: &Path, meta_path: &Path) -> Result<()> {
    let path = path.to_path_buf();
    let meta_path = meta_path.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let entry = read_sidecar(&meta_path, &path)?;
        verify_sha256(&path, &entry.sha256)?;
        Ok(())
    })
    .await
    .map_err(|e| GoError::Cache(format!("Checksum task failed: {}", e)))?
}

/// Decode file contents as UTF-8, gunzipping when the name ends in `.gz`
pub fn decode_resource(path: &Path, bytes: &[u8]) -> Result<String> {
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if gzipped {
        let mut decoder = GzDecoder::new(bytes);
        let mut text = String::new();
        decoder
            .read_to_string(&mut text)
            .map_err(|e| GoError::Parse(format!("Failed to decompress {}: {}", path.display(), e)))?;
        return Ok(text);
    }

    String::from_utf8(bytes.to_vec())
        .map_err(|e| GoError::Parse(format!("{} is not valid UTF-8: {}", path.display(), e)))
}

pub fn read_resource(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    decode_resource(path, &bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_url() {
        assert_eq!(
            file_name_for_url("http://purl.obolibrary.org/obo/go/go-basic.obo").unwrap(),
            "go-basic.obo"
        );
        assert_eq!(
            file_name_for_url("https://example.org/releases/go.obo.gz?token=abc#top").unwrap(),
            "go.obo.gz"
        );
        assert_eq!(file_name_for_url("/data/go/go-basic.obo").unwrap(), "go-basic.obo");
        assert!(file_name_for_url("http://purl.obolibrary.org/obo/").is_err());
        assert!(file_name_for_url("http://purl.obolibrary.org").is_err());
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("/cache/go-basic.obo")),
            PathBuf::from("/cache/go-basic.obo.meta.json")
        );
    }

    #[test]
    fn test_decode_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"format-version: 1.2\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let text = decode_resource(Path::new("go-basic.obo.gz"), &compressed).unwrap();
        assert_eq!(text, "format-version: 1.2\n");

        let plain = decode_resource(Path::new("go-basic.obo"), b"plain").unwrap();
        assert_eq!(plain, "plain");
        assert!(decode_resource(Path::new("go-basic.obo"), &[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_entries_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResourceCache::new(dir.path(), 10).unwrap();
        assert!(cache.entries().unwrap().is_empty());

        let entry = CacheEntry {
            url: "http://example.org/go-basic.obo".to_string(),
            file_name: "go-basic.obo".to_string(),
            size: 5,
            sha256: sha256_bytes(b"hello"),
            fetched_at: Utc::now(),
        };
        std::fs::write(dir.path().join("go-basic.obo"), b"hello").unwrap();
        std::fs::write(
            dir.path().join("go-basic.obo.meta.json"),
            serde_json::to_vec(&entry).unwrap(),
        )
        .unwrap();
        std::fs::write(dir.path().join("go.obo.part"), b"half").unwrap();

        assert_eq!(cache.entries().unwrap(), vec![entry]);
        assert_eq!(cache.clear().unwrap(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_clear_ignores_file_name_inside_sidecar() {
        let root = tempfile::tempdir().unwrap();
        let victim = root.path().join("victim.txt");
        std::fs::write(&victim, b"keep me").unwrap();

        let cache_dir = root.path().join("cache");
        std::fs::create_dir(&cache_dir).unwrap();
        let entry = CacheEntry {
            url: "http://example.org/go.obo".to_string(),
            file_name: "../victim.txt".to_string(),
            size: 7,
            sha256: sha256_bytes(b"keep me"),
            fetched_at: Utc::now(),
        };
        std::fs::write(cache_dir.join("go.obo.meta.json"), serde_json::to_vec(&entry).unwrap())
            .unwrap();

        let cache = ResourceCache::new(&cache_dir, 10).unwrap();
        assert!(cache.entries().unwrap().is_empty());
        assert_eq!(cache.clear().unwrap(), 0);
        assert!(victim.exists());
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_bad_sidecars_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("go.obo"), b"hello").unwrap();
        std::fs::write(dir.path().join("go.obo.meta.json"), b"{not json").unwrap();
        // dangling link: the sidecar exists but cannot be read
        #[cfg(unix)]
        std::os::unix::fs::symlink(
            dir.path().join("missing"),
            dir.path().join("go-basic.obo.meta.json"),
        )
        .unwrap();

        let cache = ResourceCache::new(dir.path(), 10).unwrap();
        assert!(cache.entries().unwrap().is_empty());
        assert_eq!(cache.clear().unwrap(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_read_sidecar_rejects_foreign_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("go-basic.obo");
        let meta_path = sidecar_path(&cached);
        let entry = CacheEntry {
            url: "http://example.org/go.obo".to_string(),
            file_name: "go.obo".to_string(),
            size: 0,
            sha256: sha256_bytes(b""),
            fetched_at: Utc::now(),
        };
        std::fs::write(&meta_path, serde_json::to_vec(&entry).unwrap()).unwrap();

        assert!(matches!(read_sidecar(&meta_path, &cached), Err(GoError::Cache(_))));
    }

    #[tokio::test]
    async fn test_verify_cached_reports_checksum_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let cached = dir.path().join("go-basic.obo");
        let meta_path = sidecar_path(&cached);
        std::fs::write(&cached, b"changed").unwrap();
        let entry = CacheEntry {
            url: "http://example.org/go-basic.obo".to_string(),
            file_name: "go-basic.obo".to_string(),
            size: 5,
            sha256: sha256_bytes(b"hello"),
            fetched_at: Utc::now(),
        };
        std::fs::write(&meta_path, serde_json::to_vec(&entry).unwrap()).unwrap();

        let err = verify_cached(&cached, &meta_path).await.unwrap_err();
        assert!(matches!(
            err,
            GoError::Common(rcsb_go_common::CommonError::ChecksumMismatch { .. })
        ));
    }
}
