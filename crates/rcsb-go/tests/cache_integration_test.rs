//! Fetch-once cache behavior against a mock HTTP server

use flate2::write::GzEncoder;
use flate2::Compression;
use rcsb_go::{GeneOntologyProvider, GoError, ProviderConfig, ResourceCache};
use std::io::Write;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const MINI_GO: &str = include_str!("fixtures/mini-go.obo");
const OBO_PATH: &str = "/obo/go/go-basic.obo";

async fn mount_obo(server: &MockServer, route: &str, body: Vec<u8>, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_second_fetch_uses_cache() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);

    let first = cache.fetch(&url, true).await.unwrap();
    let second = cache.fetch(&url, true).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first, dir.path().join("go-basic.obo"));
    assert_eq!(std::fs::read_to_string(&first).unwrap(), MINI_GO);

    let entries = cache.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, url);
    assert_eq!(entries[0].size, MINI_GO.len() as u64);
}

#[tokio::test]
async fn test_no_cache_refetches() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 2).await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);

    cache.fetch(&url, true).await.unwrap();
    cache.fetch(&url, false).await.unwrap();
}

#[tokio::test]
async fn test_checksum_mismatch_refetches() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 2).await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);

    let cached = cache.fetch(&url, true).await.unwrap();
    std::fs::write(&cached, "truncated").unwrap();

    let refetched = cache.fetch(&url, true).await.unwrap();
    assert_eq!(std::fs::read_to_string(refetched).unwrap(), MINI_GO);
}

#[tokio::test]
async fn test_sidecar_naming_another_file_refetches() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 2).await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);

    let cached = cache.fetch(&url, true).await.unwrap();
    let meta_path = dir.path().join("go-basic.obo.meta.json");
    let mut meta: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&meta_path).unwrap()).unwrap();
    meta["file_name"] = "../elsewhere.obo".into();
    std::fs::write(&meta_path, serde_json::to_vec(&meta).unwrap()).unwrap();
    assert!(cache.entries().unwrap().is_empty());

    cache.fetch(&url, true).await.unwrap();
    let entries = cache.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "go-basic.obo");

    assert_eq!(cache.clear().unwrap(), 1);
    assert!(!cached.exists());
    assert!(!meta_path.exists());
}

#[tokio::test]
async fn test_file_without_sidecar_is_trusted() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 0).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("go-basic.obo"), MINI_GO).unwrap();

    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);
    cache.fetch(&url, true).await.unwrap();
    assert!(cache.entries().unwrap().is_empty());
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBO_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ResourceCache::new(dir.path(), 10).unwrap();
    let url = format!("{}{}", server.uri(), OBO_PATH);

    let result = cache.fetch(&url, true).await;
    assert!(matches!(result, Err(GoError::HttpStatus { status: 404, .. })));
    assert!(!dir.path().join("go-basic.obo").exists());
}

#[tokio::test]
async fn test_load_through_cache() {
    let server = MockServer::start().await;
    mount_obo(&server, OBO_PATH, MINI_GO.as_bytes().to_vec(), 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = ProviderConfig::builder()
        .url_target(format!("{}{}", server.uri(), OBO_PATH))
        .cache_dir(dir.path())
        .build();

    let first = GeneOntologyProvider::load(&config).await.unwrap();
    let second = GeneOntologyProvider::load(&config).await.unwrap();
    assert_eq!(first.root_nodes().len(), 3);
    assert_eq!(first.full_node_list(), second.full_node_list());
    assert!(config.cached_file_path().unwrap().exists());
}

#[tokio::test]
async fn test_load_gzipped_release() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(MINI_GO.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    let server = MockServer::start().await;
    mount_obo(&server, "/obo/go/go-basic.obo.gz", compressed, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let config = ProviderConfig::builder()
        .url_target(format!("{}/obo/go/go-basic.obo.gz", server.uri()))
        .cache_dir(dir.path())
        .build();

    let go = GeneOntologyProvider::load(&config).await.unwrap();
    assert_eq!(go.name("GO:2001317"), Some("kojic acid biosynthetic process"));
    assert!(dir.path().join("go-basic.obo.gz").exists());
}
