//! Reading transaction files from the local filesystem or S3.
//!
//! Paths starting with `s3://` go to Amazon S3 (`?anon=true` or `?anon=1`
//! for unsigned requests on public buckets); anything else is a local path,
//! resolved against the current directory when relative.

use bytes::Bytes;
use dashmap::DashMap;
use object_store::{ObjectStore, aws::AmazonS3Builder, local::LocalFileSystem, path::Path as ObjectPath};
use once_cell::sync::Lazy;
use std::sync::Arc;
use url::Url;

/// S3 stores by `(bucket, anonymous)`. Both collections of a run usually
/// share a bucket and are fetched concurrently.
static S3_STORES: Lazy<DashMap<(String, bool), Arc<dyn ObjectStore>>> = Lazy::new(DashMap::new);

fn s3_store(bucket: &str, anonymous: bool) -> Result<Arc<dyn ObjectStore>, Box<dyn std::error::Error + Send + Sync>> {
    let store = S3_STORES
        .entry((bucket.to_string(), anonymous))
        .or_try_insert_with(|| -> Result<Arc<dyn ObjectStore>, object_store::Error> {
            // Credentials come from the environment, profile or instance role.
            let built = AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .with_skip_signature(anonymous)
                .build()?;
            Ok(Arc::new(built))
        })?;
    Ok(Arc::clone(store.value()))
}

/// Resolves `file_path` to a store and the object's path inside it.
///
/// # Errors
///
/// Returns an error for an `s3://` URL without a bucket, when the S3 client
/// cannot be configured, or when a local path cannot be made absolute.
///
/// # Examples
///
/// ```no_run
/// # use gapmine::utils::file_interaction_local_and_cloud::resolve;
/// let (store, path) = resolve("./data/positive.txt").unwrap();
/// let (store, path) = resolve("s3://datasets/negative.txt?anon=true").unwrap();
/// ```
pub fn resolve(file_path: &str) -> Result<(Arc<dyn ObjectStore>, ObjectPath), Box<dyn std::error::Error + Send + Sync>> {
    if file_path.starts_with("s3://") {
        let url = Url::parse(file_path)?;
        let bucket = url.host_str().ok_or("Invalid S3 URL - no bucket specified")?;
        let anonymous = url
            .query_pairs()
            .any(|(k, v)| k == "anon" && (v == "true" || v == "1"));
        let key = url.path().trim_start_matches('/');
        return Ok((s3_store(bucket, anonymous)?, ObjectPath::from(key)));
    }

    let absolute = std::path::absolute(file_path)?;
    let path = ObjectPath::from_absolute_path(&absolute)
        .map_err(|e| format!("Invalid local path {}: {}", file_path, e))?;
    Ok((Arc::new(LocalFileSystem::new()), path))
}

/// Reads a whole object (local file or S3 key) into memory.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the object cannot be
/// read; the message names the path.
///
/// # Examples
///
/// ```no_run
/// # use gapmine::utils::file_interaction_local_and_cloud::read_all;
/// # tokio_test::block_on(async {
/// let bytes = read_all("./data/positive.txt").await.unwrap();
/// # });
/// ```
pub async fn read_all(file_path: &str) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
    let (store, path) = resolve(file_path)?;
    let result = store.get(&path).await
        .map_err(|e| format!("Failed to open {}: {}", file_path, e))?;
    let bytes = result.bytes().await
        .map_err(|e| format!("Failed to read {}: {}", file_path, e))?;
    Ok(bytes)
}
