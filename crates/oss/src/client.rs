//! Object storage client implementation
//!
//! Wraps aws-sdk-s3 against the bucket's S3-compatible API and implements the
//! ObjectStore trait from kit-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::AsyncWriteExt;

use kit_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectStore, OssConfig, Result};

use crate::endpoint::{BucketEndpoint, DEFAULT_REGION};

/// Client for a single bucket
pub struct OssClient {
    inner: aws_sdk_s3::Client,
    target: Option<BucketEndpoint>,
    host: String,
}

impl OssClient {
    /// Create a new client from explicit configuration
    ///
    /// A bucket URL that cannot be split into bucket and endpoint does not
    /// fail here; every request made through the client fails instead.
    pub async fn new(config: &OssConfig) -> Result<Self> {
        let target = match BucketEndpoint::parse(&config.host, config.region.as_deref()) {
            Ok(target) => Some(target),
            Err(e) => {
                tracing::warn!(host = %config.host, error = %e, "bucket URL is unusable");
                None
            }
        };

        let credentials = aws_credential_types::Credentials::new(
            config.secret_id.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "oss-static-credentials",
        );

        let region = target
            .as_ref()
            .map(|t| t.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(region));

        if let Some(target) = &target {
            loader = loader.endpoint_url(&target.endpoint);
        }

        let sdk_config = loader.load().await;

        // Virtual-hosted addressing: requests go to <bucket>.<endpoint host>
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(false)
            .build();

        if let Some(target) = &target {
            tracing::debug!(
                bucket = %target.bucket,
                endpoint = %target.endpoint,
                region = %target.region,
                "created object storage client"
            );
        }

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            target,
            host: config.host.clone(),
        })
    }

    fn bucket(&self) -> Result<&str> {
        self.target
            .as_ref()
            .map(|t| t.bucket.as_str())
            .ok_or_else(|| Error::InvalidUrl(format!("cannot address bucket at '{}'", self.host)))
    }
}

/// Classify an SDK failure by the error code embedded in its message
fn map_sdk_error<E>(err: E, key: &str) -> Error
where
    E: std::error::Error,
{
    let message = DisplayErrorContext(&err).to_string();
    if message.contains("NoSuchKey") || message.contains("NotFound") {
        Error::NotFound(key.to_string())
    } else if message.contains("AccessDenied")
        || message.contains("InvalidAccessKeyId")
        || message.contains("SignatureDoesNotMatch")
    {
        Error::Auth(message)
    } else {
        Error::Network(message)
    }
}

#[async_trait]
impl ObjectStore for OssClient {
    async fn put_file(&self, key: &str, path: &Path) -> Result<ObjectInfo> {
        let bucket = self.bucket()?;
        let size = tokio::fs::metadata(path).await?.len();

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;

        let content_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string());

        let response = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .set_content_type(content_type)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;

        let mut info = ObjectInfo::new(key, size);
        if let Some(etag) = response.e_tag() {
            info.etag = Some(etag.trim_matches('"').to_string());
        }
        info.last_modified = Some(jiff::Timestamp::now());

        tracing::debug!(key, size, "uploaded object");
        Ok(info)
    }

    async fn get_to_file(&self, key: &str, path: &Path) -> Result<u64> {
        let bucket = self.bucket()?;

        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;

        // The local file is only created once the object is known to exist.
        let mut body = response.body.into_async_read();
        let mut file = tokio::fs::File::create(path).await?;
        let bytes = tokio::io::copy(&mut body, &mut file).await?;
        file.flush().await?;

        tracing::debug!(key, bytes, path = %path.display(), "downloaded object");
        Ok(bytes)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        let bucket = self.bucket()?;

        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, key))?;

        tracing::debug!(key, "deleted object");
        Ok(())
    }

    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        let bucket = self.bucket()?;
        let prefix = options.prefix.clone().unwrap_or_default();

        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(options.prefix)
            .set_max_keys(options.max_keys)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &prefix))?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let size = object.size().unwrap_or(0).max(0) as u64;
                let mut info = ObjectInfo::new(object.key().unwrap_or_default(), size);

                if let Some(modified) = object.last_modified() {
                    info.last_modified = jiff::Timestamp::from_second(modified.secs()).ok();
                }

                if let Some(etag) = object.e_tag() {
                    info.etag = Some(etag.trim_matches('"').to_string());
                }

                info
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }
}
