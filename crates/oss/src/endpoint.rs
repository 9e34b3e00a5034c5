//! Bucket URL handling
//!
//! `OSS_HOST` holds a virtual-hosted bucket URL such as
//! `https://assets-1250000000.cos.ap-guangzhou.myqcloud.com`. The SDK wants
//! the bucket name and the service endpoint separately, so the first DNS
//! label is split off as the bucket.

use kit_core::{Error, Result};
use url::{Host, Url};

/// Region used when neither configuration nor host name provide one
pub const DEFAULT_REGION: &str = "us-east-1";

/// A bucket URL split into the parts the SDK needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEndpoint {
    /// Bucket name
    pub bucket: String,
    /// Service endpoint URL without the bucket label
    pub endpoint: String,
    /// Signing region
    pub region: String,
}

impl BucketEndpoint {
    /// Split a bucket URL, using `region` when given and inferring it otherwise
    pub fn parse(host: &str, region: Option<&str>) -> Result<Self> {
        let url = Url::parse(host).map_err(|e| Error::InvalidUrl(format!("{host}: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::InvalidUrl(format!(
                "{host}: unsupported scheme '{}'",
                url.scheme()
            )));
        }

        let host_name = match url.host() {
            Some(Host::Domain(name)) => name,
            Some(Host::Ipv4(_) | Host::Ipv6(_)) => {
                return Err(Error::InvalidUrl(format!(
                    "{host}: bucket URL must be a DNS name"
                )));
            }
            None => return Err(Error::InvalidUrl(format!("{host}: missing host"))),
        };

        let (bucket, service) = host_name
            .split_once('.')
            .filter(|(bucket, service)| !bucket.is_empty() && !service.is_empty())
            .ok_or_else(|| {
                Error::InvalidUrl(format!("{host}: expected <bucket>.<service host>"))
            })?;

        let endpoint = match url.port() {
            Some(port) => format!("{}://{service}:{port}", url.scheme()),
            None => format!("{}://{service}", url.scheme()),
        };

        let region = region
            .map(str::to_string)
            .or_else(|| infer_region(service))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            bucket: bucket.to_string(),
            endpoint,
            region,
        })
    }
}

/// `cos.<region>.myqcloud.com` and `s3.<region>.amazonaws.com` carry the region
fn infer_region(service: &str) -> Option<String> {
    let labels: Vec<&str> = service.split('.').collect();
    match labels.as_slice() {
        ["cos" | "s3", region, _, _, ..] => Some(region.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cos_bucket_url() {
        let endpoint =
            BucketEndpoint::parse("https://assets-1250.cos.ap-guangzhou.myqcloud.com", None)
                .unwrap();
        assert_eq!(endpoint.bucket, "assets-1250");
        assert_eq!(endpoint.endpoint, "https://cos.ap-guangzhou.myqcloud.com");
        assert_eq!(endpoint.region, "ap-guangzhou");
    }

    #[test]
    fn test_parse_s3_bucket_url() {
        let endpoint =
            BucketEndpoint::parse("https://logs.s3.eu-west-1.amazonaws.com/", None).unwrap();
        assert_eq!(endpoint.bucket, "logs");
        assert_eq!(endpoint.region, "eu-west-1");
    }

    #[test]
    fn test_parse_keeps_port_and_defaults_region() {
        let endpoint = BucketEndpoint::parse("http://media.localhost:9000", None).unwrap();
        assert_eq!(endpoint.bucket, "media");
        assert_eq!(endpoint.endpoint, "http://localhost:9000");
        assert_eq!(endpoint.region, DEFAULT_REGION);
    }

    #[test]
    fn test_explicit_region_wins() {
        let endpoint = BucketEndpoint::parse(
            "https://assets-1250.cos.ap-guangzhou.myqcloud.com",
            Some("ap-beijing"),
        )
        .unwrap();
        assert_eq!(endpoint.region, "ap-beijing");
    }

    #[test]
    fn test_parse_rejects_unusable_urls() {
        assert!(BucketEndpoint::parse("", None).is_err());
        assert!(BucketEndpoint::parse("not a url", None).is_err());
        assert!(BucketEndpoint::parse("https://localhost", None).is_err());
        assert!(BucketEndpoint::parse("ftp://bucket.example.com", None).is_err());
    }

    #[test]
    fn test_parse_rejects_ip_hosts() {
        for host in ["http://10.0.0.7:9000", "https://[::1]:9000"] {
            let err = BucketEndpoint::parse(host, None).unwrap_err();
            match err {
                Error::InvalidUrl(msg) => assert!(msg.contains("must be a DNS name"), "{msg}"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
