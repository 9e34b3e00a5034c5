//! Configuration for the object storage client
//!
//! The oss tool is configured entirely through environment variables. They are
//! read once into an [`OssConfig`] which is then handed to the client factory,
//! so nothing below the command layer looks at the process environment.

/// Bucket base URL, e.g. `https://assets-1250000000.cos.ap-guangzhou.myqcloud.com`
pub const ENV_HOST: &str = "OSS_HOST";

/// Secret ID used to sign requests
pub const ENV_SECRET_ID: &str = "OSS_SECRET_ID";

/// Secret key used to sign requests
pub const ENV_SECRET_KEY: &str = "OSS_SECRET_KEY";

/// Optional signing region override
pub const ENV_REGION: &str = "OSS_REGION";

/// Optional override for the domain printed after a successful push
pub const ENV_PUBLIC_DOMAIN: &str = "OSS_PUBLIC_DOMAIN";

/// Domain printed in front of pushed object keys.
///
/// This is a fixed front-end domain and is not derived from `OSS_HOST`.
/// Scripts parse the printed URL, so the value must stay stable.
pub const DEFAULT_PUBLIC_DOMAIN: &str = "oss.xiaoyuantongbbs.cn";

/// Connection settings for the object storage client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OssConfig {
    /// Bucket base URL
    pub host: String,

    /// Secret ID
    pub secret_id: String,

    /// Secret key
    pub secret_key: String,

    /// Signing region; inferred from the host when absent
    pub region: Option<String>,

    /// Domain used to build public object URLs
    pub public_domain: String,
}

impl OssConfig {
    /// Create a configuration from explicit values
    pub fn new(
        host: impl Into<String>,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            region: None,
            public_domain: DEFAULT_PUBLIC_DOMAIN.to_string(),
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary lookup function
    ///
    /// Unset credentials are read as empty strings; they are not validated
    /// here and only fail once a request is signed and sent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup(ENV_REGION).filter(|r| !r.is_empty());
        let public_domain = lookup(ENV_PUBLIC_DOMAIN)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_PUBLIC_DOMAIN.to_string());

        Self {
            host: lookup(ENV_HOST).unwrap_or_default(),
            secret_id: lookup(ENV_SECRET_ID).unwrap_or_default(),
            secret_key: lookup(ENV_SECRET_KEY).unwrap_or_default(),
            region,
            public_domain,
        }
    }

    /// Public URL of an object, as printed after a push
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_domain.trim_end_matches('/'), key)
    }
}
