//! Transfer target parsing
//!
//! The sftp tool addresses a remote location with a single string of the form
//! `user:password@host/remote/path`. The username ends at the first colon, the
//! password runs up to the last `@`, the host ends at the first following `/`,
//! and the rest (slash included) is the absolute remote path.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static TARGET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(.+)@(.+?)(/.*)").expect("transfer target pattern is valid")
});

/// A parsed remote transfer location
#[derive(Clone, PartialEq, Eq)]
pub struct TransferTarget {
    /// Login user name
    pub user: String,
    /// Login password
    pub password: String,
    /// Host name or IP address
    pub host: String,
    /// Absolute remote path, always starting with `/`
    pub path: String,
}

impl TransferTarget {
    /// Parse a `user:password@host/path` address
    pub fn parse(address: &str) -> Result<Self> {
        let captures = TARGET_PATTERN.captures(address).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "expected user:password@host/path, got '{}'",
                redact(address)
            ))
        })?;

        let group = |i: usize| {
            captures
                .get(i)
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| Error::InvalidParameter(format!("missing address part {i}")))
        };

        Ok(Self {
            user: group(1)?,
            password: group(2)?,
            host: group(3)?,
            path: group(4)?,
        })
    }
}

// Keep passwords out of Debug output and logs.
impl std::fmt::Debug for TransferTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferTarget")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("path", &self.path)
            .finish()
    }
}

impl std::fmt::Display for TransferTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}{}", self.user, self.host, self.path)
    }
}

impl std::str::FromStr for TransferTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Strip anything between the first colon and the last `@`
fn redact(address: &str) -> String {
    match (address.find(':'), address.rfind('@')) {
        (Some(colon), Some(at)) if colon < at => {
            format!("{}:***{}", &address[..colon], &address[at..])
        }
        _ => address.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_address() {
        let target = TransferTarget::parse("root:secret@10.0.0.7/data/app").unwrap();
        assert_eq!(target.user, "root");
        assert_eq!(target.password, "secret");
        assert_eq!(target.host, "10.0.0.7");
        assert_eq!(target.path, "/data/app");
    }

    #[test]
    fn test_parse_password_with_separators() {
        let target = TransferTarget::parse("deploy:p@ss:w0rd@example.com/srv/www").unwrap();
        assert_eq!(target.user, "deploy");
        assert_eq!(target.password, "p@ss:w0rd");
        assert_eq!(target.host, "example.com");
        assert_eq!(target.path, "/srv/www");
    }

    #[test]
    fn test_parse_root_path() {
        let target = TransferTarget::parse("u:p@host/").unwrap();
        assert_eq!(target.host, "host");
        assert_eq!(target.path, "/");
    }

    #[test]
    fn test_parse_missing_at() {
        let err = TransferTarget::parse("root:secret/host/path").unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_parse_missing_path_slash() {
        assert!(TransferTarget::parse("root:secret@host").is_err());
    }

    #[test]
    fn test_parse_missing_colon() {
        assert!(TransferTarget::parse("root@host/path").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(TransferTarget::parse("").is_err());
    }

    #[test]
    fn test_error_does_not_leak_password() {
        let err = TransferTarget::parse("root:hunter2@host").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_display_and_debug_hide_password() {
        let target: TransferTarget = "root:hunter2@host/tmp".parse().unwrap();
        assert_eq!(target.to_string(), "root@host/tmp");
        assert!(!format!("{target:?}").contains("hunter2"));
    }
}
