//! kit-oss: Object storage adapter for the oss tool
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate against a bucket's S3-compatible API.
//! It is the only crate that directly depends on the storage SDK.

pub mod client;
pub mod endpoint;

pub use client::OssClient;
pub use endpoint::BucketEndpoint;
