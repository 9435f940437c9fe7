//! Runtime environment mapping and its key set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    KEY_AWS_ACCESS_KEY_ID, KEY_AWS_REGION, KEY_AWS_SECRET_ACCESS_KEY, KEY_S3_BUCKET_NAME,
    REDACTED,
};
use crate::error::DomainError;

/// Keys served by the runtime environment endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    AwsRegion,
    S3BucketName,
    AwsAccessKeyId,
    AwsSecretAccessKey,
}

impl EnvKey {
    /// Every known key, in wire order.
    pub const ALL: [EnvKey; 4] = [
        EnvKey::AwsRegion,
        EnvKey::S3BucketName,
        EnvKey::AwsAccessKeyId,
        EnvKey::AwsSecretAccessKey,
    ];

    /// Name of the key in the JSON payload
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::AwsRegion => KEY_AWS_REGION,
            EnvKey::S3BucketName => KEY_S3_BUCKET_NAME,
            EnvKey::AwsAccessKeyId => KEY_AWS_ACCESS_KEY_ID,
            EnvKey::AwsSecretAccessKey => KEY_AWS_SECRET_ACCESS_KEY,
        }
    }

    /// Check if the value must be masked when displayed
    pub fn is_secret(&self) -> bool {
        matches!(self, EnvKey::AwsSecretAccessKey)
    }
}

impl FromStr for EnvKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::unknown_key(s))
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime environment mapping fetched from the backend.
///
/// Every field is optional; a default value is the empty mapping used as
/// the fail-open fallback. Unknown fields are ignored, but a known key with a
/// non-string value rejects the whole payload, so the cache falls back to
/// the empty mapping.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEnv {
    #[serde(rename = "VITE_AWS_REGION", default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(rename = "VITE_S3_BUCKET_NAME", default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket_name: Option<String>,
    #[serde(rename = "VITE_AWS_ACCESS_KEY_ID", default, skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,
    #[serde(
        rename = "VITE_AWS_SECRET_ACCESS_KEY",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub aws_secret_access_key: Option<String>,
}

impl RuntimeEnv {
    /// Value for `key`, if the backend provided one.
    pub fn get(&self, key: EnvKey) -> Option<&str> {
        let slot = match key {
            EnvKey::AwsRegion => &self.aws_region,
            EnvKey::S3BucketName => &self.s3_bucket_name,
            EnvKey::AwsAccessKeyId => &self.aws_access_key_id,
            EnvKey::AwsSecretAccessKey => &self.aws_secret_access_key,
        };
        slot.as_deref()
    }

    /// Set keys and their values, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (EnvKey, &str)> + '_ {
        EnvKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }

    /// Check if no key is set
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Debug for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeEnv")
            .field("aws_region", &self.aws_region)
            .field("s3_bucket_name", &self.s3_bucket_name)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| REDACTED),
            )
            .finish()
    }
}
