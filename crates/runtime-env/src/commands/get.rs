//! Get command - Prints a single key.

use common::{AppResult, OptionExt};

use crate::cache::RuntimeEnvCache;
use crate::cli::GetArgs;

/// Execute the get command
pub async fn execute(args: GetArgs, cache: &RuntimeEnvCache) -> AppResult<()> {
    let value = cache
        .get_config_value(args.key)
        .await
        .ok_or_not_found(args.key.as_str())?;

    println!("{}", value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use common::AppError;
    use domain::{EnvKey, RuntimeEnv};

    use super::*;
    use crate::cache::CachePolicy;
    use crate::source::MockEnvSource;

    fn cache_with(env: RuntimeEnv) -> RuntimeEnvCache {
        let mut source = MockEnvSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(move || Ok(env.clone()));
        RuntimeEnvCache::new(Arc::new(source), CachePolicy::forever())
    }

    #[tokio::test]
    async fn test_unset_key_is_not_found() {
        let cache = cache_with(RuntimeEnv::default());
        let args = GetArgs {
            key: EnvKey::S3BucketName,
        };

        let err = execute(args, &cache).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "VITE_S3_BUCKET_NAME is not set");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_set_key_succeeds() {
        let cache = cache_with(RuntimeEnv {
            aws_region: Some("us-west-2".to_string()),
            ..Default::default()
        });
        let args = GetArgs {
            key: EnvKey::AwsRegion,
        };

        assert!(execute(args, &cache).await.is_ok());
    }
}
