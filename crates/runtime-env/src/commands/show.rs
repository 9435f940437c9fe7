//! Show command - Prints every known key.

use common::{AppError, AppResult};
use domain::{EnvKey, RuntimeEnv, REDACTED};

use crate::cache::RuntimeEnvCache;
use crate::cli::ShowArgs;

/// Execute the show command
pub async fn execute(args: ShowArgs, cache: &RuntimeEnvCache) -> AppResult<()> {
    let env = cache.get_config().await;
    let visible = masked(&env, args.reveal);

    if args.json {
        println!("{}", render_json(&visible)?);
    } else {
        for line in render_lines(&visible) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Copy of `env` with secrets replaced, unless `reveal` is set.
fn masked(env: &RuntimeEnv, reveal: bool) -> RuntimeEnv {
    let mut visible = env.clone();
    if !reveal && visible.aws_secret_access_key.is_some() {
        visible.aws_secret_access_key = Some(REDACTED.to_string());
    }
    visible
}

fn render_json(env: &RuntimeEnv) -> AppResult<String> {
    serde_json::to_string_pretty(env)
        .map_err(|e| AppError::internal(format!("Failed to render runtime environment: {}", e)))
}

/// One `KEY=value` line per known key; unset keys are marked.
fn render_lines(env: &RuntimeEnv) -> Vec<String> {
    EnvKey::ALL
        .into_iter()
        .map(|key| match env.get(key) {
            Some(value) => format!("{}={}", key, value),
            None => format!("{} (unset)", key),
        })
        .collect()
}
