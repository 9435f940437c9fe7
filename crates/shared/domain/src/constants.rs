//! Domain-level constants.
//!
//! Wire names and endpoint locations shared by every consumer of the
//! runtime environment.

// =============================================================================
// Runtime Environment Keys
// =============================================================================

/// AWS region identifier
pub const KEY_AWS_REGION: &str = "VITE_AWS_REGION";

/// Storage bucket name
pub const KEY_S3_BUCKET_NAME: &str = "VITE_S3_BUCKET_NAME";

/// Access key identifier
pub const KEY_AWS_ACCESS_KEY_ID: &str = "VITE_AWS_ACCESS_KEY_ID";

/// Access key secret
pub const KEY_AWS_SECRET_ACCESS_KEY: &str = "VITE_AWS_SECRET_ACCESS_KEY";

// =============================================================================
// Endpoint
// =============================================================================

/// Path serving the runtime environment mapping
pub const RUNTIME_ENV_PATH: &str = "/api/runtime-env";

/// Backend address used during local development
pub const DEV_BACKEND_URL: &str = "http://localhost:3001";

/// Backend address in production (same-origin request)
pub const PROD_BACKEND_URL: &str = "";

// =============================================================================
// Display
// =============================================================================

/// Placeholder printed instead of secret values
pub const REDACTED: &str = "[REDACTED]";
