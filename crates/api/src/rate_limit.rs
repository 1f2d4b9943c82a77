//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per peer IP rate limiting with tower_governor. Requires the service to be
//! served with `into_make_service_with_connect_info::<SocketAddr>()`.

use crate::error::ApiError;
use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config with X-RateLimit-* headers enabled
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Seconds to replenish one request
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 2,
            burst_size: 5,
        }
    }
}

/// Build the governor config for `GovernorLayer`
pub fn create_governor_config(
    config: &RateLimitConfig,
) -> Result<Arc<DefaultGovernorConfig>, ApiError> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
        .ok_or_else(|| {
            ApiError::Settings(format!(
                "rate limit needs non-zero per_second and burst_size (got {} and {})",
                config.per_second, config.burst_size
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_second, 2);
        assert_eq!(config.burst_size, 5);
    }

    #[test]
    fn test_create_governor_config() {
        let governor = create_governor_config(&RateLimitConfig::default()).unwrap();
        assert!(Arc::strong_count(&governor) > 0);
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            per_second: 1,
            burst_size: 0,
        };
        assert!(matches!(
            create_governor_config(&config),
            Err(ApiError::Settings(_))
        ));
    }
}
