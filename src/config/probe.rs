// ABOUTME: Engine readiness probe configuration.
// ABOUTME: Poll interval, retry budget, and start period with sensible defaults.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default = "default_start_period", with = "humantime_serde")]
    pub start_period: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            retries: default_retries(),
            start_period: default_start_period(),
        }
    }
}

fn default_interval() -> Duration {
    Duration::from_secs(2)
}

fn default_retries() -> u32 {
    15
}

fn default_start_period() -> Duration {
    Duration::from_secs(5)
}
