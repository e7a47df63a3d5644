//! Hold lifetime and sweep configuration.

use serde::{Deserialize, Serialize};

/// Hold lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldConfig {
    /// How long a hold stays confirmable before it expires, in seconds.
    #[serde(default = "default_hold_duration")]
    pub hold_duration_seconds: u64,
    /// Interval for the background expiry sweep, in seconds. Only used
    /// when `background_sweep` is enabled.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Whether the front end should run a periodic background sweep in
    /// addition to the on-access sweep. Bounds reclaim latency when the
    /// service receives no calls.
    #[serde(default)]
    pub background_sweep: bool,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            hold_duration_seconds: default_hold_duration(),
            sweep_interval_seconds: default_sweep_interval(),
            background_sweep: false,
        }
    }
}

fn default_hold_duration() -> u64 {
    120
}

fn default_sweep_interval() -> u64 {
    30
}
