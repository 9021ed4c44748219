//! Dispatcher configuration.
//!
//! Loaded from a TOML file by the application and passed to the dispatcher
//! builder and the runtime.  Every field has a default, so an empty file is a
//! valid configuration:
//!
//! ```toml
//! timeout_secs        = 60
//! sweep_interval_secs = 60
//! strategy            = "closest_idle_robot"
//! event_buffer        = 256
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FdError, FdResult};

/// Which assignment strategy the dispatch engine runs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Requests stay queued; no robot is ever assigned.
    Deactivated,
    /// Assign the idle robot closest (in hops) to the pickup node.
    #[default]
    ClosestIdleRobot,
}

/// Top-level dispatcher configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// A robot silent for longer than this is evicted.  Default: 60.
    pub timeout_secs: u64,

    /// Period of the timeout sweep.  Default: 60.
    pub sweep_interval_secs: u64,

    /// Assignment strategy.  Default: `closest_idle_robot`.
    pub strategy: StrategyKind,

    /// Capacity of the runtime's inbound event channel.  Default: 256.
    pub event_buffer: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_secs:        60,
            sweep_interval_secs: 60,
            strategy:            StrategyKind::default(),
            event_buffer:        256,
        }
    }
}

impl DispatchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> FdResult<Self> {
        let config: DispatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> FdResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would disable eviction or stall the runtime.
    pub fn validate(&self) -> FdResult<()> {
        if self.timeout_secs == 0 {
            return Err(FdError::Config("timeout_secs must be > 0".into()));
        }
        if self.sweep_interval_secs == 0 {
            return Err(FdError::Config("sweep_interval_secs must be > 0".into()));
        }
        if self.event_buffer == 0 {
            return Err(FdError::Config("event_buffer must be > 0".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[inline]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
