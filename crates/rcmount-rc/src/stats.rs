//! Aggregate transfer statistics (`core/stats`).

use crate::error::RcError;
use crate::executor::RcCommandRunner;
use serde::Deserialize;

/// Subset of the `core/stats` reply the caller cares about. "Active" is
/// derived from the mounted-set size, not from here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct CoreStats {
    /// Current aggregate transfer speed in bytes per second.
    #[serde(default)]
    pub speed: f64,
}

/// Fetch aggregate transfer statistics from the daemon.
pub fn core_stats(runner: &impl RcCommandRunner) -> Result<CoreStats, RcError> {
    let raw = runner.run(&["core/stats"])?;
    serde_json::from_str(&raw).map_err(|e| RcError::Protocol {
        call: "core/stats",
        detail: e.to_string(),
    })
}
