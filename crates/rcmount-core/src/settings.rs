//! Runtime settings: base mount directory, control port, cache mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default port for the rclone control API. Off the standard 5572 so a
/// user-started `rclone rcd` is left alone.
pub const DEFAULT_RC_PORT: u16 = 5575;

/// VFS cache level passed along with `mount/mount`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    Off,
    Minimal,
    Writes,
    #[default]
    Full,
}

impl CacheMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Minimal => "minimal",
            Self::Writes => "writes",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "minimal" => Ok(Self::Minimal),
            "writes" => Ok(Self::Writes),
            "full" => Ok(Self::Full),
            _ => Err(format!(
                "unknown cache mode: {s} (expected off|minimal|writes|full)"
            )),
        }
    }
}

/// Explicit configuration passed into the session and reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base directory under which every remote mounts at `<base>/<name>`.
    pub mount_dir: PathBuf,
    /// Local port the rclone control API listens on.
    pub rc_port: u16,
    pub cache_mode: CacheMode,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mount_dir: default_mount_dir(),
            rc_port: DEFAULT_RC_PORT,
            cache_mode: CacheMode::default(),
            verbose: false,
        }
    }
}

/// `~/clouds`, falling back to a relative `clouds` when the home
/// directory cannot be resolved.
pub fn default_mount_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("clouds"))
        .unwrap_or_else(|| PathBuf::from("clouds"))
}
