//! Remote records and the config/mount-list reconciler.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Config entries of this type describe the host filesystem, not a remote.
pub const LOCAL_TYPE: &str = "local";

/// Separator appended to a remote name to form the mount identifier
/// reported by `vfs/list`.
pub const MOUNT_SUFFIX: char = ':';

/// One entry from the daemon's `config/dump`. Snapshot, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Storage backend kind, e.g. `"drive"`, `"s3"`, or `"local"`.
    #[serde(rename = "type")]
    pub remote_type: String,
    /// Volume label for the mounted filesystem. Falls back to the
    /// remote name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
}

impl RemoteConfig {
    pub fn is_local(&self) -> bool {
        self.remote_type == LOCAL_TYPE
    }
}

/// Joined view of one configured remote and its live mount state.
/// Rebuilt from scratch on every poll; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledRemote {
    pub name: String,
    /// Volume label shown to the user.
    pub volume: String,
    /// Where this remote mounts: base mount dir joined with the name.
    pub mount_path: PathBuf,
    pub mounted: bool,
}

/// Mount identifier for a remote name as it appears in `vfs/list`.
pub fn mount_id(name: &str) -> String {
    format!("{name}{MOUNT_SUFFIX}")
}

/// Cross-reference configured remotes against the live mount list.
///
/// Deterministic given its three inputs, no IO. Produces exactly one
/// entry per non-local config entry, keyed by remote name.
pub fn reconcile(
    config: &BTreeMap<String, RemoteConfig>,
    mounted: &HashSet<String>,
    base_mount_dir: &Path,
) -> BTreeMap<String, ReconciledRemote> {
    let mut remotes = BTreeMap::new();
    for (name, cfg) in config {
        if cfg.is_local() {
            continue;
        }
        remotes.insert(
            name.clone(),
            ReconciledRemote {
                name: name.clone(),
                volume: cfg.volume_name.clone().unwrap_or_else(|| name.clone()),
                mount_path: base_mount_dir.join(name),
                mounted: mounted.contains(&mount_id(name)),
            },
        );
    }
    remotes
}
