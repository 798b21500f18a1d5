//! Daemon session manager: spawn/attach `rclone rcd` and run the typed
//! control-API operations against it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use rcmount_core::{CacheMode, RemoteConfig, Settings};

use crate::config_dump::config_dump;
use crate::error::RcError;
use crate::executor::{RcCommandRunner, RcExecutor};
use crate::mounts::{list_mounts, mount_remote, unmount_remote};
use crate::stats::{CoreStats, core_stats};

/// Conventional Homebrew location; launchd-style environments often
/// omit it from PATH.
const FALLBACK_BIN: &str = "/usr/local/bin/rclone";

const READY_ATTEMPTS: u32 = 10;
const READY_DELAY: Duration = Duration::from_millis(200);

/// Handle on the daemon's control API for the duration of one
/// invocation. Holds the spawned child, if any; the daemon is never
/// killed on drop — it owns the mounts and outlives the invocation.
pub struct DaemonSession<R: RcCommandRunner> {
    runner: R,
    cache_mode: CacheMode,
    child: Option<Child>,
}

impl DaemonSession<RcExecutor> {
    /// Attach to a daemon assumed to be running: dependency check plus
    /// executor construction, no spawn. Used by action invocations.
    pub fn attach(settings: &Settings) -> Result<Self, RcError> {
        let bin = resolve_rclone_bin()?;
        Ok(Self {
            runner: RcExecutor::new(bin, settings.rc_port),
            cache_mode: settings.cache_mode,
            child: None,
        })
    }

    /// Launch the daemon and attach to it.
    ///
    /// If another daemon already owns the port, the spawned process
    /// exits on its own and every call lands on the existing instance —
    /// a tolerated race, not validated here.
    pub fn start(settings: &Settings) -> Result<Self, RcError> {
        let mut session = Self::attach(settings)?;
        std::fs::create_dir_all(&settings.mount_dir)?;

        let child = Command::new(session.runner.bin())
            .args([
                "rcd",
                "--rc-no-auth",
                &format!("--rc-addr=localhost:{}", settings.rc_port),
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!("spawned rclone rcd (pid {})", child.id());
        session.child = Some(child);

        session.wait_ready();
        Ok(session)
    }

    /// Wait for the control port to answer after a spawn. Gives up
    /// quietly after READY_ATTEMPTS; the first real query surfaces the
    /// error if the daemon never came up.
    fn wait_ready(&self) {
        for _ in 0..READY_ATTEMPTS {
            if core_stats(&self.runner).is_ok() {
                return;
            }
            std::thread::sleep(READY_DELAY);
        }
        tracing::warn!("rclone control port did not answer within the ready window");
    }
}

impl<R: RcCommandRunner> DaemonSession<R> {
    /// Session over an arbitrary runner, for tests and embedding.
    pub fn with_runner(runner: R, cache_mode: CacheMode) -> Self {
        Self {
            runner,
            cache_mode,
            child: None,
        }
    }

    /// True when this session spawned the daemon itself (as opposed to
    /// attaching to one).
    pub fn spawned_daemon(&self) -> bool {
        self.child.is_some()
    }

    /// Identifiers of currently mounted filesystems, e.g. `"dropbox:"`.
    pub fn list_mounts(&self) -> Result<HashSet<String>, RcError> {
        list_mounts(&self.runner)
    }

    pub fn stats(&self) -> Result<CoreStats, RcError> {
        core_stats(&self.runner)
    }

    /// Remote configuration, excluding local-type entries.
    pub fn dump_config(&self) -> Result<BTreeMap<String, RemoteConfig>, RcError> {
        config_dump(&self.runner)
    }

    /// Mount `name` at `mount_point`, creating the directory first.
    /// Creation is idempotent; an existing directory is not an error.
    pub fn mount(&self, name: &str, mount_point: &Path, volume: &str) -> Result<(), RcError> {
        std::fs::create_dir_all(mount_point)?;
        mount_remote(
            &self.runner,
            name,
            &mount_point.display().to_string(),
            volume,
            self.cache_mode,
        )
    }

    /// Unmount the filesystem at `mount_point` and remove the emptied
    /// directory. A failed removal means the unmount did not actually
    /// complete; that is surfaced, not swallowed.
    pub fn unmount(&self, mount_point: &Path) -> Result<(), RcError> {
        unmount_remote(&self.runner, &mount_point.display().to_string())?;
        std::fs::remove_dir(mount_point).map_err(|e| RcError::Unmount {
            mount_point: mount_point.display().to_string(),
            detail: format!("mount point not removed: {e}"),
        })
    }
}

/// Resolve the rclone executable: search path first, then the
/// conventional /usr/local/bin fallback.
pub fn resolve_rclone_bin() -> Result<String, RcError> {
    let on_path = Command::new("which")
        .arg("rclone")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if on_path {
        return Ok("rclone".to_string());
    }
    if Path::new(FALLBACK_BIN).exists() {
        return Ok(FALLBACK_BIN.to_string());
    }
    Err(RcError::DependencyMissing)
}
