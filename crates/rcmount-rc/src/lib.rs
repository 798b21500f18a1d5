//! rcmount-rc: rclone backend IO boundary.
//! Subprocess execution of control-API calls, typed response parsing,
//! and the daemon session manager. No reconciliation logic — that
//! lives in rcmount-core.

pub mod config_dump;
pub mod error;
pub mod executor;
pub mod mounts;
pub mod session;
pub mod stats;

pub use config_dump::config_dump;
pub use error::RcError;
pub use executor::{RcCommandRunner, RcExecutor};
pub use mounts::{list_mounts, mount_remote, unmount_remote};
pub use session::{DaemonSession, resolve_rclone_bin};
pub use stats::{CoreStats, core_stats};
